//! Frame driver
//!
//! Stands in for the host engine's start/update callbacks with an explicit
//! `Updater::setup` / `Updater::tick` contract.

mod scheduler;
mod updater;

pub use scheduler::{Scheduler, UpdaterKey, UpdaterState};
pub use updater::{FrameContext, Updater};
