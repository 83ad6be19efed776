/// Scheduler — drives updaters frame by frame.
///
/// Uses a SlotMap so updater keys stay valid across removals. Each frame
/// runs in two passes: pending setups first, then ticks in insertion order.

use slotmap::{new_key_type, SlotMap};
use super::updater::{FrameContext, Updater};

new_key_type! {
    /// Stable key for an updater registered with a Scheduler
    pub struct UpdaterKey;
}

/// Lifecycle of a registered updater
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdaterState {
    /// Waiting for the setup pass of the next frame
    Pending,
    /// Set up; ticked every frame
    Running,
    /// Setup returned an error; never ticked, never retried
    Failed,
}

struct Slot {
    updater: Box<dyn Updater>,
    state: UpdaterState,
}

pub struct Scheduler {
    updaters: SlotMap<UpdaterKey, Slot>,
    /// Keys in registration order (SlotMap iteration order is slot order)
    order: Vec<UpdaterKey>,
    frame_count: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            updaters: SlotMap::with_key(),
            order: Vec::new(),
            frame_count: 0,
        }
    }

    /// Register an updater; its setup runs at the start of the next frame
    pub fn add_updater(&mut self, updater: Box<dyn Updater>) -> UpdaterKey {
        let key = self.updaters.insert(Slot {
            updater,
            state: UpdaterState::Pending,
        });
        self.order.push(key);
        key
    }

    /// Unregister an updater. Returns false if the key is invalid.
    pub fn remove_updater(&mut self, key: UpdaterKey) -> bool {
        if self.updaters.remove(key).is_some() {
            self.order.retain(|&k| k != key);
            true
        } else {
            false
        }
    }

    pub fn updater_state(&self, key: UpdaterKey) -> Option<UpdaterState> {
        self.updaters.get(key).map(|slot| slot.state)
    }

    /// Registered updater as its concrete type
    ///
    /// Returns None if the key is invalid or the updater is not a `T`.
    pub fn updater<T: Updater + 'static>(&self, key: UpdaterKey) -> Option<&T> {
        self.updaters.get(key)?.updater.as_any().downcast_ref::<T>()
    }

    pub fn updater_mut<T: Updater + 'static>(&mut self, key: UpdaterKey) -> Option<&mut T> {
        self.updaters.get_mut(key)?.updater.as_any_mut().downcast_mut::<T>()
    }

    pub fn updater_count(&self) -> usize {
        self.updaters.len()
    }

    /// Number of completed frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run one frame: every pending setup, then every tick
    pub fn run_frame(&mut self, ctx: &mut FrameContext<'_>) {
        for key in &self.order {
            let Some(slot) = self.updaters.get_mut(*key) else { continue };
            if slot.state != UpdaterState::Pending {
                continue;
            }
            slot.state = match slot.updater.setup(ctx) {
                Ok(()) => UpdaterState::Running,
                Err(err) => {
                    crate::engine_warn!("tracker::Scheduler",
                        "Updater {:?} disabled after failed setup: {}", key, err);
                    UpdaterState::Failed
                }
            };
        }

        for key in &self.order {
            if let Some(slot) = self.updaters.get_mut(*key) {
                if slot.state == UpdaterState::Running {
                    slot.updater.tick(ctx);
                }
            }
        }

        self.frame_count += 1;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
