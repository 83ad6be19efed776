/// Two-phase per-object behaviour.
///
/// `setup` runs once, before the object's first tick. `tick` runs once per
/// frame afterwards. The `Scheduler` guarantees that every pending setup of
/// a frame completes before any tick of that frame.

use std::any::Any;
use crate::error::Result;
use crate::host::EntityHost;
use crate::pool::PoolRegistry;

/// Collaborators available to updaters during a frame
pub struct FrameContext<'a> {
    pub host: &'a mut dyn EntityHost,
    pub pools: &'a mut PoolRegistry,
}

impl<'a> FrameContext<'a> {
    pub fn new(host: &'a mut dyn EntityHost, pools: &'a mut PoolRegistry) -> Self {
        Self { host, pools }
    }
}

pub trait Updater {
    /// One-time initialization. An error disables the updater for good.
    fn setup(&mut self, ctx: &mut FrameContext<'_>) -> Result<()>;

    /// Per-frame update. Runs to completion; has no failure path.
    fn tick(&mut self, ctx: &mut FrameContext<'_>);

    /// Concrete type access, used by `Scheduler::updater`
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
