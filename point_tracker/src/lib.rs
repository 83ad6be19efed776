/*!
# Point Tracker

Tracks the world-space positions of a mesh's vertices every frame by moving
one lightweight marker entity onto each vertex.

## Architecture

- **ObjectPool**: recycles marker entities created from a prototype
- **PoolRegistry**: named pools, handed to trackers explicitly
- **VertexTracker**: acquires one marker per vertex at setup, moves them every tick
- **Scheduler**: runs all pending setups, then all ticks, once per frame
- **EntityHost**: the engine surface (instantiate, parent, activate, move);
  `World` is the in-memory implementation

## Example

```no_run
use point_tracker::tracker::host::{Mesh, Prototype, Transform, World};
use point_tracker::tracker::pool::{PoolConfig, PoolRegistry};
use point_tracker::tracker::scheduler::{FrameContext, Scheduler};
use point_tracker::tracker::vertex::VertexTracker;
use point_tracker::glam::Vec3;

let mut world = World::new();
let mut pools = PoolRegistry::new();
pools.create_pool("markers", &mut world, PoolConfig::new(Prototype::new("marker")))?;

let cube = world.spawn("cube", Transform::IDENTITY);
world.attach_mesh(cube, Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y]))?;

let mut scheduler = Scheduler::new();
scheduler.add_updater(Box::new(VertexTracker::new(cube, "markers")));
scheduler.run_frame(&mut FrameContext::new(&mut world, &mut pools));
# Ok::<(), point_tracker::tracker::Error>(())
```
*/

// Internal modules
mod error;
mod engine;
pub mod log;
mod host;
mod pool;
mod scheduler;
mod vertex;

#[cfg(test)]
mod test_support;

// Main tracker namespace module
pub mod tracker {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only; macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Host engine boundary
    pub mod host {
        pub use crate::host::*;
    }

    // Object pooling
    pub mod pool {
        pub use crate::pool::*;
    }

    // Frame driver
    pub mod scheduler {
        pub use crate::scheduler::*;
    }

    // Vertex tracking
    pub mod vertex {
        pub use crate::vertex::*;
    }
}

// Re-export math library at crate root
pub use glam;
