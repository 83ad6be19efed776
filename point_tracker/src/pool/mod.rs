//! Object pooling
//!
//! An `ObjectPool` recycles host entities created from one prototype.
//! Pools are registered by name in a `PoolRegistry`.

mod object_pool;
mod pool_registry;

pub use object_pool::{ObjectPool, PoolConfig};
pub use pool_registry::PoolRegistry;
