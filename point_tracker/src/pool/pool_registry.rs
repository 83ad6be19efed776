/// Registry of named object pools.
///
/// Replaces a process-wide pool accessor: the registry is created by the
/// application and handed to trackers through the frame context. Each
/// tracker names the pool it draws from.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::engine_bail;
use crate::host::EntityHost;
use super::object_pool::{ObjectPool, PoolConfig};

pub struct PoolRegistry {
    pools: FxHashMap<String, ObjectPool>,
}

impl PoolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            pools: FxHashMap::default(),
        }
    }

    /// Create, populate and register a pool under `name`
    ///
    /// # Errors
    ///
    /// Returns an error if a pool with the same name is already registered
    /// (nothing is created in that case), or if the pool configuration is
    /// invalid.
    pub fn create_pool(
        &mut self,
        name: &str,
        host: &mut dyn EntityHost,
        config: PoolConfig,
    ) -> Result<&mut ObjectPool> {
        if self.pools.contains_key(name) {
            engine_bail!(InitializationFailed, "tracker::PoolRegistry",
                "Pool '{}' already exists", name);
        }

        let pool = ObjectPool::new(name, host, config)?;
        Ok(self.pools.entry(name.to_string()).or_insert(pool))
    }

    pub fn pool(&self, name: &str) -> Option<&ObjectPool> {
        self.pools.get(name)
    }

    pub fn pool_mut(&mut self, name: &str) -> Option<&mut ObjectPool> {
        self.pools.get_mut(name)
    }

    /// Unregister a pool. Its entities stay alive in the host.
    pub fn remove_pool(&mut self, name: &str) -> Option<ObjectPool> {
        self.pools.remove(name)
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn pool_names(&self) -> Vec<&str> {
        self.pools.keys().map(|k| k.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.pools.clear();
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "pool_registry_tests.rs"]
mod tests;
