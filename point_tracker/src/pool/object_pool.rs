/// Object pool for expensive-to-create host entities.
///
/// Entities are instantiated from a single prototype, parented under the
/// pool's container and recycled by toggling their active flag. The pool
/// never destroys what it created.

use crate::error::Result;
use crate::engine_bail;
use crate::host::{EntityHost, EntityKey, Prototype};

/// Pool setup parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PoolConfig {
    /// Template for every pooled entity. Required.
    pub prototype: Option<Prototype>,
    /// Entities created up front
    pub initial_size: usize,
    /// Create one more entity when no inactive one is left
    pub expand_on_exhaustion: bool,
}

impl PoolConfig {
    pub fn new(prototype: Prototype) -> Self {
        Self {
            prototype: Some(prototype),
            ..Self::default()
        }
    }

    pub fn with_initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    pub fn with_expand_on_exhaustion(mut self, expand: bool) -> Self {
        self.expand_on_exhaustion = expand;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            prototype: None,
            initial_size: 100,
            expand_on_exhaustion: true,
        }
    }
}

pub struct ObjectPool {
    name: String,
    prototype: Prototype,
    initial_size: usize,
    expand_on_exhaustion: bool,
    /// Parent of every pooled entity
    container: EntityKey,
    /// Pooled entities in creation order
    entities: Vec<EntityKey>,
}

impl ObjectPool {
    /// Create a pool and populate it with `config.initial_size` entities
    ///
    /// Populated entities are deactivated right after instantiation, whatever
    /// the prototype's own active state, so all of them are available to
    /// `acquire`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error (logged once) if no prototype is set.
    /// No container or entity is created in that case.
    pub fn new(name: &str, host: &mut dyn EntityHost, config: PoolConfig) -> Result<Self> {
        let PoolConfig { prototype, initial_size, expand_on_exhaustion } = config;
        let prototype = match prototype {
            Some(prototype) => prototype,
            None => engine_bail!(Configuration, "tracker::ObjectPool",
                "Pool '{}': a pooled object prototype must be specified", name),
        };

        let container = host.create_container(name);
        let mut pool = Self {
            name: name.to_string(),
            prototype,
            initial_size,
            expand_on_exhaustion,
            container,
            entities: Vec::with_capacity(initial_size),
        };

        for _ in 0..initial_size {
            let entity = pool.add_entity(host)?;
            host.set_active(entity, false);
        }

        crate::engine_debug!("tracker::ObjectPool",
            "Pool '{}' populated with {} '{}' entities", pool.name, initial_size, pool.prototype.name);

        Ok(pool)
    }

    /// Hand out an inactive entity, marking it active
    ///
    /// Scans in creation order and returns the first inactive entity. When
    /// all are active, creates exactly one new entity if expansion is
    /// enabled. Returns `None` on exhaustion; callers must treat that as
    /// "no capacity right now", not as a failure.
    pub fn acquire(&mut self, host: &mut dyn EntityHost) -> Option<EntityKey> {
        if let Some(&entity) = self.entities.iter().find(|&&e| !host.is_active(e)) {
            host.set_active(entity, true);
            return Some(entity);
        }

        if !self.expand_on_exhaustion {
            return None;
        }

        match self.add_entity(host) {
            Ok(entity) => {
                host.set_active(entity, true);
                crate::engine_trace!("tracker::ObjectPool",
                    "Pool '{}' expanded to {} entities", self.name, self.entities.len());
                Some(entity)
            }
            // Already logged by the host; the caller sees plain exhaustion
            Err(_) => None,
        }
    }

    /// Deactivate a pooled entity so a later `acquire` can reuse it
    ///
    /// Returns false if the entity does not belong to this pool.
    pub fn release(&mut self, host: &mut dyn EntityHost, entity: EntityKey) -> bool {
        if !self.contains(entity) {
            return false;
        }
        host.set_active(entity, false);
        true
    }

    /// Instantiate, parent and append one entity
    ///
    /// The entity is pooled even if parenting fails; it is left inactive and
    /// the error is returned.
    fn add_entity(&mut self, host: &mut dyn EntityHost) -> Result<EntityKey> {
        let entity = host.instantiate(&self.prototype);
        self.entities.push(entity);
        if let Err(err) = host.set_parent(entity, Some(self.container)) {
            host.set_active(entity, false);
            return Err(err);
        }
        Ok(entity)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    pub fn expand_on_exhaustion(&self) -> bool {
        self.expand_on_exhaustion
    }

    /// Container entity every pooled entity is parented under
    pub fn container(&self) -> EntityKey {
        self.container
    }

    /// Pooled entities in creation order
    pub fn entities(&self) -> &[EntityKey] {
        &self.entities
    }

    pub fn contains(&self, entity: EntityKey) -> bool {
        self.entities.contains(&entity)
    }

    /// Total number of pooled entities (active and inactive)
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn active_count(&self, host: &dyn EntityHost) -> usize {
        self.entities.iter().filter(|&&e| host.is_active(e)).count()
    }

    pub fn inactive_count(&self, host: &dyn EntityHost) -> usize {
        self.len() - self.active_count(host)
    }
}

#[cfg(test)]
#[path = "object_pool_tests.rs"]
mod tests;
