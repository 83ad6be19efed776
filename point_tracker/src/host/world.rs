/// World — an in-memory `EntityHost`.
///
/// Uses a SlotMap for O(1) insert/lookup with stable keys. World matrices
/// are composed from the parent chain on demand; nothing is cached, so a
/// transform change is visible to the very next query.

use glam::{Mat4, Vec3};
use slotmap::SlotMap;
use crate::error::Result;
use crate::engine_bail;
use super::entity_host::{EntityHost, EntityKey, Prototype};
use super::mesh::Mesh;
use super::transform::Transform;

/// A host entity
#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    active: bool,
    parent: Option<EntityKey>,
    transform: Transform,
    mesh: Option<Mesh>,
}

impl Entity {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn parent(&self) -> Option<EntityKey> {
        self.parent
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }
}

pub struct World {
    entities: SlotMap<EntityKey, Entity>,
    /// Number of `instantiate` calls since creation
    instantiation_count: usize,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            instantiation_count: 0,
        }
    }

    /// Create an active, unparented entity
    pub fn spawn(&mut self, name: &str, transform: Transform) -> EntityKey {
        self.entities.insert(Entity {
            name: name.to_string(),
            active: true,
            parent: None,
            transform,
            mesh: None,
        })
    }

    /// Attach a mesh to an entity
    ///
    /// A mesh may be replaced only by one with the same vertex count, so
    /// markers acquired for the old mesh still line up with the new one.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist, or if it already has a
    /// mesh with a different vertex count.
    pub fn attach_mesh(&mut self, entity: EntityKey, mesh: Mesh) -> Result<()> {
        let Some(e) = self.entities.get_mut(entity) else {
            engine_bail!(InvalidResource, "tracker::World",
                "Cannot attach mesh to unknown entity {:?}", entity);
        };
        if let Some(current) = &e.mesh {
            if current.vertex_count() != mesh.vertex_count() {
                engine_bail!(InvalidResource, "tracker::World",
                    "Cannot replace the {}-vertex mesh of \"{}\" with a {}-vertex mesh",
                    current.vertex_count(), e.name, mesh.vertex_count());
            }
        }
        e.mesh = Some(mesh);
        Ok(())
    }

    pub fn entity(&self, entity: EntityKey) -> Option<&Entity> {
        self.entities.get(entity)
    }

    /// Overwrite every vertex of an entity's mesh
    ///
    /// # Errors
    ///
    /// Returns an error if the entity has no mesh or `positions` does not
    /// match its vertex count.
    pub fn set_vertex_positions(&mut self, entity: EntityKey, positions: &[Vec3]) -> Result<()> {
        match self.entities.get_mut(entity).and_then(|e| e.mesh.as_mut()) {
            Some(mesh) => mesh.set_positions(positions),
            None => engine_bail!(InvalidResource, "tracker::World",
                "Entity {:?} has no mesh to edit", entity),
        }
    }

    /// Move one vertex. Returns false if there is no mesh or `index` is out of range.
    pub fn set_vertex_position(&mut self, entity: EntityKey, index: usize, position: Vec3) -> bool {
        self.entities
            .get_mut(entity)
            .and_then(|e| e.mesh.as_mut())
            .is_some_and(|mesh| mesh.set_position(index, position))
    }

    /// Set the local transform. Returns false if the key is invalid.
    pub fn set_transform(&mut self, entity: EntityKey, transform: Transform) -> bool {
        match self.entities.get_mut(entity) {
            Some(e) => {
                e.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Keys of the direct children of `parent`
    pub fn children(&self, parent: EntityKey) -> Vec<EntityKey> {
        self.entities
            .iter()
            .filter(|(_, e)| e.parent == Some(parent))
            .map(|(key, _)| key)
            .collect()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn instantiation_count(&self) -> usize {
        self.instantiation_count
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityHost for World {
    fn instantiate(&mut self, prototype: &Prototype) -> EntityKey {
        self.instantiation_count += 1;
        self.entities.insert(Entity {
            name: prototype.name.clone(),
            active: prototype.active,
            parent: None,
            transform: prototype.transform,
            mesh: None,
        })
    }

    fn create_container(&mut self, name: &str) -> EntityKey {
        self.spawn(name, Transform::IDENTITY)
    }

    fn set_parent(&mut self, child: EntityKey, parent: Option<EntityKey>) -> Result<()> {
        if !self.entities.contains_key(child) {
            engine_bail!(InvalidResource, "tracker::World",
                "Cannot parent unknown entity {:?}", child);
        }

        if let Some(parent_key) = parent {
            // Walk up from the new parent: reaching the child would form a cycle
            let mut cursor = Some(parent_key);
            while let Some(key) = cursor {
                if key == child {
                    engine_bail!(InvalidResource, "tracker::World",
                        "Parenting {:?} under {:?} would create a cycle", child, parent_key);
                }
                cursor = match self.entities.get(key) {
                    Some(e) => e.parent,
                    None => engine_bail!(InvalidResource, "tracker::World",
                        "Unknown parent entity {:?}", key),
                };
            }
        }

        if let Some(e) = self.entities.get_mut(child) {
            e.parent = parent;
        }
        Ok(())
    }

    fn set_active(&mut self, entity: EntityKey, active: bool) {
        if let Some(e) = self.entities.get_mut(entity) {
            e.active = active;
        }
    }

    fn is_active(&self, entity: EntityKey) -> bool {
        self.entities.get(entity).is_some_and(|e| e.active)
    }

    fn set_name(&mut self, entity: EntityKey, name: String) {
        if let Some(e) = self.entities.get_mut(entity) {
            e.name = name;
        }
    }

    fn name(&self, entity: EntityKey) -> Option<&str> {
        self.entities.get(entity).map(|e| e.name.as_str())
    }

    fn contains(&self, entity: EntityKey) -> bool {
        self.entities.contains_key(entity)
    }

    fn vertex_count(&self, entity: EntityKey) -> Option<usize> {
        self.entities.get(entity)?.mesh.as_ref().map(Mesh::vertex_count)
    }

    fn read_vertices(&self, entity: EntityKey, out: &mut Vec<Vec3>) -> bool {
        match self.entities.get(entity).and_then(|e| e.mesh.as_ref()) {
            Some(mesh) => {
                mesh.copy_positions_into(out);
                true
            }
            None => false,
        }
    }

    fn local_to_world(&self, entity: EntityKey) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut cursor = Some(entity);
        while let Some(key) = cursor {
            match self.entities.get(key) {
                Some(e) => {
                    matrix = e.transform.matrix() * matrix;
                    cursor = e.parent;
                }
                None => break,
            }
        }
        matrix
    }

    fn set_world_position(&mut self, entity: EntityKey, position: Vec3) {
        let parent = match self.entities.get(entity) {
            Some(e) => e.parent,
            None => return,
        };
        let local = match parent {
            Some(parent_key) => self.local_to_world(parent_key).inverse().transform_point3(position),
            None => position,
        };
        if let Some(e) = self.entities.get_mut(entity) {
            e.transform.translation = local;
        }
    }

    fn world_position(&self, entity: EntityKey) -> Option<Vec3> {
        if !self.entities.contains_key(entity) {
            return None;
        }
        Some(self.local_to_world(entity).w_axis.truncate())
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod tests;
