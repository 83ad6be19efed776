/// Host engine surface used by pools and trackers.
///
/// The pool and tracker never own entities directly. They hold `EntityKey`s
/// and ask the host to create, parent, name, activate and move them.

use glam::{Mat4, Vec3};
use slotmap::new_key_type;
use crate::error::Result;
use super::transform::Transform;

new_key_type! {
    /// Stable key for an entity owned by the host.
    ///
    /// Keys stay valid for the lifetime of the entity; pooled entities are
    /// never destroyed, so marker keys stay valid for the whole run.
    pub struct EntityKey;
}

/// Template that pooled entities are instantiated from
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    /// Name given to every fresh instance
    pub name: String,
    /// Active state produced by instantiation
    pub active: bool,
    /// Local transform of every fresh instance
    pub transform: Transform,
}

impl Prototype {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: true,
            transform: Transform::IDENTITY,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Outbound interface to the host engine.
///
/// Single-threaded: every call completes synchronously inside the current
/// frame. Methods taking an unknown key are no-ops (setters) or return
/// `None`/`false` (queries), except where a `Result` is returned.
pub trait EntityHost {
    /// Create a new entity from `prototype` (expensive in a real engine)
    fn instantiate(&mut self, prototype: &Prototype) -> EntityKey;

    /// Create an empty, active grouping entity
    fn create_container(&mut self, name: &str) -> EntityKey;

    /// Parent `child` under `parent`, keeping its local transform
    fn set_parent(&mut self, child: EntityKey, parent: Option<EntityKey>) -> Result<()>;

    fn set_active(&mut self, entity: EntityKey, active: bool);

    /// Own active flag of the entity (not inherited from parents)
    fn is_active(&self, entity: EntityKey) -> bool;

    fn set_name(&mut self, entity: EntityKey, name: String);

    fn name(&self, entity: EntityKey) -> Option<&str>;

    fn contains(&self, entity: EntityKey) -> bool;

    /// Number of vertices of the entity's mesh, `None` if it has no mesh
    fn vertex_count(&self, entity: EntityKey) -> Option<usize>;

    /// Batch read of the mesh's local-space positions into `out`
    ///
    /// `out` is cleared and refilled; no allocation occurs when its capacity
    /// already covers the vertex count. Returns false if there is no mesh.
    fn read_vertices(&self, entity: EntityKey, out: &mut Vec<Vec3>) -> bool;

    /// Current local-to-world matrix (identity for unknown entities)
    fn local_to_world(&self, entity: EntityKey) -> Mat4;

    fn set_world_position(&mut self, entity: EntityKey, position: Vec3);

    fn world_position(&self, entity: EntityKey) -> Option<Vec3>;
}
