//! Host engine boundary
//!
//! The `EntityHost` trait is everything the pool and tracker need from an
//! engine. `World` is the in-memory implementation used by the demo and tests.

mod entity_host;
mod mesh;
mod transform;
mod world;

pub use entity_host::{EntityHost, EntityKey, Prototype};
pub use mesh::Mesh;
pub use transform::Transform;
pub use world::{Entity, World};
