//! Vertex tracking
//!
//! Keeps one pooled marker on every vertex of a mesh, in world space.

mod vertex_tracker;

pub use vertex_tracker::{transform_vertex, TrackerState, VertexTracker};
