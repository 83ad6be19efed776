/// Vertex tracker — one pooled marker per mesh vertex.
///
/// At setup the tracker acquires as many markers as the owner's mesh has
/// vertices. Every tick it reads the mesh once into a buffer it owns and
/// moves each marker to its vertex's world position.
///
/// Steady-state ticks do not allocate: the vertex buffer is sized at setup
/// and refilled in place, and the marker list never changes length.

use std::any::Any;
use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::engine_bail;
use crate::host::{EntityHost, EntityKey};
use crate::pool::PoolRegistry;
use crate::scheduler::{FrameContext, Updater};

/// Apply the affine part of `local_to_world` to a mesh-local point
///
/// Rotation, non-uniform scale and translation; the projective row is
/// ignored, as for any TRS matrix.
#[inline]
pub fn transform_vertex(vertex: Vec3, local_to_world: &Mat4) -> Vec3 {
    local_to_world.transform_point3(vertex)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Uninitialized,
    Tracking,
}

pub struct VertexTracker {
    /// Entity carrying the mesh and the tracked transform
    owner: EntityKey,
    /// Pool the markers come from
    pool_name: String,
    /// One slot per vertex; `None` where the pool was exhausted
    markers: Vec<Option<EntityKey>>,
    /// Per-frame copy of the mesh's local positions
    vertices: Vec<Vec3>,
    state: TrackerState,
}

impl VertexTracker {
    pub fn new(owner: EntityKey, pool_name: &str) -> Self {
        Self {
            owner,
            pool_name: pool_name.to_string(),
            markers: Vec::new(),
            vertices: Vec::new(),
            state: TrackerState::Uninitialized,
        }
    }

    /// Acquire and name one marker per vertex
    ///
    /// Markers are named `"<owner name> marker<index>"`. A slot the pool
    /// cannot fill stays `None` for the tracker's lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker is already tracking, the owner is
    /// unknown or has no mesh, or the pool is not registered. The tracker
    /// stays uninitialized in every error case.
    pub fn initialize(
        &mut self,
        host: &mut dyn EntityHost,
        pools: &mut PoolRegistry,
    ) -> Result<()> {
        if self.state == TrackerState::Tracking {
            engine_bail!(InitializationFailed, "tracker::VertexTracker",
                "Tracker for {:?} is already tracking", self.owner);
        }

        let owner_name = match host.name(self.owner) {
            Some(name) => name.to_string(),
            None => engine_bail!(InvalidResource, "tracker::VertexTracker",
                "Owner entity {:?} does not exist", self.owner),
        };
        let vertex_count = match host.vertex_count(self.owner) {
            Some(count) => count,
            None => engine_bail!(InvalidResource, "tracker::VertexTracker",
                "\"{}\" has no mesh to track", owner_name),
        };
        let pool = match pools.pool_mut(&self.pool_name) {
            Some(pool) => pool,
            None => engine_bail!(InvalidResource, "tracker::VertexTracker",
                "Pool '{}' is not registered", self.pool_name),
        };

        crate::engine_info!("tracker::VertexTracker",
            "Tracking {} vertices in \"{}\"", vertex_count, owner_name);

        let mut markers = Vec::with_capacity(vertex_count);
        for index in 0..vertex_count {
            let marker = pool.acquire(host);
            if let Some(key) = marker {
                host.set_name(key, format!("{} marker{}", owner_name, index));
            }
            markers.push(marker);
        }

        let missing = markers.iter().filter(|m| m.is_none()).count();
        if missing > 0 {
            crate::engine_warn!("tracker::VertexTracker",
                "Pool '{}' exhausted: {} of {} vertices in \"{}\" have no marker",
                self.pool_name, missing, vertex_count, owner_name);
        }

        self.markers = markers;
        self.vertices = Vec::with_capacity(vertex_count);
        self.state = TrackerState::Tracking;
        Ok(())
    }

    /// Move every marker to its vertex's current world position
    ///
    /// No-op before `initialize`.
    pub fn update(&mut self, host: &mut dyn EntityHost) {
        if self.state != TrackerState::Tracking {
            return;
        }

        if !host.read_vertices(self.owner, &mut self.vertices) {
            return;
        }
        let local_to_world = host.local_to_world(self.owner);

        for (marker, vertex) in self.markers.iter().zip(self.vertices.iter()) {
            if let Some(marker) = *marker {
                host.set_world_position(marker, transform_vertex(*vertex, &local_to_world));
            }
        }
    }

    pub fn owner(&self) -> EntityKey {
        self.owner
    }

    pub fn pool_name(&self) -> &str {
        &self.pool_name
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Marker slots in vertex order
    pub fn markers(&self) -> &[Option<EntityKey>] {
        &self.markers
    }

    /// Number of slots (equals the mesh vertex count once tracking)
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Slots the pool could not fill
    pub fn missing_marker_count(&self) -> usize {
        self.markers.iter().filter(|m| m.is_none()).count()
    }
}

impl Updater for VertexTracker {
    fn setup(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        self.initialize(ctx.host, ctx.pools)
    }

    fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        self.update(ctx.host);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "vertex_tracker_tests.rs"]
mod tests;
