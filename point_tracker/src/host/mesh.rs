//! Local-space vertex data attached to a host entity.
//!
//! The vertex count of a mesh is fixed at creation: trackers size their
//! marker list from it once, so positions may be rewritten in place but never
//! grown or shrunk.

use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    positions: Vec<Vec3>,
}

impl Mesh {
    /// Create a mesh from local-space vertex positions
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }

    /// Create a mesh from a packed `[x, y, z, x, y, z, ...]` float buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is not a multiple of 3.
    pub fn from_floats(floats: &[f32]) -> Result<Self> {
        match bytemuck::try_cast_slice::<f32, Vec3>(floats) {
            Ok(positions) => Ok(Self::new(positions.to_vec())),
            Err(err) => engine_bail!(InvalidResource, "tracker::Mesh",
                "Vertex buffer of {} floats is not packed xyz ({:?})", floats.len(), err),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Copy all positions into `out`, reusing its allocation
    pub fn copy_positions_into(&self, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend_from_slice(&self.positions);
    }

    /// Overwrite every position at once (e.g. one frame of a deformation)
    ///
    /// # Errors
    ///
    /// Returns an error if `positions` does not have exactly `vertex_count()`
    /// entries.
    pub fn set_positions(&mut self, positions: &[Vec3]) -> Result<()> {
        if positions.len() != self.positions.len() {
            engine_bail!(InvalidResource, "tracker::Mesh",
                "Cannot change vertex count from {} to {}", self.positions.len(), positions.len());
        }
        self.positions.copy_from_slice(positions);
        Ok(())
    }

    /// Move a single vertex. Returns false if `index` is out of range.
    pub fn set_position(&mut self, index: usize, position: Vec3) -> bool {
        match self.positions.get_mut(index) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
