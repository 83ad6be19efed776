//! Point tracker demo
//!
//! Spins and squashes a UV sphere for a few frames and prints where the
//! markers on its first vertices end up.

use glam::{Quat, Vec3};
use point_tracker::{engine_info, engine_warn};
use point_tracker::tracker::Result;
use point_tracker::tracker::host::{EntityHost, Mesh, Prototype, Transform, World};
use point_tracker::tracker::pool::{PoolConfig, PoolRegistry};
use point_tracker::tracker::scheduler::{FrameContext, Scheduler};
use point_tracker::tracker::vertex::VertexTracker;

const FRAMES: u32 = 5;
const POOL_NAME: &str = "markers";

/// Vertices of a UV sphere (poles duplicated per segment, like most exporters)
fn uv_sphere(rings: u32, segments: u32, radius: f32) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(((rings + 1) * segments) as usize);
    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        for segment in 0..segments {
            let theta = std::f32::consts::TAU * segment as f32 / segments as f32;
            positions.push(Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            ));
        }
    }
    positions
}

fn main() -> Result<()> {
    let mut world = World::new();
    let mut pools = PoolRegistry::new();

    let marker = Prototype::new("marker")
        .with_transform(Transform::IDENTITY.with_scale(Vec3::splat(0.05)));
    pools.create_pool(POOL_NAME, &mut world, PoolConfig::new(marker))?;

    // 10 rings x 25 segments = 275 vertices, more than the pool pre-fills
    let sphere = world.spawn("Sphere", Transform::from_translation(Vec3::new(0.0, 1.0, -3.0)));
    world.attach_mesh(sphere, Mesh::new(uv_sphere(10, 25, 1.0)))?;

    let mut scheduler = Scheduler::new();
    let tracker_key = scheduler.add_updater(Box::new(VertexTracker::new(sphere, POOL_NAME)));

    for frame in 0..FRAMES {
        let t = frame as f32 * 0.2;
        world.set_transform(sphere, Transform::from_translation(Vec3::new(t, 1.0, -3.0))
            .with_rotation(Quat::from_rotation_y(t))
            .with_scale(Vec3::new(1.0 + t, 1.0, 1.0 - 0.5 * t)));

        scheduler.run_frame(&mut FrameContext::new(&mut world, &mut pools));

        let Some(tracker) = scheduler.updater::<VertexTracker>(tracker_key) else { break };
        for marker in tracker.markers().iter().take(3) {
            match marker.and_then(|m| world.world_position(m).map(|p| (m, p))) {
                Some((m, p)) => engine_info!("demo", "frame {}: {} at {:.3}",
                    frame, world.name(m).unwrap_or("?"), p),
                None => engine_warn!("demo", "frame {}: vertex without marker", frame),
            }
        }
    }

    if let Some(pool) = pools.pool(POOL_NAME) {
        engine_info!("demo", "Pool '{}' holds {} markers ({} active), {} instantiations",
            pool.name(), pool.len(), pool.active_count(&world), world.instantiation_count());
    }

    Ok(())
}
