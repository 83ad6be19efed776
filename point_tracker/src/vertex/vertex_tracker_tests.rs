/// Tests for VertexTracker
///
/// Marker acquisition at setup, per-tick world positions, exhaustion
/// handling and the pure vertex transform.

use super::*;
use glam::Quat;
use std::f32::consts::FRAC_PI_2;
use crate::error::Error;
use crate::host::{Mesh, Prototype, Transform, World};
use crate::pool::PoolConfig;

const POOL: &str = "markers";

fn approx(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, 1e-4)
}

/// World with one mesh owner and a registered pool
fn setup_world(
    vertices: Vec<Vec3>,
    owner_transform: Transform,
    initial_size: usize,
    expand: bool,
) -> (World, PoolRegistry, EntityKey) {
    let mut world = World::new();
    let owner = world.spawn("cube", owner_transform);
    world.attach_mesh(owner, Mesh::new(vertices)).unwrap();

    let mut pools = PoolRegistry::new();
    let config = PoolConfig::new(Prototype::new("marker"))
        .with_initial_size(initial_size)
        .with_expand_on_exhaustion(expand);
    pools.create_pool(POOL, &mut world, config).unwrap();

    (world, pools, owner)
}

fn grid(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| Vec3::new((i % 10) as f32, (i / 10) as f32, (i % 7) as f32 * 0.5))
        .collect()
}

// ============================================================================
// Tests: transform_vertex
// ============================================================================

#[test]
fn test_transform_vertex_origin_maps_to_translation() {
    let m = Transform::from_translation(Vec3::new(3.0, -2.0, 7.0))
        .with_rotation(Quat::from_rotation_y(0.7))
        .with_scale(Vec3::new(2.0, 0.5, 4.0))
        .matrix();
    assert!(approx(transform_vertex(Vec3::ZERO, &m), Vec3::new(3.0, -2.0, 7.0)));
}

#[test]
fn test_transform_vertex_pure_translation() {
    let m = Transform::from_translation(Vec3::new(5.0, 0.0, 0.0)).matrix();
    assert_eq!(transform_vertex(Vec3::new(1.0, 0.0, 0.0), &m), Vec3::new(6.0, 0.0, 0.0));
}

#[test]
fn test_transform_vertex_scale_rotate_translate() {
    // Scale x by 2, rotate 90 degrees about z, move up by 1
    let m = Transform::from_translation(Vec3::Y)
        .with_rotation(Quat::from_rotation_z(FRAC_PI_2))
        .with_scale(Vec3::new(2.0, 1.0, 1.0))
        .matrix();
    assert!(approx(transform_vertex(Vec3::X, &m), Vec3::new(0.0, 3.0, 0.0)));
}

#[test]
fn test_transform_vertex_is_pure() {
    let m = Transform::from_translation(Vec3::ONE).matrix();
    let first = transform_vertex(Vec3::Z, &m);
    let second = transform_vertex(Vec3::Z, &m);
    assert_eq!(first, second);
}

// ============================================================================
// Tests: initialize
// ============================================================================

#[test]
fn test_new_is_uninitialized() {
    let tracker = VertexTracker::new(EntityKey::default(), POOL);
    assert_eq!(tracker.state(), TrackerState::Uninitialized);
    assert_eq!(tracker.marker_count(), 0);
    assert_eq!(tracker.pool_name(), POOL);
}

#[test]
fn test_initialize_one_marker_per_vertex() {
    let (mut world, mut pools, owner) = setup_world(grid(12), Transform::IDENTITY, 20, false);
    let mut tracker = VertexTracker::new(owner, POOL);

    tracker.initialize(&mut world, &mut pools).unwrap();

    assert_eq!(tracker.state(), TrackerState::Tracking);
    assert_eq!(tracker.marker_count(), 12);
    assert_eq!(tracker.missing_marker_count(), 0);
    assert_eq!(pools.pool(POOL).unwrap().active_count(&world), 12);
}

#[test]
fn test_initialize_names_markers() {
    let (mut world, mut pools, owner) = setup_world(grid(3), Transform::IDENTITY, 3, false);
    let mut tracker = VertexTracker::new(owner, POOL);
    tracker.initialize(&mut world, &mut pools).unwrap();

    for (index, marker) in tracker.markers().iter().enumerate() {
        let name = world.name(marker.unwrap()).unwrap();
        assert_eq!(name, format!("cube marker{}", index));
    }
}

#[test]
fn test_initialize_with_exhausted_pool_leaves_empty_slots() {
    let (mut world, mut pools, owner) = setup_world(grid(5), Transform::IDENTITY, 3, false);
    let mut tracker = VertexTracker::new(owner, POOL);

    tracker.initialize(&mut world, &mut pools).unwrap();

    assert_eq!(tracker.marker_count(), 5);
    assert_eq!(tracker.missing_marker_count(), 2);
    assert!(tracker.markers()[..3].iter().all(Option::is_some));
    assert!(tracker.markers()[3..].iter().all(Option::is_none));
    assert_eq!(pools.pool(POOL).unwrap().len(), 3);
}

#[test]
fn test_initialize_twice_fails() {
    let (mut world, mut pools, owner) = setup_world(grid(2), Transform::IDENTITY, 4, false);
    let mut tracker = VertexTracker::new(owner, POOL);
    tracker.initialize(&mut world, &mut pools).unwrap();

    let result = tracker.initialize(&mut world, &mut pools);

    assert!(matches!(result, Err(Error::InitializationFailed(_))));
    assert_eq!(tracker.marker_count(), 2);
    assert_eq!(pools.pool(POOL).unwrap().active_count(&world), 2);
}

#[test]
fn test_initialize_owner_without_mesh_fails() {
    let (mut world, mut pools, _) = setup_world(grid(2), Transform::IDENTITY, 4, false);
    let bare = world.spawn("bare", Transform::IDENTITY);
    let mut tracker = VertexTracker::new(bare, POOL);

    let result = tracker.initialize(&mut world, &mut pools);

    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert_eq!(tracker.state(), TrackerState::Uninitialized);
}

#[test]
fn test_initialize_unknown_owner_fails() {
    let (mut world, mut pools, _) = setup_world(grid(2), Transform::IDENTITY, 4, false);
    let mut tracker = VertexTracker::new(EntityKey::default(), POOL);
    assert!(tracker.initialize(&mut world, &mut pools).is_err());
}

#[test]
fn test_initialize_unknown_pool_fails() {
    let (mut world, mut pools, owner) = setup_world(grid(2), Transform::IDENTITY, 4, false);
    let mut tracker = VertexTracker::new(owner, "missing");

    let result = tracker.initialize(&mut world, &mut pools);

    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert_eq!(pools.pool(POOL).unwrap().active_count(&world), 0);
}

#[test]
fn test_initialize_empty_mesh() {
    let (mut world, mut pools, owner) = setup_world(Vec::new(), Transform::IDENTITY, 4, false);
    let mut tracker = VertexTracker::new(owner, POOL);
    tracker.initialize(&mut world, &mut pools).unwrap();
    assert_eq!(tracker.marker_count(), 0);
    tracker.update(&mut world);
}

// ============================================================================
// Tests: update
// ============================================================================

#[test]
fn test_update_before_initialize_is_noop() {
    let (mut world, _pools, owner) = setup_world(grid(2), Transform::IDENTITY, 2, false);
    let mut tracker = VertexTracker::new(owner, POOL);
    tracker.update(&mut world);
    assert_eq!(tracker.state(), TrackerState::Uninitialized);
}

#[test]
fn test_update_places_markers_in_world_space() {
    let owner_transform = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0))
        .with_rotation(Quat::from_rotation_x(0.4))
        .with_scale(Vec3::new(1.0, 2.0, 0.5));
    let vertices = grid(15);
    let (mut world, mut pools, owner) = setup_world(vertices.clone(), owner_transform, 15, false);
    let mut tracker = VertexTracker::new(owner, POOL);
    tracker.initialize(&mut world, &mut pools).unwrap();

    tracker.update(&mut world);

    let matrix = owner_transform.matrix();
    for (marker, vertex) in tracker.markers().iter().zip(&vertices) {
        let actual = world.world_position(marker.unwrap()).unwrap();
        assert!(approx(actual, transform_vertex(*vertex, &matrix)));
    }
}

#[test]
fn test_update_is_idempotent() {
    let owner_transform = Transform::from_translation(Vec3::X).with_rotation(Quat::from_rotation_y(1.1));
    let (mut world, mut pools, owner) = setup_world(grid(8), owner_transform, 8, false);
    let mut tracker = VertexTracker::new(owner, POOL);
    tracker.initialize(&mut world, &mut pools).unwrap();

    let positions = |world: &World, tracker: &VertexTracker| -> Vec<Vec3> {
        tracker.markers().iter().map(|m| world.world_position(m.unwrap()).unwrap()).collect()
    };

    tracker.update(&mut world);
    let first = positions(&world, &tracker);
    tracker.update(&mut world);
    let second = positions(&world, &tracker);

    assert_eq!(first, second);
}

#[test]
fn test_update_follows_owner_and_mesh_changes() {
    let (mut world, mut pools, owner) = setup_world(vec![Vec3::X, Vec3::Y], Transform::IDENTITY, 2, false);
    let mut tracker = VertexTracker::new(owner, POOL);
    tracker.initialize(&mut world, &mut pools).unwrap();
    tracker.update(&mut world);

    world.set_transform(owner, Transform::from_translation(Vec3::new(0.0, 0.0, 10.0)));
    assert!(world.set_vertex_position(owner, 1, Vec3::new(0.0, 4.0, 0.0)));
    tracker.update(&mut world);

    let m0 = tracker.markers()[0].unwrap();
    let m1 = tracker.markers()[1].unwrap();
    assert!(approx(world.world_position(m0).unwrap(), Vec3::new(1.0, 0.0, 10.0)));
    assert!(approx(world.world_position(m1).unwrap(), Vec3::new(0.0, 4.0, 10.0)));
}

#[test]
fn test_update_skips_empty_slots() {
    let (mut world, mut pools, owner) = setup_world(grid(4), Transform::from_translation(Vec3::Z), 2, false);
    let mut tracker = VertexTracker::new(owner, POOL);
    tracker.initialize(&mut world, &mut pools).unwrap();

    tracker.update(&mut world);

    let m1 = tracker.markers()[1].unwrap();
    assert!(approx(world.world_position(m1).unwrap(), grid(4)[1] + Vec3::Z));
}

#[test]
fn test_update_reuses_vertex_buffer() {
    let (mut world, mut pools, owner) = setup_world(grid(64), Transform::IDENTITY, 64, false);
    let mut tracker = VertexTracker::new(owner, POOL);
    tracker.initialize(&mut world, &mut pools).unwrap();

    tracker.update(&mut world);
    let ptr = tracker.vertices.as_ptr();
    let capacity = tracker.vertices.capacity();
    for _ in 0..5 {
        tracker.update(&mut world);
    }

    assert_eq!(tracker.vertices.as_ptr(), ptr);
    assert_eq!(tracker.vertices.capacity(), capacity);
    assert_eq!(tracker.marker_count(), 64);
}

#[test]
fn test_tracked_mesh_cannot_change_vertex_count() {
    let (mut world, mut pools, owner) = setup_world(vec![Vec3::X; 3], Transform::IDENTITY, 3, false);
    let mut tracker = VertexTracker::new(owner, POOL);
    tracker.initialize(&mut world, &mut pools).unwrap();
    tracker.update(&mut world);
    let capacity = tracker.vertices.capacity();

    assert!(world.attach_mesh(owner, Mesh::new(vec![Vec3::X; 10])).is_err());
    assert!(world.set_vertex_positions(owner, &[Vec3::Y; 10]).is_err());
    tracker.update(&mut world);

    assert_eq!(world.vertex_count(owner), Some(tracker.marker_count()));
    assert_eq!(tracker.vertices.capacity(), capacity);
}

// ============================================================================
// Tests: Updater
// ============================================================================

#[test]
fn test_updater_setup_and_tick() {
    let (mut world, mut pools, owner) = setup_world(vec![Vec3::X], Transform::from_translation(Vec3::Y), 1, false);
    let mut tracker = VertexTracker::new(owner, POOL);

    {
        let mut ctx = FrameContext::new(&mut world, &mut pools);
        tracker.setup(&mut ctx).unwrap();
        tracker.tick(&mut ctx);
    }

    let marker = tracker.markers()[0].unwrap();
    assert!(approx(world.world_position(marker).unwrap(), Vec3::new(1.0, 1.0, 0.0)));
}
