mod common;

use cgmath::Vector3;
use common::*;
use raycast_hitbox::{
  sandbox::SandboxWorld,
  DetectionMode,
  HitboxError,
  HitboxRegistry,
  RaycastParams,
  SessionState
};

const HALF_SECOND: instant::Duration = instant::Duration::from_millis(500);

#[test]
fn timed_start_stops_itself_and_casts_nothing_afterwards() {
  let mut world = SandboxWorld::new();
  spawn_dummy(&mut world, Vector3::new(0., 0., 0.));
  let (staff, a, b) = spawn_staff(&mut world, 0.);
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, staff, vec![]);
  hitbox.link_attachments(a, b).unwrap();
  let updates = record_updates(&hitbox);

  hitbox.hit_start(Some(2.)).unwrap();
  for _ in 0..3 {
    registry.update(&world, HALF_SECOND);
  }
  assert!(hitbox.is_active());
  assert_eq!(updates.lock().len(), 3);
  let casts_before_stop = world.cast_count();

  // the fourth tick reaches 2 s of session time
  registry.update(&world, HALF_SECOND);
  assert_eq!(hitbox.state(), SessionState::Idle);

  for _ in 0..4 {
    registry.update(&world, HALF_SECOND);
  }
  assert_eq!(updates.lock().len(), 3);
  assert_eq!(world.cast_count(), casts_before_stop);
}

#[test]
fn tiny_durations_last_at_least_one_frame() {
  let mut world = SandboxWorld::new();
  let (staff, a, b) = spawn_staff(&mut world, 0.);
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, staff, vec![]);
  hitbox.link_attachments(a, b).unwrap();
  let updates = record_updates(&hitbox);

  hitbox.hit_start(Some(0.)).unwrap();
  registry.update(&world, instant::Duration::from_millis(1));
  assert_eq!(updates.lock().len(), 1);
  registry.update(&world, DT);
  assert!(!hitbox.is_active());
}

#[test]
fn non_finite_duration_is_rejected() {
  let world = SandboxWorld::new();
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, raycast_hitbox::InstanceKey::new(1), vec![]);
  assert_eq!(
    hitbox.hit_start(Some(f64::NAN)),
    Err(HitboxError::ArgumentError { index: 1, name: "seconds".into() })
  );
  assert!(!hitbox.is_active());
}

#[test]
fn hit_start_while_active_is_a_no_op() {
  let mut world = SandboxWorld::new();
  spawn_dummy(&mut world, Vector3::new(0., 0., 0.));
  let (staff, a, b) = spawn_staff(&mut world, 0.);
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, staff, vec![]);
  hitbox.link_attachments(a, b).unwrap();
  hitbox.set_detection_mode(DetectionMode::PartMode).unwrap();
  let hits = record_hits(&hitbox);

  hitbox.hit_start(None).unwrap();
  tick(&world, &mut registry, 1);
  assert_eq!(hits.lock().len(), 1);

  // neither clears suppression nor arms a timer
  hitbox.hit_start(Some(0.5)).unwrap();
  for _ in 0..4 {
    registry.update(&world, HALF_SECOND);
  }
  assert!(hitbox.is_active());
  assert_eq!(hits.lock().len(), 1);
}

#[test]
fn stop_then_start_makes_targets_reportable_again() {
  let mut world = SandboxWorld::new();
  let dummy = spawn_dummy(&mut world, Vector3::new(0., 0., 0.));
  let (staff, a, b) = spawn_staff(&mut world, 0.);
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, staff, vec![]);
  hitbox.link_attachments(a, b).unwrap();
  let hits = record_hits(&hitbox);

  hitbox.hit_start(None).unwrap();
  tick(&world, &mut registry, 3);
  hitbox.hit_stop().unwrap();
  // stopping twice is harmless
  hitbox.hit_stop().unwrap();
  tick(&world, &mut registry, 3);
  assert_eq!(hits.lock().len(), 1);

  hitbox.hit_start(None).unwrap();
  tick(&world, &mut registry, 3);
  let hits = hits.lock();
  assert_eq!(hits.len(), 2);
  assert!(hits.iter().all(|h| h.actor == Some(dummy.actor)));
}

#[test]
fn every_cast_publishes_an_update() {
  let mut world = SandboxWorld::new();
  let sword = spawn_sword(&mut world);
  let (_, a, b) = spawn_staff(&mut world, 5.);
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, sword, vec![]);
  hitbox.set_points(sword, &blade_points(), None).unwrap();
  hitbox.link_attachments(a, b).unwrap();
  let updates = record_updates(&hitbox);

  hitbox.hit_start(None).unwrap();
  swing(&mut world, &mut registry, sword, 2, 1.);

  let updates = updates.lock();
  assert_eq!(updates.len(), 6);
  // points first, in registration order, then the link's primary attachment
  assert_eq!(updates[3], cgmath::Point3::new(-3.5, 0.2, 0.));
  assert_eq!(updates[4], cgmath::Point3::new(-3.5, -0.2, 0.));
  assert_eq!(updates[5], cgmath::Point3::new(-3., 5., 0.));
}

#[test]
fn debug_mode_records_one_ray_per_cast() {
  let mut world = SandboxWorld::new();
  spawn_dummy(&mut world, Vector3::new(0., 0., 0.));
  let (staff, a, b) = spawn_staff(&mut world, 0.);
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, staff, vec![]);
  hitbox.link_attachments(a, b).unwrap();
  hitbox.set_points(staff, &[Vector3::new(0., 10., 0.)], None).unwrap();

  hitbox.hit_start(None).unwrap();
  tick(&world, &mut registry, 1);
  assert!(hitbox.debug_rays().is_empty());

  hitbox.debug_mode(true).unwrap();
  tick(&world, &mut registry, 1);
  let rays = hitbox.debug_rays();
  assert_eq!(rays.len(), 2);
  assert!(rays[0].hit.is_none());
  assert!(rays[1].hit.is_some());

  hitbox.debug_mode(false).unwrap();
  assert!(hitbox.debug_rays().is_empty());
}

#[test]
fn removed_points_stop_casting_on_the_next_tick() {
  let mut world = SandboxWorld::new();
  let sword = spawn_sword(&mut world);
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, sword, vec![]);
  hitbox.set_points(sword, &blade_points(), None).unwrap();
  let updates = record_updates(&hitbox);

  hitbox.hit_start(None).unwrap();
  swing(&mut world, &mut registry, sword, 1, 1.);
  hitbox.remove_points(sword, &blade_points()[..1]).unwrap();
  hitbox.remove_points(sword, &[Vector3::new(7., 7., 7.)]).unwrap();
  swing(&mut world, &mut registry, sword, 1, 1.);
  assert_eq!(updates.lock().len(), 3);
  assert_eq!(hitbox.point_count(), 1);
  assert!(hitbox.points().contains(sword, Vector3::new(0., -0.2, 0.)));
}

#[test]
fn unlinking_removes_the_segment_cast() {
  let mut world = SandboxWorld::new();
  spawn_dummy(&mut world, Vector3::new(0., 0., 0.));
  let (staff, a, b) = spawn_staff(&mut world, 0.);
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, staff, vec![]);
  hitbox.link_attachments(a, b).unwrap();
  assert!(matches!(hitbox.link_attachments(a, a), Err(HitboxError::ArgumentError { index: 2, .. })));
  hitbox.unlink_attachments(a).unwrap();
  // secondary alone is not a key
  hitbox.unlink_attachments(b).unwrap();
  assert_eq!(hitbox.link_count(), 0);

  let hits = record_hits(&hitbox);
  hitbox.hit_start(None).unwrap();
  tick(&world, &mut registry, 3);
  assert!(hits.lock().is_empty());
}

#[test]
fn listener_stopping_the_hitbox_drops_rest_of_tick() {
  for stop_in_handler in [false, true] {
    let mut world = SandboxWorld::new();
    spawn_dummy(&mut world, Vector3::new(0., 0., 0.));
    spawn_dummy(&mut world, Vector3::new(0., 0., 4.));
    let sword = spawn_sword(&mut world);
    let mut registry = HitboxRegistry::new();
    let hitbox = registry.initialize(&world, sword, vec![]);
    hitbox.set_points(sword, &[Vector3::new(0., 0.2, 0.), Vector3::new(0., 0.2, 4.)], None).unwrap();
    let hits = record_hits(&hitbox);
    if stop_in_handler {
      let handle = hitbox.clone();
      hitbox.on_hit().connect(move |_| {
        handle.hit_stop().unwrap();
      });
    }

    hitbox.hit_start(None).unwrap();
    swing(&mut world, &mut registry, sword, 10, 1.);

    let expected = if stop_in_handler { 1 } else { 2 };
    assert_eq!(hits.lock().len(), expected);
    assert_eq!(hitbox.is_active(), !stop_in_handler);
    hitbox.destroy();
  }
}

#[test]
fn destroyed_hitbox_rejects_every_call() {
  let mut world = SandboxWorld::new();
  let sword = spawn_sword(&mut world);
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, sword, vec![]);
  hitbox.set_points(sword, &blade_points(), None).unwrap();
  record_hits(&hitbox);
  hitbox.hit_start(None).unwrap();

  hitbox.destroy();
  hitbox.destroy();
  assert!(hitbox.is_destroyed());
  assert_eq!(hitbox.point_count(), 0);
  assert_eq!(hitbox.on_hit().listener_count(), 0);

  let destroyed = Err(HitboxError::Destroyed { object: sword });
  assert_eq!(hitbox.set_points(sword, &blade_points(), None), destroyed);
  assert_eq!(hitbox.remove_points(sword, &blade_points()), destroyed);
  assert_eq!(hitbox.link_attachments(sword, raycast_hitbox::InstanceKey::new(99)), destroyed);
  assert_eq!(hitbox.unlink_attachments(sword), destroyed);
  assert_eq!(hitbox.hit_start(None), destroyed);
  assert_eq!(hitbox.hit_stop(), destroyed);
  assert_eq!(hitbox.part_mode(true), destroyed);
  assert_eq!(hitbox.debug_mode(true), destroyed);
  assert_eq!(hitbox.set_raycast_params(RaycastParams::default()), destroyed);
  assert_eq!(hitbox.point_count(), 0);

  // the registry drops it on the next tick
  tick(&world, &mut registry, 1);
  assert!(registry.get_hitbox(sword).is_none());
  assert!(registry.is_empty());
}

#[test]
fn non_finite_offsets_are_rejected() {
  let mut world = SandboxWorld::new();
  let sword = spawn_sword(&mut world);
  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, sword, vec![]);
  let bad = [Vector3::new(f32::NAN, 0., 0.)];

  for _ in 0..3 {
    assert!(matches!(
      hitbox.set_points(sword, &bad, None),
      Err(HitboxError::ArgumentError { index: 2, .. })
    ));
  }
  // a bad entry anywhere in the list rejects the whole call
  assert!(hitbox.set_points(sword, &[Vector3::new(0., 1., 0.), Vector3::new(0., f32::INFINITY, 0.)], None).is_err());
  assert_eq!(hitbox.point_count(), 0);

  hitbox.set_points(sword, &blade_points(), None).unwrap();
  assert!(hitbox.remove_points(sword, &bad).is_err());
  hitbox.remove_points(sword, &blade_points()).unwrap();
  assert_eq!(hitbox.point_count(), 0);
}
