#![allow(dead_code)]

use std::sync::Arc;

use cgmath::{Point3, Vector3};
use parking_lot::Mutex;
use raycast_hitbox::{
  sandbox::{SandboxWorld, SphereBoundary},
  ActorKey,
  HitEvent,
  Hitbox,
  HitboxRegistry,
  HostTransform,
  InstanceKey
};

pub const DT: instant::Duration = instant::Duration::from_millis(16);

pub fn init_logging() {
  let _ = env_logger::builder().is_test(true).try_init();
}

pub struct Dummy {
  pub model: InstanceKey,
  pub torso: InstanceKey,
  pub head: InstanceKey,
  pub actor: ActorKey,
}

/// Torso sphere (r = 1) at the model origin, head sphere (r = 0.6) two units up.
pub fn spawn_dummy(world: &mut SandboxWorld, pos: Vector3<f32>) -> Dummy {
  let model = world.spawn_model("Dummy", None, HostTransform::at(pos));
  let torso = world.spawn_part("Torso", Some(model), HostTransform::identity(), SphereBoundary::new(1.));
  let head = world.spawn_part("Head", Some(model), HostTransform::at(Vector3::new(0., 2., 0.)), SphereBoundary::new(0.6));
  let actor = world.add_actor(model).expect("dummy model was just spawned");
  Dummy {
    model,
    torso,
    head,
    actor
  }
}

/// A shapeless sword model. Sweeps start at x = -5.5 so samples never land on a surface.
pub fn spawn_sword(world: &mut SandboxWorld) -> InstanceKey {
  world.spawn_model("Sword", None, HostTransform::at(Vector3::new(-5.5, 0., 0.)))
}

pub fn blade_points() -> Vec<Vector3<f32>> {
  vec![Vector3::new(0., 0.2, 0.), Vector3::new(0., -0.2, 0.)]
}

/// Static pair of attachments on a shapeless staff, spanning x in [-3, 3] at height `y`.
pub fn spawn_staff(world: &mut SandboxWorld, y: f32) -> (InstanceKey, InstanceKey, InstanceKey) {
  let staff = world.spawn_model("Staff", None, HostTransform::at(Vector3::new(0., y, 0.)));
  let a = world.spawn_attachment("A", staff, Vector3::new(-3., 0., 0.), None);
  let b = world.spawn_attachment("B", staff, Vector3::new(3., 0., 0.), None);
  (staff, a, b)
}

pub fn record_hits(hitbox: &Hitbox) -> Arc<Mutex<Vec<HitEvent>>> {
  let hits = Arc::new(Mutex::new(Vec::new()));
  let sink = hits.clone();
  hitbox.on_hit().connect(move |hit| sink.lock().push(hit.clone()));
  hits
}

pub fn record_updates(hitbox: &Hitbox) -> Arc<Mutex<Vec<Point3<f32>>>> {
  let updates = Arc::new(Mutex::new(Vec::new()));
  let sink = updates.clone();
  hitbox.on_update().connect(move |pos| sink.lock().push(*pos));
  updates
}

/// Moves `sword` by `step` along x before each of `ticks` registry updates.
pub fn swing(world: &mut SandboxWorld, registry: &mut HitboxRegistry, sword: InstanceKey, ticks: usize, step: f32) {
  for _ in 0..ticks {
    world.translate(sword, Vector3::new(step, 0., 0.));
    registry.update(&*world, DT);
  }
}

pub fn tick(world: &SandboxWorld, registry: &mut HitboxRegistry, ticks: usize) {
  for _ in 0..ticks {
    registry.update(world, DT);
  }
}
