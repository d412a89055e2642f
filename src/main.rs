use std::sync::Arc;

use cgmath::Vector3;
use log::info;
use parking_lot::Mutex;
use rand::Rng;

use raycast_hitbox::{
  sandbox::{BoxBoundary, SandboxWorld, SphereBoundary},
  HitboxRegistry,
  HostTransform
};

const TICK_RATE: u32 = 60;
const DUMMIES: usize = 5;

// Sweeps a sword through a row of training dummies and logs what it hits.
fn main() -> anyhow::Result<()> {
  env_logger::init();
  let mut rng = rand::thread_rng();
  let mut world = SandboxWorld::new();

  for i in 0..DUMMIES {
    let x = -8. + 4. * i as f32 + rng.gen_range(-0.5..0.5);
    let z = rng.gen_range(-0.3..0.3);
    let dummy = world.spawn_model("Dummy", None, HostTransform::at(Vector3::new(x, 0., z)));
    world.spawn_part("Torso", Some(dummy), HostTransform::at(Vector3::new(0., 1., 0.)), BoxBoundary::new(Vector3::new(1., 2., 0.5)));
    world.spawn_part("Head", Some(dummy), HostTransform::at(Vector3::new(0., 2.5, 0.)), SphereBoundary::new(0.5));
    world.add_actor(dummy);
  }

  let sword = world.spawn_model("Sword", None, HostTransform::at(Vector3::new(-12., 0., 0.)));
  world.spawn_attachment("DmgPoint", sword, Vector3::new(0., 2.4, 0.), Some("tip"));

  let mut registry = HitboxRegistry::new();
  let hitbox = registry.initialize(&world, sword, vec![sword]);
  hitbox.set_points(sword, &[Vector3::new(0., 0.8, 0.), Vector3::new(0., 1.4, 0.)], Some("blade"))?;
  hitbox.debug_mode(true)?;

  let hits = Arc::new(Mutex::new(0usize));
  let hit_counter = hits.clone();
  hitbox.on_hit().connect(move |hit| {
    *hit_counter.lock() += 1;
    info!(
      "hit {:?} actor {:?} group {:?} at {:?}",
      hit.part, hit.actor, hit.group, hit.result.position
    );
  });

  let seconds = 1.5;
  hitbox.hit_start(Some(seconds))?;
  let dt = instant::Duration::from_secs_f64(1. / TICK_RATE as f64);
  let speed = 24. / seconds as f32;
  let mut ticks = 0;
  while hitbox.is_active() {
    world.translate(sword, Vector3::new(speed * dt.as_secs_f32(), 0., 0.));
    registry.update(&world, dt);
    ticks += 1;
  }

  info!(
    "swing finished after {} ticks: {} hits, {} casts, {} rays in last frame",
    ticks,
    *hits.lock(),
    world.cast_count(),
    hitbox.debug_rays().len()
  );
  registry.deinitialize(sword);
  Ok(())
}
