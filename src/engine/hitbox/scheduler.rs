use log::{debug, trace, warn};

use crate::engine::{
  debug::DebugRay,
  events::{HitEvent, HitboxEvent},
  raycasting::{Ray, RaycastParams, RaycastResult},
  world::HostWorld
};

use super::{
  detection::{HitDeduplicator, Verdict},
  link_table::LinkTable,
  point_registry::PointRegistry,
  settings::CastConfiguration
};

pub struct TickOutput {
  pub events: Vec<HitboxEvent>,
  pub debug_rays: Vec<DebugRay>,
  pub casts: usize,
}

// Runs the casts of one tick: every sample point in registration order, then
// every link. Results are judged immediately so the first caster to strike a
// target within the tick is the one reported.
pub struct RaycastScheduler<'a> {
  world: &'a dyn HostWorld,
  config: &'a CastConfiguration,
  visualize: bool,
  debug_log: bool,
  output: TickOutput,
}

impl<'a> RaycastScheduler<'a> {
  pub fn new(world: &'a dyn HostWorld, config: &'a CastConfiguration, visualize: bool, debug_log: bool) -> Self {
    Self {
      world,
      config,
      visualize,
      debug_log,
      output: TickOutput {
        events: Vec::new(),
        debug_rays: Vec::new(),
        casts: 0
      }
    }
  }

  pub fn run(
    mut self,
    points: &mut PointRegistry,
    links: &LinkTable,
    targets: &mut HitDeduplicator
  ) -> TickOutput {
    for point in points.iter_mut() {
      let Some(current) = point.resolve(self.world) else {
        // owner left the world, start a fresh sweep if it comes back
        point.set_last_position(None);
        continue;
      };
      let origin = point.last_position().unwrap_or(current);
      let ray = Ray::between(origin, current);
      let result = self.cast(&ray);
      point.set_last_position(Some(current));
      self.judge(result, point.group.clone(), targets);
      self.output.events.push(HitboxEvent::Update(current));
    }

    for link in links.iter() {
      let primary = self.world.transform(link.primary);
      let secondary = self.world.transform(link.secondary);
      let (Some(primary), Some(secondary)) = (primary, secondary) else {
        continue;
      };
      let start = primary.position();
      let ray = Ray::between(start, secondary.position());
      let result = self.cast(&ray);
      self.judge(result, None, targets);
      self.output.events.push(HitboxEvent::Update(start));
    }

    self.output
  }

  fn cast(&mut self, ray: &Ray) -> Option<RaycastResult> {
    let result = if ray.is_degenerate() {
      None
    } else {
      self.output.casts += 1;
      safe_cast(self.world, ray, &self.config.params)
    };
    if self.visualize {
      self.output.debug_rays.push(DebugRay {
        start: ray.origin,
        end: ray.end(),
        hit: result.map(|r| r.position)
      });
    }
    result
  }

  fn judge(&mut self, result: Option<RaycastResult>, group: Option<String>, targets: &mut HitDeduplicator) {
    let Some(result) = result else {
      return;
    };
    let world = self.world;
    match targets.admit(self.config.mode, result.instance, |part| world.find_actor(part)) {
      Verdict::Report { actor } => {
        if self.debug_log {
          debug!("hit {:?} (actor {:?}, group {:?}) at {:?}", result.instance, actor, group, result.position);
        }
        self.output.events.push(HitboxEvent::Hit(HitEvent {
          part: result.instance,
          actor,
          result,
          group
        }));
      },
      Verdict::Suppressed(target) => trace!("suppressed repeat hit on {:?}", target),
      Verdict::Unqualified => trace!("hit {:?} has no actor, ignored", result.instance),
    }
  }
}

// Host failures and garbage results count as a miss for this cast only.
fn safe_cast(world: &dyn HostWorld, ray: &Ray, params: &RaycastParams) -> Option<RaycastResult> {
  match world.cast(ray, params) {
    Ok(Some(result)) if result.is_finite() => Some(result),
    Ok(Some(result)) => {
      warn!("discarding non-finite cast result on {:?}", result.instance);
      None
    },
    Ok(None) => None,
    Err(err) => {
      warn!("cast from {:?} failed: {}", ray.origin, err);
      None
    }
  }
}

