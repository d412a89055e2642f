use std::sync::Arc;

use cgmath::{Point3, Vector3};
use log::{debug, trace};
use parking_lot::Mutex;

use crate::engine::{
  debug::DebugRay,
  errors::HitboxError,
  events::{HitEvent, HitboxEvent, ScheduledEvent, Signal},
  instance::InstanceKey,
  raycasting::RaycastParams,
  world::{HostWorld, TaggedAttachment}
};

use super::{
  detection::{DetectionMode, HitDeduplicator},
  link_table::LinkTable,
  point_registry::PointRegistry,
  scheduler::RaycastScheduler,
  settings::{CastConfiguration, HitboxSettings, MINIMUM_SECONDS_SCHEDULER}
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
  Idle,
  Active,
  Destroyed,
}

struct HitboxInner {
  object: InstanceKey,
  state: SessionState,
  config: CastConfiguration,
  visualizer: bool,
  debug_log: bool,
  points: PointRegistry,
  links: LinkTable,
  targets: HitDeduplicator,
  stop_timer: Option<ScheduledEvent>,
  session_time: f64,
  // bumped on every start/stop/destroy so a tick's pending events can tell
  // whether the activation that produced them is still running
  activation: u64,
  debug_rays: Vec<DebugRay>,
}

impl HitboxInner {
  fn ensure_alive(&self) -> Result<(), HitboxError> {
    if self.state == SessionState::Destroyed {
      return Err(HitboxError::Destroyed { object: self.object })
    }
    Ok(())
  }

  fn stop(&mut self) {
    self.state = SessionState::Idle;
    self.stop_timer = None;
    self.targets.clear();
    self.points.reset_history();
    self.activation += 1;
  }
}

/// A hitbox session. Cheap to clone: clones share the same session.
///
/// Geometry and configuration changes apply immediately and are picked up by
/// the next tick. Every mutating call on a destroyed hitbox returns
/// `HitboxError::Destroyed`.
#[derive(Clone)]
pub struct Hitbox {
  inner: Arc<Mutex<HitboxInner>>,
  on_hit: Signal<HitEvent>,
  on_update: Signal<Point3<f32>>,
}

impl Hitbox {
  pub fn new(object: InstanceKey, ignore_list: Vec<InstanceKey>, settings: &HitboxSettings) -> Hitbox {
    let inner = HitboxInner {
      object,
      state: SessionState::Idle,
      config: CastConfiguration {
        params: RaycastParams::exclude(ignore_list),
        mode: settings.detection_mode
      },
      visualizer: settings.visualizer,
      debug_log: settings.debug_log,
      points: PointRegistry::new(),
      links: LinkTable::new(),
      targets: HitDeduplicator::new(),
      stop_timer: None,
      session_time: 0.,
      activation: 0,
      debug_rays: Vec::new()
    };
    Self {
      inner: Arc::new(Mutex::new(inner)),
      on_hit: Signal::new(),
      on_update: Signal::new()
    }
  }

  // Registers host attachments found at initialization as zero-offset points.
  pub(crate) fn adopt_attachments(&self, attachments: Vec<TaggedAttachment>) {
    let mut inner = self.inner.lock();
    for attachment in attachments.iter() {
      inner.points.set_points(attachment.instance, &[Vector3::new(0., 0., 0.)], attachment.group.as_deref());
    }
    if inner.debug_log {
      debug!("hitbox {:?}: found {} tagged attachments", inner.object, attachments.len());
    }
  }

  pub fn object(&self) -> InstanceKey {
    self.inner.lock().object
  }

  pub fn state(&self) -> SessionState {
    self.inner.lock().state
  }

  pub fn is_active(&self) -> bool {
    self.state() == SessionState::Active
  }

  pub fn is_destroyed(&self) -> bool {
    self.state() == SessionState::Destroyed
  }

  pub fn on_hit(&self) -> &Signal<HitEvent> {
    &self.on_hit
  }

  pub fn on_update(&self) -> &Signal<Point3<f32>> {
    &self.on_update
  }

  // configuration

  pub fn raycast_params(&self) -> RaycastParams {
    self.inner.lock().config.params.clone()
  }

  pub fn set_raycast_params(&self, params: RaycastParams) -> Result<(), HitboxError> {
    self.with_alive(|inner| inner.config.params = params)
  }

  pub fn detection_mode(&self) -> DetectionMode {
    self.inner.lock().config.mode
  }

  pub fn set_detection_mode(&self, mode: DetectionMode) -> Result<(), HitboxError> {
    self.with_alive(|inner| inner.config.mode = mode)
  }

  // `true` switches to `PartMode`, `false` back to `Default`.
  pub fn part_mode(&self, check_part: bool) -> Result<(), HitboxError> {
    let mode = if check_part { DetectionMode::PartMode } else { DetectionMode::Default };
    self.set_detection_mode(mode)
  }

  // Turns recording of `DebugRay`s on or off.
  pub fn debug_mode(&self, debug_rays: bool) -> Result<(), HitboxError> {
    self.with_alive(|inner| {
      inner.visualizer = debug_rays;
      if !debug_rays {
        inner.debug_rays.clear();
      }
    })
  }

  pub fn set_debug_log(&self, enabled: bool) -> Result<(), HitboxError> {
    self.with_alive(|inner| inner.debug_log = enabled)
  }

  // Casts recorded during the last tick while `debug_mode` was on.
  pub fn debug_rays(&self) -> Vec<DebugRay> {
    self.inner.lock().debug_rays.clone()
  }

  // geometry

  pub fn set_points(&self, owner: InstanceKey, points: &[Vector3<f32>], group: Option<&str>) -> Result<(), HitboxError> {
    check_offsets(points)?;
    self.with_alive(|inner| {
      let added = inner.points.set_points(owner, points, group);
      if inner.debug_log {
        debug!("hitbox {:?}: added {} points on {:?} (group {:?})", inner.object, added, owner, group);
      }
    })
  }

  pub fn remove_points(&self, owner: InstanceKey, points: &[Vector3<f32>]) -> Result<(), HitboxError> {
    check_offsets(points)?;
    self.with_alive(|inner| {
      let removed = inner.points.remove_points(owner, points);
      if inner.debug_log {
        debug!("hitbox {:?}: removed {} points from {:?}", inner.object, removed, owner);
      }
    })
  }

  pub fn link_attachments(&self, primary: InstanceKey, secondary: InstanceKey) -> Result<(), HitboxError> {
    if primary == secondary {
      return Err(HitboxError::ArgumentError { index: 2, name: "secondary attachment equals primary".into() })
    }
    self.with_alive(|inner| {
      if let Some(old) = inner.links.link(primary, secondary) {
        trace!("relinked {:?}, dropped {:?}", primary, old.secondary);
      }
    })
  }

  pub fn unlink_attachments(&self, primary: InstanceKey) -> Result<(), HitboxError> {
    self.with_alive(|inner| {
      inner.links.unlink(primary);
    })
  }

  pub fn points(&self) -> PointRegistry {
    self.inner.lock().points.clone()
  }

  pub fn point_count(&self) -> usize {
    self.inner.lock().points.len()
  }

  pub fn link_count(&self) -> usize {
    self.inner.lock().links.len()
  }

  pub fn session_time(&self) -> f64 {
    self.inner.lock().session_time
  }

  // lifecycle

  // Starts casting. With `seconds`, the hitbox stops itself after that much
  // session time (at least one 60 Hz frame). Already active: no-op.
  pub fn hit_start(&self, seconds: Option<f64>) -> Result<(), HitboxError> {
    if let Some(s) = seconds {
      if !s.is_finite() {
        return Err(HitboxError::ArgumentError { index: 1, name: "seconds".into() })
      }
    }
    let mut inner = self.inner.lock();
    inner.ensure_alive()?;
    if inner.state == SessionState::Active {
      trace!("hitbox {:?} already active", inner.object);
      return Ok(())
    }
    inner.state = SessionState::Active;
    inner.targets.clear();
    inner.points.reset_history();
    inner.activation += 1;
    inner.stop_timer = seconds.map(|s| ScheduledEvent::seconds_from_now(s.max(MINIMUM_SECONDS_SCHEDULER)));
    if inner.debug_log {
      debug!("hitbox {:?} started (auto stop {:?})", inner.object, inner.stop_timer.map(|t| t.time_to_trigger));
    }
    Ok(())
  }

  // Stops casting and forgets every reported target. Idle: no-op.
  pub fn hit_stop(&self) -> Result<(), HitboxError> {
    let mut inner = self.inner.lock();
    inner.ensure_alive()?;
    if inner.state != SessionState::Active {
      return Ok(())
    }
    inner.stop();
    if inner.debug_log {
      debug!("hitbox {:?} stopped", inner.object);
    }
    Ok(())
  }

  // Tears the hitbox down for good. Calling it again does nothing.
  pub fn destroy(&self) {
    {
      let mut inner = self.inner.lock();
      if inner.state == SessionState::Destroyed {
        return;
      }
      inner.stop();
      inner.state = SessionState::Destroyed;
      inner.points.clear();
      inner.links.clear();
      inner.debug_rays.clear();
      if inner.debug_log {
        debug!("hitbox {:?} destroyed", inner.object);
      }
    }
    self.on_hit.disconnect_all();
    self.on_update.disconnect_all();
  }

  // Advances session time by `dt` and, while active, runs one tick of casts
  // and publishes the resulting events.
  pub(crate) fn update(&self, world: &dyn HostWorld, dt: instant::Duration) {
    let (events, activation) = {
      let mut guard = self.inner.lock();
      let inner = &mut *guard;
      if inner.state != SessionState::Active {
        return;
      }
      inner.session_time += dt.as_secs_f64();
      if let Some(timer) = inner.stop_timer.as_mut() {
        timer.update_time(dt);
        if timer.should_trigger() {
          inner.stop();
          if inner.debug_log {
            debug!("hitbox {:?} stopped by timer", inner.object);
          }
          return;
        }
      }

      let scheduler = RaycastScheduler::new(world, &inner.config, inner.visualizer, inner.debug_log);
      let output = scheduler.run(&mut inner.points, &inner.links, &mut inner.targets);
      trace!("hitbox {:?}: {} casts, {} events", inner.object, output.casts, output.events.len());
      inner.debug_rays = output.debug_rays;
      (output.events, inner.activation)
    };
    self.dispatch(events, activation);
  }

  fn dispatch(&self, events: Vec<HitboxEvent>, activation: u64) {
    for event in events {
      // a listener may have stopped or destroyed us mid-tick
      if !self.in_activation(activation) {
        break;
      }
      match event {
        HitboxEvent::Hit(hit) => {
          self.on_hit.fire(&hit);
        },
        HitboxEvent::Update(pos) => {
          self.on_update.fire(&pos);
        }
      }
    }
  }

  fn in_activation(&self, activation: u64) -> bool {
    let inner = self.inner.lock();
    inner.state == SessionState::Active && inner.activation == activation
  }

  fn with_alive<F>(&self, func: F) -> Result<(), HitboxError>
    where F: FnOnce(&mut HitboxInner) {
    let mut inner = self.inner.lock();
    inner.ensure_alive()?;
    func(&mut *inner);
    Ok(())
  }
}

// NaN never compares equal, so such an offset could be added but never removed
fn check_offsets(points: &[Vector3<f32>]) -> Result<(), HitboxError> {
  if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite())) {
    return Err(HitboxError::ArgumentError { index: 2, name: "points".into() })
  }
  Ok(())
}
