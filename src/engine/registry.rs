use std::collections::HashMap;

use log::{debug, info};

use super::{
  hitbox::{Hitbox, HitboxSettings},
  instance::InstanceKey,
  world::HostWorld
};

/// Maps host objects to their hitboxes and drives them from the host's tick.
///
/// Hitboxes whose object was destroyed or left the world are torn down on the
/// next `update`, as are hitboxes destroyed directly through `Hitbox::destroy`.
pub struct HitboxRegistry {
  hitboxes: HashMap<InstanceKey, Hitbox>,
  settings: HitboxSettings,
}

impl Default for HitboxRegistry {
  fn default() -> Self {
    Self::new()
  }
}

impl HitboxRegistry {
  pub fn new() -> HitboxRegistry {
    Self::with_settings(HitboxSettings::default())
  }

  pub fn with_settings(settings: HitboxSettings) -> HitboxRegistry {
    Self {
      hitboxes: HashMap::new(),
      settings
    }
  }

  pub fn settings(&self) -> &HitboxSettings {
    &self.settings
  }

  // Creates the hitbox for `object`, or returns the one already registered.
  pub fn initialize(&mut self, world: &dyn HostWorld, object: InstanceKey, ignore_list: Vec<InstanceKey>) -> Hitbox {
    let settings = self.settings.clone();
    self.initialize_with(world, object, ignore_list, settings)
  }

  pub fn initialize_with(
    &mut self,
    world: &dyn HostWorld,
    object: InstanceKey,
    ignore_list: Vec<InstanceKey>,
    settings: HitboxSettings
  ) -> Hitbox {
    if let Some(existing) = self.hitboxes.get(&object) {
      if !existing.is_destroyed() {
        return existing.clone()
      }
    }

    let hitbox = Hitbox::new(object, ignore_list, &settings);
    hitbox.adopt_attachments(world.tagged_attachments(object, &settings.attachment_tag));
    self.hitboxes.insert(object, hitbox.clone());
    info!("hitbox registered for {:?} ({} points)", object, hitbox.point_count());
    hitbox
  }

  pub fn get_hitbox(&self, object: InstanceKey) -> Option<Hitbox> {
    self.hitboxes.get(&object)
      .filter(|hitbox| !hitbox.is_destroyed())
      .cloned()
  }

  // Destroys and forgets the hitbox of `object`. Unknown objects are ignored.
  pub fn deinitialize(&mut self, object: InstanceKey) {
    if let Some(hitbox) = self.hitboxes.remove(&object) {
      hitbox.destroy();
      debug!("hitbox for {:?} deinitialized", object);
    }
  }

  // Host notification that `object` was destroyed.
  pub fn notify_destroyed(&mut self, object: InstanceKey) {
    self.deinitialize(object)
  }

  // One host tick: tears down stale hitboxes, then advances every active one.
  pub fn update(&mut self, world: &dyn HostWorld, dt: instant::Duration) {
    let stale: Vec<InstanceKey> = self.hitboxes.iter()
      .filter(|(object, hitbox)| hitbox.is_destroyed() || !world.in_world(**object))
      .map(|(object, _)| *object)
      .collect();
    for object in stale {
      self.deinitialize(object);
    }

    let active: Vec<Hitbox> = self.hitboxes.values()
      .filter(|hitbox| hitbox.is_active())
      .cloned()
      .collect();
    for hitbox in active.iter() {
      hitbox.update(world, dt);
    }
  }

  pub fn len(&self) -> usize {
    self.hitboxes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.hitboxes.is_empty()
  }
}
