use std::{collections::HashMap, sync::atomic::{AtomicUsize, Ordering}};

use cgmath::Vector3;

use crate::engine::{
  errors::CastError,
  instance::{ActorKey, InstanceKey},
  raycasting::{Ray, RaycastParams, RaycastResult},
  transforms::HostTransform,
  world::{HostWorld, TaggedAttachment}
};

use super::boundary::ColliderBoundary;

// hierarchy walks stop here, the sandbox never builds deeper trees
const MAX_DEPTH: usize = 256;

pub struct SandboxPart {
  pub name: String,
  pub parent: Option<InstanceKey>,
  // Relative to the parent's world transform, or world space for roots.
  pub local: HostTransform,
  pub boundary: Option<Box<dyn ColliderBoundary>>,
  pub actor: Option<ActorKey>,
  pub water: bool,
  pub collision_group: Option<String>,
  // Group attribute read when this part is a tagged attachment.
  pub group: Option<String>,
}

impl SandboxPart {
  fn new(name: &str, parent: Option<InstanceKey>, local: HostTransform) -> SandboxPart {
    Self {
      name: name.into(),
      parent,
      local,
      boundary: None,
      actor: None,
      water: false,
      collision_group: None,
      group: None
    }
  }
}

// Models, parts and attachments with parent links. Children follow their
// parents, so moving a model moves everything under it.
pub struct SandboxWorld {
  next_idx: u32,
  next_actor: u32,
  parts: HashMap<InstanceKey, SandboxPart>,
  fail_casts: bool,
  casts: AtomicUsize,
}

impl Default for SandboxWorld {
  fn default() -> Self {
    Self::new()
  }
}

impl SandboxWorld {
  pub fn new() -> SandboxWorld {
    Self {
      next_idx: 1,
      next_actor: 1,
      parts: HashMap::new(),
      fail_casts: false,
      casts: AtomicUsize::new(0)
    }
  }

  fn insert(&mut self, part: SandboxPart) -> InstanceKey {
    let key = InstanceKey::new(self.next_idx);
    self.next_idx += 1;
    self.parts.insert(key, part);
    key
  }

  // A grouping object without a shape.
  pub fn spawn_model(&mut self, name: &str, parent: Option<InstanceKey>, local: HostTransform) -> InstanceKey {
    self.insert(SandboxPart::new(name, parent, local))
  }

  pub fn spawn_part(
    &mut self,
    name: &str,
    parent: Option<InstanceKey>,
    local: HostTransform,
    boundary: impl ColliderBoundary + 'static
  ) -> InstanceKey {
    let mut part = SandboxPart::new(name, parent, local);
    part.boundary = Some(Box::new(boundary));
    self.insert(part)
  }

  pub fn spawn_attachment(&mut self, name: &str, parent: InstanceKey, offset: Vector3<f32>, group: Option<&str>) -> InstanceKey {
    let mut part = SandboxPart::new(name, Some(parent), HostTransform::at(offset));
    part.group = group.map(String::from);
    self.insert(part)
  }

  // Gives `instance` an actor component, like a humanoid inside a character model.
  pub fn add_actor(&mut self, instance: InstanceKey) -> Option<ActorKey> {
    let part = self.parts.get_mut(&instance)?;
    let actor = ActorKey::new(self.next_actor);
    self.next_actor += 1;
    part.actor = Some(actor);
    Some(actor)
  }

  pub fn get_mut(&mut self, instance: InstanceKey) -> Option<&mut SandboxPart> {
    self.parts.get_mut(&instance)
  }

  pub fn translate(&mut self, instance: InstanceKey, delta: Vector3<f32>) -> bool {
    match self.parts.get_mut(&instance) {
      Some(part) => {
        part.local.pos += delta;
        true
      },
      None => false
    }
  }

  // Removes `instance` and all of its descendants. Returns how many were removed.
  pub fn destroy(&mut self, instance: InstanceKey) -> usize {
    let doomed: Vec<InstanceKey> = self.parts.keys()
      .copied()
      .filter(|key| self.is_descendant_or_self(*key, instance))
      .collect();
    for key in doomed.iter() {
      self.parts.remove(key);
    }
    doomed.len()
  }

  // Makes every cast fail, standing in for a broken host primitive.
  pub fn set_cast_failure(&mut self, fail: bool) {
    self.fail_casts = fail;
  }

  // Number of casts answered so far.
  pub fn cast_count(&self) -> usize {
    self.casts.load(Ordering::Relaxed)
  }

  pub fn len(&self) -> usize {
    self.parts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.parts.is_empty()
  }

  fn is_descendant_or_self(&self, instance: InstanceKey, ancestor: InstanceKey) -> bool {
    let mut current = Some(instance);
    let mut depth = 0;
    while let Some(key) = current {
      if key == ancestor {
        return true
      }
      if depth >= MAX_DEPTH {
        break;
      }
      current = self.parts.get(&key).and_then(|p| p.parent);
      depth += 1;
    }
    false
  }

  fn world_transform(&self, instance: InstanceKey, depth: usize) -> Option<HostTransform> {
    let part = self.parts.get(&instance)?;
    match part.parent {
      Some(parent) if depth < MAX_DEPTH => {
        let parent_world = self.world_transform(parent, depth + 1)?;
        Some(parent_world.compose(&part.local))
      },
      Some(_) => None,
      None => Some(part.local)
    }
  }
}

impl HostWorld for SandboxWorld {
  fn transform(&self, instance: InstanceKey) -> Option<HostTransform> {
    self.world_transform(instance, 0)
  }

  fn parent(&self, instance: InstanceKey) -> Option<InstanceKey> {
    self.parts.get(&instance).and_then(|p| p.parent)
  }

  fn actor_of(&self, instance: InstanceKey) -> Option<ActorKey> {
    self.parts.get(&instance).and_then(|p| p.actor)
  }

  fn cast(&self, ray: &Ray, params: &RaycastParams) -> Result<Option<RaycastResult>, CastError> {
    self.casts.fetch_add(1, Ordering::Relaxed);
    if self.fail_casts {
      return Err(CastError::Unavailable)
    }
    let length = ray.length();
    let mut nearest: Option<(f32, RaycastResult)> = None;
    for (key, part) in self.parts.iter() {
      let Some(boundary) = part.boundary.as_ref() else {
        continue;
      };
      if params.ignore_water && part.water {
        continue;
      }
      if let (Some(wanted), Some(group)) = (params.collision_group.as_ref(), part.collision_group.as_ref()) {
        if wanted != group {
          continue;
        }
      }
      if !params.admits(*key, |k| self.parent(k)) {
        continue;
      }
      let Some(transform) = self.transform(*key) else {
        continue;
      };
      let local_ray = Ray::new(
        transform.inverse_transform_point(ray.origin),
        transform.inverse_transform_vector(ray.direction)
      );
      let Some((t, local_normal)) = boundary.ray_intersect(&local_ray) else {
        continue;
      };
      let closer = match nearest.as_ref() {
        Some((best, found)) => t < *best || (t == *best && *key < found.instance),
        None => true
      };
      if closer {
        nearest = Some((t, RaycastResult {
          instance: *key,
          position: ray.point_at(t),
          normal: transform.rot * local_normal,
          distance: t * length
        }));
      }
    }
    Ok(nearest.map(|(_, result)| result))
  }

  fn tagged_attachments(&self, object: InstanceKey, tag: &str) -> Vec<TaggedAttachment> {
    let mut found: Vec<TaggedAttachment> = self.parts.iter()
      .filter(|(key, part)| part.name == tag && **key != object && self.is_descendant_or_self(**key, object))
      .map(|(key, part)| TaggedAttachment {
        instance: *key,
        group: part.group.clone()
      })
      .collect();
    found.sort_by_key(|a| a.instance);
    found
  }
}
