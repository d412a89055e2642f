use super::{
  errors::CastError,
  instance::{ActorKey, InstanceKey},
  raycasting::{Ray, RaycastParams, RaycastResult},
  transforms::HostTransform
};

// guards ancestor walks against cyclic parent links reported by the host
const MAX_ANCESTOR_DEPTH: usize = 256;

// An attachment the host found under a hitbox object at registration time.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedAttachment {
  pub instance: InstanceKey,
  pub group: Option<String>,
}

/// The host engine as seen by the hitbox core: object transforms, the
/// hierarchy, actor components and the single-ray cast primitive.
pub trait HostWorld {
  // World transform of `instance`, or `None` once it left the simulated world.
  fn transform(&self, instance: InstanceKey) -> Option<HostTransform>;

  fn parent(&self, instance: InstanceKey) -> Option<InstanceKey>;

  // Actor component attached directly to `instance`.
  fn actor_of(&self, instance: InstanceKey) -> Option<ActorKey>;

  // Casts `ray` (its direction carries the cast length) and returns the
  // nearest surface admitted by `params`.
  fn cast(&self, ray: &Ray, params: &RaycastParams) -> Result<Option<RaycastResult>, CastError>;

  fn in_world(&self, instance: InstanceKey) -> bool {
    self.transform(instance).is_some()
  }

  // Attachments under `object` carrying the marker name `tag`.
  fn tagged_attachments(&self, _object: InstanceKey, _tag: &str) -> Vec<TaggedAttachment> {
    Vec::new()
  }

  // First actor found walking from `instance` up through its ancestors.
  fn find_actor(&self, instance: InstanceKey) -> Option<ActorKey> {
    let mut current = Some(instance);
    let mut depth = 0;
    while let Some(key) = current {
      if depth >= MAX_ANCESTOR_DEPTH {
        return None
      }
      if let Some(actor) = self.actor_of(key) {
        return Some(actor)
      }
      current = self.parent(key);
      depth += 1;
    }
    None
  }
}
