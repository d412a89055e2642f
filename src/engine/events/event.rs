use cgmath::Point3;

use crate::engine::{
  instance::{ActorKey, InstanceKey},
  raycasting::RaycastResult
};

// Payload of `OnHit`.
#[derive(Clone, Debug, PartialEq)]
pub struct HitEvent {
  pub part: InstanceKey,
  // Actor found on the hit's ancestors. Always `None` outside `DetectionMode::Default`.
  pub actor: Option<ActorKey>,
  pub result: RaycastResult,
  pub group: Option<String>,
}

// events collected during a tick, dispatched in cast order once casting is done
#[derive(Clone, Debug, PartialEq)]
pub enum HitboxEvent {
  Hit(HitEvent),
  Update(Point3<f32>),
}
