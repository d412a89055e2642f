use cgmath::{Point3, Vector3};

use crate::engine::instance::InstanceKey;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RaycastResult {
  pub instance: InstanceKey,
  pub position: Point3<f32>,
  pub normal: Vector3<f32>,
  pub distance: f32,
}

impl RaycastResult {
  pub fn is_finite(&self) -> bool {
    self.position.x.is_finite() && self.position.y.is_finite() && self.position.z.is_finite()
      && self.normal.x.is_finite() && self.normal.y.is_finite() && self.normal.z.is_finite()
      && self.distance.is_finite()
  }
}
