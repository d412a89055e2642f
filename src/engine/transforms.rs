use cgmath::{Point3, Quaternion, Rotation, Vector3};

// Position and rotation of a host object, in world space or relative to its parent.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct HostTransform {
  pub pos: Vector3<f32>,
  pub rot: Quaternion<f32>,
}

impl HostTransform {
  pub fn new(pos: Vector3<f32>, rot: Quaternion<f32>) -> HostTransform {
    Self {
      pos,
      rot
    }
  }

  pub fn at(pos: Vector3<f32>) -> HostTransform {
    Self {
      pos,
      rot: Quaternion::new(1., 0., 0., 0.)
    }
  }

  pub fn identity() -> HostTransform {
    Self::at(Vector3::new(0., 0., 0.))
  }

  pub fn position(&self) -> Point3<f32> {
    to_point(self.pos)
  }

  // offsets are stored relative to the owner and resolved every tick
  pub fn transform_offset(&self, offset: Vector3<f32>) -> Point3<f32> {
    to_point(self.rot.rotate_vector(offset) + self.pos)
  }

  pub fn inverse_transform_point(&self, pt: Point3<f32>) -> Point3<f32> {
    to_point(self.rot.conjugate().rotate_vector(to_vec(pt) - self.pos))
  }

  pub fn inverse_transform_vector(&self, v: Vector3<f32>) -> Vector3<f32> {
    self.rot.conjugate().rotate_vector(v)
  }

  // Applies `child` (expressed relative to `self`) and returns its world transform.
  pub fn compose(&self, child: &HostTransform) -> HostTransform {
    Self {
      pos: self.rot.rotate_vector(child.pos) + self.pos,
      rot: self.rot * child.rot
    }
  }
}

impl Default for HostTransform {
  fn default() -> Self {
    Self::identity()
  }
}

pub fn to_point(v: Vector3<f32>) -> Point3<f32> {
  Point3::new(v.x, v.y, v.z)
}

pub fn to_vec(v: Point3<f32>) -> Vector3<f32> {
  Vector3::new(v.x, v.y, v.z)
}
