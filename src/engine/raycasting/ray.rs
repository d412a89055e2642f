use cgmath::{InnerSpace, Point3, Vector3};

const DEGENERATE_LEN_SQ: f32 = 1e-12;

// A finite cast: `direction` is not normalized, its length is the cast length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
  pub origin: Point3<f32>,
  pub direction: Vector3<f32>
}

impl Ray {
  pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
    Self {
      origin,
      direction
    }
  }

  pub fn between(start: Point3<f32>, end: Point3<f32>) -> Self {
    Self {
      origin: start,
      direction: end - start
    }
  }

  pub fn length(&self) -> f32 {
    self.direction.magnitude()
  }

  pub fn end(&self) -> Point3<f32> {
    self.origin + self.direction
  }

  // t is the fraction of the cast length, 0 at the origin and 1 at the end
  pub fn point_at(&self, t: f32) -> Point3<f32> {
    self.origin + self.direction * t
  }

  pub fn is_degenerate(&self) -> bool {
    self.direction.magnitude2() <= DEGENERATE_LEN_SQ
  }
}
