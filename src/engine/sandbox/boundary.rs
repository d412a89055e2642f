use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine::{raycasting::Ray, transforms::to_vec};

const PARALLEL_TOL: f32 = 1e-8;

// A solid shape in its part's local space, centered on the origin.
pub trait ColliderBoundary: Send + Sync {
  fn is_interior_point(&self, pt: Point3<f32>) -> bool;

  // First entry of `ray` into the shape as `(t, outward normal)`, with `t` the
  // fraction of the ray length. Rays starting inside never hit.
  fn ray_intersect(&self, ray: &Ray) -> Option<(f32, Vector3<f32>)>;
}

pub struct SphereBoundary {
  pub radius: f32,
}

impl SphereBoundary {
  pub fn new(radius: f32) -> SphereBoundary {
    Self {
      radius
    }
  }
}

impl ColliderBoundary for SphereBoundary {
  fn is_interior_point(&self, pt: Point3<f32>) -> bool {
    to_vec(pt).magnitude2() <= self.radius * self.radius
  }

  fn ray_intersect(&self, ray: &Ray) -> Option<(f32, Vector3<f32>)> {
    let o = to_vec(ray.origin);
    let d = ray.direction;
    let a = d.magnitude2();
    if a <= PARALLEL_TOL {
      return None
    }
    let b = 2. * o.dot(d);
    let c = o.magnitude2() - self.radius * self.radius;
    if c < 0. {
      return None
    }
    let disc = b * b - 4. * a * c;
    if disc < 0. {
      return None
    }
    let t = (-b - disc.sqrt()) / (2. * a);
    if !(0. ..=1.).contains(&t) {
      return None
    }
    Some((t, (o + d * t).normalize()))
  }
}

pub struct BoxBoundary {
  pub half_extents: Vector3<f32>,
}

impl BoxBoundary {
  pub fn new(size: Vector3<f32>) -> BoxBoundary {
    Self {
      half_extents: size / 2.
    }
  }
}

impl ColliderBoundary for BoxBoundary {
  fn is_interior_point(&self, pt: Point3<f32>) -> bool {
    (0..3).all(|i| pt[i].abs() <= self.half_extents[i])
  }

  // slab test, remembering which face the ray enters through
  fn ray_intersect(&self, ray: &Ray) -> Option<(f32, Vector3<f32>)> {
    if self.is_interior_point(ray.origin) {
      return None
    }
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vector3::new(0., 0., 0.);
    for i in 0..3 {
      let o = ray.origin[i];
      let d = ray.direction[i];
      let h = self.half_extents[i];
      if d.abs() <= PARALLEL_TOL {
        if o < -h || o > h {
          return None
        }
        continue;
      }
      let t1 = (-h - o) / d;
      let t2 = (h - o) / d;
      let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
      if near > t_enter {
        t_enter = near;
        normal = Vector3::new(0., 0., 0.);
        normal[i] = -d.signum();
      }
      t_exit = t_exit.min(far);
    }
    if t_enter == f32::NEG_INFINITY || t_enter > t_exit || !(0. ..=1.).contains(&t_enter) {
      return None
    }
    Some((t_enter, normal))
  }
}
