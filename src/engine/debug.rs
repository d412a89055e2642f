use cgmath::Point3;

// One cast recorded while the hitbox visualizer is on. Drawing it is up to the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugRay {
  pub start: Point3<f32>,
  pub end: Point3<f32>,
  pub hit: Option<Point3<f32>>,
}
