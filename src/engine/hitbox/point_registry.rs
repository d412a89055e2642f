use cgmath::{Point3, Vector3};

use crate::engine::{instance::InstanceKey, world::HostWorld};

// An offset on an owning host object, resolved to world space every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplePoint {
  pub owner: InstanceKey,
  pub offset: Vector3<f32>,
  pub group: Option<String>,
  last_position: Option<Point3<f32>>,
}

impl SamplePoint {
  pub fn new(owner: InstanceKey, offset: Vector3<f32>, group: Option<String>) -> SamplePoint {
    Self {
      owner,
      offset,
      group,
      last_position: None
    }
  }

  pub fn matches(&self, owner: InstanceKey, offset: Vector3<f32>) -> bool {
    self.owner == owner && self.offset == offset
  }

  pub fn resolve(&self, world: &dyn HostWorld) -> Option<Point3<f32>> {
    world.transform(self.owner).map(|t| t.transform_offset(self.offset))
  }

  // World position seen on the previous tick of the current activation.
  pub fn last_position(&self) -> Option<Point3<f32>> {
    self.last_position
  }

  pub(crate) fn set_last_position(&mut self, pos: Option<Point3<f32>>) {
    self.last_position = pos;
  }
}

// Sample points of one hitbox, kept in registration order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PointRegistry {
  points: Vec<SamplePoint>,
}

impl PointRegistry {
  pub fn new() -> PointRegistry {
    Self {
      points: Vec::new()
    }
  }

  // Merges `offsets` into `owner`'s points. Offsets already registered for
  // `owner` keep their original entry. Returns how many points were added.
  pub fn set_points(&mut self, owner: InstanceKey, offsets: &[Vector3<f32>], group: Option<&str>) -> usize {
    let mut added = 0;
    for offset in offsets {
      if self.contains(owner, *offset) {
        continue;
      }
      self.points.push(SamplePoint::new(owner, *offset, group.map(String::from)));
      added += 1;
    }
    added
  }

  // Removes the exact `(owner, offset)` entries. Unknown offsets are ignored.
  pub fn remove_points(&mut self, owner: InstanceKey, offsets: &[Vector3<f32>]) -> usize {
    let before = self.points.len();
    self.points.retain(|p| !(p.owner == owner && offsets.contains(&p.offset)));
    before - self.points.len()
  }

  pub fn contains(&self, owner: InstanceKey, offset: Vector3<f32>) -> bool {
    self.points.iter().any(|p| p.matches(owner, offset))
  }

  pub fn reset_history(&mut self) {
    for point in self.points.iter_mut() {
      point.last_position = None;
    }
  }

  pub fn clear(&mut self) {
    self.points.clear()
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
    self.points.iter()
  }

  pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, SamplePoint> {
    self.points.iter_mut()
  }
}
