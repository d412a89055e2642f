use crate::engine::instance::InstanceKey;

// guards filter walks against cyclic hierarchies
const MAX_FILTER_DEPTH: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FilterType {
  // Filtered instances and their descendants are never hit.
  #[default]
  Exclude,
  // Only filtered instances and their descendants can be hit.
  Include,
}

// Exclusion/inclusion settings handed to the host cast primitive.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RaycastParams {
  pub filter_instances: Vec<InstanceKey>,
  pub filter_type: FilterType,
  pub ignore_water: bool,
  pub collision_group: Option<String>,
}

impl RaycastParams {
  pub fn exclude(instances: Vec<InstanceKey>) -> RaycastParams {
    Self {
      filter_instances: instances,
      filter_type: FilterType::Exclude,
      ..Default::default()
    }
  }

  pub fn include(instances: Vec<InstanceKey>) -> RaycastParams {
    Self {
      filter_instances: instances,
      filter_type: FilterType::Include,
      ..Default::default()
    }
  }

  // Whether `instance` may be hit, given a way to look up parents.
  pub fn admits<F>(&self, instance: InstanceKey, parent: F) -> bool
    where F: Fn(InstanceKey) -> Option<InstanceKey> {
    let filtered = self.is_filtered(instance, parent);
    match self.filter_type {
      FilterType::Exclude => !filtered,
      FilterType::Include => filtered,
    }
  }

  fn is_filtered<F>(&self, instance: InstanceKey, parent: F) -> bool
    where F: Fn(InstanceKey) -> Option<InstanceKey> {
    if self.filter_instances.is_empty() {
      return false
    }
    let mut current = Some(instance);
    let mut depth = 0;
    while let Some(key) = current {
      if depth >= MAX_FILTER_DEPTH {
        break;
      }
      if self.filter_instances.contains(&key) {
        return true
      }
      current = parent(key);
      depth += 1;
    }
    false
  }
}
