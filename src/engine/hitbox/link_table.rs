use crate::engine::instance::InstanceKey;

// Two attachments cast against each other as one segment per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkedPair {
  pub primary: InstanceKey,
  pub secondary: InstanceKey,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct LinkTable {
  links: Vec<LinkedPair>,
}

impl LinkTable {
  pub fn new() -> LinkTable {
    Self {
      links: Vec::new()
    }
  }

  // Links `primary` to `secondary`. An existing link keyed by `primary` is
  // replaced in place and returned.
  pub fn link(&mut self, primary: InstanceKey, secondary: InstanceKey) -> Option<LinkedPair> {
    let pair = LinkedPair { primary, secondary };
    if let Some(existing) = self.links.iter_mut().find(|l| l.primary == primary) {
      let replaced = *existing;
      *existing = pair;
      return Some(replaced)
    }
    self.links.push(pair);
    None
  }

  pub fn unlink(&mut self, primary: InstanceKey) -> Option<LinkedPair> {
    let idx = self.links.iter().position(|l| l.primary == primary)?;
    Some(self.links.remove(idx))
  }

  pub fn clear(&mut self) {
    self.links.clear()
  }

  pub fn len(&self) -> usize {
    self.links.len()
  }

  pub fn is_empty(&self) -> bool {
    self.links.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, LinkedPair> {
    self.links.iter()
  }
}
