// Identity of an object owned by the host engine (part, bone, attachment, model).
#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct InstanceKey {
  pub index: u32,
}

impl InstanceKey {
  pub fn new(index: u32) -> InstanceKey {
    Self {
      index
    }
  }
}

// Identity of an actor (humanoid/agent component) found on a hit ancestor.
#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct ActorKey {
  pub index: u32,
}

impl ActorKey {
  pub fn new(index: u32) -> ActorKey {
    Self {
      index
    }
  }
}
