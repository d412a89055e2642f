use std::collections::HashSet;

use crate::engine::{
  errors::HitboxError,
  instance::{ActorKey, InstanceKey}
};

// What counts as a hit and whether repeats are suppressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DetectionMode {
  // Only hits with an actor among their ancestors; each actor once per activation.
  #[default]
  Default,
  // Every hit surface, each surface once per activation. No actor is reported.
  PartMode,
  // Every hit on every cast, no suppression. No actor is reported.
  Bypass,
}

impl DetectionMode {
  // 1 is `Default`, 2 is `PartMode`, 3 and above are `Bypass`.
  pub fn from_code(code: u8) -> Result<DetectionMode, HitboxError> {
    match code {
      0 => Err(HitboxError::InvalidDetectionMode(code)),
      1 => Ok(DetectionMode::Default),
      2 => Ok(DetectionMode::PartMode),
      _ => Ok(DetectionMode::Bypass),
    }
  }

  pub fn code(&self) -> u8 {
    match self {
      DetectionMode::Default => 1,
      DetectionMode::PartMode => 2,
      DetectionMode::Bypass => 3,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKey {
  Actor(ActorKey),
  Part(InstanceKey),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
  Report { actor: Option<ActorKey> },
  // Already reported during this activation.
  Suppressed(TargetKey),
  // No actor found in `Default` mode.
  Unqualified,
}

// Per-activation record of reported targets.
#[derive(Clone, Debug, Default)]
pub struct HitDeduplicator {
  hit_list: HashSet<TargetKey>,
}

impl HitDeduplicator {
  pub fn new() -> HitDeduplicator {
    Self {
      hit_list: HashSet::new()
    }
  }

  // Classifies a hit on `part`. `find_actor` is only consulted in `Default` mode.
  pub fn admit<F>(&mut self, mode: DetectionMode, part: InstanceKey, find_actor: F) -> Verdict
    where F: FnOnce(InstanceKey) -> Option<ActorKey> {
    let (target, actor) = match mode {
      DetectionMode::Bypass => return Verdict::Report { actor: None },
      DetectionMode::PartMode => (TargetKey::Part(part), None),
      DetectionMode::Default => match find_actor(part) {
        Some(actor) => (TargetKey::Actor(actor), Some(actor)),
        None => return Verdict::Unqualified,
      },
    };
    if !self.hit_list.insert(target) {
      return Verdict::Suppressed(target)
    }
    Verdict::Report { actor }
  }

  pub fn len(&self) -> usize {
    self.hit_list.len()
  }

  pub fn is_empty(&self) -> bool {
    self.hit_list.is_empty()
  }

  pub fn clear(&mut self) {
    self.hit_list.clear()
  }
}
