use thiserror::Error;

use super::instance::InstanceKey;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HitboxError {
  #[error("hitbox for instance {object:?} has been destroyed")]
  Destroyed {
    object: InstanceKey
  },
  #[error("invalid argument at index {index}: {name}")]
  ArgumentError {
    index: u8,
    name: String
  },
  #[error("unknown detection mode {0}")]
  InvalidDetectionMode(u8),
}

// Failures reported by the host's cast primitive. These never escape a tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
  #[error("cast primitive unavailable")]
  Unavailable,
  #[error("malformed cast result: {0}")]
  Malformed(String),
}
