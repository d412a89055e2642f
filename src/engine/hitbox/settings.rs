use crate::engine::raycasting::RaycastParams;

use super::detection::DetectionMode;

// Shortest auto-stop a `HitStart` can arm, one 60 Hz frame.
pub const MINIMUM_SECONDS_SCHEDULER: f64 = 1. / 60.;

pub const DEFAULT_ATTACHMENT_TAG: &str = "DmgPoint";

// Initial configuration applied to a hitbox when it is registered.
#[derive(Clone, Debug, PartialEq)]
pub struct HitboxSettings {
  pub detection_mode: DetectionMode,
  pub visualizer: bool,
  pub debug_log: bool,
  // Name marking host attachments that become sample points on registration.
  pub attachment_tag: String,
}

impl Default for HitboxSettings {
  fn default() -> Self {
    Self {
      detection_mode: DetectionMode::Default,
      visualizer: false,
      debug_log: false,
      attachment_tag: DEFAULT_ATTACHMENT_TAG.into()
    }
  }
}

// Cast parameters and detection policy read by the scheduler each tick.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CastConfiguration {
  pub params: RaycastParams,
  pub mode: DetectionMode,
}
