mod errors;
mod instance;
mod transforms;
mod world;
mod raycasting;
mod events;
mod debug;
mod hitbox;
mod registry;
pub mod sandbox;

pub use errors::{CastError, HitboxError};
pub use instance::{ActorKey, InstanceKey};
pub use transforms::HostTransform;
pub use world::{HostWorld, TaggedAttachment};
pub use raycasting::{FilterType, Ray, RaycastParams, RaycastResult};
pub use events::{Connection, HitEvent, HitboxEvent, ListenerId, ScheduledEvent, Signal};
pub use debug::DebugRay;
pub use hitbox::{
  CastConfiguration,
  DetectionMode,
  HitDeduplicator,
  Hitbox,
  HitboxSettings,
  LinkTable,
  LinkedPair,
  PointRegistry,
  SamplePoint,
  SessionState,
  TargetKey,
  Verdict,
  MINIMUM_SECONDS_SCHEDULER
};
pub use registry::HitboxRegistry;
