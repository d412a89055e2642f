mod point_registry;
mod link_table;
mod detection;
mod settings;
mod scheduler;
mod session;

pub use point_registry::{PointRegistry, SamplePoint};
pub use link_table::{LinkTable, LinkedPair};
pub use detection::{DetectionMode, HitDeduplicator, TargetKey, Verdict};
pub use settings::{CastConfiguration, HitboxSettings, MINIMUM_SECONDS_SCHEDULER};
pub use session::{Hitbox, SessionState};
