mod event;
mod signal;
mod scheduled_event;

pub use event::{
  HitEvent,
  HitboxEvent
};
pub use signal::{
  Connection,
  ListenerId,
  Signal
};
pub use scheduled_event::ScheduledEvent;
