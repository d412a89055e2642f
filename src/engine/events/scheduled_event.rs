// A one-shot countdown advanced by tick deltas. Used for the automatic `HitStop`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledEvent {
  pub time_to_trigger: f64,
  pub time_elapsed: f64
}

impl ScheduledEvent {
  pub fn seconds_from_now(seconds: f64) -> Self {
    Self {
      time_elapsed: 0.,
      time_to_trigger: seconds
    }
  }

  pub fn update_time(&mut self, dt: instant::Duration) {
    self.time_elapsed += dt.as_secs_f64();
  }

  pub fn should_trigger(&self) -> bool {
    self.time_elapsed >= self.time_to_trigger
  }
}
