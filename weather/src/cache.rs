// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{constants::DEFAULT_CACHE_TTL, models::snapshot::WeatherSnapshot};
use chrono::{DateTime, TimeDelta, Utc};

/// Last good snapshot and the time it was fetched.
///
/// `fetched_at` is only ever set together with a snapshot; `invalidate`
/// clears the timestamp but keeps the snapshot around.
#[derive(Debug, Clone)]
pub struct CacheState {
  snapshot: Option<WeatherSnapshot>,
  fetched_at: Option<DateTime<Utc>>,
  ttl: TimeDelta,
}

impl CacheState {
  pub fn new(ttl: TimeDelta) -> Self {
    Self {
      snapshot: None,
      fetched_at: None,
      ttl,
    }
  }

  pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
    match self.fetched_at {
      None => true,
      // an expiry past the representable range never expires
      Some(fetched_at) => fetched_at
        .checked_add_signed(self.ttl)
        .is_some_and(|expires_at| now >= expires_at),
    }
  }

  pub fn record(&mut self, snapshot: WeatherSnapshot, now: DateTime<Utc>) {
    self.snapshot = Some(snapshot);
    self.fetched_at = Some(now);
  }

  pub fn invalidate(&mut self) {
    self.fetched_at = None;
  }

  pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
    self.snapshot.as_ref()
  }

  pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
    self.fetched_at
  }

  pub fn ttl(&self) -> TimeDelta {
    self.ttl
  }
}

impl Default for CacheState {
  fn default() -> Self {
    Self::new(TimeDelta::seconds(DEFAULT_CACHE_TTL.as_secs() as i64))
  }
}
