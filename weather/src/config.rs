// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::constants::{DEFAULT_CACHE_TTL, REQUEST_TIMEOUT};
use chrono::TimeDelta;
use ::config::{WeatherSettings, DEFAULT_API_BASE};
use error::Error;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WeatherConfig {
  pub(crate) api_base: String,
  pub(crate) api_key: String,
  pub(crate) latitude: f64,
  pub(crate) longitude: f64,
  pub(crate) cache_ttl: TimeDelta,
  pub(crate) request_timeout: Duration,
}

impl WeatherConfig {
  pub fn new(api_key: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, Error> {
    let api_key = api_key.into();
    if api_key.trim().is_empty() {
      return Err(Error::missing_api_key());
    }
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
      return Err(Error::ConfigError(format!("Invalid latitude: {}", latitude)));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
      return Err(Error::ConfigError(format!("Invalid longitude: {}", longitude)));
    }

    Ok(Self {
      api_base: DEFAULT_API_BASE.to_string(),
      api_key,
      latitude,
      longitude,
      cache_ttl: to_time_delta(DEFAULT_CACHE_TTL)?,
      request_timeout: REQUEST_TIMEOUT,
    })
  }

  pub fn from_settings(settings: &WeatherSettings) -> Result<Self, Error> {
    let api_key = settings.api_key.clone().unwrap_or_default();
    let latitude = settings
      .latitude
      .ok_or_else(|| Error::ConfigError("missing latitude".into()))?;
    let longitude = settings
      .longitude
      .ok_or_else(|| Error::ConfigError("missing longitude".into()))?;

    Self::new(api_key, latitude, longitude)?
      .with_api_base(settings.api_base.clone())
      .with_cache_ttl(Duration::from_secs(settings.cache_ttl_secs))
      .map(|c| c.with_request_timeout(Duration::from_secs(settings.request_timeout_secs)))
  }

  pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
    self.api_base = api_base.into();
    self
  }

  pub fn with_cache_ttl(mut self, ttl: Duration) -> Result<Self, Error> {
    self.cache_ttl = to_time_delta(ttl)?;
    Ok(self)
  }

  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = timeout;
    self
  }

  pub fn cache_ttl(&self) -> TimeDelta {
    self.cache_ttl
  }
}

fn to_time_delta(duration: Duration) -> Result<TimeDelta, Error> {
  TimeDelta::from_std(duration)
    .map_err(|_| Error::ConfigError("Invalid duration conversion".to_string()))
}
