// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  cache::CacheState,
  config::WeatherConfig,
  fetch::{HttpFetcher, WeatherApi},
  models::snapshot::{parse, WeatherSnapshot},
};
use chrono::{DateTime, Utc};
use error::Error;
use tracing::{debug, info, instrument, warn};

/// Fetches, parses and caches snapshots for the configured location.
pub struct WeatherService {
  config: WeatherConfig,
  api: Box<dyn WeatherApi>,
  cache: CacheState,
}

impl WeatherService {
  pub fn new(config: WeatherConfig) -> Result<Self, Error> {
    let api = Box::new(HttpFetcher::new(config.request_timeout)?);
    Ok(Self::with_api(config, api))
  }

  pub fn with_api(config: WeatherConfig, api: Box<dyn WeatherApi>) -> Self {
    let cache = CacheState::new(config.cache_ttl);
    Self { config, api, cache }
  }

  /// Current snapshot, fetching a new one first when the cache is stale.
  pub async fn snapshot(&mut self) -> Result<&WeatherSnapshot, Error> {
    self.snapshot_at(Utc::now()).await
  }

  #[instrument(skip(self))]
  pub async fn snapshot_at(&mut self, now: DateTime<Utc>) -> Result<&WeatherSnapshot, Error> {
    if self.cache.needs_refresh(now) {
      let snapshot = self.fetch().await?;
      self.cache.record(snapshot, now);
      info!("Weather snapshot updated");
    } else {
      info!("Returning cached weather data");
    }

    self
      .cache
      .snapshot()
      .ok_or_else(|| Error::ParseError("no weather snapshot available".into()))
  }

  /// Forces the next `snapshot` call to fetch. The last good snapshot is kept.
  pub fn invalidate(&mut self) {
    debug!("Invalidating weather cache");
    self.cache.invalidate();
  }

  pub fn cache(&self) -> &CacheState {
    &self.cache
  }

  async fn fetch(&self) -> Result<WeatherSnapshot, Error> {
    let raw = self
      .api
      .fetch(
        &self.config.api_base,
        &self.config.api_key,
        self.config.latitude,
        self.config.longitude,
      )
      .await?;

    let snapshot = parse(&raw)?;
    if let Some(reason) = snapshot.api_error() {
      warn!("Weather API reported an error: {}", reason);
      return Err(Error::ApiError(reason));
    }
    Ok(snapshot)
  }
}
