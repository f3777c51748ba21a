// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::instrument;

pub const API_KEY_ENV: &str = "WUNDERGROUND_API_KEY";
pub const DEFAULT_CONFIG_PATH: &str = "wxpane.toml";
pub const DEFAULT_API_BASE: &str = "http://api.wunderground.com/api";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 1800;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub weather: WeatherSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
  pub api_base: String,
  pub api_key: Option<String>,
  pub latitude: Option<f64>,
  pub longitude: Option<f64>,
  pub cache_ttl_secs: u64,
  pub request_timeout_secs: u64,
}

impl Default for WeatherSettings {
  fn default() -> Self {
    Self {
      api_base: DEFAULT_API_BASE.to_string(),
      api_key: None,
      latitude: None,
      longitude: None,
      cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
      request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
    }
  }
}

impl Config {
  #[instrument(skip(path))]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    let content = fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    tracing::debug!("Loaded configuration successfully");
    Ok(config)
  }

  /// Reads `path` when given (it must exist), otherwise the default file if
  /// present, otherwise built-in defaults.
  pub fn load(path: Option<&Path>) -> Result<Self, Error> {
    match path {
      Some(path) => Self::from_file(path),
      None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
      None => {
        tracing::debug!("No configuration file, using defaults");
        Ok(Self::default())
      }
    }
  }

  /// Applies the API key from the process environment, if set.
  pub fn with_env(self) -> Self {
    let key = std::env::var(API_KEY_ENV).ok();
    self.with_api_key(key)
  }

  pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
      self.weather.api_key = Some(key);
    }
    self
  }

  pub fn with_coordinates(mut self, latitude: Option<f64>, longitude: Option<f64>) -> Self {
    if latitude.is_some() {
      self.weather.latitude = latitude;
    }
    if longitude.is_some() {
      self.weather.longitude = longitude;
    }
    self
  }
}
