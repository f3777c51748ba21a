// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
mod config;

pub use crate::config::{
  Config, WeatherSettings, API_KEY_ENV, DEFAULT_API_BASE, DEFAULT_CACHE_TTL_SECS,
  DEFAULT_CONFIG_PATH, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Loads `.env` from the working directory or its parents; a missing file is
/// not an error.
pub fn load_dotenv() {
  match dotenvy::dotenv() {
    Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
    Err(e) => tracing::debug!("No .env file loaded: {}", e),
  }
}
