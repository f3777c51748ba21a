// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("Configuration error: {0}")]
  ConfigError(String),
  #[error("Failed to read configuration: {0}")]
  TomlError(#[from] toml::de::Error),
  #[error("IO error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("HTTP error: {0}")]
  HttpError(#[from] reqwest::Error),
  #[error("API error: {0}")]
  ApiError(String),
  #[error("Rate limit exceeded")]
  RateLimitExceeded,
  #[error("Failed to parse response: {0}")]
  ParseError(String),
  #[error("Display error: {0}")]
  DisplayError(String),
}

impl Error {
  pub fn missing_api_key() -> Self {
    Error::ConfigError("missing API key".into())
  }
}
