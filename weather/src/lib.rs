// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod cache;
pub mod config;
pub mod fetch;
pub mod models;
pub mod service;

pub use cache::CacheState;
pub use config::WeatherConfig;
pub use fetch::{HttpFetcher, WeatherApi};
pub use models::report::{self, Block, Emphasis};
pub use models::snapshot::{parse, Section, WeatherSnapshot};
pub use service::WeatherService;

pub mod constants {
  use std::time::Duration;
  pub(crate) const QUERY_PATH: &str = "conditions/forecast/q";
  pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";
  pub(crate) const DAY_TIME_FORMAT: &str = "%A %H:%M:%S";
  pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(::config::DEFAULT_CACHE_TTL_SECS);
  pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(::config::DEFAULT_REQUEST_TIMEOUT_SECS);
}
