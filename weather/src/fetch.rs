// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::constants::QUERY_PATH;
use async_trait::async_trait;
use error::Error;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

/// Source of raw API responses: protocol header text followed by the body.
#[async_trait]
pub trait WeatherApi: Send + Sync {
  async fn fetch(
    &self,
    api_base: &str,
    api_key: &str,
    latitude: f64,
    longitude: f64,
  ) -> Result<Vec<u8>, Error>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
  client: Client,
}

impl HttpFetcher {
  pub fn new(timeout: Duration) -> Result<Self, Error> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self { client })
  }
}

pub fn build_url(api_base: &str, api_key: &str, latitude: f64, longitude: f64) -> Result<Url, Error> {
  let api_key = api_key.trim();
  if api_key.is_empty() {
    return Err(Error::missing_api_key());
  }

  let url = format!(
    "{}/{}/{}/{:.6},{:.6}.json",
    api_base.trim_end_matches('/'),
    api_key,
    QUERY_PATH,
    latitude,
    longitude
  );
  Url::parse(&url).map_err(|e| Error::ConfigError(format!("Failed to build API URL: {}", e)))
}

#[async_trait]
impl WeatherApi for HttpFetcher {
  #[instrument(skip(self, api_key))]
  async fn fetch(
    &self,
    api_base: &str,
    api_key: &str,
    latitude: f64,
    longitude: f64,
  ) -> Result<Vec<u8>, Error> {
    let url = build_url(api_base, api_key, latitude, longitude)?;
    let response = self.client.get(url).send().await?;

    match response.status() {
      status if status.is_success() => (),
      StatusCode::TOO_MANY_REQUESTS => return Err(Error::RateLimitExceeded),
      status => {
        error!("API request failed with status: {}", status);
        return Err(Error::ApiError(format!(
          "API request failed with status: {}",
          status
        )));
      }
    }

    let raw = raw_response(response).await?;
    debug!("Received {} bytes", raw.len());
    Ok(raw)
  }
}

/// Status line and headers as received, a blank line, then the body.
async fn raw_response(response: Response) -> Result<Vec<u8>, Error> {
  let mut raw = format!("{:?} {}\r\n", response.version(), response.status()).into_bytes();
  for (name, value) in response.headers() {
    raw.extend_from_slice(name.as_str().as_bytes());
    raw.extend_from_slice(b": ");
    raw.extend_from_slice(value.as_bytes());
    raw.extend_from_slice(b"\r\n");
  }
  raw.extend_from_slice(b"\r\n");
  raw.extend_from_slice(&response.bytes().await?);
  Ok(raw)
}
