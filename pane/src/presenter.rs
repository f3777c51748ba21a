// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::surface::{Scroll, Surface};
use error::Error;
use tracing::{debug, info, instrument, warn};
use weather::{report, Block, WeatherService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Refresh,
  ForceRefresh,
  Dismiss,
  Quit,
  Brief,
  Scroll(Scroll),
}

impl Command {
  /// Name used when reporting a failed command.
  pub fn label(self) -> &'static str {
    match self {
      Command::Refresh => "Refresh",
      Command::ForceRefresh => "Force refresh",
      Command::Dismiss => "Dismiss",
      Command::Quit => "Quit",
      Command::Brief => "Brief summary",
      Command::Scroll(_) => "Scroll",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneState {
  Absent,
  Hidden,
  Displayed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
  Continue,
  Exit,
}

/// Owns the weather service and the surface it renders into.
pub struct Presenter<S: Surface> {
  service: WeatherService,
  surface: S,
}

impl<S: Surface> Presenter<S> {
  pub fn new(service: WeatherService, surface: S) -> Self {
    Self { service, surface }
  }

  pub fn state(&self) -> PaneState {
    match (self.surface.exists(), self.surface.is_active()) {
      (false, _) => PaneState::Absent,
      (true, false) => PaneState::Hidden,
      (true, true) => PaneState::Displayed,
    }
  }

  pub fn surface(&self) -> &S {
    &self.surface
  }

  pub fn surface_mut(&mut self) -> &mut S {
    &mut self.surface
  }

  /// Fetches if the cache is stale, then redraws the surface. On failure the
  /// surface keeps whatever it showed before.
  #[instrument(skip(self))]
  pub async fn refresh(&mut self) -> Result<(), Error> {
    let blocks = report::report_blocks(self.service.snapshot().await?);
    self.render(&blocks)
  }

  pub async fn force_refresh(&mut self) -> Result<(), Error> {
    self.service.invalidate();
    self.refresh().await
  }

  pub fn dismiss(&mut self) -> Result<(), Error> {
    debug!("Dismissing weather surface");
    self.surface.hide()
  }

  pub fn quit(&mut self) -> Result<(), Error> {
    info!("Closing weather surface");
    self.surface.hide()?;
    self.surface.destroy()
  }

  /// Shows the one-line summary as a notification; the surface is untouched.
  #[instrument(skip(self))]
  pub async fn brief(&mut self) -> Result<(), Error> {
    let summary = report::brief_summary(self.service.snapshot().await?);
    self.surface.notify(&summary)
  }

  pub async fn handle(&mut self, command: Command) -> Result<Flow, Error> {
    match command {
      Command::Refresh => self.refresh().await?,
      Command::ForceRefresh => self.force_refresh().await?,
      Command::Dismiss => self.dismiss()?,
      Command::Brief => self.brief().await?,
      Command::Scroll(scroll) => self.surface.scroll(scroll)?,
      Command::Quit => {
        self.quit()?;
        return Ok(Flow::Exit);
      }
    }
    Ok(Flow::Continue)
  }

  /// Runs `command`, reporting a failure once through a notification.
  pub async fn dispatch(&mut self, command: Command) -> Flow {
    match self.handle(command).await {
      Ok(flow) => flow,
      Err(e) => {
        warn!("{:?} failed: {}", command, e);
        let message = format!("{} failed: {}", command.label(), e);
        if let Err(notify_err) = self.surface.notify(&message) {
          warn!("Failed to report error: {}", notify_err);
        }
        match command {
          Command::Quit => Flow::Exit,
          _ => Flow::Continue,
        }
      }
    }
  }

  fn render(&mut self, blocks: &[Block]) -> Result<(), Error> {
    let was_active = self.surface.is_active();
    self.surface.create_or_get()?;
    self.surface.set_read_only(false)?;
    self.surface.clear()?;
    for block in blocks {
      self.surface.write(block)?;
    }
    self.surface.set_read_only(true)?;
    if !was_active {
      self.surface.show()?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::memory::MemorySurface;
  use async_trait::async_trait;
  use serde_json::json;
  use std::sync::Mutex;
  use weather::{WeatherApi, WeatherConfig};

  struct Canned(Mutex<Vec<Result<Vec<u8>, Error>>>);

  #[async_trait]
  impl WeatherApi for Canned {
    async fn fetch(&self, _: &str, _: &str, _: f64, _: f64) -> Result<Vec<u8>, Error> {
      let mut queue = self.0.lock().unwrap();
      if queue.is_empty() {
        return Err(Error::ApiError("no more responses".into()));
      }
      queue.remove(0)
    }
  }

  fn body(city: &str, days: &[(&str, &str)]) -> Result<Vec<u8>, Error> {
    let days: Vec<_> = days
      .iter()
      .map(|(title, text)| json!({"title": title, "fcttext": text}))
      .collect();
    let value = json!({
      "current_observation": {
        "display_location": {"city": city},
        "weather": "Cloudy",
        "temp_f": 55,
        "relative_humidity": "80%",
        "wind_string": "Calm",
        "precip_1hr_in": "0.01",
        "local_epoch": "1000000000"
      },
      "forecast": {"txt_forecast": {"forecastday": days}}
    });
    Ok(format!("HTTP/1.1 200 OK\r\n\r\n{}", value).into_bytes())
  }

  fn presenter(responses: Vec<Result<Vec<u8>, Error>>) -> Presenter<MemorySurface> {
    let config = WeatherConfig::new("key", 40.0, -75.0).unwrap();
    let service = WeatherService::with_api(config, Box::new(Canned(Mutex::new(responses))));
    Presenter::new(service, MemorySurface::new())
  }

  #[tokio::test]
  async fn test_refresh_creates_and_shows_surface() {
    let mut presenter = presenter(vec![body("Springfield", &[("Monday", "Rain.")])]);
    assert_eq!(presenter.state(), PaneState::Absent);

    presenter.refresh().await.unwrap();

    let surface = presenter.surface();
    assert_eq!(presenter.state(), PaneState::Displayed);
    assert!(surface.is_read_only());
    assert_eq!(surface.shows(), 1);
    assert!(surface.text().starts_with("Springfield Weather\n\nCurrent conditions"));
    assert!(surface.text().ends_with("\nMonday\nRain.\n"));
  }

  #[tokio::test]
  async fn test_refresh_in_place_when_active() {
    let mut presenter = presenter(vec![body("A", &[]), body("B", &[])]);
    presenter.refresh().await.unwrap();
    presenter.refresh().await.unwrap();
    assert_eq!(presenter.surface().shows(), 1);
    // served from cache
    assert!(presenter.surface().text().starts_with("A Weather"));

    presenter.force_refresh().await.unwrap();
    assert_eq!(presenter.surface().shows(), 1);
    assert!(presenter.surface().text().starts_with("B Weather"));
  }

  #[tokio::test]
  async fn test_failed_force_refresh_keeps_content() {
    let mut presenter = presenter(vec![
      body("A", &[]),
      Err(Error::ApiError("unreachable".into())),
    ]);
    presenter.refresh().await.unwrap();
    let before = presenter.surface().text();

    assert!(presenter.force_refresh().await.is_err());
    assert_eq!(presenter.surface().text(), before);
    assert_eq!(presenter.state(), PaneState::Displayed);
    assert!(presenter.surface().is_read_only());
  }

  #[tokio::test]
  async fn test_refresh_failure_without_surface() {
    let mut presenter = presenter(vec![Ok(b"HTTP/1.1 200 OK\r\n\r\nnot json".to_vec())]);
    let err = presenter.refresh().await.unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
    assert_eq!(presenter.state(), PaneState::Absent);
  }

  #[tokio::test]
  async fn test_dismiss_then_refresh_brings_back() {
    let mut presenter = presenter(vec![body("A", &[])]);
    presenter.refresh().await.unwrap();
    presenter.dismiss().unwrap();
    assert_eq!(presenter.state(), PaneState::Hidden);
    assert!(presenter.surface().text().starts_with("A Weather"));

    presenter.refresh().await.unwrap();
    assert_eq!(presenter.state(), PaneState::Displayed);
    assert_eq!(presenter.surface().shows(), 2);
  }

  #[tokio::test]
  async fn test_quit_destroys_surface() {
    let mut presenter = presenter(vec![body("A", &[])]);
    presenter.refresh().await.unwrap();
    assert_eq!(presenter.handle(Command::Quit).await.unwrap(), Flow::Exit);
    assert_eq!(presenter.state(), PaneState::Absent);
  }

  #[tokio::test]
  async fn test_brief_notifies_without_surface() {
    let mut presenter = presenter(vec![body("A", &[])]);
    presenter.brief().await.unwrap();

    assert_eq!(presenter.state(), PaneState::Absent);
    let notes = presenter.surface().notifications();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].starts_with("Cloudy, Temp 55F, Humidity 80%, Wind Calm (retrieved "));
  }

  #[tokio::test]
  async fn test_dispatch_reports_error_once() {
    let mut presenter = presenter(vec![Err(Error::RateLimitExceeded)]);
    assert_eq!(presenter.dispatch(Command::Refresh).await, Flow::Continue);

    let notes = presenter.surface().notifications();
    assert_eq!(notes, ["Refresh failed: Rate limit exceeded"]);
    assert_eq!(presenter.state(), PaneState::Absent);
  }

  #[tokio::test]
  async fn test_dispatch_names_failed_command() {
    let mut presenter = presenter(vec![
      body("A", &[]),
      Err(Error::ApiError("unreachable".into())),
    ]);
    presenter.dispatch(Command::Refresh).await;
    presenter.dispatch(Command::ForceRefresh).await;
    // the cache stays stale after a failed fetch
    presenter.dispatch(Command::Brief).await;

    let notes = presenter.surface().notifications();
    assert_eq!(
      notes,
      [
        "Force refresh failed: API error: unreachable",
        "Brief summary failed: API error: no more responses",
      ]
    );
  }

  #[tokio::test]
  async fn test_scroll_reaches_displayed_surface_only() {
    let mut presenter = presenter(vec![body("A", &[])]);
    let down = Command::Scroll(Scroll::Down);

    assert_eq!(presenter.dispatch(down).await, Flow::Continue);
    assert!(presenter.surface().scrolls().is_empty());

    presenter.refresh().await.unwrap();
    presenter.dispatch(down).await;
    presenter.dispatch(Command::Scroll(Scroll::PageUp)).await;
    assert_eq!(presenter.surface().scrolls(), [Scroll::Down, Scroll::PageUp]);
    assert!(presenter.surface().notifications().is_empty());
  }
}
