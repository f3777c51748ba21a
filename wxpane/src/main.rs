// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::event::{self, Event};
use pane::{keys, Command, Flow, Presenter, RawMode, Surface, TerminalSurface};
use std::path::PathBuf;
use tracing::instrument;
use tracing_subscriber::EnvFilter;
use weather::{WeatherConfig, WeatherService};

#[derive(Parser, Debug)]
#[command(name = "wxpane")]
#[command(about = "Current conditions and forecast in a terminal pane")]
struct Cli {
  /// Configuration file (default: wxpane.toml when present)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Latitude (decimal). Example: 40.7128
  #[arg(long, allow_negative_numbers = true)]
  lat: Option<f64>,

  /// Longitude (decimal). Example: -74.0060
  #[arg(long, allow_negative_numbers = true)]
  lon: Option<f64>,

  /// API key; overrides the config file and WUNDERGROUND_API_KEY
  #[arg(long)]
  api_key: Option<String>,

  #[command(subcommand)]
  mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default)]
enum Mode {
  /// Interactive pane (default)
  #[default]
  Show,
  /// Print the one-line summary and exit
  Brief,
}

fn filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(debug_assertions)]
fn setup_logging() {
  tracing_subscriber::fmt()
    .with_env_filter(filter())
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .init();
}

#[cfg(not(debug_assertions))]
fn setup_logging() {
  tracing_subscriber::fmt()
    .with_env_filter(filter())
    .with_writer(std::io::stderr)
    .init();
}

#[tokio::main]
async fn main() -> Result<()> {
  config::load_dotenv();
  setup_logging();

  let cli = Cli::parse();
  let config = Config::load(cli.config.as_deref())
    .context("Failed to load configuration")?
    .with_env()
    .with_api_key(cli.api_key.clone())
    .with_coordinates(cli.lat, cli.lon);

  let weather_config = WeatherConfig::from_settings(&config.weather)?;
  let service = WeatherService::new(weather_config)?;
  let presenter = Presenter::new(service, TerminalSurface::stdout());

  match cli.mode.unwrap_or_default() {
    Mode::Brief => brief(presenter).await,
    Mode::Show => run_pane(presenter).await,
  }
}

async fn brief(mut presenter: Presenter<TerminalSurface>) -> Result<()> {
  presenter.brief().await?;
  Ok(())
}

#[instrument(skip(presenter))]
async fn run_pane(mut presenter: Presenter<TerminalSurface>) -> Result<()> {
  let _raw = RawMode::enable().context("Failed to enable raw mode")?;

  if presenter.dispatch(Command::Refresh).await == Flow::Exit {
    return Ok(());
  }

  loop {
    let event = tokio::task::spawn_blocking(event::read).await??;
    let Event::Key(key) = event else {
      continue;
    };
    let Some(command) = keys::command_for(&key) else {
      continue;
    };

    if presenter.dispatch(command).await == Flow::Exit {
      break;
    }
    if command == Command::Dismiss {
      presenter
        .surface_mut()
        .notify(&format!("Weather hidden. {}", keys::HELP))?;
    }
  }

  Ok(())
}
