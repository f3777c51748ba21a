// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use super::snapshot::{missing, Section, WeatherSnapshot};
use crate::constants::{DAY_TIME_FORMAT, TIME_FORMAT};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde_json::Value;
use std::fmt::Display;

const OBSERVATION: &str = "current_observation";
const EPOCH_FIELD: &str = "local_epoch";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
  Title,
  Heading,
  Body,
}

/// A run of report text sharing one emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
  pub emphasis: Emphasis,
  pub text: String,
}

impl Block {
  fn new(emphasis: Emphasis, text: impl Into<String>) -> Self {
    Self {
      emphasis,
      text: text.into(),
    }
  }
}

pub fn brief_summary(snapshot: &WeatherSnapshot) -> String {
  brief_summary_in(snapshot, &Local)
}

pub fn brief_summary_in<Tz>(snapshot: &WeatherSnapshot, tz: &Tz) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  let obs = snapshot.root().section(OBSERVATION);
  format!(
    "{}, Temp {}F, Humidity {}, Wind {} (retrieved {})",
    obs.field("weather"),
    obs.field("temp_f"),
    obs.field("relative_humidity"),
    obs.field("wind_string"),
    observed_at(&obs, tz, TIME_FORMAT),
  )
}

pub fn full_report(snapshot: &WeatherSnapshot) -> String {
  full_report_in(snapshot, &Local)
}

pub fn full_report_in<Tz>(snapshot: &WeatherSnapshot, tz: &Tz) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  concat(&report_blocks_in(snapshot, tz))
}

pub fn forecast_section(snapshot: &WeatherSnapshot) -> String {
  concat(&forecast_blocks(snapshot))
}

/// The full report, current conditions followed by the forecast, split
/// into styled blocks.
pub fn report_blocks(snapshot: &WeatherSnapshot) -> Vec<Block> {
  report_blocks_in(snapshot, &Local)
}

pub fn report_blocks_in<Tz>(snapshot: &WeatherSnapshot, tz: &Tz) -> Vec<Block>
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  let obs = snapshot.root().section(OBSERVATION);
  let city = obs.section("display_location").field("city");

  let mut blocks = vec![
    Block::new(Emphasis::Title, format!("{} Weather\n", city)),
    Block::new(Emphasis::Body, "\n"),
    Block::new(
      Emphasis::Heading,
      format!(
        "Current conditions (retrieved {})\n",
        observed_at(&obs, tz, DAY_TIME_FORMAT)
      ),
    ),
    Block::new(
      Emphasis::Body,
      format!(
        "{}\nTemp {}F\nHumidity {}\nPrecipitation rate {} in/hr\nWind {}\n",
        obs.field("weather"),
        obs.field("temp_f"),
        obs.field("relative_humidity"),
        obs.field("precip_1hr_in"),
        obs.field("wind_string"),
      ),
    ),
  ];
  blocks.extend(forecast_blocks(snapshot));
  blocks
}

fn forecast_blocks(snapshot: &WeatherSnapshot) -> Vec<Block> {
  snapshot
    .root()
    .section("forecast")
    .section("txt_forecast")
    .items("forecastday")
    .flat_map(|day| {
      [
        Block::new(Emphasis::Body, "\n"),
        Block::new(Emphasis::Heading, format!("{}\n", day.field("title"))),
        Block::new(Emphasis::Body, format!("{}\n", day.field("fcttext"))),
      ]
    })
    .collect()
}

fn concat(blocks: &[Block]) -> String {
  blocks.iter().map(|b| b.text.as_str()).collect()
}

/// Observation time from `local_epoch`, rendered in `tz`.
fn observed_at<Tz>(obs: &Section<'_>, tz: &Tz, format: &str) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  observation_time(obs, tz)
    .map(|dt| dt.format(format).to_string())
    .unwrap_or_else(|| missing(EPOCH_FIELD))
}

fn observation_time<Tz: TimeZone>(obs: &Section<'_>, tz: &Tz) -> Option<DateTime<Tz>> {
  let secs = match obs.get(EPOCH_FIELD)? {
    Value::String(s) => s.trim().parse::<i64>().ok()?,
    Value::Number(n) => n.as_i64()?,
    _ => return None,
  };
  Utc
    .timestamp_opt(secs, 0)
    .single()
    .map(|dt| dt.with_timezone(tz))
}
