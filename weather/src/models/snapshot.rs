// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use serde_json::Value;

/// One complete parsed API response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot(Value);

/// Decodes the JSON payload that follows the protocol header in `raw`.
///
/// Everything before the first `{` is skipped.
pub fn parse(raw: &[u8]) -> Result<WeatherSnapshot, Error> {
  let start = raw
    .iter()
    .position(|&b| b == b'{')
    .ok_or_else(|| Error::ParseError("no JSON object in response".into()))?;

  serde_json::from_slice(&raw[start..])
    .map(WeatherSnapshot)
    .map_err(|e| Error::ParseError(format!("Failed to deserialize response: {}", e)))
}

impl WeatherSnapshot {
  pub fn new(value: Value) -> Self {
    Self(value)
  }

  pub fn root(&self) -> Section<'_> {
    Section::new(Some(&self.0))
  }

  pub fn into_inner(self) -> Value {
    self.0
  }

  /// The error object the API embeds in `response.error`, as
  /// `"<type>: <description>"`.
  pub fn api_error(&self) -> Option<String> {
    let error = self.root().section("response").section("error");
    if error.get("type").is_none() && error.get("description").is_none() {
      return None;
    }
    Some(format!(
      "{}: {}",
      error.field("type"),
      error.field("description")
    ))
  }
}

/// Read-only view of one mapping in a snapshot.
///
/// A section over a missing or non-object value behaves as an empty mapping.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
  value: Option<&'a Value>,
}

impl<'a> Section<'a> {
  fn new(value: Option<&'a Value>) -> Self {
    Self { value }
  }

  pub fn get(&self, name: &str) -> Option<&'a Value> {
    self.value?.as_object()?.get(name)
  }

  pub fn section(&self, name: &str) -> Section<'a> {
    Section::new(self.get(name))
  }

  /// Entries of the array stored at `name`, in document order.
  pub fn items(&self, name: &str) -> impl Iterator<Item = Section<'a>> {
    self
      .get(name)
      .and_then(Value::as_array)
      .into_iter()
      .flatten()
      .map(|v| Section::new(Some(v)))
  }

  /// Text of a scalar field, or `"<name> (missing)"`.
  pub fn field(&self, name: &str) -> String {
    self
      .get(name)
      .and_then(scalar_text)
      .unwrap_or_else(|| missing(name))
  }
}

pub fn missing(name: &str) -> String {
  format!("{} (missing)", name)
}

fn scalar_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Null | Value::Array(_) | Value::Object(_) => None,
  }
}
