// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use weather::Block;

/// A named, reusable text pane.
///
/// Content operations fail on a surface that does not exist; `write` also
/// fails while the surface is read-only. `hide` and `destroy` on an absent
/// surface are no-ops.
pub trait Surface {
  fn exists(&self) -> bool;
  /// Whether the surface is the view currently shown to the operator.
  fn is_active(&self) -> bool;
  fn create_or_get(&mut self) -> Result<(), Error>;
  fn clear(&mut self) -> Result<(), Error>;
  fn write(&mut self, block: &Block) -> Result<(), Error>;
  fn set_read_only(&mut self, read_only: bool) -> Result<(), Error>;
  fn show(&mut self) -> Result<(), Error>;
  fn hide(&mut self) -> Result<(), Error>;
  fn destroy(&mut self) -> Result<(), Error>;
  /// Moves the visible window over the content. A no-op unless active.
  fn scroll(&mut self, scroll: Scroll) -> Result<(), Error>;
  /// Transient one-line message that does not touch the surface content.
  fn notify(&mut self, message: &str) -> Result<(), Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
  Up,
  Down,
  PageUp,
  PageDown,
  Top,
}

pub(crate) fn absent() -> Error {
  Error::DisplayError("surface does not exist".into())
}

pub(crate) fn read_only() -> Error {
  Error::DisplayError("surface is read-only".into())
}
