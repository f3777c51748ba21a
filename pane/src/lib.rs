// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod keys;
mod memory;
mod presenter;
mod surface;
mod terminal;

pub use crate::{
  memory::MemorySurface,
  presenter::{Command, Flow, PaneState, Presenter},
  surface::{Scroll, Surface},
  terminal::{RawMode, TerminalSurface},
};
