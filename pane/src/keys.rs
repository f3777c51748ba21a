// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{presenter::Command, surface::Scroll};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const HELP: &str =
  "g refresh  G force refresh  b brief  j/k scroll  space page  q dismiss  Q quit";

pub fn command_for(key: &KeyEvent) -> Option<Command> {
  if key.kind != KeyEventKind::Press {
    return None;
  }
  if key.modifiers.contains(KeyModifiers::CONTROL) {
    return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
  }

  match key.code {
    KeyCode::Char('g') => Some(Command::Refresh),
    KeyCode::Char('G') => Some(Command::ForceRefresh),
    KeyCode::Char('b') => Some(Command::Brief),
    KeyCode::Char('q') | KeyCode::Esc => Some(Command::Dismiss),
    KeyCode::Char('Q') => Some(Command::Quit),
    KeyCode::Up | KeyCode::Char('k') => Some(Command::Scroll(Scroll::Up)),
    KeyCode::Down | KeyCode::Char('j') => Some(Command::Scroll(Scroll::Down)),
    KeyCode::PageUp => Some(Command::Scroll(Scroll::PageUp)),
    KeyCode::PageDown | KeyCode::Char(' ') => Some(Command::Scroll(Scroll::PageDown)),
    KeyCode::Home => Some(Command::Scroll(Scroll::Top)),
    _ => None,
  }
}
