// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::surface::{absent, read_only, Scroll, Surface};
use crossterm::{
  cursor::{Hide, MoveTo, RestorePosition, SavePosition, Show},
  execute, queue,
  style::{Attribute, Color, Print, PrintStyledContent, Stylize},
  terminal::{
    self, disable_raw_mode, enable_raw_mode, is_raw_mode_enabled, Clear, ClearType,
    DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
  },
};
use error::Error;
use std::io::{self, Stdout, Write};
use tracing::{debug, warn};
use weather::{Block, Emphasis};

const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// One screen row: styled runs that together fit the terminal width.
type Line = Vec<(Emphasis, String)>;

/// Surface drawn on the terminal's alternate screen.
///
/// Content is buffered while hidden and painted when shown. Only the rows
/// above the last one hold content; the last row is kept for notifications.
/// While hidden, notifications go to the main screen.
pub struct TerminalSurface<W: Write = Stdout> {
  out: W,
  blocks: Option<Vec<Block>>,
  read_only: bool,
  active: bool,
  scroll: usize,
  size: Option<(u16, u16)>,
}

impl TerminalSurface<Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write> TerminalSurface<W> {
  pub fn new(out: W) -> Self {
    Self {
      out,
      blocks: None,
      read_only: false,
      active: false,
      scroll: 0,
      size: None,
    }
  }

  /// Uses a fixed `(columns, rows)` instead of querying the terminal.
  pub fn with_size(mut self, columns: u16, rows: u16) -> Self {
    self.size = Some((columns, rows));
    self
  }

  pub fn writer(&self) -> &W {
    &self.out
  }

  pub fn scroll_offset(&self) -> usize {
    self.scroll
  }

  fn size(&self) -> (u16, u16) {
    self
      .size
      .unwrap_or_else(|| terminal::size().unwrap_or(FALLBACK_SIZE))
  }

  /// Rows available for content.
  fn page_height(&self) -> usize {
    usize::from(self.size().1.saturating_sub(1)).max(1)
  }

  fn lines(&self) -> Vec<Line> {
    let width = usize::from(self.size().0).max(1);
    layout(self.blocks.as_deref().unwrap_or_default(), width)
  }

  fn repaint(&mut self) -> io::Result<()> {
    let lines = self.lines();
    let height = self.page_height();
    self.scroll = self.scroll.min(lines.len().saturating_sub(height));

    queue!(self.out, Clear(ClearType::All))?;
    for (row, line) in (0u16..).zip(lines.iter().skip(self.scroll).take(height)) {
      queue!(self.out, MoveTo(0, row))?;
      for (emphasis, text) in line {
        queue!(self.out, PrintStyledContent(styled(*emphasis, text)))?;
      }
    }
    self.out.flush()
  }
}

/// Splits blocks into screen rows of at most `width` characters.
fn layout(blocks: &[Block], width: usize) -> Vec<Line> {
  let mut lines: Vec<Line> = vec![Vec::new()];
  let mut column = 0;

  for block in blocks {
    for (i, part) in block.text.split('\n').enumerate() {
      if i > 0 {
        lines.push(Vec::new());
        column = 0;
      }
      let mut rest = part;
      while !rest.is_empty() {
        if column == width {
          lines.push(Vec::new());
          column = 0;
        }
        let split = rest
          .char_indices()
          .nth(width - column)
          .map_or(rest.len(), |(idx, _)| idx);
        let (head, tail) = rest.split_at(split);
        column += head.chars().count();
        if let Some(line) = lines.last_mut() {
          line.push((block.emphasis, head.to_string()));
        }
        rest = tail;
      }
    }
  }

  // text ending in '\n' leaves an empty row behind
  if lines.len() > 1 && lines.last().is_some_and(Vec::is_empty) {
    lines.pop();
  }
  lines
}

fn styled(emphasis: Emphasis, text: &str) -> crossterm::style::StyledContent<&str> {
  match emphasis {
    Emphasis::Title => text
      .with(Color::Cyan)
      .attribute(Attribute::Bold)
      .attribute(Attribute::Underlined),
    Emphasis::Heading => text.with(Color::Yellow).attribute(Attribute::Bold),
    Emphasis::Body => text.stylize(),
  }
}

impl<W: Write> Surface for TerminalSurface<W> {
  fn exists(&self) -> bool {
    self.blocks.is_some()
  }

  fn is_active(&self) -> bool {
    self.active
  }

  fn create_or_get(&mut self) -> Result<(), Error> {
    if self.blocks.is_none() {
      debug!("Creating weather surface");
      self.blocks = Some(Vec::new());
      self.read_only = false;
      self.scroll = 0;
    }
    Ok(())
  }

  fn clear(&mut self) -> Result<(), Error> {
    if self.read_only {
      return Err(read_only());
    }
    self.blocks.as_mut().ok_or_else(absent)?.clear();
    self.scroll = 0;
    if self.active {
      self.repaint()?;
    }
    Ok(())
  }

  fn write(&mut self, block: &Block) -> Result<(), Error> {
    if self.read_only {
      return Err(read_only());
    }
    self.blocks.as_mut().ok_or_else(absent)?.push(block.clone());
    if self.active {
      self.repaint()?;
    }
    Ok(())
  }

  fn set_read_only(&mut self, read_only: bool) -> Result<(), Error> {
    if !self.exists() {
      return Err(absent());
    }
    self.read_only = read_only;
    Ok(())
  }

  fn show(&mut self) -> Result<(), Error> {
    if !self.exists() {
      return Err(absent());
    }
    if !self.active {
      queue!(self.out, EnterAlternateScreen, DisableLineWrap, Hide)?;
      self.active = true;
    }
    self.repaint()?;
    Ok(())
  }

  fn hide(&mut self) -> Result<(), Error> {
    if self.active {
      execute!(self.out, Show, EnableLineWrap, LeaveAlternateScreen)?;
      self.active = false;
    }
    Ok(())
  }

  fn destroy(&mut self) -> Result<(), Error> {
    self.hide()?;
    self.blocks = None;
    self.read_only = false;
    self.scroll = 0;
    debug!("Destroyed weather surface");
    Ok(())
  }

  fn scroll(&mut self, scroll: Scroll) -> Result<(), Error> {
    if !self.active {
      return Ok(());
    }
    let page = self.page_height();
    self.scroll = match scroll {
      Scroll::Up => self.scroll.saturating_sub(1),
      Scroll::Down => self.scroll.saturating_add(1),
      Scroll::PageUp => self.scroll.saturating_sub(page),
      Scroll::PageDown => self.scroll.saturating_add(page),
      Scroll::Top => 0,
    };
    // repaint clamps the offset to the content
    self.repaint()?;
    Ok(())
  }

  fn notify(&mut self, message: &str) -> Result<(), Error> {
    if self.active {
      let rows = self.size().1;
      execute!(
        self.out,
        SavePosition,
        MoveTo(0, rows.saturating_sub(1)),
        Clear(ClearType::CurrentLine),
        PrintStyledContent(message.reverse()),
        RestorePosition
      )?;
    } else {
      let newline = if is_raw_mode_enabled()? { "\r\n" } else { "\n" };
      execute!(self.out, Print(message), Print(newline))?;
    }
    Ok(())
  }
}

impl<W: Write> Drop for TerminalSurface<W> {
  fn drop(&mut self) {
    if let Err(e) = self.hide() {
      warn!("Failed to restore terminal: {}", e);
    }
  }
}

/// Keeps the terminal in raw mode for its lifetime.
pub struct RawMode(());

impl RawMode {
  pub fn enable() -> Result<Self, Error> {
    enable_raw_mode()?;
    Ok(Self(()))
  }
}

impl Drop for RawMode {
  fn drop(&mut self) {
    if let Err(e) = disable_raw_mode() {
      warn!("Failed to leave raw mode: {}", e);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn block(emphasis: Emphasis, text: &str) -> Block {
    Block {
      emphasis,
      text: text.into(),
    }
  }

  fn output(surface: &TerminalSurface<Vec<u8>>) -> String {
    String::from_utf8_lossy(surface.writer()).into_owned()
  }

  /// Title, blank line, heading, five body rows, then three rows per day.
  fn report(days: usize) -> Vec<Block> {
    let mut blocks = vec![
      block(Emphasis::Title, "Springfield Weather\n"),
      block(Emphasis::Body, "\n"),
      block(Emphasis::Heading, "Current conditions (retrieved Sunday 01:46:40)\n"),
      block(
        Emphasis::Body,
        "Cloudy\nTemp 55F\nHumidity 80%\nPrecipitation rate 0.00 in/hr\nWind Calm\n",
      ),
    ];
    for day in 0..days {
      blocks.push(block(Emphasis::Body, "\n"));
      blocks.push(block(Emphasis::Heading, &format!("Day {}\n", day)));
      blocks.push(block(Emphasis::Body, &format!("Forecast text {}\n", day)));
    }
    blocks
  }

  fn shown(blocks: &[Block], columns: u16, rows: u16) -> TerminalSurface<Vec<u8>> {
    let mut surface = TerminalSurface::new(Vec::new()).with_size(columns, rows);
    surface.create_or_get().unwrap();
    for b in blocks {
      surface.write(b).unwrap();
    }
    surface.show().unwrap();
    surface
  }

  /// Output written since `mark`.
  fn since(surface: &TerminalSurface<Vec<u8>>, mark: usize) -> String {
    String::from_utf8_lossy(&surface.writer()[mark..]).into_owned()
  }

  #[test]
  fn test_layout_rows_and_wrapping() {
    let lines = layout(&report(0), 80);
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], vec![(Emphasis::Title, "Springfield Weather".to_string())]);
    assert!(lines[1].is_empty());

    let wrapped = layout(&[block(Emphasis::Body, "abcdefghij\n")], 4);
    let rows: Vec<String> = wrapped
      .iter()
      .map(|l| l.iter().map(|(_, t)| t.as_str()).collect())
      .collect();
    assert_eq!(rows, vec!["abcd", "efgh", "ij"]);
  }

  #[test]
  fn test_hidden_writes_are_buffered() {
    let mut surface = TerminalSurface::new(Vec::new()).with_size(80, 24);
    surface.create_or_get().unwrap();
    surface.write(&block(Emphasis::Body, "Cloudy\n")).unwrap();
    assert!(surface.writer().is_empty());

    surface.show().unwrap();
    assert!(output(&surface).contains("Cloudy"));
    assert!(surface.is_active());
  }

  #[test]
  fn test_long_report_keeps_title_on_screen() {
    // eight forecast days: 32 rows of content on a 24-row terminal
    let surface = shown(&report(8), 80, 24);
    let out = output(&surface);

    assert!(out.contains("Springfield Weather"));
    assert!(out.contains("Day 4"));
    assert!(!out.contains("Day 7"));
    // rows are addressed directly, nothing scrolls the screen
    assert!(!out.contains("\r\n"));
    assert!(!out.contains("\x1b[24;1H"));
  }

  #[test]
  fn test_scroll_reveals_rest_of_report() {
    let mut surface = shown(&report(8), 80, 24);

    let mark = surface.writer().len();
    surface.scroll(Scroll::PageDown).unwrap();
    let page = since(&surface, mark);
    assert_eq!(surface.scroll_offset(), 32 - 23);
    assert!(page.contains("Forecast text 7"));
    assert!(!page.contains("Springfield Weather"));

    surface.scroll(Scroll::Down).unwrap();
    assert_eq!(surface.scroll_offset(), 32 - 23);

    let mark = surface.writer().len();
    surface.scroll(Scroll::Top).unwrap();
    assert_eq!(surface.scroll_offset(), 0);
    assert!(since(&surface, mark).contains("Springfield Weather"));
  }

  #[test]
  fn test_short_report_does_not_scroll() {
    let mut surface = shown(&report(1), 80, 24);
    surface.scroll(Scroll::PageDown).unwrap();
    assert_eq!(surface.scroll_offset(), 0);
  }

  #[test]
  fn test_scroll_while_hidden_is_ignored() {
    let mut surface = TerminalSurface::new(Vec::new()).with_size(80, 24);
    surface.scroll(Scroll::Down).unwrap();
    assert!(surface.writer().is_empty());
  }

  #[test]
  fn test_active_writes_paint_immediately() {
    let mut surface = shown(&[], 80, 24);
    let before = surface.writer().len();

    surface.write(&block(Emphasis::Title, "Paris Weather\n")).unwrap();
    assert!(since(&surface, before).contains("Paris Weather"));
  }

  #[test]
  fn test_read_only_blocks_writes() {
    let mut surface = TerminalSurface::new(Vec::new());
    surface.create_or_get().unwrap();
    surface.set_read_only(true).unwrap();
    assert!(matches!(
      surface.write(&block(Emphasis::Body, "x")),
      Err(Error::DisplayError(_))
    ));
  }

  #[test]
  fn test_notify_when_hidden_prints_plain_line() {
    let mut surface = TerminalSurface::new(Vec::new());
    surface.notify("Cloudy, Temp 55F").unwrap();
    assert_eq!(output(&surface), "Cloudy, Temp 55F\n");
  }

  #[test]
  fn test_destroy_hides_and_forgets() {
    let mut surface = shown(&[], 80, 24);
    surface.destroy().unwrap();
    assert!(!surface.exists());
    assert!(!surface.is_active());
    assert!(surface.show().is_err());
  }
}
