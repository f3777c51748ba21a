// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::surface::{absent, read_only, Scroll, Surface};
use error::Error;
use weather::Block;

/// Surface kept entirely in memory. Records everything it is asked to do.
#[derive(Debug, Default)]
pub struct MemorySurface {
  blocks: Option<Vec<Block>>,
  read_only: bool,
  active: bool,
  shows: usize,
  scrolls: Vec<Scroll>,
  notifications: Vec<String>,
}

impl MemorySurface {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn blocks(&self) -> &[Block] {
    self.blocks.as_deref().unwrap_or_default()
  }

  pub fn text(&self) -> String {
    self.blocks().iter().map(|b| b.text.as_str()).collect()
  }

  pub fn is_read_only(&self) -> bool {
    self.read_only
  }

  /// How many times the surface was brought into view.
  pub fn shows(&self) -> usize {
    self.shows
  }

  /// Scroll requests received while active.
  pub fn scrolls(&self) -> &[Scroll] {
    &self.scrolls
  }

  pub fn notifications(&self) -> &[String] {
    &self.notifications
  }
}

impl Surface for MemorySurface {
  fn exists(&self) -> bool {
    self.blocks.is_some()
  }

  fn is_active(&self) -> bool {
    self.active
  }

  fn create_or_get(&mut self) -> Result<(), Error> {
    if self.blocks.is_none() {
      self.blocks = Some(Vec::new());
      self.read_only = false;
    }
    Ok(())
  }

  fn clear(&mut self) -> Result<(), Error> {
    if self.read_only {
      return Err(read_only());
    }
    self.blocks.as_mut().ok_or_else(absent)?.clear();
    Ok(())
  }

  fn write(&mut self, block: &Block) -> Result<(), Error> {
    if self.read_only {
      return Err(read_only());
    }
    self.blocks.as_mut().ok_or_else(absent)?.push(block.clone());
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
    self.active = true;
    self.shows += 1;
    Ok(())
  }

  fn hide(&mut self) -> Result<(), Error> {
    self.active = false;
    Ok(())
  }

  fn destroy(&mut self) -> Result<(), Error> {
    self.active = false;
    self.read_only = false;
    self.blocks = None;
    Ok(())
  }

  fn scroll(&mut self, scroll: Scroll) -> Result<(), Error> {
    if self.active {
      self.scrolls.push(scroll);
    }
    Ok(())
  }

  fn notify(&mut self, message: &str) -> Result<(), Error> {
    self.notifications.push(message.to_string());
    Ok(())
  }
}
