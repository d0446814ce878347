//! Display surface contract and the shared, display-wide exclusion.
//!
//! Widgets draw through [`DisplayHandle::lock`]; holding the guard for a
//! whole clear → border → content → flush sequence keeps concurrent draws
//! from interleaving on screen.

mod memory;
mod terminal;

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use memory::MemorySurface;
pub use terminal::{CrosstermSurface, TerminalGuard};

/// Terminal dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub rows: u16,
    pub cols: u16,
}

/// Minimal cell-addressed output device.
pub trait Surface: Send {
    fn set_cursor(&mut self, row: u16, col: u16) -> io::Result<()>;

    /// Write one character at the cursor and advance it one column.
    fn put_char(&mut self, ch: char) -> io::Result<()>;

    fn put_str(&mut self, text: &str) -> io::Result<()> {
        for ch in text.chars() {
            self.put_char(ch)?;
        }
        Ok(())
    }

    /// Blank the whole surface.
    fn clear(&mut self) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    fn size(&self) -> io::Result<Size>;
}

/// Draw `height` copies of `ch` downward starting at (`row`, `col`).
pub fn put_vertical_line(
    surface: &mut dyn Surface,
    row: u16,
    col: u16,
    ch: char,
    height: u16,
) -> io::Result<()> {
    for offset in 0..height {
        surface.set_cursor(row + offset, col)?;
        surface.put_char(ch)?;
    }
    Ok(())
}

/// Print `text` centred between two columns (inclusive) on `row`. Prints
/// nothing if it does not fit.
pub fn centre_string(
    surface: &mut dyn Surface,
    text: &str,
    row: u16,
    left: u16,
    right: u16,
) -> io::Result<()> {
    let max_width = usize::from(right.saturating_sub(left));
    let len = text.chars().count();
    if len > max_width {
        return Ok(());
    }
    // len <= max_width <= u16::MAX
    let offset = ((max_width - len) / 2) as u16;
    surface.set_cursor(row, left + offset)?;
    surface.put_str(text)
}

/// Cloneable handle to the one display every widget shares.
#[derive(Clone)]
pub struct DisplayHandle {
    inner: Arc<Mutex<dyn Surface>>,
}

impl std::fmt::Debug for DisplayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayHandle").finish_non_exhaustive()
    }
}

impl DisplayHandle {
    pub fn new<S: Surface + 'static>(surface: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(surface)),
        }
    }

    /// Wrap a surface the caller keeps a typed handle to (e.g. to inspect a
    /// [`MemorySurface`] after drawing).
    pub fn shared<S: Surface + 'static>(surface: Arc<Mutex<S>>) -> Self {
        Self { inner: surface }
    }

    /// Take the display-wide exclusion. A poisoned lock is recovered: a
    /// panic mid-draw leaves at worst a stale frame.
    pub fn lock(&self) -> MutexGuard<'_, dyn Surface + 'static> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
