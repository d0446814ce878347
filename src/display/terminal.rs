//! Crossterm-backed surface and terminal mode guard.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    QueueableCommand,
};

use super::{Size, Surface};

/// Queues drawing commands on `W` and writes them out on [`Surface::flush`].
#[derive(Debug)]
pub struct CrosstermSurface<W: Write + Send> {
    out: W,
}

impl CrosstermSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> CrosstermSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Surface for CrosstermSurface<W> {
    fn set_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.out.queue(MoveTo(col, row))?;
        Ok(())
    }

    fn put_char(&mut self, ch: char) -> io::Result<()> {
        self.out.queue(Print(ch))?;
        Ok(())
    }

    fn put_str(&mut self, text: &str) -> io::Result<()> {
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn size(&self) -> io::Result<Size> {
        let (cols, rows) = terminal::size()?;
        Ok(Size { rows, cols })
    }
}

/// Raw mode plus alternate screen for the guard's lifetime, so the user's
/// terminal is restored on any return path.
#[derive(Debug)]
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
