//! Physical key sources feeding the input bus.

use std::io;
use std::sync::mpsc;

use crossterm::event::{self, Event, KeyEventKind};

use super::KeyEvent;

/// Blocking "read next physical key" primitive.
pub trait KeySource {
    /// Block until the next key. Errors are treated as end-of-stream by the
    /// bus.
    fn read_key(&mut self) -> io::Result<KeyEvent>;
}

/// Reads key presses from the controlling terminal.
///
/// The terminal should be in raw mode; see
/// [`TerminalGuard`](crate::display::TerminalGuard).
#[derive(Debug, Default)]
pub struct CrosstermKeySource;

impl KeySource for CrosstermKeySource {
    fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
                continue;
            }
            return Ok(KeyEvent::from(key));
        }
    }
}

/// Synthesized input: every received key is forwarded, a dropped sender is
/// the end of the stream.
impl KeySource for mpsc::Receiver<KeyEvent> {
    fn read_key(&mut self) -> io::Result<KeyEvent> {
        Ok(self.recv().unwrap_or(KeyEvent::EndOfStream))
    }
}
