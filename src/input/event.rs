//! Key event model shared by every listener.

use crossterm::event::{KeyCode, KeyModifiers};

/// One classified key press.
///
/// `EndOfStream` is terminal: once a listener has seen it, nothing else it
/// receives is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable character.
    Character(char),
    Enter,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    /// The input source is gone.
    EndOfStream,
    /// Any key without a dedicated classification (function keys, Tab, ...).
    Other,
    /// Returned by a wait that could not complete normally.
    Unknown,
}

impl KeyEvent {
    /// Character payload, if this is a printable key.
    pub fn char(self) -> Option<char> {
        match self {
            Self::Character(ch) => Some(ch),
            _ => None,
        }
    }

    pub fn is_character(self) -> bool {
        matches!(self, Self::Character(_))
    }

    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::ArrowLeft | Self::ArrowRight
        )
    }

    pub fn is_end_of_stream(self) -> bool {
        self == Self::EndOfStream
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(key: crossterm::event::KeyEvent) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            // Raw mode swallows the tty EOF/interrupt; treat them as the stream closing.
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => Self::EndOfStream,
            KeyCode::Char(_) if ctrl || alt => Self::Other,
            KeyCode::Char(ch) => Self::Character(ch),
            KeyCode::Enter => Self::Enter,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Up => Self::ArrowUp,
            KeyCode::Down => Self::ArrowDown,
            KeyCode::Left => Self::ArrowLeft,
            KeyCode::Right => Self::ArrowRight,
            KeyCode::Esc => Self::Escape,
            _ => Self::Other,
        }
    }
}
