//! Key listener contract and the raw (single-key) listener variants.

use super::{KeyEvent, Mailbox};

/// A consumer registered with the [`InputBus`](super::InputBus).
///
/// `push` runs on the dispatch thread and must be O(1) apart from any
/// bounded rendering; `wait_next` runs on the listener's own thread.
pub trait KeyListener: Send + Sync {
    /// Deliver one event. Must not block indefinitely and must not panic.
    fn push(&self, event: KeyEvent);

    /// Force end-of-stream and wake any blocked consumer. Idempotent.
    fn close(&self);

    /// Block until a new event is pushed, then return the newest one.
    fn wait_next(&self) -> KeyEvent;
}

/// Which events a [`RawKeyListener`] lets through.
///
/// End-of-stream always passes so filtered consumers still learn that input
/// is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFilter {
    #[default]
    All,
    /// Only the four arrow keys.
    ArrowsOnly,
    /// Everything except printable characters.
    NonCharacter,
}

impl KeyFilter {
    pub fn accepts(self, event: KeyEvent) -> bool {
        if event.is_end_of_stream() {
            return true;
        }
        match self {
            Self::All => true,
            Self::ArrowsOnly => event.is_arrow(),
            Self::NonCharacter => !event.is_character(),
        }
    }
}

/// Mailbox-backed listener for consumers that want individual keys.
#[derive(Debug, Default)]
pub struct RawKeyListener {
    filter: KeyFilter,
    mailbox: Mailbox,
}

impl RawKeyListener {
    pub fn new(filter: KeyFilter) -> Self {
        Self {
            filter,
            mailbox: Mailbox::new(),
        }
    }

    /// Accept every key.
    pub fn all() -> Self {
        Self::new(KeyFilter::All)
    }

    /// Wake only for arrow keys (menu navigation).
    pub fn arrows_only() -> Self {
        Self::new(KeyFilter::ArrowsOnly)
    }

    /// Wake for Enter, Escape, arrows and other non-printable keys.
    pub fn non_character() -> Self {
        Self::new(KeyFilter::NonCharacter)
    }

    pub fn filter(&self) -> KeyFilter {
        self.filter
    }

    pub fn is_closed(&self) -> bool {
        self.mailbox.is_closed()
    }
}

impl KeyListener for RawKeyListener {
    fn push(&self, event: KeyEvent) {
        if self.filter.accepts(event) {
            self.mailbox.put(event);
        }
    }

    fn close(&self) {
        self.mailbox.close();
    }

    fn wait_next(&self) -> KeyEvent {
        self.mailbox.take()
    }
}
