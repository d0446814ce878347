//! Line accumulation shared by the plain line listener and the text widget.
//!
//! [`LineCore`] owns the in-progress buffer and the submitted-line slot.
//! Front ends compose it and decide when to redraw; the core itself never
//! touches the display.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::{KeyEvent, KeyListener, Mailbox};
use crate::error::InputError;

/// Line-oriented input shared by every text entry front end.
pub trait LineInput: KeyListener {
    /// Block until Enter, then return the submitted line.
    ///
    /// # Errors
    ///
    /// `InputError::StreamClosed` once the input source has ended; no later
    /// call on the same listener will succeed.
    fn read_line(&self) -> Result<String, InputError>;

    /// The in-progress buffer, without blocking or consuming it.
    fn peek_buffer(&self) -> String;

    /// Replace the in-progress buffer.
    ///
    /// # Errors
    ///
    /// `InputError::TooLong` when the listener caps its length.
    fn set_contents(&self, text: &str) -> Result<(), InputError>;

    /// Resume accepting keys.
    ///
    /// # Errors
    ///
    /// `InputError::Unsupported` for listeners without an enable gate.
    fn enable(&self) -> Result<(), InputError> {
        Err(InputError::Unsupported("enable"))
    }

    /// Stop accepting keys, keeping the current buffer.
    ///
    /// # Errors
    ///
    /// `InputError::Unsupported` for listeners without an enable gate.
    fn disable(&self) -> Result<(), InputError> {
        Err(InputError::Unsupported("disable"))
    }
}

/// How a front end wants keys applied to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditPolicy {
    /// Maximum buffer length in characters; 0 means unlimited.
    pub cap: usize,
    /// Keep the buffer after Enter instead of clearing it.
    pub keep_contents: bool,
}

/// What applying one key did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Changed,
    Unchanged,
    Submitted,
    Closed,
}

impl Edit {
    pub fn needs_redraw(self) -> bool {
        matches!(self, Self::Changed | Self::Submitted)
    }
}

#[derive(Debug, Default)]
struct LineState {
    buffer: String,
    /// Last line submitted with Enter and not yet read. Last write wins.
    submitted: Option<String>,
    closed: bool,
}

/// Buffer, submitted-line slot and raw key mailbox behind one line input.
#[derive(Debug, Default)]
pub struct LineCore {
    keys: Mailbox,
    state: Mutex<LineState>,
    ready: Condvar,
}

impl LineCore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, LineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand the event to the raw key mailbox so `wait_next` keeps working.
    pub fn forward(&self, event: KeyEvent) {
        self.keys.put(event);
    }

    /// Apply one key to the buffer. Runs on the dispatch thread.
    pub fn apply(&self, event: KeyEvent, policy: EditPolicy) -> Edit {
        let mut state = self.state();
        if state.closed {
            return Edit::Closed;
        }
        match event {
            KeyEvent::Character(ch) => {
                if policy.cap == 0 || state.buffer.chars().count() < policy.cap {
                    state.buffer.push(ch);
                    Edit::Changed
                } else {
                    Edit::Unchanged
                }
            }
            KeyEvent::Backspace => {
                if state.buffer.pop().is_some() {
                    Edit::Changed
                } else {
                    Edit::Unchanged
                }
            }
            KeyEvent::Enter => {
                let line = if policy.keep_contents {
                    state.buffer.clone()
                } else {
                    std::mem::take(&mut state.buffer)
                };
                state.submitted = Some(line);
                self.ready.notify_all();
                Edit::Submitted
            }
            KeyEvent::EndOfStream => {
                state.closed = true;
                self.ready.notify_all();
                Edit::Closed
            }
            _ => Edit::Unchanged,
        }
    }

    /// Close both the line side and the raw key mailbox.
    pub fn close(&self) {
        self.keys.close();
        let mut state = self.state();
        state.closed = true;
        self.ready.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    /// Clear the in-progress buffer ahead of a read. Returns whether anything
    /// was cleared; a pending submitted line is left alone.
    pub fn clear_for_read(&self) -> bool {
        let mut state = self.state();
        if state.closed || state.submitted.is_some() || state.buffer.is_empty() {
            return false;
        }
        state.buffer.clear();
        true
    }

    /// Block until a submitted line is available or the stream closes.
    ///
    /// # Errors
    ///
    /// `InputError::StreamClosed` if the stream is (or becomes) closed.
    pub fn wait_line(&self) -> Result<String, InputError> {
        let Ok(state) = self.state.lock() else {
            warn!("line buffer poisoned before wait; returning empty line");
            return Ok(String::new());
        };
        if state.closed {
            return Err(InputError::StreamClosed);
        }
        match self
            .ready
            .wait_while(state, |s| s.submitted.is_none() && !s.closed)
        {
            Ok(mut state) => {
                if state.closed {
                    return Err(InputError::StreamClosed);
                }
                Ok(state.submitted.take().unwrap_or_default())
            }
            Err(_) => {
                warn!("line buffer poisoned while waiting; returning empty line");
                Ok(String::new())
            }
        }
    }

    pub fn peek(&self) -> String {
        self.state().buffer.clone()
    }

    pub fn replace(&self, text: &str) {
        let mut state = self.state();
        state.buffer.clear();
        state.buffer.push_str(text);
    }

    pub fn next_key(&self) -> KeyEvent {
        self.keys.take()
    }
}

/// Plain line listener: unbounded buffer, cleared on Enter and before each
/// read, no rendering.
#[derive(Debug, Default)]
pub struct LineListener {
    core: LineCore,
}

impl LineListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }
}

impl KeyListener for LineListener {
    fn push(&self, event: KeyEvent) {
        self.core.forward(event);
        self.core.apply(event, EditPolicy::default());
    }

    fn close(&self) {
        self.core.close();
    }

    fn wait_next(&self) -> KeyEvent {
        self.core.next_key()
    }
}

impl LineInput for LineListener {
    fn read_line(&self) -> Result<String, InputError> {
        self.core.clear_for_read();
        self.core.wait_line()
    }

    fn peek_buffer(&self) -> String {
        self.core.peek()
    }

    fn set_contents(&self, text: &str) -> Result<(), InputError> {
        self.core.replace(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::spawn_blocked;
    use std::sync::Arc;

    fn type_str(listener: &LineListener, text: &str) {
        for ch in text.chars() {
            listener.push(KeyEvent::Character(ch));
        }
    }

    #[test]
    fn backspace_drops_one_trailing_char() {
        let listener = LineListener::new();
        listener.push(KeyEvent::Backspace);
        type_str(&listener, "helo");
        listener.push(KeyEvent::Backspace);
        type_str(&listener, "lo");
        assert_eq!(listener.peek_buffer(), "hello");
        for _ in 0..10 {
            listener.push(KeyEvent::Backspace);
        }
        assert_eq!(listener.peek_buffer(), "");
    }

    #[test]
    fn other_keys_leave_buffer_alone() {
        let listener = LineListener::new();
        type_str(&listener, "ab");
        listener.push(KeyEvent::ArrowLeft);
        listener.push(KeyEvent::Escape);
        listener.push(KeyEvent::Other);
        assert_eq!(listener.peek_buffer(), "ab");
    }

    #[test]
    fn enter_releases_waiting_reader() {
        let listener = Arc::new(LineListener::new());
        let reader = {
            let listener = Arc::clone(&listener);
            spawn_blocked(move || listener.read_line())
        };
        type_str(&listener, "hi there");
        listener.push(KeyEvent::Enter);
        assert_eq!(reader.join(), Ok("hi there".to_string()));
        assert_eq!(listener.peek_buffer(), "");
    }

    #[test]
    fn line_submitted_without_reader_is_kept_for_next_read() {
        let listener = LineListener::new();
        type_str(&listener, "first");
        listener.push(KeyEvent::Enter);
        type_str(&listener, "second");
        listener.push(KeyEvent::Enter);
        // Single slot, newest submission wins.
        assert_eq!(listener.read_line(), Ok("second".to_string()));
    }

    #[test]
    fn end_of_stream_fails_current_and_future_reads() {
        let listener = Arc::new(LineListener::new());
        let reader = {
            let listener = Arc::clone(&listener);
            spawn_blocked(move || listener.read_line())
        };
        listener.push(KeyEvent::EndOfStream);
        assert_eq!(reader.join(), Err(InputError::StreamClosed));
        assert_eq!(listener.read_line(), Err(InputError::StreamClosed));
        assert_eq!(listener.wait_next(), KeyEvent::EndOfStream);
    }

    #[test]
    fn close_before_read_fails_immediately() {
        let listener = LineListener::new();
        type_str(&listener, "abc");
        listener.push(KeyEvent::Enter);
        listener.close();
        assert_eq!(listener.read_line(), Err(InputError::StreamClosed));
    }

    #[test]
    fn raw_keys_and_lines_share_one_stream() {
        let listener = LineListener::new();
        listener.push(KeyEvent::Character('x'));
        assert_eq!(listener.wait_next(), KeyEvent::Character('x'));
        listener.push(KeyEvent::Enter);
        assert_eq!(listener.wait_next(), KeyEvent::Enter);
        assert_eq!(listener.read_line(), Ok("x".to_string()));
    }

    #[test]
    fn plain_listener_has_no_enable_gate() {
        let listener = LineListener::new();
        assert_eq!(listener.enable(), Err(InputError::Unsupported("enable")));
        assert_eq!(listener.disable(), Err(InputError::Unsupported("disable")));
        listener.set_contents("prefilled").expect("set contents");
        assert_eq!(listener.peek_buffer(), "prefilled");
    }

    #[test]
    fn policy_cap_drops_extra_characters() {
        let core = LineCore::new();
        let policy = EditPolicy {
            cap: 3,
            keep_contents: false,
        };
        for ch in "abcdef".chars() {
            core.apply(KeyEvent::Character(ch), policy);
        }
        assert_eq!(core.peek(), "abc");
        assert_eq!(core.apply(KeyEvent::Character('g'), policy), Edit::Unchanged);
    }

    #[test]
    fn keep_contents_survives_enter() {
        let core = LineCore::new();
        let policy = EditPolicy {
            cap: 0,
            keep_contents: true,
        };
        core.apply(KeyEvent::Character('k'), policy);
        assert_eq!(core.apply(KeyEvent::Enter, policy), Edit::Submitted);
        assert_eq!(core.peek(), "k");
        assert_eq!(core.wait_line(), Ok("k".to_string()));
    }
}
