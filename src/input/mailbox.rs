//! Single-slot, overwritable key mailbox.
//!
//! A mailbox models "the current key state", not a stream: when several
//! pushes land before the consumer drains, only the newest survives. That
//! coalescing is intentional. Line listeners accumulate characters on the
//! dispatch thread, so only their wake signal coalesces, never their text.

use std::sync::{Condvar, Mutex, PoisonError};

use tracing::warn;

use super::KeyEvent;

#[derive(Debug, Default)]
struct Slot {
    pending: Option<KeyEvent>,
    closed: bool,
}

/// Last-write-wins key cell with a blocking take.
#[derive(Debug, Default)]
pub struct Mailbox {
    slot: Mutex<Slot>,
    arrived: Condvar,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the pending event and wake the consumer. Never blocks on
    /// anything but the slot lock, and never panics.
    pub fn put(&self, event: KeyEvent) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.closed {
            return;
        }
        if event.is_end_of_stream() {
            slot.closed = true;
            slot.pending = None;
            self.arrived.notify_all();
            return;
        }
        slot.pending = Some(event);
        self.arrived.notify_one();
    }

    /// Force the mailbox into its end-of-stream state. Idempotent.
    pub fn close(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.closed = true;
        slot.pending = None;
        self.arrived.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed
    }

    /// Block until an event is pending, then drain it.
    ///
    /// Returns `EndOfStream` immediately once closed, and `Unknown` if the
    /// slot lock was poisoned by a panicking thread.
    pub fn take(&self) -> KeyEvent {
        let Ok(slot) = self.slot.lock() else {
            warn!("key mailbox poisoned before wait; returning unknown key");
            return KeyEvent::Unknown;
        };
        match self
            .arrived
            .wait_while(slot, |slot| slot.pending.is_none() && !slot.closed)
        {
            Ok(mut slot) => {
                if slot.closed {
                    KeyEvent::EndOfStream
                } else {
                    slot.pending.take().unwrap_or(KeyEvent::Unknown)
                }
            }
            Err(_) => {
                warn!("key mailbox poisoned while waiting; returning unknown key");
                KeyEvent::Unknown
            }
        }
    }

    /// Drain the pending event without blocking.
    #[cfg(test)]
    fn try_take(&self) -> Option<KeyEvent> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.closed {
            return Some(KeyEvent::EndOfStream);
        }
        slot.pending.take()
    }
}
