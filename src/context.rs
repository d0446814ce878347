//! Application-wide state shared between threads.
//!
//! One explicitly owned context replaces process-wide statics: components
//! that need the shutdown flag or the message history receive an
//! `Arc<AppContext>`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// One line in the chat history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: String,
    pub body: String,
}

impl Message {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.sender, self.body)
    }
}

#[derive(Debug, Default)]
struct History {
    messages: VecDeque<Message>,
    /// Bumped on every change so waiters can tell "new" from "seen".
    generation: u64,
}

/// Shutdown flag plus bounded message history.
#[derive(Debug)]
pub struct AppContext {
    shutdown: AtomicBool,
    history: Mutex<History>,
    changed: Condvar,
    max_messages: usize,
}

impl AppContext {
    pub fn new(max_messages: usize) -> Self {
        Self {
            shutdown: AtomicBool::new(false),
            history: Mutex::new(History::default()),
            changed: Condvar::new(),
            max_messages: max_messages.max(1),
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Set the shutdown flag and wake history waiters. Irreversible.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        let _history = self.lock_history();
        self.changed.notify_all();
    }

    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_message(&self, message: Message) {
        self.add_messages(std::iter::once(message));
    }

    /// Append messages, trimming the oldest beyond `max_messages`.
    pub fn add_messages(&self, messages: impl IntoIterator<Item = Message>) {
        let mut history = self.lock_history();
        history.messages.extend(messages);
        let overflow = history.messages.len().saturating_sub(self.max_messages);
        history.messages.drain(..overflow);
        history.generation += 1;
        self.changed.notify_all();
    }

    pub fn clear_messages(&self) {
        let mut history = self.lock_history();
        history.messages.clear();
        history.generation += 1;
        self.changed.notify_all();
    }

    /// Snapshot of the history plus its generation.
    pub fn messages(&self) -> (Vec<Message>, u64) {
        let history = self.lock_history();
        (history.messages.iter().cloned().collect(), history.generation)
    }

    /// Block until the history generation moves past `seen` or shutdown is
    /// requested. Returns the new generation, or `None` on shutdown.
    pub fn wait_for_change(&self, seen: u64) -> Option<u64> {
        let history = self.lock_history();
        let history = self
            .changed
            .wait_while(history, |h| h.generation == seen && !self.is_shutdown())
            .unwrap_or_else(PoisonError::into_inner);
        if self.is_shutdown() {
            None
        } else {
            Some(history.generation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn history_keeps_newest_messages() {
        let ctx = AppContext::new(3);
        ctx.add_messages((0..5).map(|i| Message::new("You", i.to_string())));
        let (messages, generation) = ctx.messages();
        let bodies: Vec<_> = messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["2", "3", "4"]);
        assert_eq!(generation, 1);
    }

    #[test]
    fn clear_bumps_generation() {
        let ctx = AppContext::new(10);
        ctx.add_message(Message::new("Server", "hello"));
        ctx.clear_messages();
        let (messages, generation) = ctx.messages();
        assert!(messages.is_empty());
        assert_eq!(generation, 2);
    }

    #[test]
    fn waiter_wakes_on_new_message() {
        let ctx = Arc::new(AppContext::new(10));
        let (_, seen) = ctx.messages();
        let waiter = {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || ctx.wait_for_change(seen))
        };
        ctx.add_message(Message::new("You", "ping"));
        assert_eq!(waiter.join().expect("join"), Some(seen + 1));
    }

    #[test]
    fn shutdown_releases_waiters() {
        let ctx = Arc::new(AppContext::new(10));
        let waiter = {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || ctx.wait_for_change(0))
        };
        ctx.request_shutdown();
        assert_eq!(waiter.join().expect("join"), None);
        assert!(ctx.is_shutdown());
    }
}
