//! Single-reader key dispatcher.
//!
//! The bus owns the only thread that reads physical keys and fans every
//! event out to all registered listeners, in registration order. When the
//! source ends, every listener still registered is closed so no consumer is
//! left parked.

use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::{KeyEvent, KeyListener, KeySource};
use crate::context::AppContext;

#[derive(Default)]
struct Registry {
    listeners: Vec<Arc<dyn KeyListener>>,
    /// Set once the listeners have been closed; later registrations are
    /// closed on arrival.
    stopped: bool,
}

#[derive(Debug)]
struct Activity {
    seq: u64,
    last: KeyEvent,
    stopped: bool,
}

/// Fan-out point between one key source and many listeners.
pub struct InputBus {
    ctx: Arc<AppContext>,
    registry: Mutex<Registry>,
    activity: Mutex<Activity>,
    any_key: Condvar,
}

impl std::fmt::Debug for InputBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputBus")
            .field("listeners", &self.listener_count())
            .field("shutdown", &self.ctx.is_shutdown())
            .finish()
    }
}

impl InputBus {
    pub fn new(ctx: Arc<AppContext>) -> Arc<Self> {
        Arc::new(Self {
            ctx,
            registry: Mutex::new(Registry::default()),
            activity: Mutex::new(Activity {
                seq: 0,
                last: KeyEvent::Unknown,
                stopped: false,
            }),
            any_key: Condvar::new(),
        })
    }

    /// Run the dispatch loop on a dedicated `input-bus` thread.
    pub fn spawn<S>(self: &Arc<Self>, source: S) -> io::Result<JoinHandle<()>>
    where
        S: KeySource + Send + 'static,
    {
        let bus = Arc::clone(self);
        thread::Builder::new()
            .name("input-bus".to_string())
            .spawn(move || bus.run(source))
    }

    /// Run the dispatch loop on the calling thread until the source ends or
    /// shutdown is requested.
    pub fn run<S: KeySource>(&self, mut source: S) {
        while !self.ctx.is_shutdown() {
            let key = match source.read_key() {
                Ok(key) => key,
                Err(err) => {
                    warn!(error = %err, "key source failed; treating as end of stream");
                    KeyEvent::EndOfStream
                }
            };
            self.signal_activity(key);

            if key.is_end_of_stream() {
                self.ctx.request_shutdown();
                self.dispatch(key);
                break;
            }
            self.dispatch(key);
        }
        self.stop_listeners();
        debug!("input bus stopped");
    }

    /// Stop the bus from outside the dispatch thread: request shutdown and
    /// close every registered listener now. The reader thread exits after
    /// its current blocking read returns.
    pub fn stop(&self) {
        self.ctx.request_shutdown();
        self.stop_listeners();
    }

    fn lock_registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_activity(&self) -> MutexGuard<'_, Activity> {
        self.activity.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, key: KeyEvent) {
        let registry = self.lock_registry();
        for listener in &registry.listeners {
            listener.push(key);
        }
    }

    fn signal_activity(&self, key: KeyEvent) {
        let mut activity = self.lock_activity();
        activity.seq += 1;
        activity.last = key;
        self.any_key.notify_all();
    }

    fn stop_listeners(&self) {
        {
            let mut registry = self.lock_registry();
            registry.stopped = true;
            for listener in registry.listeners.drain(..) {
                listener.close();
            }
        }
        let mut activity = self.lock_activity();
        activity.stopped = true;
        self.any_key.notify_all();
    }

    /// Add a listener at the end of the delivery order.
    ///
    /// Once the bus has stopped, the listener is closed instead so its
    /// consumer sees end-of-stream immediately.
    pub fn register(&self, listener: Arc<dyn KeyListener>) {
        let mut registry = self.lock_registry();
        if registry.stopped || self.ctx.is_shutdown() {
            debug!("input bus already stopped; closing new listener");
            listener.close();
            return;
        }
        registry.listeners.push(listener);
        debug!(count = registry.listeners.len(), "key listener added");
    }

    /// Remove a listener and close it before returning, so a consumer
    /// waiting on it is released. Returns whether it was registered.
    pub fn unregister<L>(&self, listener: &Arc<L>) -> bool
    where
        L: KeyListener + ?Sized,
    {
        let mut registry = self.lock_registry();
        listener.close();
        let target = Arc::as_ptr(listener) as *const ();
        let before = registry.listeners.len();
        registry
            .listeners
            .retain(|l| Arc::as_ptr(l) as *const () != target);
        let removed = registry.listeners.len() != before;
        if removed {
            debug!(count = registry.listeners.len(), "key listener removed");
        } else {
            debug!("key listener not found; cannot remove");
        }
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.lock_registry().listeners.len()
    }

    /// Debug hook: block until the bus reads any key and return it.
    /// Returns `EndOfStream` without blocking once the bus has stopped.
    pub fn wait_for_key(&self) -> KeyEvent {
        let activity = self.lock_activity();
        if activity.stopped {
            return KeyEvent::EndOfStream;
        }
        let seen = activity.seq;
        let activity = self
            .any_key
            .wait_while(activity, |a| a.seq == seen && !a.stopped)
            .unwrap_or_else(PoisonError::into_inner);
        if activity.seq != seen {
            activity.last
        } else {
            KeyEvent::EndOfStream
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{LineInput, LineListener, RawKeyListener};
    use crate::testsupport::spawn_blocked;
    use std::sync::mpsc;

    fn bus() -> Arc<InputBus> {
        InputBus::new(Arc::new(AppContext::new(50)))
    }

    #[test]
    fn events_reach_every_listener() {
        let bus = bus();
        let line = Arc::new(LineListener::new());
        let raw = Arc::new(RawKeyListener::all());
        // Raw first: by the time the line reader wakes on Enter, the raw
        // mailbox already holds it.
        bus.register(raw.clone());
        bus.register(line.clone());

        let (tx, rx) = mpsc::channel();
        let handle = bus.spawn(rx).expect("spawn bus");
        for ch in "ok".chars() {
            tx.send(KeyEvent::Character(ch)).expect("send");
        }
        tx.send(KeyEvent::Enter).expect("send");
        assert_eq!(line.read_line(), Ok("ok".to_string()));
        assert_eq!(raw.wait_next(), KeyEvent::Enter);

        drop(tx);
        handle.join().expect("join bus");
        assert_eq!(bus.listener_count(), 0);
        assert_eq!(raw.wait_next(), KeyEvent::EndOfStream);
    }

    #[test]
    fn read_error_is_end_of_stream() {
        struct Broken;
        impl KeySource for Broken {
            fn read_key(&mut self) -> io::Result<KeyEvent> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
        }

        let ctx = Arc::new(AppContext::new(50));
        let bus = InputBus::new(Arc::clone(&ctx));
        let line = Arc::new(LineListener::new());
        bus.register(line.clone());
        bus.run(Broken);
        assert!(ctx.is_shutdown());
        assert_eq!(line.read_line(), Err(crate::error::InputError::StreamClosed));
    }

    #[test]
    fn unregister_closes_and_reports_membership() {
        let bus = bus();
        let raw = Arc::new(RawKeyListener::all());
        bus.register(raw.clone());
        assert!(bus.unregister(&raw));
        assert!(raw.is_closed());
        assert!(!bus.unregister(&raw));
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn wait_for_key_returns_next_read() {
        let bus = bus();
        let (tx, rx) = mpsc::channel();
        let waiter = {
            let bus = Arc::clone(&bus);
            spawn_blocked(move || bus.wait_for_key())
        };
        let handle = bus.spawn(rx).expect("spawn bus");
        tx.send(KeyEvent::Escape).expect("send");
        assert_eq!(waiter.join(), KeyEvent::Escape);
        drop(tx);
        handle.join().expect("join bus");
        assert_eq!(bus.wait_for_key(), KeyEvent::EndOfStream);
    }

    #[test]
    fn stop_releases_listeners_without_a_key() {
        let bus = bus();
        let line = Arc::new(LineListener::new());
        bus.register(line.clone());
        let reader = {
            let line = Arc::clone(&line);
            spawn_blocked(move || line.read_line())
        };
        bus.stop();
        assert_eq!(reader.join(), Err(crate::error::InputError::StreamClosed));
    }
}
