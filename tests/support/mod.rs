//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Long enough for a spawned thread to reach its blocking call.
pub const SETTLE: Duration = Duration::from_millis(100);

const DEADLINE: Duration = Duration::from_secs(5);

/// Poll `check` until it holds or the deadline passes.
pub fn eventually(what: &str, mut check: impl FnMut() -> bool) {
    let start = Instant::now();
    while !check() {
        assert!(start.elapsed() < DEADLINE, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(10));
    }
}

/// A call running on its own thread, reporting back over a channel.
pub struct Pending<T> {
    rx: mpsc::Receiver<T>,
}

impl<T: Send + 'static> Pending<T> {
    pub fn spawn(name: &str, f: impl FnOnce() -> T + Send + 'static) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let _ = tx.send(f());
            })
            .expect("spawn test thread");
        thread::sleep(SETTLE);
        Self { rx }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.rx.try_recv(), Err(mpsc::TryRecvError::Empty))
    }

    pub fn finish(self) -> T {
        self.rx
            .recv_timeout(DEADLINE)
            .expect("call did not return in time")
    }
}
