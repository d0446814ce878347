//! Shared test fixtures for the threaded input and widget tests.
//!
//! Most blocking behaviour is checked the same way: start the call on its
//! own thread, give it time to park, poke it, then join with a timeout so a
//! lost wakeup fails the test instead of hanging it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const SETTLE: Duration = Duration::from_millis(100);
const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Scratch directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// `label` only makes leftovers easier to attribute.
    pub fn new(label: &str) -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!("portchat-{label}-{}-{n}", process::id()));
        // A stale directory from a crashed run with the same pid is reused.
        fs::create_dir_all(&root).expect("create scratch dir");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file(&self, name: &str, text: &str) -> PathBuf {
        let path = self.root.join(name);
        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir).expect("create scratch subdir");
        fs::write(&path, text).expect("write scratch file");
        path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.root) {
            eprintln!("leaving {}: {err}", self.root.display());
        }
    }
}

/// A call running on its own thread, expected to be parked until poked.
#[derive(Debug)]
pub struct BlockedCall<T> {
    result: mpsc::Receiver<T>,
}

/// Start `call` on a new thread and wait long enough for it to block.
pub fn spawn_blocked<T, F>(call: F) -> BlockedCall<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("blocked-call".to_string())
        .spawn(move || {
            let _ = tx.send(call());
        })
        .expect("spawn blocked call");
    thread::sleep(SETTLE);
    BlockedCall { result: rx }
}

impl<T> BlockedCall<T> {
    /// Panics if the call has already returned.
    pub fn assert_still_blocked(&self) {
        match self.result.recv_timeout(SETTLE) {
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Ok(_) => panic!("call returned while it should still be blocked"),
            Err(mpsc::RecvTimeoutError::Disconnected) => panic!("blocked call panicked"),
        }
    }

    /// Wait for the call's result, failing instead of hanging.
    pub fn join(self) -> T {
        self.result
            .recv_timeout(JOIN_TIMEOUT)
            .expect("blocked call did not return in time")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};

    #[test]
    fn scratch_dir_is_removed_on_drop() {
        let scratch = ScratchDir::new("scratch");
        let file = scratch.file("a/b.txt", "hello");
        assert_eq!(fs::read_to_string(&file).expect("read back"), "hello");
        let root = scratch.root().to_path_buf();
        drop(scratch);
        assert!(!root.exists());
    }

    #[test]
    fn blocked_call_reports_result_once_released() {
        let gate = Arc::new(Barrier::new(2));
        let call = {
            let gate = Arc::clone(&gate);
            spawn_blocked(move || {
                gate.wait();
                7
            })
        };
        call.assert_still_blocked();
        gate.wait();
        assert_eq!(call.join(), 7);
    }
}
