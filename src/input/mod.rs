//! Terminal input distribution.
//!
//! One [`InputBus`] thread reads physical keys and fans them out to any
//! number of listeners. Raw listeners wake per key (optionally filtered);
//! line listeners accumulate characters and wake on Enter.

mod bus;
mod event;
mod line;
mod listener;
mod mailbox;
mod source;

pub use bus::InputBus;
pub use event::KeyEvent;
pub use line::{Edit, EditPolicy, LineCore, LineInput, LineListener};
pub use listener::{KeyFilter, KeyListener, RawKeyListener};
pub use mailbox::Mailbox;
pub use source::{CrosstermKeySource, KeySource};
