//! portchat: terminal chat client built around a keyboard fan-out core.
//!
//! One [`input::InputBus`] thread reads keys and delivers each to every
//! registered listener. Listeners either wake per key or accumulate whole
//! lines; a [`widget::TextWidget`] additionally redraws its rectangle on
//! every change.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use portchat::context::AppContext;
//! use portchat::display::{DisplayHandle, MemorySurface};
//! use portchat::input::{CrosstermKeySource, InputBus, LineInput};
//! use portchat::widget::TextWidgetBuilder;
//!
//! let ctx = Arc::new(AppContext::new(50));
//! let display = DisplayHandle::new(MemorySurface::new(24, 80));
//! let bus = InputBus::new(ctx);
//! let input = Arc::new(
//!     TextWidgetBuilder::new()
//!         .position(23, 0)
//!         .size(1, 80)
//!         .build(display)
//!         .unwrap(),
//! );
//! bus.register(input.clone());
//! bus.spawn(CrosstermKeySource).unwrap();
//! let line = input.read_line().unwrap();
//! println!("{line}");
//! ```

pub mod app;
pub mod build_info;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod input;
pub mod logging;
#[cfg(test)]
pub mod testsupport;
pub mod widget;
