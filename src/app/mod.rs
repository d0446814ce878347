//! The chat screen driven by the binary.
//!
//! Message history fills the top of the terminal and an input box sits at
//! the bottom. Three threads cooperate around the shared [`AppContext`]:
//! the caller reads lines from the input box, a pane thread redraws on
//! history changes, and an Escape watcher ends the session.

mod pane;

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::context::{AppContext, Message};
use crate::display::{centre_string, DisplayHandle, Size};
use crate::error::{AppError, InputError};
use crate::input::{InputBus, KeyEvent, KeyListener, LineInput, RawKeyListener};
use crate::widget::{Position, Rect, TextWidget, TextWidgetBuilder};

/// Where each part of the chat screen goes for a given terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// History rows; the separator sits on the row below.
    pub pane: Rect,
    pub input: Rect,
}

impl ScreenLayout {
    /// `None` if the terminal has no room for a pane row and its separator.
    pub fn compute(size: Size, input_height: u16) -> Option<Self> {
        let pane_rows = size.rows.checked_sub(input_height)?.checked_sub(1)?;
        if pane_rows == 0 || size.cols == 0 || input_height == 0 {
            return None;
        }
        Some(Self {
            pane: Rect::new(Position::new(0, 0), pane_rows, size.cols),
            input: Rect::new(Position::new(pane_rows + 1, 0), input_height, size.cols),
        })
    }
}

/// Chat screen wiring: input box, message pane, Escape watcher.
#[derive(Debug)]
pub struct ChatScreen {
    ctx: Arc<AppContext>,
    bus: Arc<InputBus>,
    display: DisplayHandle,
    config: Config,
}

impl ChatScreen {
    pub fn new(
        ctx: Arc<AppContext>,
        bus: Arc<InputBus>,
        display: DisplayHandle,
        config: Config,
    ) -> Self {
        Self {
            ctx,
            bus,
            display,
            config,
        }
    }

    /// Run until Escape, end of input, or shutdown.
    ///
    /// # Errors
    ///
    /// Display failures and an input box the terminal cannot hold.
    pub fn run(&self) -> Result<(), AppError> {
        let Some(size) = self.wait_for_usable_size()? else {
            debug!("input ended before the terminal was large enough");
            return Ok(());
        };
        let layout = ScreenLayout::compute(size, self.config.input.height).ok_or_else(|| {
            AppError::Io(std::io::Error::other("terminal has no room for the chat screen"))
        })?;
        self.display.lock().clear()?;

        let input = Arc::new(self.build_input(layout.input)?);
        self.bus.register(input.clone());
        let watcher = Arc::new(RawKeyListener::non_character());
        self.bus.register(watcher.clone());

        let pane = self.spawn_pane(layout.pane)?;
        let escape = self.spawn_escape_watcher(Arc::clone(&watcher), Arc::clone(&input))?;
        info!(?size, "chat screen started");

        let result = self.read_messages(&input);

        self.ctx.request_shutdown();
        self.bus.unregister(&input);
        self.bus.unregister(&watcher);
        for (name, handle) in [("pane", pane), ("escape watcher", escape)] {
            if handle.join().is_err() {
                warn!(thread = name, "chat screen thread panicked");
            }
        }
        info!("chat screen closed");
        result
    }

    fn build_input(&self, rect: Rect) -> Result<TextWidget, AppError> {
        let cfg = &self.config.input;
        let mut builder = TextWidgetBuilder::new()
            .position(rect.row, rect.col)
            .size(rect.rows, rect.cols)
            .border(cfg.border)
            .padding(cfg.padding)
            .placeholder(cfg.placeholder.clone())
            .character_limit(cfg.character_limit)
            .overflow_indicator(cfg.overflow_indicator);
        builder = if cfg.word_break {
            builder.word_break()
        } else {
            builder.character_break()
        };
        if let Some(indicator) = cfg.indicator_char {
            builder = builder.indicator_char(indicator);
        }
        Ok(builder.build(self.display.clone())?)
    }

    fn read_messages(&self, input: &TextWidget) -> Result<(), AppError> {
        let local_name = &self.config.chat.local_name;
        loop {
            match input.read_line() {
                Ok(line) if line.trim().is_empty() => {}
                Ok(line) => self.ctx.add_message(Message::new(local_name.as_str(), line)),
                Err(InputError::StreamClosed) => {
                    debug!("input box closed");
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn spawn_pane(&self, rect: Rect) -> std::io::Result<JoinHandle<()>> {
        let ctx = Arc::clone(&self.ctx);
        let display = self.display.clone();
        thread::Builder::new()
            .name("message-pane".to_string())
            .spawn(move || {
                let (mut messages, mut seen) = ctx.messages();
                loop {
                    {
                        let mut surface = display.lock();
                        if let Err(err) = pane::draw_pane(&mut *surface, rect, &messages) {
                            warn!(error = %err, "message pane draw failed");
                        }
                    }
                    if ctx.wait_for_change(seen).is_none() {
                        break;
                    }
                    (messages, seen) = ctx.messages();
                }
                debug!("message pane stopped");
            })
    }

    /// Escape ends the session: request shutdown and pull the input box off
    /// the bus, which releases the reading thread.
    fn spawn_escape_watcher(
        &self,
        watcher: Arc<RawKeyListener>,
        input: Arc<TextWidget>,
    ) -> std::io::Result<JoinHandle<()>> {
        let ctx = Arc::clone(&self.ctx);
        let bus = Arc::clone(&self.bus);
        thread::Builder::new()
            .name("escape-watcher".to_string())
            .spawn(move || loop {
                match watcher.wait_next() {
                    KeyEvent::Escape => {
                        debug!("escape pressed; leaving chat screen");
                        ctx.request_shutdown();
                        bus.unregister(&input);
                        break;
                    }
                    KeyEvent::EndOfStream => break,
                    _ => {}
                }
            })
    }

    /// Show a notice until the terminal meets the configured minimum.
    /// Returns `None` if input ends first.
    fn wait_for_usable_size(&self) -> Result<Option<Size>, AppError> {
        let min = &self.config.terminal;
        loop {
            let size = self.display.lock().size()?;
            if size.cols >= min.min_columns && size.rows >= min.min_rows {
                return Ok(Some(size));
            }
            warn!(?size, min_columns = min.min_columns, min_rows = min.min_rows, "terminal too small");
            self.draw_size_notice(size)?;
            if self.bus.wait_for_key().is_end_of_stream() {
                return Ok(None);
            }
        }
    }

    fn draw_size_notice(&self, size: Size) -> Result<(), AppError> {
        let min = &self.config.terminal;
        let right = size.cols.saturating_sub(1);
        let middle = size.rows / 2;
        let mut surface = self.display.lock();
        surface.clear()?;
        centre_string(&mut *surface, "Terminal too small", middle.saturating_sub(1), 0, right)?;
        let need = format!("need {}x{}", min.min_columns, min.min_rows);
        centre_string(&mut *surface, &need, middle, 0, right)?;
        centre_string(&mut *surface, "resize, then press a key", middle + 1, 0, right)?;
        surface.flush()?;
        Ok(())
    }
}
