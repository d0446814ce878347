//! Line input that owns a rectangle of the screen.
//!
//! A [`TextWidget`] accumulates keys exactly like a line listener and
//! redraws its rectangle after every change, on the dispatch thread. Layout
//! rules are fixed at construction; only the buffer and the enabled flag
//! change afterwards.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, warn};

use super::border::BorderStyle;
use super::geometry::{effective_cap, LayoutMode, Padding, Rect, TextArea};
use super::wrap::{char_break, tail, word_break};
use crate::display::{DisplayHandle, Surface};
use crate::error::{InputError, WidgetError};
use crate::input::{EditPolicy, KeyEvent, KeyListener, LineCore, LineInput};

/// Fully resolved widget configuration.
///
/// `inset` already includes the border thickness; [`super::TextWidgetBuilder`]
/// folds it in for you.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub rect: Rect,
    pub inset: Padding,
    pub border: BorderStyle,
    pub overflow: bool,
    pub placeholder: String,
    pub show_indicator: bool,
    /// Overrides the layout's default indicator glyph.
    pub indicator: Option<char>,
    pub word_break: bool,
    /// 0 means no explicit limit.
    pub character_limit: usize,
    pub mask: Option<char>,
    pub start_disabled: bool,
    pub keep_contents: bool,
    pub clear_before_listening: bool,
}

impl WidgetOptions {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            inset: Padding::NONE,
            border: BorderStyle::None,
            overflow: true,
            placeholder: String::new(),
            show_indicator: true,
            indicator: None,
            word_break: true,
            character_limit: 0,
            mask: None,
            start_disabled: false,
            keep_contents: false,
            clear_before_listening: true,
        }
    }
}

#[derive(Debug)]
pub struct TextWidget {
    display: DisplayHandle,
    rect: Rect,
    area: TextArea,
    border: BorderStyle,
    mode: LayoutMode,
    cap: usize,
    /// `None` when the indicator is hidden.
    indicator: Option<char>,
    word_break: bool,
    placeholder: String,
    mask: Option<char>,
    keep_contents: bool,
    clear_before_listening: bool,
    enabled: AtomicBool,
    line: LineCore,
}

impl TextWidget {
    /// Validate `options`, derive the layout and draw the empty widget.
    ///
    /// # Errors
    ///
    /// A [`WidgetError`] describing the first configuration problem found.
    pub fn new(display: DisplayHandle, options: WidgetOptions) -> Result<Self, WidgetError> {
        let rect = options.rect;
        if rect.rows == 0 || rect.cols == 0 {
            return Err(WidgetError::EmptySize);
        }
        if rect.row.checked_add(rect.rows).is_none()
            || rect.col.checked_add(rect.cols).is_none()
        {
            return Err(WidgetError::OutOfBounds);
        }

        let area = rect.text_area(options.inset);
        let cells = area.cells();
        if cells < 1 {
            return Err(WidgetError::NoTextArea { area: cells });
        }
        if cells < 3 && options.overflow && options.show_indicator {
            return Err(WidgetError::NoRoomForIndicator { area: cells });
        }

        let thickness = options.border.thickness();
        if rect.rows <= thickness.top + thickness.bottom
            || rect.cols <= thickness.left + thickness.right
        {
            return Err(WidgetError::BorderTooLarge);
        }

        let mode = LayoutMode::select(options.overflow, &area);
        let cap = effective_cap(options.overflow, options.character_limit, cells);
        let indicator = if options.show_indicator {
            options.indicator.or(mode.default_indicator())
        } else {
            None
        };

        let widget = Self {
            display,
            rect,
            area,
            border: options.border,
            mode,
            cap,
            indicator,
            word_break: options.word_break,
            placeholder: options.placeholder,
            mask: options.mask,
            keep_contents: options.keep_contents,
            clear_before_listening: options.clear_before_listening,
            enabled: AtomicBool::new(!options.start_disabled),
            line: LineCore::new(),
        };
        debug!(?rect, ?mode, cap, "text widget created");
        widget.render();
        Ok(widget)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn text_area(&self) -> TextArea {
        self.area
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.mode
    }

    /// Effective character cap; 0 means unlimited.
    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn indicator(&self) -> Option<char> {
        self.indicator
    }

    pub fn border(&self) -> BorderStyle {
        self.border
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.line.is_closed()
    }

    fn policy(&self) -> EditPolicy {
        EditPolicy {
            cap: self.cap,
            keep_contents: self.keep_contents,
        }
    }

    /// Redraw the whole rectangle under the display lock.
    pub fn render(&self) {
        let mut surface = self.display.lock();
        if let Err(err) = self.draw(&mut *surface) {
            warn!(error = %err, rect = ?self.rect, "text widget render failed");
        }
    }

    fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        let blank = " ".repeat(usize::from(self.rect.cols));
        for row in 0..self.rect.rows {
            surface.set_cursor(self.rect.row + row, self.rect.col)?;
            surface.put_str(&blank)?;
        }
        self.border.draw(surface, self.rect)?;

        let text = self.display_text();
        for (offset, row) in (0u16..).zip(self.visible_rows(&text)) {
            surface.set_cursor(self.area.row + offset, self.area.col)?;
            surface.put_str(&row)?;
        }
        surface.flush()
    }

    fn display_text(&self) -> String {
        let buffer = self.line.peek();
        match self.mask {
            Some(mask) => std::iter::repeat(mask).take(buffer.chars().count()).collect(),
            None if buffer.is_empty() => self.placeholder.clone(),
            None => buffer,
        }
    }

    /// Rows to print from the top of the text area, indicator applied.
    fn visible_rows(&self, text: &str) -> Vec<String> {
        let width = usize::from(self.area.width);
        let height = usize::from(self.area.height);

        match self.mode {
            LayoutMode::Disabled => {
                if self.word_break {
                    let rows = word_break(text, width);
                    if rows.len() <= height {
                        return rows;
                    }
                }
                let rows = char_break(text, width);
                if rows.len() > height {
                    error!(
                        len = text.chars().count(),
                        capacity = self.area.cells(),
                        "text does not fit the text area"
                    );
                }
                rows.into_iter().take(height).collect()
            }
            LayoutMode::HorizontalScroll => {
                if text.chars().count() <= width {
                    return vec![text.to_string()];
                }
                let visible = tail(text, width);
                let row = match self.indicator {
                    Some(indicator) => overlay_indicator(visible, indicator, width),
                    None => visible.to_string(),
                };
                vec![row]
            }
            LayoutMode::VerticalScroll => {
                let rows = if self.word_break {
                    word_break(text, width)
                } else {
                    char_break(text, width)
                };
                let scrolled = rows.len().saturating_sub(height);
                let mut rows: Vec<String> = rows.into_iter().skip(scrolled).collect();
                if let (true, Some(indicator), Some(first)) =
                    (scrolled > 0, self.indicator, rows.first_mut())
                {
                    *first = overlay_indicator(first, indicator, width);
                }
                rows
            }
        }
    }
}

/// Replace the start of `row` with the indicator and one space.
fn overlay_indicator(row: &str, indicator: char, width: usize) -> String {
    let marker: Vec<char> = [indicator, ' '].into_iter().take(width).collect();
    let covered = marker.len();
    marker
        .into_iter()
        .chain(row.chars().skip(covered))
        .collect()
}

impl KeyListener for TextWidget {
    fn push(&self, event: KeyEvent) {
        self.line.forward(event);
        if !event.is_end_of_stream() && !self.is_enabled() {
            return;
        }
        if self.line.apply(event, self.policy()).needs_redraw() {
            self.render();
        }
    }

    fn close(&self) {
        self.line.close();
    }

    fn wait_next(&self) -> KeyEvent {
        self.line.next_key()
    }
}

impl LineInput for TextWidget {
    fn read_line(&self) -> Result<String, InputError> {
        if self.clear_before_listening && self.line.clear_for_read() {
            self.render();
        }
        self.line.wait_line()
    }

    fn peek_buffer(&self) -> String {
        self.line.peek()
    }

    fn set_contents(&self, text: &str) -> Result<(), InputError> {
        let len = text.chars().count();
        if self.cap != 0 && len > self.cap {
            return Err(InputError::TooLong { len, cap: self.cap });
        }
        self.line.replace(text);
        self.render();
        Ok(())
    }

    fn enable(&self) -> Result<(), InputError> {
        self.enabled.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn disable(&self) -> Result<(), InputError> {
        self.enabled.store(false, Ordering::SeqCst);
        Ok(())
    }
}
