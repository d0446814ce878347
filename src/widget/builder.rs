//! Named-option assembly for [`TextWidget`].

use super::border::BorderStyle;
use super::geometry::{Padding, Position, Rect};
use super::text_widget::{TextWidget, WidgetOptions};
use crate::display::DisplayHandle;
use crate::error::WidgetError;

/// Collects widget options; [`build`](Self::build) validates them.
///
/// Argument errors (a zero dimension, inverted bounds) are held until
/// `build` so calls can be chained.
#[derive(Debug, Clone)]
pub struct TextWidgetBuilder {
    position: Option<Position>,
    rows: u16,
    cols: u16,
    padding: Padding,
    border: BorderStyle,
    overflow: bool,
    placeholder: String,
    show_indicator: bool,
    indicator: Option<char>,
    word_break: bool,
    character_limit: usize,
    mask: Option<char>,
    start_disabled: bool,
    keep_contents: bool,
    clear_before_listening: bool,
    invalid: Option<WidgetError>,
}

impl Default for TextWidgetBuilder {
    fn default() -> Self {
        Self {
            position: None,
            rows: 0,
            cols: 0,
            padding: Padding::NONE,
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
            invalid: None,
        }
    }
}

impl TextWidgetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn reject(mut self, err: WidgetError) -> Self {
        self.invalid.get_or_insert(err);
        self
    }

    pub fn position(mut self, row: u16, col: u16) -> Self {
        self.position = Some(Position::new(row, col));
        self
    }

    pub fn size(mut self, rows: u16, cols: u16) -> Self {
        if rows == 0 || cols == 0 {
            return self.reject(WidgetError::EmptySize);
        }
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn height(mut self, rows: u16) -> Self {
        if rows == 0 {
            return self.reject(WidgetError::EmptySize);
        }
        self.rows = rows;
        self
    }

    pub fn width(mut self, cols: u16) -> Self {
        if cols == 0 {
            return self.reject(WidgetError::EmptySize);
        }
        self.cols = cols;
        self
    }

    /// Position and size from two corners, both inclusive.
    pub fn bounds(mut self, top_left: Position, bottom_right: Position) -> Self {
        if bottom_right.row < top_left.row || bottom_right.col < top_left.col {
            return self.reject(WidgetError::InvalidBounds(format!(
                "bottom-right ({}, {}) is above or left of top-left ({}, {})",
                bottom_right.row, bottom_right.col, top_left.row, top_left.col
            )));
        }
        self.position = Some(top_left);
        self.rows = bottom_right.row - top_left.row + 1;
        self.cols = bottom_right.col - top_left.col + 1;
        self
    }

    pub fn overflow(mut self, enabled: bool) -> Self {
        self.overflow = enabled;
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn overflow_indicator(mut self, shown: bool) -> Self {
        self.show_indicator = shown;
        self
    }

    pub fn indicator_char(mut self, indicator: char) -> Self {
        self.indicator = Some(indicator);
        self
    }

    pub fn word_break(mut self) -> Self {
        self.word_break = true;
        self
    }

    pub fn character_break(mut self) -> Self {
        self.word_break = false;
        self
    }

    /// 0 removes the limit.
    pub fn character_limit(mut self, limit: usize) -> Self {
        self.character_limit = limit;
        self
    }

    /// Blank cells inside the border.
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    pub fn character_mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn start_disabled(mut self) -> Self {
        self.start_disabled = true;
        self
    }

    pub fn keep_contents(mut self) -> Self {
        self.keep_contents = true;
        self
    }

    /// Keep whatever is in the buffer when a new read starts.
    pub fn without_auto_clear(mut self) -> Self {
        self.clear_before_listening = false;
        self
    }

    /// Resolve the options with the border folded into the padding.
    ///
    /// # Errors
    ///
    /// The first rejected argument, or `PositionNotSet` / `SizeNotSet`.
    pub fn options(self) -> Result<WidgetOptions, WidgetError> {
        if let Some(err) = self.invalid {
            return Err(err);
        }
        let position = self.position.ok_or(WidgetError::PositionNotSet)?;
        if self.rows == 0 || self.cols == 0 {
            return Err(WidgetError::SizeNotSet);
        }
        Ok(WidgetOptions {
            rect: Rect::new(position, self.rows, self.cols),
            inset: self.border.thickness().combine(self.padding),
            border: self.border,
            overflow: self.overflow,
            placeholder: self.placeholder,
            show_indicator: self.show_indicator,
            indicator: self.indicator,
            word_break: self.word_break,
            character_limit: self.character_limit,
            mask: self.mask,
            start_disabled: self.start_disabled,
            keep_contents: self.keep_contents,
            clear_before_listening: self.clear_before_listening,
        })
    }

    /// Build the widget and draw it.
    ///
    /// # Errors
    ///
    /// Anything [`options`](Self::options) or [`TextWidget::new`] rejects.
    pub fn build(self, display: DisplayHandle) -> Result<TextWidget, WidgetError> {
        TextWidget::new(display, self.options()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MemorySurface;
    use crate::input::{KeyEvent, KeyListener};
    use std::sync::{Arc, Mutex};

    #[test]
    fn position_and_size_are_required() {
        assert_eq!(
            TextWidgetBuilder::new().size(1, 5).options(),
            Err(WidgetError::PositionNotSet)
        );
        assert_eq!(
            TextWidgetBuilder::new().position(0, 0).width(5).options(),
            Err(WidgetError::SizeNotSet)
        );
        assert_eq!(
            TextWidgetBuilder::new().position(0, 0).size(0, 5).options(),
            Err(WidgetError::EmptySize)
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let options = TextWidgetBuilder::new()
            .bounds(Position::new(2, 3), Position::new(4, 12))
            .options()
            .expect("valid bounds");
        assert_eq!(options.rect, Rect::new(Position::new(2, 3), 3, 10));

        let inverted = TextWidgetBuilder::new()
            .bounds(Position::new(4, 3), Position::new(2, 12))
            .options();
        assert!(matches!(inverted, Err(WidgetError::InvalidBounds(_))));
    }

    #[test]
    fn border_is_folded_into_padding() {
        let options = TextWidgetBuilder::new()
            .position(0, 0)
            .size(5, 10)
            .border(BorderStyle::Double)
            .padding(Padding::new(0, 1, 0, 1))
            .options()
            .expect("valid");
        assert_eq!(options.inset, Padding::new(1, 2, 1, 2));
    }

    #[test]
    fn builder_defaults_match_widget_defaults() {
        let options = TextWidgetBuilder::new()
            .position(1, 1)
            .size(1, 8)
            .options()
            .expect("valid");
        let mut expected = WidgetOptions::new(Rect::new(Position::new(1, 1), 1, 8));
        expected.inset = Padding::NONE;
        assert_eq!(options, expected);
    }

    #[test]
    fn built_widget_draws_border_and_masked_text() {
        let memory = Arc::new(Mutex::new(MemorySurface::new(3, 10)));
        let display = DisplayHandle::shared(Arc::clone(&memory));
        let widget = TextWidgetBuilder::new()
            .position(0, 0)
            .size(3, 8)
            .border(BorderStyle::Ascii)
            .character_mask('#')
            .build(display)
            .expect("valid widget");
        for ch in "secret".chars() {
            widget.push(KeyEvent::Character(ch));
        }
        let memory = memory.lock().expect("memory surface");
        assert_eq!(memory.region(0, 0, 3, 8), ["+------+", "|######|", "+------+"]);
    }

    #[test]
    fn builder_rejects_border_without_text_room() {
        let display = DisplayHandle::new(MemorySurface::new(4, 4));
        let err = TextWidgetBuilder::new()
            .position(0, 0)
            .size(2, 2)
            .border(BorderStyle::Thin)
            .build(display)
            .expect_err("no room inside border");
        assert_eq!(err, WidgetError::NoTextArea { area: 0 });
    }
}
