//! Rectangles, insets and the layout rules derived from them.

use serde::{Deserialize, Serialize};

/// Top-left cell of a widget, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// A widget's on-screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: u16,
    pub col: u16,
    pub rows: u16,
    pub cols: u16,
}

impl Rect {
    pub fn new(position: Position, rows: u16, cols: u16) -> Self {
        Self {
            row: position.row,
            col: position.col,
            rows,
            cols,
        }
    }

    /// The rectangle left after removing `inset` from every edge. Collapses
    /// to zero width or height rather than underflowing.
    pub fn text_area(&self, inset: Padding) -> TextArea {
        TextArea {
            row: self.row.saturating_add(inset.top),
            col: self.col.saturating_add(inset.left),
            width: self.cols.saturating_sub(inset.left.saturating_add(inset.right)),
            height: self.rows.saturating_sub(inset.top.saturating_add(inset.bottom)),
        }
    }
}

/// Blank cells kept between the rectangle edge and the text, per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Padding {
    pub const NONE: Padding = Padding::uniform(0);

    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(n: u16) -> Self {
        Self::new(n, n, n, n)
    }

    /// Edge-wise sum, used to fold border thickness into padding.
    pub fn combine(self, other: Padding) -> Padding {
        Padding {
            top: self.top.saturating_add(other.top),
            right: self.right.saturating_add(other.right),
            bottom: self.bottom.saturating_add(other.bottom),
            left: self.left.saturating_add(other.left),
        }
    }
}

/// Where text may be drawn inside a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextArea {
    pub row: u16,
    pub col: u16,
    pub width: u16,
    pub height: u16,
}

impl TextArea {
    /// Number of usable cells.
    pub fn cells(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// How text that does not fit the text area is handled. Fixed per widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Overflow off: input stops at the area's capacity.
    Disabled,
    /// One-row area; text slides left.
    HorizontalScroll,
    /// Multi-row area; rows scroll off the top.
    VerticalScroll,
}

impl LayoutMode {
    pub fn select(overflow: bool, area: &TextArea) -> Self {
        match (overflow, area.height) {
            (false, _) => Self::Disabled,
            (true, 1) => Self::HorizontalScroll,
            (true, _) => Self::VerticalScroll,
        }
    }

    /// Indicator glyph used when none is configured.
    pub fn default_indicator(self) -> Option<char> {
        match self {
            Self::Disabled => None,
            Self::HorizontalScroll => Some('<'),
            Self::VerticalScroll => Some('^'),
        }
    }
}

/// Maximum buffer length; 0 means unlimited.
///
/// With overflow off the area bounds the cap even when a larger limit was
/// asked for. With overflow on the configured limit is used as given.
pub fn effective_cap(overflow: bool, limit: usize, area_cells: usize) -> usize {
    match (overflow, limit) {
        (false, 0) => area_cells,
        (false, limit) => limit.min(area_cells),
        (true, limit) => limit,
    }
}
