//! Border styles: one glyph table, one drawing routine.

use std::io;

use serde::{Deserialize, Serialize};

use super::geometry::{Padding, Rect};
use crate::display::{put_vertical_line, Surface};

/// Decoration drawn around a widget's rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    None,
    Thin,
    ThinCorners,
    Double,
    DoubleCorners,
    Ascii,
    AsciiCorners,
}

struct Glyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

const THIN: Glyphs = Glyphs {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
};

const DOUBLE: Glyphs = Glyphs {
    top_left: '╔',
    top_right: '╗',
    bottom_left: '╚',
    bottom_right: '╝',
    horizontal: '═',
    vertical: '║',
};

const ASCII: Glyphs = Glyphs {
    top_left: '+',
    top_right: '+',
    bottom_left: '+',
    bottom_right: '+',
    horizontal: '-',
    vertical: '|',
};

impl BorderStyle {
    fn glyphs(self) -> Option<&'static Glyphs> {
        match self {
            Self::None => None,
            Self::Thin | Self::ThinCorners => Some(&THIN),
            Self::Double | Self::DoubleCorners => Some(&DOUBLE),
            Self::Ascii | Self::AsciiCorners => Some(&ASCII),
        }
    }

    fn corners_only(self) -> bool {
        matches!(
            self,
            Self::ThinCorners | Self::DoubleCorners | Self::AsciiCorners
        )
    }

    /// Cells the border occupies on each edge.
    pub fn thickness(self) -> Padding {
        match self {
            Self::None => Padding::NONE,
            _ => Padding::uniform(1),
        }
    }

    /// Draw the border along the edges of `rect`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a decorated border is drawn on a rectangle smaller
    /// than 3x3; surface errors are passed through.
    pub fn draw(self, surface: &mut dyn Surface, rect: Rect) -> io::Result<()> {
        let Some(glyphs) = self.glyphs() else {
            return Ok(());
        };
        if rect.rows < 3 || rect.cols < 3 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{}x{} is too small for a border", rect.rows, rect.cols),
            ));
        }

        let bottom = rect.row + rect.rows - 1;
        let right = rect.col + rect.cols - 1;
        for (row, col, ch) in [
            (rect.row, rect.col, glyphs.top_left),
            (rect.row, right, glyphs.top_right),
            (bottom, rect.col, glyphs.bottom_left),
            (bottom, right, glyphs.bottom_right),
        ] {
            surface.set_cursor(row, col)?;
            surface.put_char(ch)?;
        }
        if self.corners_only() {
            return Ok(());
        }

        let edge: String = std::iter::repeat(glyphs.horizontal)
            .take(usize::from(rect.cols - 2))
            .collect();
        for row in [rect.row, bottom] {
            surface.set_cursor(row, rect.col + 1)?;
            surface.put_str(&edge)?;
        }
        for col in [rect.col, right] {
            put_vertical_line(surface, rect.row + 1, col, glyphs.vertical, rect.rows - 2)?;
        }
        Ok(())
    }
}
