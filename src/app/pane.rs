//! Message history pane above the input box.

use std::io;

use crate::context::Message;
use crate::display::Surface;
use crate::widget::wrap::char_break;
use crate::widget::Rect;

/// Horizontal gap kept on each side of the message text.
const SIDE_PADDING: u16 = 1;

/// Wrap every message to `width` and keep the newest `height` rows.
pub(crate) fn pane_rows(messages: &[Message], width: usize, height: usize) -> Vec<String> {
    let rows: Vec<String> = messages
        .iter()
        .flat_map(|message| char_break(&message.to_string(), width))
        .collect();
    let skip = rows.len().saturating_sub(height);
    rows.into_iter().skip(skip).collect()
}

/// Redraw the pane: history bottom-aligned in `rect`, separator line below.
pub(crate) fn draw_pane(
    surface: &mut dyn Surface,
    rect: Rect,
    messages: &[Message],
) -> io::Result<()> {
    let blank = " ".repeat(usize::from(rect.cols));
    for row in 0..rect.rows {
        surface.set_cursor(rect.row + row, rect.col)?;
        surface.put_str(&blank)?;
    }

    let width = rect.cols.saturating_sub(2 * SIDE_PADDING);
    if width > 0 {
        let rows = pane_rows(messages, usize::from(width), usize::from(rect.rows));
        // rows.len() <= rect.rows
        let first = rect.row + rect.rows - rows.len() as u16;
        for (offset, text) in (0u16..).zip(&rows) {
            surface.set_cursor(first + offset, rect.col + SIDE_PADDING)?;
            surface.put_str(text)?;
        }
    }

    let separator: String = std::iter::repeat('─').take(usize::from(rect.cols)).collect();
    surface.set_cursor(rect.row + rect.rows, rect.col)?;
    surface.put_str(&separator)?;
    surface.flush()
}
