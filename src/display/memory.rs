//! In-memory character grid surface.

use std::io;

use super::{Size, Surface};

/// Fixed-size grid of cells. Writes outside the grid are clipped.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    rows: u16,
    cols: u16,
    cells: Vec<Vec<char>>,
    cursor: (u16, u16),
    flushes: usize,
}

impl MemorySurface {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![' '; usize::from(cols)]; usize::from(rows)],
            cursor: (0, 0),
            flushes: 0,
        }
    }

    /// Contents of one row, trailing blanks included.
    pub fn row_text(&self, row: u16) -> String {
        self.cells
            .get(usize::from(row))
            .map(|cells| cells.iter().collect())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.rows).map(|row| self.row_text(row)).collect()
    }

    /// Rows `row..row + height`, columns `col..col + width`.
    pub fn region(&self, row: u16, col: u16, height: u16, width: u16) -> Vec<String> {
        (row..row + height)
            .map(|r| {
                self.row_text(r)
                    .chars()
                    .skip(usize::from(col))
                    .take(usize::from(width))
                    .collect()
            })
            .collect()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl Surface for MemorySurface {
    fn set_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.cursor = (row, col);
        Ok(())
    }

    fn put_char(&mut self, ch: char) -> io::Result<()> {
        let (row, col) = self.cursor;
        if let Some(cell) = self
            .cells
            .get_mut(usize::from(row))
            .and_then(|cells| cells.get_mut(usize::from(col)))
        {
            *cell = ch;
        }
        self.cursor.1 = col.saturating_add(1);
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        for cells in &mut self.cells {
            cells.fill(' ');
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn size(&self) -> io::Result<Size> {
        Ok(Size {
            rows: self.rows,
            cols: self.cols,
        })
    }
}
