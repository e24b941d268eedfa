use crate::error::{MenuError, Result};

/// Grid of cursor-navigable cells overlaid on the displayable menu lines.
///
/// The width is fixed at construction; rows are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionZone {
    width: usize,
    rows: Vec<Vec<bool>>,
    valid_cells: usize,
}

impl SelectionZone {
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(MenuError::InvalidZone);
        }
        Ok(Self {
            width,
            rows: Vec::new(),
            valid_cells: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether `(x, y)` is navigable. Anything out of range is invalid.
    pub fn is_valid(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Append one row. A pattern shorter than the width is cycled across it;
    /// extra entries beyond the width are ignored. An empty pattern yields an
    /// all-invalid row.
    pub fn add_row(&mut self, pattern: &[bool]) {
        let row: Vec<bool> = if pattern.is_empty() {
            vec![false; self.width]
        } else {
            pattern.iter().copied().cycle().take(self.width).collect()
        };
        self.valid_cells += row.iter().filter(|cell| **cell).count();
        self.rows.push(row);
    }

    /// True when the zone has no rows or no navigable cell at all.
    pub fn is_zero(&self) -> bool {
        self.rows.is_empty() || self.valid_cells == 0
    }

    /// Whether row `y` holds at least one navigable cell.
    pub fn row_has_valid(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .map(|row| row.iter().any(|cell| *cell))
            .unwrap_or(false)
    }

    /// First navigable cell in row-major order.
    pub fn first_valid(&self) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(y, row)| {
            row.iter().position(|cell| *cell).map(|x| (x, y))
        })
    }

    pub fn row(&self, y: usize) -> Option<&[bool]> {
        self.rows.get(y).map(Vec::as_slice)
    }
}
