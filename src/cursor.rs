//! Menu cursor position and the selection-zone movement search.
//!
//! Vertical moves scan rows outward from the cursor and stop at the first row
//! holding any navigable cell inside that row's text; within that row the
//! candidate with the smallest taxicab distance wins (ties resolve to the
//! leftmost cell, the order candidates are inserted). Horizontal moves walk
//! the current row only. A move that finds nothing leaves the cursor alone.

use crate::heap::PriorityHeap;
use crate::zone::SelectionZone;

/// Direction of a single cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
        }
    }
}

/// Cursor cell within a selection zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

impl Cursor {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Cursor) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// First navigable cell of `zone`, or the origin for a degenerate zone.
    pub fn home(zone: &SelectionZone) -> Self {
        zone.first_valid()
            .map(|(x, y)| Self::new(x, y))
            .unwrap_or_default()
    }

    /// Target of one step in `direction`, or `None` when no navigable cell is
    /// reachable. `row_len(y)` is the text length of the element on row `y`;
    /// only columns below `min(zone.width(), row_len(y))` are considered.
    pub fn step<F>(&self, direction: MoveDirection, zone: &SelectionZone, row_len: F) -> Option<Cursor>
    where
        F: Fn(usize) -> usize,
    {
        match direction {
            MoveDirection::Up => self.vertical(zone, &row_len, false),
            MoveDirection::Down => self.vertical(zone, &row_len, true),
            MoveDirection::Left => self.horizontal(zone, &row_len, false),
            MoveDirection::Right => self.horizontal(zone, &row_len, true),
        }
    }

    fn vertical<F>(&self, zone: &SelectionZone, row_len: &F, downward: bool) -> Option<Cursor>
    where
        F: Fn(usize) -> usize,
    {
        let rows: Box<dyn Iterator<Item = usize>> = if downward {
            Box::new(self.y.saturating_add(1)..zone.height())
        } else {
            Box::new((0..self.y.min(zone.height())).rev())
        };

        for y in rows {
            let limit = zone.width().min(row_len(y));
            let mut candidates = PriorityHeap::min();
            for x in 0..limit {
                if zone.is_valid(x, y) {
                    let candidate = Cursor::new(x, y);
                    candidates.insert(self.distance(&candidate) as i64, candidate);
                }
            }
            if let Some(best) = candidates.extract_top() {
                return Some(best);
            }
        }
        None
    }

    fn horizontal<F>(&self, zone: &SelectionZone, row_len: &F, rightward: bool) -> Option<Cursor>
    where
        F: Fn(usize) -> usize,
    {
        let limit = zone.width().min(row_len(self.y));
        if rightward {
            (self.x.saturating_add(1)..limit)
                .find(|x| zone.is_valid(*x, self.y))
                .map(|x| Cursor::new(x, self.y))
        } else {
            (0..self.x.min(limit))
                .rev()
                .find(|x| zone.is_valid(*x, self.y))
                .map(|x| Cursor::new(x, self.y))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(width: usize, rows: &[&[bool]]) -> SelectionZone {
        let mut zone = SelectionZone::new(width).unwrap();
        for row in rows {
            zone.add_row(row);
        }
        zone
    }

    fn unbounded(_: usize) -> usize {
        usize::MAX
    }

    #[test]
    fn left_stops_at_boundary() {
        let zone = zone(3, &[&[true], &[true], &[true]]);
        let cursor = Cursor::new(1, 1);
        let moved = cursor.step(MoveDirection::Left, &zone, unbounded).unwrap();
        assert_eq!(moved, Cursor::new(0, 1));
        assert_eq!(moved.step(MoveDirection::Left, &zone, unbounded), None);
    }

    #[test]
    fn right_skips_invalid_cells_and_respects_text_length() {
        let zone = zone(6, &[&[true, false, false, true, false, true]]);
        let cursor = Cursor::new(0, 0);
        assert_eq!(cursor.step(MoveDirection::Right, &zone, unbounded), Some(Cursor::new(3, 0)));
        // Text only four columns long: column 5 is out of reach.
        let at_three = Cursor::new(3, 0);
        assert_eq!(at_three.step(MoveDirection::Right, &zone, |_| 4), None);
    }

    #[test]
    fn down_skips_empty_rows() {
        let zone = zone(4, &[&[true], &[false], &[false, false, true, true]]);
        let cursor = Cursor::new(0, 0);
        let moved = cursor.step(MoveDirection::Down, &zone, unbounded).unwrap();
        assert_eq!(moved, Cursor::new(2, 2));
    }

    #[test]
    fn vertical_picks_nearest_cell() {
        let zone = zone(5, &[&[false, false, false, true, false], &[true, false, false, false, true]]);
        let cursor = Cursor::new(3, 0);
        assert_eq!(cursor.step(MoveDirection::Down, &zone, unbounded), Some(Cursor::new(4, 1)));
    }

    #[test]
    fn equal_distance_prefers_leftmost() {
        let zone = zone(3, &[&[false, true, false], &[true, false, true]]);
        let cursor = Cursor::new(1, 0);
        assert_eq!(cursor.step(MoveDirection::Down, &zone, unbounded), Some(Cursor::new(0, 1)));
    }

    #[test]
    fn rows_with_cells_beyond_text_are_skipped() {
        let zone = zone(4, &[&[true], &[false, false, false, true], &[true]]);
        let cursor = Cursor::new(0, 0);
        let lens = |y: usize| if y == 1 { 2 } else { 4 };
        assert_eq!(cursor.step(MoveDirection::Down, &zone, lens), Some(Cursor::new(0, 2)));
    }

    #[test]
    fn no_target_leaves_cursor() {
        let zone = zone(2, &[&[true], &[false]]);
        let cursor = Cursor::new(0, 0);
        assert_eq!(cursor.step(MoveDirection::Down, &zone, unbounded), None);
        assert_eq!(cursor.step(MoveDirection::Up, &zone, unbounded), None);
    }

    #[test]
    fn up_then_down_returns_to_equal_distance() {
        let zone = zone(4, &[&[true, false], &[false], &[false, true]]);
        let start = Cursor::new(1, 2);
        let up = start.step(MoveDirection::Up, &zone, unbounded).unwrap();
        let back = up.step(MoveDirection::Down, &zone, unbounded).unwrap();
        assert_eq!(back.y, start.y);
        assert_eq!(up.distance(&back), up.distance(&start));
    }

    #[test]
    fn home_is_first_valid_or_origin() {
        assert_eq!(Cursor::home(&zone(3, &[&[false], &[false, true]])), Cursor::new(1, 1));
        assert_eq!(Cursor::home(&zone(3, &[&[false]])), Cursor::new(0, 0));
    }
}
