use std::time::{Duration, Instant};

use crate::error::{MenuError, Result};
use crate::event::BlinkPhase;

/// "Has the interval elapsed since the last reset" timer for the cursor
/// blink. Evaluated once per frame, never scheduled.
#[derive(Debug, Clone)]
pub struct BlinkTimer {
    interval: Duration,
    phase: BlinkPhase,
    last_toggle: Option<Instant>,
}

impl BlinkTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            phase: BlinkPhase::On,
            last_toggle: None,
        }
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Toggle the phase if the interval has expired and return the new phase.
    /// The first poll only starts the timer.
    pub fn poll(&mut self, now: Instant) -> Option<BlinkPhase> {
        let Some(last) = self.last_toggle else {
            self.last_toggle = Some(now);
            return None;
        };
        if now.saturating_duration_since(last) < self.interval {
            return None;
        }
        self.phase = self.phase.toggled();
        self.last_toggle = Some(now);
        Some(self.phase)
    }

    /// Show the cursor now and restart the interval.
    pub fn reset_visible(&mut self, now: Instant) {
        self.phase = BlinkPhase::On;
        self.last_toggle = Some(now);
    }
}

/// Half-open range of displayable elements shown this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    pub start: usize,
    pub end: usize,
}

impl DisplayWindow {
    /// Window for `total` displayable elements. With paging on, page
    /// `menu_level` of `lines_per_screen` lines; otherwise everything.
    pub fn compute(
        enforce_max_lines: bool,
        menu_level: usize,
        lines_per_screen: usize,
        total: usize,
    ) -> Result<Self> {
        if total == 0 {
            return Ok(Self { start: 0, end: 0 });
        }
        let window = if enforce_max_lines {
            let start = menu_level.saturating_mul(lines_per_screen);
            let end = total.min(start.saturating_add(lines_per_screen));
            Self { start, end }
        } else {
            Self { start: 0, end: total }
        };
        window.check(total)?;
        Ok(window)
    }

    fn check(&self, total: usize) -> Result<()> {
        if self.start >= self.end || self.end > total {
            return Err(MenuError::DisplayRange {
                start: self.start,
                end: self.end,
                total,
            });
        }
        Ok(())
    }

    pub fn contains(&self, row: usize) -> bool {
        (self.start..self.end).contains(&row)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Replace the character at column `x` with `cursor`. Lines shorter than
/// `x + 1` columns are returned unchanged.
pub fn substitute_cursor(text: &str, x: usize, cursor: char) -> String {
    if x >= text.chars().count() {
        return text.to_string();
    }
    text.chars()
        .enumerate()
        .map(|(idx, ch)| if idx == x { cursor } else { ch })
        .collect()
}
