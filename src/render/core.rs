use std::io::Write;

use blake3::Hash;

use crate::error::Result;
use crate::width::{display_width, truncate_to_width};

/// Destination for the lines a menu produces each frame.
pub trait LineSink {
    /// Show `lines` as the complete display contents.
    fn write_frame(&mut self, lines: &[String]) -> Result<()>;
}

/// Placement of the line display inside the terminal.
#[derive(Debug, Clone)]
pub struct SinkSettings {
    /// Zero-based terminal row of the first line.
    pub origin_row: u16,
    pub origin_col: u16,
    /// Columns each line is padded or truncated to.
    pub width: u16,
    /// Rows owned by the display. Rows past the frame are blanked.
    pub height: u16,
}

impl Default for SinkSettings {
    fn default() -> Self {
        Self {
            origin_row: 0,
            origin_col: 0,
            width: 40,
            height: 8,
        }
    }
}

/// ANSI escape code sink writing each line at an absolute position. Frames
/// identical to the previous one are skipped.
pub struct AnsiLineSink<W: Write> {
    writer: W,
    settings: SinkSettings,
    last_frame: Option<Hash>,
    frames_written: u64,
}

impl<W: Write> AnsiLineSink<W> {
    pub fn new(writer: W, settings: SinkSettings) -> Self {
        Self {
            writer,
            settings,
            last_frame: None,
            frames_written: 0,
        }
    }

    pub fn with_default(writer: W) -> Self {
        Self::new(writer, SinkSettings::default())
    }

    pub fn settings(&self) -> &SinkSettings {
        &self.settings
    }

    /// Frames actually emitted, not counting skipped duplicates.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Force the next frame to be written even if unchanged.
    pub fn invalidate(&mut self) {
        self.last_frame = None;
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for AnsiLineSink<W> {
    fn write_frame(&mut self, lines: &[String]) -> Result<()> {
        let hash = frame_hash(lines);
        if self.last_frame == Some(hash) {
            return Ok(());
        }

        let SinkSettings {
            origin_row,
            origin_col,
            width,
            height,
        } = self.settings;
        let rows = usize::from(height).max(lines.len());

        for offset in 0..rows {
            let mut line = lines.get(offset).cloned().unwrap_or_default();
            pad_line(&mut line, width);
            let row = usize::from(origin_row) + offset + 1;
            write!(self.writer, "\x1b[{};{}H{}", row, origin_col + 1, line)?;
        }

        self.writer.flush()?;
        self.last_frame = Some(hash);
        self.frames_written += 1;
        Ok(())
    }
}

/// Keeps every frame in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineSink {
    frames: Vec<Vec<String>>,
}

impl MemoryLineSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Vec<String>] {
        &self.frames
    }

    pub fn last(&self) -> Option<&[String]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl LineSink for MemoryLineSink {
    fn write_frame(&mut self, lines: &[String]) -> Result<()> {
        self.frames.push(lines.to_vec());
        Ok(())
    }
}

fn frame_hash(lines: &[String]) -> Hash {
    let mut hasher = blake3::Hasher::new();
    for line in lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize()
}

fn pad_line(line: &mut String, width: u16) {
    let width = usize::from(width);
    let display = display_width(line);
    if display > width {
        let (cut, used) = truncate_to_width(line, width);
        *line = cut;
        line.extend(std::iter::repeat_n(' ', width - used));
    } else {
        line.extend(std::iter::repeat_n(' ', width - display));
    }
}
