use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated across the frames of a menu session.
#[derive(Debug, Default, Clone)]
pub struct MenuMetrics {
    frames: u64,
    events: u64,
    invocations: u64,
    cursor_moves: u64,
    renders: u64,
}

impl MenuMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, events: usize, invocations: usize) {
        self.frames = self.frames.saturating_add(1);
        self.events = self.events.saturating_add(events as u64);
        self.invocations = self.invocations.saturating_add(invocations as u64);
    }

    pub fn record_cursor_move(&mut self) {
        self.cursor_moves = self.cursor_moves.saturating_add(1);
    }

    pub fn record_render(&mut self) {
        self.renders = self.renders.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            frames: self.frames,
            events: self.events,
            invocations: self.invocations,
            cursor_moves: self.cursor_moves,
            renders: self.renders,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub frames: u64,
    pub events: u64,
    pub invocations: u64,
    pub cursor_moves: u64,
    pub renders: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("frames".to_string(), json!(self.frames));
        map.insert("events".to_string(), json!(self.events));
        map.insert("invocations".to_string(), json!(self.invocations));
        map.insert("cursor_moves".to_string(), json!(self.cursor_moves));
        map.insert("renders".to_string(), json!(self.renders));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "menu_metrics", self.as_fields())
    }
}
