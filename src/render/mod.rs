mod core;

pub use self::core::{AnsiLineSink, LineSink, MemoryLineSink, SinkSettings};
