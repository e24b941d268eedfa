//! Paginated, controller-driven text menus for small line displays.
//!
//! A [`Menu`] owns its elements, a [`SelectionZone`] describing where the
//! cursor may go, and a priority event queue drained once per frame. Input
//! snapshots are turned into press, release and held events, matched against
//! listener criteria and dispatched by cursor row. The [`GuiContext`] chains
//! menus together and keeps rendering an error line if one of them fails.

pub mod config;
pub mod cursor;
pub mod driver;
pub mod element;
pub mod error;
pub mod event;
pub mod gui;
pub mod heap;
pub mod input;
pub mod logging;
pub mod menu;
pub mod metrics;
pub mod params;
pub mod payload;
pub mod registry;
pub mod render;
pub mod width;
pub mod zone;

pub use config::MenuConfig;
pub use cursor::{Cursor, MoveDirection};
pub use driver::{DriverSettings, KeyLatch, TerminalDriver, key_to_button};
pub use element::{Capabilities, CursorControl, Element, Refresh, TextElement, is_displayable};
pub use error::{MenuError, Result};
pub use event::{
    AlwaysCriteria, BlinkPhase, Criteria, Event, EventCriteria, EventKind, EventPayload,
    GamepadCriteria, any_satisfied,
};
pub use gui::{ERROR_PREFIX, GuiContext};
pub use heap::{HeapOrder, PriorityHeap};
pub use input::{Axis, Button, InputEventSynthesizer, InputSnapshot};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use menu::{
    BlinkTimer, DisplayWindow, FrameReport, Menu, MenuContext, MenuFrame, Navigation,
    substitute_cursor,
};
pub use metrics::{MenuMetrics, MetricSnapshot};
pub use params::{
    FileParamStore, MemoryParamStore, Param, ParamError, ParamRecord, ParamRegistry, ParamSource,
    ParamStore, ParamValue,
};
pub use payload::{Payload, PayloadError};
pub use registry::{ListenerId, ListenerRegistry, MultiMap};
pub use render::{AnsiLineSink, LineSink, MemoryLineSink, SinkSettings};
pub use width::display_width;
pub use zone::SelectionZone;
