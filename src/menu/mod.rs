mod context;
mod core;
mod display;

pub use self::context::{MenuContext, Navigation};
pub use self::core::{FrameReport, Menu, MenuFrame};
pub use self::display::{BlinkTimer, DisplayWindow, substitute_cursor};
