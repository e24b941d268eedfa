//! Menu elements and the capability flags the dispatcher checks.

mod core;

pub use self::core::{Capabilities, CursorControl, Element, Refresh, TextElement, is_displayable};
