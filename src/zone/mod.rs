//! Selection zone: which `(x, y)` cells the menu cursor may occupy.

mod core;

pub use self::core::SelectionZone;
