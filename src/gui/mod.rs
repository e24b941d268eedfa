//! Session coordinator driving the active menu of a chain.

mod core;

pub use self::core::{ERROR_PREFIX, GuiContext};
