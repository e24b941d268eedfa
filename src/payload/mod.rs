//! Values passed between chained menus.

mod core;

pub use self::core::{Payload, PayloadError};
