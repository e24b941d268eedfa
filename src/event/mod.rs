//! Events flowing through the menu queue and the criteria that gate them.

mod core;
mod criteria;

pub use self::core::{BlinkPhase, Event, EventKind, EventPayload};
pub use criteria::{AlwaysCriteria, Criteria, EventCriteria, GamepadCriteria, any_satisfied};
