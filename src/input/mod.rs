//! Controller input samples and edge-triggered event synthesis.

mod core;

pub use self::core::{Axis, Button, InputEventSynthesizer, InputSnapshot};
