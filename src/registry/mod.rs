//! Event-kind to listener lookup.

mod core;

pub use self::core::{ListenerId, ListenerRegistry, MultiMap};
