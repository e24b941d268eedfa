use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

struct Slot {
    value: Box<dyn Any>,
    type_name: &'static str,
}

/// Typed heterogeneous key/value store handed from one menu to the next.
///
/// Keys are unique within a menu chain. Values keep their concrete type and
/// must be read back with the same type they were stored with.
#[derive(Default)]
pub struct Payload {
    slots: HashMap<String, Slot>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn add<T>(&mut self, key: impl Into<String>, value: T) -> &mut Self
    where
        T: 'static,
    {
        self.slots.insert(
            key.into(),
            Slot {
                value: Box::new(value),
                type_name: type_name::<T>(),
            },
        );
        self
    }

    /// Builder form of [`Payload::add`].
    pub fn with<T>(mut self, key: impl Into<String>, value: T) -> Self
    where
        T: 'static,
    {
        self.add(key, value);
        self
    }

    pub fn get<T>(&self, key: &str) -> Result<&T, PayloadError>
    where
        T: 'static,
    {
        let slot = self.slot(key)?;
        slot.value
            .downcast_ref::<T>()
            .ok_or_else(|| PayloadError::TypeMismatch {
                key: key.to_string(),
                stored: slot.type_name,
                requested: type_name::<T>(),
            })
    }

    pub fn get_mut<T>(&mut self, key: &str) -> Result<&mut T, PayloadError>
    where
        T: 'static,
    {
        let slot = self
            .slots
            .get_mut(key)
            .ok_or_else(|| PayloadError::Missing(key.to_string()))?;
        let stored = slot.type_name;
        slot.value
            .downcast_mut::<T>()
            .ok_or_else(|| PayloadError::TypeMismatch {
                key: key.to_string(),
                stored,
                requested: type_name::<T>(),
            })
    }

    /// Delete the value under `key` and hand it back. On a type mismatch the
    /// value stays in place.
    pub fn remove<T>(&mut self, key: &str) -> Result<T, PayloadError>
    where
        T: 'static,
    {
        let stored = self.slot(key)?.type_name;
        if !self.slot(key)?.value.is::<T>() {
            return Err(PayloadError::TypeMismatch {
                key: key.to_string(),
                stored,
                requested: type_name::<T>(),
            });
        }
        let slot = self
            .slots
            .remove(key)
            .ok_or_else(|| PayloadError::Missing(key.to_string()))?;
        slot.value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| PayloadError::TypeMismatch {
                key: key.to_string(),
                stored,
                requested: type_name::<T>(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Move every entry of `other` into `self`, overwriting shared keys.
    pub fn merge(&mut self, other: Payload) {
        self.slots.extend(other.slots);
    }

    fn slot(&self, key: &str) -> Result<&Slot, PayloadError> {
        self.slots
            .get(key)
            .ok_or_else(|| PayloadError::Missing(key.to_string()))
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, slot) in &self.slots {
            map.entry(key, &slot.type_name);
        }
        map.finish()
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload key `{0}` missing")]
    Missing(String),
    #[error("payload key `{key}` holds `{stored}`, requested `{requested}`")]
    TypeMismatch {
        key: String,
        stored: &'static str,
        requested: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Mode(u8);

    #[test]
    fn add_and_get() {
        let mut payload = Payload::new();
        payload.add("subsystem", "arm".to_string()).add("mode", Mode(2));
        assert_eq!(payload.get::<String>("subsystem").unwrap(), "arm");
        assert_eq!(payload.get::<Mode>("mode").unwrap(), &Mode(2));
        assert_eq!(payload.len(), 2);
    }

    #[test]
    fn add_overwrites_even_with_new_type() {
        let mut payload = Payload::new().with("k", 1u32);
        payload.add("k", Mode(9));
        assert_eq!(payload.get::<Mode>("k").unwrap(), &Mode(9));
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn missing_key_fails() {
        let payload = Payload::new();
        let err = payload.get::<u32>("nope").unwrap_err();
        assert_eq!(err, PayloadError::Missing("nope".to_string()));
    }

    #[test]
    fn type_mismatch_fails() {
        let payload = Payload::new().with("k", 5i32);
        let err = payload.get::<String>("k").unwrap_err();
        assert!(matches!(err, PayloadError::TypeMismatch { .. }));
    }

    #[test]
    fn remove_returns_and_deletes() {
        let mut payload = Payload::new().with("k", Mode(4));
        assert!(payload.remove::<u8>("k").is_err());
        assert!(payload.contains("k"));
        assert_eq!(payload.remove::<Mode>("k").unwrap(), Mode(4));
        assert!(!payload.contains("k"));
        assert!(matches!(
            payload.remove::<Mode>("k"),
            Err(PayloadError::Missing(_))
        ));
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut payload = Payload::new().with("count", 1u32);
        *payload.get_mut::<u32>("count").unwrap() += 1;
        assert_eq!(*payload.get::<u32>("count").unwrap(), 2);
    }
}
