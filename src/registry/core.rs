use std::collections::HashMap;
use std::hash::Hash;

use crate::event::EventKind;

/// Map from a key to an ordered list of values. Insertion order within each
/// list is preserved.
#[derive(Debug, Clone)]
pub struct MultiMap<K, V> {
    entries: HashMap<K, Vec<V>>,
}

impl<K, V> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, V> MultiMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.entry(key).or_default().push(value);
    }

    pub fn insert_many(&mut self, key: K, values: impl IntoIterator<Item = V>) {
        self.entries.entry(key).or_default().extend(values);
    }

    /// Values under `key`, empty when the key was never inserted.
    pub fn get(&self, key: &K) -> &[V] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<Vec<V>> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handle to an element owned by a menu: its index in the element list.
pub type ListenerId = usize;

/// Lookup from event kind to the listeners interested in it.
///
/// Every registered listener is also recorded in a broadcast list used for
/// the per-frame tick, whatever kinds it declared.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    by_kind: MultiMap<EventKind, ListenerId>,
    all: Vec<ListenerId>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: ListenerId, kinds: &[EventKind]) {
        for kind in kinds {
            if *kind == EventKind::Tick {
                continue;
            }
            if !self.by_kind.get(kind).contains(&listener) {
                self.by_kind.insert(*kind, listener);
            }
        }
        if !self.all.contains(&listener) {
            self.all.push(listener);
        }
    }

    /// Candidate listeners for `kind` in registration order. Tick resolves to
    /// every registered listener.
    pub fn candidates(&self, kind: EventKind) -> &[ListenerId] {
        match kind {
            EventKind::Tick => &self.all,
            other => self.by_kind.get(&other),
        }
    }

    pub fn listeners(&self) -> &[ListenerId] {
        &self.all
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
