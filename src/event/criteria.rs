use std::collections::BTreeSet;
use std::fmt;

use super::core::{Event, EventKind};
use crate::input::Button;

/// Predicate gate deciding whether a listener reacts to a given event.
///
/// `accepts` is a pure kind check and never fails; `test` is only consulted
/// once `accepts` has returned true.
pub trait Criteria {
    /// Whether the predicate applies to events of this kind.
    fn accepts(&self, event: &Event) -> bool;

    /// The predicate itself. Callers go through [`Criteria::satisfies`].
    fn test(&self, event: &Event) -> bool;

    fn satisfies(&self, event: &Event) -> bool {
        self.accepts(event) && self.test(event)
    }
}

/// Matches every event of every kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCriteria;

impl Criteria for AlwaysCriteria {
    fn accepts(&self, _event: &Event) -> bool {
        true
    }

    fn test(&self, _event: &Event) -> bool {
        true
    }
}

/// Closure predicate bound to a set of event kinds.
pub struct EventCriteria {
    kinds: Vec<EventKind>,
    predicate: Box<dyn Fn(&Event) -> bool>,
}

impl EventCriteria {
    pub fn new<F>(kinds: impl IntoIterator<Item = EventKind>, predicate: F) -> Self
    where
        F: Fn(&Event) -> bool + 'static,
    {
        Self {
            kinds: kinds.into_iter().collect(),
            predicate: Box::new(predicate),
        }
    }

    /// Always-true predicate restricted to `kinds`.
    pub fn of_kinds(kinds: impl IntoIterator<Item = EventKind>) -> Self {
        Self::new(kinds, |_| true)
    }

    pub fn kinds(&self) -> &[EventKind] {
        &self.kinds
    }
}

impl fmt::Debug for EventCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCriteria")
            .field("kinds", &self.kinds)
            .finish_non_exhaustive()
    }
}

impl Criteria for EventCriteria {
    fn accepts(&self, event: &Event) -> bool {
        self.kinds.contains(&event.kind())
    }

    fn test(&self, event: &Event) -> bool {
        (self.predicate)(event)
    }
}

/// Satisfied only by gamepad events whose originating button is in the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamepadCriteria {
    valid: BTreeSet<Button>,
}

impl GamepadCriteria {
    pub fn new(valid: impl IntoIterator<Item = Button>) -> Self {
        Self {
            valid: valid.into_iter().collect(),
        }
    }

    pub fn valid_inputs(&self) -> impl Iterator<Item = Button> + '_ {
        self.valid.iter().copied()
    }

    pub fn add_input(&mut self, button: Button) {
        self.valid.insert(button);
    }
}

impl Criteria for GamepadCriteria {
    fn accepts(&self, event: &Event) -> bool {
        EventKind::GAMEPAD.contains(&event.kind())
    }

    fn test(&self, event: &Event) -> bool {
        event
            .input()
            .map(|button| self.valid.contains(&button))
            .unwrap_or(false)
    }
}

/// OR together `satisfies` across a criteria list. An empty list matches.
pub fn any_satisfied(criteria: &[Box<dyn Criteria>], event: &Event) -> bool {
    criteria.is_empty() || criteria.iter().any(|entry| entry.satisfies(event))
}
