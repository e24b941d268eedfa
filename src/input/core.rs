use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::event::{Event, EventPayload};

/// Boolean controller inputs the menu can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    A,
    B,
    X,
    Y,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftBumper,
    RightBumper,
    LeftStickButton,
    RightStickButton,
    Start,
    Back,
    Guide,
}

impl Button {
    pub const ALL: [Button; 15] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::DpadUp,
        Button::DpadDown,
        Button::DpadLeft,
        Button::DpadRight,
        Button::LeftBumper,
        Button::RightBumper,
        Button::LeftStickButton,
        Button::RightStickButton,
        Button::Start,
        Button::Back,
        Button::Guide,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Button::A => "a",
            Button::B => "b",
            Button::X => "x",
            Button::Y => "y",
            Button::DpadUp => "dpad_up",
            Button::DpadDown => "dpad_down",
            Button::DpadLeft => "dpad_left",
            Button::DpadRight => "dpad_right",
            Button::LeftBumper => "left_bumper",
            Button::RightBumper => "right_bumper",
            Button::LeftStickButton => "left_stick_button",
            Button::RightStickButton => "right_stick_button",
            Button::Start => "start",
            Button::Back => "back",
            Button::Guide => "guide",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|button| button.name() == name)
    }
}

/// Analog controller inputs. Carried in snapshots but not turned into events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
}

/// One frame's worth of sampled controller state, handed over by the
/// polling layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pressed: BTreeSet<Button>,
    axes: BTreeMap<Axis, f32>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, button: Button) -> Self {
        self.pressed.insert(button);
        self
    }

    pub fn with_axis(mut self, axis: Axis, value: f32) -> Self {
        self.axes.insert(axis, value);
        self
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.pressed.insert(button);
        } else {
            self.pressed.remove(&button);
        }
    }

    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        self.axes.insert(axis, value);
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    pub fn pressed(&self) -> impl Iterator<Item = Button> + '_ {
        self.pressed.iter().copied()
    }
}

/// Turns per-frame boolean samples into edge-triggered events.
///
/// For every tracked button: false→true emits `Press` then `Held`, a button
/// that stays down emits `Held`, and true→false emits `Release`.
#[derive(Debug, Clone)]
pub struct InputEventSynthesizer {
    tracked: Vec<Button>,
    previous: BTreeMap<Button, bool>,
    priorities: BTreeMap<Button, i32>,
}

impl Default for InputEventSynthesizer {
    fn default() -> Self {
        Self::new(Button::ALL)
    }
}

impl InputEventSynthesizer {
    pub fn new(tracked: impl IntoIterator<Item = Button>) -> Self {
        let mut synth = Self {
            tracked: Vec::new(),
            previous: BTreeMap::new(),
            priorities: BTreeMap::new(),
        };
        for button in tracked {
            synth.track(button);
        }
        synth
    }

    pub fn with_priorities(mut self, priorities: &BTreeMap<Button, i32>) -> Self {
        self.priorities
            .extend(priorities.iter().map(|(button, priority)| (*button, *priority)));
        self
    }

    /// Start tracking `button`. It is treated as released until sampled.
    pub fn track(&mut self, button: Button) {
        if !self.tracked.contains(&button) {
            self.tracked.push(button);
            self.previous.insert(button, false);
        }
    }

    pub fn untrack(&mut self, button: Button) {
        self.tracked.retain(|tracked| *tracked != button);
        self.previous.remove(&button);
    }

    pub fn tracked(&self) -> &[Button] {
        &self.tracked
    }

    pub fn set_priority(&mut self, button: Button, priority: i32) {
        self.priorities.insert(button, priority);
    }

    pub fn priority(&self, button: Button) -> i32 {
        self.priorities.get(&button).copied().unwrap_or(0)
    }

    /// Take `snapshot` as the previous frame without emitting anything. A
    /// button already down then produces `Held`, not a second `Press`.
    pub fn seed(&mut self, snapshot: &InputSnapshot) {
        for &button in &self.tracked {
            self.previous.insert(button, snapshot.is_pressed(button));
        }
    }

    /// Sample `snapshot` once and return this frame's events in emission
    /// order.
    pub fn synthesize(&mut self, snapshot: &InputSnapshot) -> Vec<Event> {
        let mut events = Vec::new();
        for &button in &self.tracked {
            let now = snapshot.is_pressed(button);
            let before = self.previous.insert(button, now).unwrap_or(false);
            let priority = self.priorities.get(&button).copied().unwrap_or(0);
            match (before, now) {
                (false, true) => {
                    events.push(Event::new(priority, EventPayload::Press(button)));
                    events.push(Event::new(priority, EventPayload::Held(button)));
                }
                (true, true) => events.push(Event::new(priority, EventPayload::Held(button))),
                (true, false) => events.push(Event::new(priority, EventPayload::Release(button))),
                (false, false) => {}
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    fn kinds(events: &[Event]) -> Vec<EventKind> {
        events.iter().map(Event::kind).collect()
    }

    #[test]
    fn edges_over_four_frames() {
        let mut synth = InputEventSynthesizer::new([Button::A]);
        let frames = [false, true, true, false];
        let emitted: Vec<Vec<EventKind>> = frames
            .iter()
            .map(|pressed| {
                let mut snapshot = InputSnapshot::new();
                snapshot.set(Button::A, *pressed);
                kinds(&synth.synthesize(&snapshot))
            })
            .collect();

        assert_eq!(
            emitted,
            vec![
                vec![],
                vec![EventKind::Press, EventKind::Held],
                vec![EventKind::Held],
                vec![EventKind::Release],
            ]
        );
    }

    #[test]
    fn untracked_buttons_are_ignored() {
        let mut synth = InputEventSynthesizer::new([Button::B]);
        let events = synth.synthesize(&InputSnapshot::new().with(Button::A));
        assert!(events.is_empty());
    }

    #[test]
    fn configured_priority_is_carried() {
        let mut priorities = BTreeMap::new();
        priorities.insert(Button::X, 7);
        let mut synth = InputEventSynthesizer::new([Button::X, Button::Y]).with_priorities(&priorities);
        let events = synth.synthesize(&InputSnapshot::new().with(Button::X).with(Button::Y));
        assert_eq!(events.len(), 4);
        assert!(events.iter().filter(|e| e.input() == Some(Button::X)).all(|e| e.priority() == 7));
        assert!(events.iter().filter(|e| e.input() == Some(Button::Y)).all(|e| e.priority() == 0));
    }

    #[test]
    fn seeded_button_is_held_not_pressed() {
        let mut synth = InputEventSynthesizer::new([Button::A, Button::B]);
        synth.seed(&InputSnapshot::new().with(Button::A));
        let events = synth.synthesize(&InputSnapshot::new().with(Button::A).with(Button::B));
        let a: Vec<EventKind> = events
            .iter()
            .filter(|e| e.input() == Some(Button::A))
            .map(Event::kind)
            .collect();
        assert_eq!(a, vec![EventKind::Held]);
        assert!(events.iter().any(|e| e.is_press_of(Button::B)));
    }

    #[test]
    fn button_names_round_trip() {
        for button in Button::ALL {
            assert_eq!(Button::from_name(button.name()), Some(button));
        }
        assert_eq!(Button::from_name("turbo"), None);
    }

    #[test]
    fn snapshot_axes_default_to_zero() {
        let snapshot = InputSnapshot::new().with_axis(Axis::LeftTrigger, 0.5);
        assert_eq!(snapshot.axis(Axis::LeftTrigger), 0.5);
        assert_eq!(snapshot.axis(Axis::RightTrigger), 0.0);
    }
}
