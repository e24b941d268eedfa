use crate::input::Button;

/// ON/OFF state of the blinking cursor character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlinkPhase {
    On,
    Off,
}

impl BlinkPhase {
    pub fn toggled(self) -> Self {
        match self {
            BlinkPhase::On => BlinkPhase::Off,
            BlinkPhase::Off => BlinkPhase::On,
        }
    }

    pub fn is_on(self) -> bool {
        matches!(self, BlinkPhase::On)
    }
}

/// Discriminator used for registry lookup and criteria applicability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Tick,
    Press,
    Release,
    Held,
    Blink,
    Custom,
}

impl EventKind {
    /// Kinds produced by the input synthesizer.
    pub const GAMEPAD: [EventKind; 3] = [EventKind::Press, EventKind::Release, EventKind::Held];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Tick => "tick",
            EventKind::Press => "press",
            EventKind::Release => "release",
            EventKind::Held => "held",
            EventKind::Blink => "blink",
            EventKind::Custom => "custom",
        }
    }
}

/// Data carried by each event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPayload {
    /// Once-per-frame broadcast delivered to every listener.
    Tick { frame: u64 },
    Press(Button),
    Release(Button),
    Held(Button),
    /// The blink timer expired; carries the phase now in effect.
    Blink(BlinkPhase),
    /// Application-defined event injected through `Menu::inject`.
    Custom(u32),
}

/// Immutable prioritized message drained from the menu's event queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    priority: i32,
    payload: EventPayload,
}

impl Event {
    pub fn new(priority: i32, payload: EventPayload) -> Self {
        Self { priority, payload }
    }

    pub fn tick(priority: i32, frame: u64) -> Self {
        Self::new(priority, EventPayload::Tick { frame })
    }

    pub fn blink(priority: i32, phase: BlinkPhase) -> Self {
        Self::new(priority, EventPayload::Blink(phase))
    }

    pub fn custom(priority: i32, code: u32) -> Self {
        Self::new(priority, EventPayload::Custom(code))
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::Tick { .. } => EventKind::Tick,
            EventPayload::Press(_) => EventKind::Press,
            EventPayload::Release(_) => EventKind::Release,
            EventPayload::Held(_) => EventKind::Held,
            EventPayload::Blink(_) => EventKind::Blink,
            EventPayload::Custom(_) => EventKind::Custom,
        }
    }

    /// Originating input for gamepad events.
    pub fn input(&self) -> Option<Button> {
        match self.payload {
            EventPayload::Press(button)
            | EventPayload::Release(button)
            | EventPayload::Held(button) => Some(button),
            _ => None,
        }
    }

    pub fn is_tick(&self) -> bool {
        matches!(self.payload, EventPayload::Tick { .. })
    }

    pub fn is_press_of(&self, button: Button) -> bool {
        self.payload == EventPayload::Press(button)
    }
}
