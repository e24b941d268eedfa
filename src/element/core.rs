use std::fmt;

use bitflags::bitflags;

use crate::error::Result;
use crate::event::{Criteria, Event, EventKind, GamepadCriteria};
use crate::input::Button;
use crate::menu::MenuContext;

bitflags! {
    /// What an element takes part in. Checked by the dispatcher instead of
    /// inferring roles from concrete types.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Capabilities: u8 {
        /// Receives events of the kinds returned by `Element::event_kinds`.
        const LISTENER = 1 << 0;
        /// Receives events regardless of where the cursor is.
        const UNIVERSAL = 1 << 1;
        /// Gated by `Element::criteria`.
        const ADVANCED = 1 << 2;
        /// Supplies its own selection-zone row via `Element::selection_pattern`.
        const CURSOR_CONFIGURABLE = 1 << 3;
    }
}

/// Refresh request returned by a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub enum Refresh {
    #[default]
    None,
    /// Redraw the cursor immediately, restarting the blink cycle visible.
    Force,
    /// Redraw immediately but leave the cursor character out this frame.
    ForceNoBlink,
}

impl Refresh {
    pub fn merge(self, other: Refresh) -> Refresh {
        self.max(other)
    }

    pub fn is_forced(self) -> bool {
        !matches!(self, Refresh::None)
    }
}

/// A unit of a menu. Elements with text are displayable; elements with the
/// `LISTENER` capability take part in event dispatch.
pub trait Element {
    fn name(&self) -> &str {
        "element"
    }

    /// Current text, `None` for elements that never display. Whether the
    /// element owns a line is fixed when it is added to a menu; text that
    /// later goes empty renders as a blank line.
    fn text(&self) -> Option<String> {
        None
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    fn event_kinds(&self) -> &[EventKind] {
        &[]
    }

    fn criteria(&self) -> &[Box<dyn Criteria>] {
        &[]
    }

    fn selection_pattern(&self) -> Option<Vec<bool>> {
        None
    }

    fn on_event(&mut self, _ctx: &mut MenuContext<'_>, _event: &Event) -> Result<Refresh> {
        Ok(Refresh::None)
    }
}

/// Whether `element` would currently produce a visible line.
pub fn is_displayable(element: &dyn Element) -> bool {
    element.text().map(|text| !text.is_empty()).unwrap_or(false)
}

type Handler = Box<dyn FnMut(&mut MenuContext<'_>, &Event) -> Result<Refresh>>;

/// General-purpose element: a line of text with optional listener behaviour.
pub struct TextElement {
    name: String,
    text: Option<String>,
    capabilities: Capabilities,
    kinds: Vec<EventKind>,
    criteria: Vec<Box<dyn Criteria>>,
    pattern: Option<Vec<bool>>,
    handler: Option<Handler>,
}

impl TextElement {
    pub fn label(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            name: text.clone(),
            text: Some(text),
            capabilities: Capabilities::empty(),
            kinds: Vec::new(),
            criteria: Vec::new(),
            pattern: None,
            handler: None,
        }
    }

    /// Element without text, e.g. a background listener.
    pub fn hidden(name: impl Into<String>) -> Self {
        Self {
            text: None,
            ..Self::label(name)
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn on<F>(mut self, kinds: impl IntoIterator<Item = EventKind>, handler: F) -> Self
    where
        F: FnMut(&mut MenuContext<'_>, &Event) -> Result<Refresh> + 'static,
    {
        self.kinds.extend(kinds);
        self.capabilities |= Capabilities::LISTENER;
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn with_criteria<C>(mut self, criteria: C) -> Self
    where
        C: Criteria + 'static,
    {
        self.criteria.push(Box::new(criteria));
        self.capabilities |= Capabilities::ADVANCED;
        self
    }

    pub fn universal(mut self) -> Self {
        self.capabilities |= Capabilities::UNIVERSAL;
        self
    }

    pub fn with_pattern(mut self, pattern: Vec<bool>) -> Self {
        self.pattern = Some(pattern);
        self.capabilities |= Capabilities::CURSOR_CONFIGURABLE;
        self
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }
}

impl fmt::Debug for TextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextElement")
            .field("name", &self.name)
            .field("text", &self.text)
            .field("capabilities", &self.capabilities)
            .field("kinds", &self.kinds)
            .finish_non_exhaustive()
    }
}

impl Element for TextElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn event_kinds(&self) -> &[EventKind] {
        &self.kinds
    }

    fn criteria(&self) -> &[Box<dyn Criteria>] {
        &self.criteria
    }

    fn selection_pattern(&self) -> Option<Vec<bool>> {
        self.pattern.clone()
    }

    fn on_event(&mut self, ctx: &mut MenuContext<'_>, event: &Event) -> Result<Refresh> {
        match self.handler.as_mut() {
            Some(handler) => handler(ctx, event),
            None => Ok(Refresh::None),
        }
    }
}

/// Standard D-pad navigation: a hidden universal listener that moves the
/// menu cursor on presses.
pub struct CursorControl {
    criteria: Vec<Box<dyn Criteria>>,
}

impl Default for CursorControl {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorControl {
    const KINDS: [EventKind; 1] = [EventKind::Press];

    pub fn new() -> Self {
        Self {
            criteria: vec![Box::new(GamepadCriteria::new([
                Button::DpadUp,
                Button::DpadDown,
                Button::DpadLeft,
                Button::DpadRight,
            ]))],
        }
    }
}

impl Element for CursorControl {
    fn name(&self) -> &str {
        "cursor_control"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::LISTENER | Capabilities::UNIVERSAL | Capabilities::ADVANCED
    }

    fn event_kinds(&self) -> &[EventKind] {
        &Self::KINDS
    }

    fn criteria(&self) -> &[Box<dyn Criteria>] {
        &self.criteria
    }

    fn on_event(&mut self, ctx: &mut MenuContext<'_>, event: &Event) -> Result<Refresh> {
        match event.input() {
            Some(Button::DpadUp) => ctx.cursor_up(),
            Some(Button::DpadDown) => ctx.cursor_down(),
            Some(Button::DpadLeft) => ctx.cursor_left(),
            Some(Button::DpadRight) => ctx.cursor_right(),
            _ => return Ok(Refresh::None),
        }
        Ok(Refresh::Force)
    }
}
