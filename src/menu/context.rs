use crate::cursor::{Cursor, MoveDirection};
use crate::element::Refresh;
use crate::event::{BlinkPhase, Event};
use crate::payload::Payload;

use super::Menu;

/// Menu transition requested by a listener and carried out by the
/// [`GuiContext`](crate::GuiContext) after the frame.
pub enum Navigation {
    /// Push `menu` on top of the current one.
    Forward(Box<Menu>, Payload),
    /// Return to the previous menu, handing it `payload`.
    Back(Payload),
    /// Replace the whole menu stack with `menu`.
    Inflate(Box<Menu>, Payload),
}

impl Navigation {
    pub fn describe(&self) -> &'static str {
        match self {
            Navigation::Forward(..) => "forward",
            Navigation::Back(_) => "back",
            Navigation::Inflate(..) => "inflate",
        }
    }
}

impl std::fmt::Debug for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Navigation::Forward(menu, payload) | Navigation::Inflate(menu, payload) => f
                .debug_tuple(self.describe())
                .field(&menu.name())
                .field(payload)
                .finish(),
            Navigation::Back(payload) => f.debug_tuple("back").field(payload).finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CursorRequest {
    Move(MoveDirection),
    Set(Cursor),
}

/// View of the menu handed to a listener while it handles one event.
///
/// Requests are buffered and applied by the menu, in order, once the
/// listener returns.
pub struct MenuContext<'a> {
    cursor: Cursor,
    row: Option<usize>,
    blink: BlinkPhase,
    frame: u64,
    payload: &'a mut Payload,
    cursor_requests: Vec<CursorRequest>,
    refresh: Refresh,
    navigation: Option<Navigation>,
    injected: Vec<Event>,
}

impl<'a> MenuContext<'a> {
    pub(crate) fn new(
        cursor: Cursor,
        row: Option<usize>,
        blink: BlinkPhase,
        frame: u64,
        payload: &'a mut Payload,
    ) -> Self {
        Self {
            cursor,
            row,
            blink,
            frame,
            payload,
            cursor_requests: Vec::new(),
            refresh: Refresh::None,
            navigation: None,
            injected: Vec::new(),
        }
    }

    /// Cursor position when the event was dispatched.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Displayable row of the listener, `None` while it has no text.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Whether the cursor sits on this listener's row.
    pub fn is_selected(&self) -> bool {
        self.row == Some(self.cursor.y)
    }

    pub fn blink_phase(&self) -> BlinkPhase {
        self.blink
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn payload(&self) -> &Payload {
        &*self.payload
    }

    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut *self.payload
    }

    pub fn cursor_up(&mut self) {
        self.cursor_requests.push(CursorRequest::Move(MoveDirection::Up));
    }

    pub fn cursor_down(&mut self) {
        self.cursor_requests.push(CursorRequest::Move(MoveDirection::Down));
    }

    pub fn cursor_left(&mut self) {
        self.cursor_requests.push(CursorRequest::Move(MoveDirection::Left));
    }

    pub fn cursor_right(&mut self) {
        self.cursor_requests.push(CursorRequest::Move(MoveDirection::Right));
    }

    pub fn set_cursor(&mut self, x: usize, y: usize) {
        self.cursor_requests.push(CursorRequest::Set(Cursor::new(x, y)));
    }

    pub fn request_refresh(&mut self, refresh: Refresh) {
        self.refresh = self.refresh.merge(refresh);
    }

    /// Queue an event for the current drain.
    pub fn inject(&mut self, event: Event) {
        self.injected.push(event);
    }

    /// Only the first navigation request of a frame is kept.
    pub fn forward(&mut self, menu: Menu, payload: Payload) {
        self.navigate(Navigation::Forward(Box::new(menu), payload));
    }

    pub fn back(&mut self, payload: Payload) {
        self.navigate(Navigation::Back(payload));
    }

    pub fn inflate(&mut self, menu: Menu, payload: Payload) {
        self.navigate(Navigation::Inflate(Box::new(menu), payload));
    }

    fn navigate(&mut self, navigation: Navigation) {
        if self.navigation.is_none() {
            self.navigation = Some(navigation);
        }
    }

    pub(crate) fn into_outcome(self, returned: Refresh) -> ContextOutcome {
        ContextOutcome {
            cursor_requests: self.cursor_requests,
            refresh: self.refresh.merge(returned),
            navigation: self.navigation,
            injected: self.injected,
        }
    }
}

pub(crate) struct ContextOutcome {
    pub cursor_requests: Vec<CursorRequest>,
    pub refresh: Refresh,
    pub navigation: Option<Navigation>,
    pub injected: Vec<Event>,
}
