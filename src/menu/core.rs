use std::time::Instant;

use serde_json::json;

use crate::config::MenuConfig;
use crate::cursor::{Cursor, MoveDirection};
use crate::element::{Capabilities, Element, Refresh, is_displayable};
use crate::error::{MenuError, Result};
use crate::event::{BlinkPhase, Event, any_satisfied};
use crate::heap::PriorityHeap;
use crate::input::{InputEventSynthesizer, InputSnapshot};
use crate::logging::{LogLevel, MENU_TARGET, emit, json_kv};
use crate::metrics::MenuMetrics;
use crate::payload::Payload;
use crate::registry::{ListenerId, ListenerRegistry};
use crate::width::text_columns;
use crate::zone::SelectionZone;

use super::context::{ContextOutcome, CursorRequest, MenuContext, Navigation};
use super::display::{BlinkTimer, DisplayWindow, substitute_cursor};

/// Summary of one dispatch cycle.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Events drained from the queue.
    pub events: usize,
    /// Listener invocations across all events.
    pub invocations: usize,
    pub refresh: Refresh,
    pub navigation: Option<Navigation>,
}

/// Lines to display plus any navigation requested during the frame.
#[derive(Debug)]
pub struct MenuFrame {
    pub lines: Vec<String>,
    pub navigation: Option<Navigation>,
}

/// A page-able list of elements with a cursor, driven once per frame.
pub struct Menu {
    name: String,
    config: MenuConfig,
    elements: Vec<Box<dyn Element>>,
    rows: Vec<ListenerId>,
    registry: ListenerRegistry,
    zone: SelectionZone,
    cursor: Cursor,
    menu_level: usize,
    queue: PriorityHeap<Event>,
    pending: Vec<Event>,
    synthesizer: InputEventSynthesizer,
    blink: BlinkTimer,
    suppress_blink: bool,
    frame: u64,
    payload: Payload,
}

impl Menu {
    pub fn new(name: impl Into<String>, config: &MenuConfig) -> Result<Self> {
        if config.lines_per_screen == 0 {
            return Err(MenuError::InvalidConfig(
                "lines_per_screen must be non-zero".to_string(),
            ));
        }
        let zone = SelectionZone::new(config.zone_width)?;
        let synthesizer = InputEventSynthesizer::new(config.tracked_inputs.iter().copied())
            .with_priorities(&config.input_priorities);

        Ok(Self {
            name: name.into(),
            config: config.clone(),
            elements: Vec::new(),
            rows: Vec::new(),
            registry: ListenerRegistry::new(),
            zone,
            cursor: Cursor::default(),
            menu_level: 0,
            queue: PriorityHeap::max(),
            pending: Vec::new(),
            synthesizer,
            blink: BlinkTimer::new(config.blink_interval()),
            suppress_blink: false,
            frame: 0,
            payload: Payload::new(),
        })
    }

    pub fn with_element<E>(mut self, element: E) -> Self
    where
        E: Element + 'static,
    {
        self.add_element(element);
        self
    }

    pub fn add_element<E>(&mut self, element: E) -> ListenerId
    where
        E: Element + 'static,
    {
        self.add_boxed(Box::new(element))
    }

    /// Append an element. Listeners are registered for their declared kinds
    /// and a displayable element appends its selection-zone row. Whether an
    /// element owns a row is decided here, once.
    pub fn add_boxed(&mut self, element: Box<dyn Element>) -> ListenerId {
        let id = self.elements.len();
        let caps = element.capabilities();
        if caps.contains(Capabilities::LISTENER) {
            self.registry.register(id, element.event_kinds());
        }
        if is_displayable(element.as_ref()) {
            let pattern = self.row_pattern(element.as_ref(), caps);
            self.zone.add_row(&pattern);
            self.rows.push(id);
        }
        self.elements.push(element);
        self.normalize_cursor();
        id
    }

    fn row_pattern(&self, element: &dyn Element, caps: Capabilities) -> Vec<bool> {
        if caps.contains(Capabilities::CURSOR_CONFIGURABLE) {
            if let Some(pattern) = element.selection_pattern() {
                return pattern;
            }
        }
        let selectable =
            caps.contains(Capabilities::LISTENER) && !caps.contains(Capabilities::UNIVERSAL);
        let mut row = vec![false; self.zone.width()];
        if let Some(first) = row.first_mut() {
            *first = selectable;
        }
        row
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn zone(&self) -> &SelectionZone {
        &self.zone
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current page when paging is on.
    pub fn menu_level(&self) -> usize {
        self.menu_level
    }

    pub fn blink_phase(&self) -> BlinkPhase {
        self.blink.phase()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    pub fn set_payload(&mut self, payload: Payload) {
        self.payload = payload;
    }

    pub fn element(&self, id: ListenerId) -> Option<&dyn Element> {
        self.elements.get(id).map(|element| element.as_ref())
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn displayable_count(&self) -> usize {
        self.rows.len()
    }

    /// Take `snapshot` as the previous input frame, so buttons already held
    /// when this menu becomes active do not fire a fresh press.
    pub fn seed_input(&mut self, snapshot: &InputSnapshot) {
        self.synthesizer.seed(snapshot);
    }

    pub fn cursor_up(&mut self) -> bool {
        self.move_cursor(MoveDirection::Up)
    }

    pub fn cursor_down(&mut self) -> bool {
        self.move_cursor(MoveDirection::Down)
    }

    pub fn cursor_left(&mut self) -> bool {
        self.move_cursor(MoveDirection::Left)
    }

    pub fn cursor_right(&mut self) -> bool {
        self.move_cursor(MoveDirection::Right)
    }

    /// One cursor step. Returns false, leaving the cursor alone, when no
    /// navigable cell lies in that direction.
    pub fn move_cursor(&mut self, direction: MoveDirection) -> bool {
        let lengths = self.displayable_lengths();
        let width = self.zone.width();
        let target = self.cursor.step(direction, &self.zone, |y| {
            lengths.get(y).copied().unwrap_or(width)
        });
        let Some(target) = target else {
            return false;
        };

        self.cursor = target;
        if matches!(direction, MoveDirection::Up | MoveDirection::Down) {
            self.update_menu_level();
        }
        self.with_metrics(MenuMetrics::record_cursor_move);
        emit(
            self.config.logger.as_ref(),
            LogLevel::Debug,
            MENU_TARGET,
            "cursor_moved",
            [
                json_kv("menu", json!(self.name)),
                json_kv("direction", direction.as_str()),
                json_kv("x", json!(target.x)),
                json_kv("y", json!(target.y)),
            ],
        );
        true
    }

    /// Place the cursor on `(x, y)` if that cell is navigable.
    pub fn set_cursor(&mut self, x: usize, y: usize) -> bool {
        if !self.zone.is_valid(x, y) {
            return false;
        }
        self.cursor = Cursor::new(x, y);
        self.update_menu_level();
        true
    }

    /// Queue an application event for the next frame's drain.
    pub fn inject(&mut self, event: Event) {
        self.pending.push(event);
    }

    /// Run one frame: dispatch, then render.
    pub fn frame(&mut self, snapshot: &InputSnapshot, now: Instant) -> Result<MenuFrame> {
        let report = self.update(snapshot, now)?;
        let lines = self.render()?;
        Ok(MenuFrame {
            lines,
            navigation: report.navigation,
        })
    }

    /// Inject this frame's events and drain the queue completely.
    pub fn update(&mut self, snapshot: &InputSnapshot, now: Instant) -> Result<FrameReport> {
        debug_assert!(self.queue.is_empty(), "event queue carried over a frame");
        self.frame += 1;

        let tick_priority = self.config.tick_priority;
        self.enqueue(Event::tick(tick_priority, self.frame));
        for event in self.synthesizer.synthesize(snapshot) {
            self.enqueue(event);
        }
        if let Some(phase) = self.blink.poll(now) {
            let blink_priority = self.config.blink_priority;
            self.enqueue(Event::blink(blink_priority, phase));
        }
        for event in std::mem::take(&mut self.pending) {
            self.enqueue(event);
        }

        let report = match self.drain() {
            Ok(report) => report,
            Err(err) => {
                self.queue.clear();
                return Err(err);
            }
        };

        self.suppress_blink = false;
        if report.refresh.is_forced() {
            self.blink.reset_visible(now);
            self.suppress_blink = report.refresh == Refresh::ForceNoBlink && !self.zone.is_zero();
        }

        self.with_metrics(|metrics| metrics.record_frame(report.events, report.invocations));
        emit(
            self.config.logger.as_ref(),
            LogLevel::Debug,
            MENU_TARGET,
            "frame_dispatched",
            [
                json_kv("menu", json!(self.name)),
                json_kv("frame", json!(self.frame)),
                json_kv("events", json!(report.events)),
                json_kv("invocations", json!(report.invocations)),
            ],
        );
        Ok(report)
    }

    /// Lines for the current page, with the cursor character substituted on
    /// the cursor row while the blink phase is on.
    pub fn render(&mut self) -> Result<Vec<String>> {
        let texts = self.row_texts();
        let window = DisplayWindow::compute(
            self.config.enforce_max_lines,
            self.menu_level,
            self.config.lines_per_screen,
            texts.len(),
        )?;

        let show_cursor = !self.suppress_blink && self.blink.phase().is_on() && !self.zone.is_zero();
        let lines = texts[window.start..window.end]
            .iter()
            .enumerate()
            .map(|(offset, text)| {
                if show_cursor && window.start + offset == self.cursor.y {
                    substitute_cursor(text, self.cursor.x, self.config.cursor_char)
                } else {
                    text.clone()
                }
            })
            .collect();

        self.suppress_blink = false;
        self.with_metrics(MenuMetrics::record_render);
        Ok(lines)
    }

    fn enqueue(&mut self, event: Event) {
        self.queue.insert(i64::from(event.priority()), event);
    }

    fn drain(&mut self) -> Result<FrameReport> {
        let displayable = self.rows.clone();
        let mut report = FrameReport::default();

        while let Some(event) = self.queue.extract_top() {
            report.events += 1;
            let candidates = self.registry.candidates(event.kind()).to_vec();
            for id in candidates {
                if !self.should_invoke(id, &event, &displayable) {
                    continue;
                }
                report.invocations += 1;
                let row = displayable.iter().position(|candidate| *candidate == id);
                let outcome = {
                    let mut ctx = MenuContext::new(
                        self.cursor,
                        row,
                        self.blink.phase(),
                        self.frame,
                        &mut self.payload,
                    );
                    let returned = self.elements[id].on_event(&mut ctx, &event)?;
                    ctx.into_outcome(returned)
                };
                let refresh = self.apply_outcome(outcome, &mut report.navigation);
                report.refresh = report.refresh.merge(refresh);
            }
        }

        Ok(report)
    }

    /// Tick goes to everyone. Otherwise criteria must match, then the
    /// listener must be universal or sit on the cursor row.
    fn should_invoke(&self, id: ListenerId, event: &Event, displayable: &[ListenerId]) -> bool {
        if event.is_tick() {
            return true;
        }
        let element = &self.elements[id];
        let caps = element.capabilities();
        if caps.contains(Capabilities::ADVANCED) && !any_satisfied(element.criteria(), event) {
            return false;
        }
        if caps.contains(Capabilities::UNIVERSAL) {
            return true;
        }
        displayable.iter().position(|candidate| *candidate == id) == Some(self.cursor.y)
    }

    fn apply_outcome(&mut self, outcome: ContextOutcome, navigation: &mut Option<Navigation>) -> Refresh {
        let ContextOutcome {
            cursor_requests,
            refresh,
            navigation: requested,
            injected,
        } = outcome;

        let mut refresh = refresh;
        for request in cursor_requests {
            let moved = match request {
                CursorRequest::Move(direction) => self.move_cursor(direction),
                CursorRequest::Set(target) => self.set_cursor(target.x, target.y),
            };
            if moved {
                refresh = refresh.merge(Refresh::Force);
            }
        }

        for event in injected {
            self.enqueue(event);
        }

        if navigation.is_none() {
            *navigation = requested;
        }
        refresh
    }

    /// Current text of every row owner. An owner whose text has since gone
    /// empty keeps its line as a blank.
    fn row_texts(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|id| self.elements[*id].text().unwrap_or_default())
            .collect()
    }

    fn displayable_lengths(&self) -> Vec<usize> {
        self.row_texts().iter().map(|text| text_columns(text)).collect()
    }

    fn normalize_cursor(&mut self) {
        if !self.zone.is_valid(self.cursor.x, self.cursor.y) {
            self.cursor = Cursor::home(&self.zone);
            self.update_menu_level();
        }
    }

    fn update_menu_level(&mut self) {
        self.menu_level = if self.config.enforce_max_lines {
            self.cursor.y / self.config.lines_per_screen
        } else {
            0
        };
    }

    fn with_metrics<F>(&self, record: F)
    where
        F: FnOnce(&mut MenuMetrics),
    {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("name", &self.name)
            .field("elements", &self.elements.len())
            .field("cursor", &self.cursor)
            .field("menu_level", &self.menu_level)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::element::{CursorControl, TextElement};
    use crate::event::{EventKind, EventPayload, GamepadCriteria};
    use crate::input::Button;

    fn config() -> MenuConfig {
        MenuConfig {
            zone_width: 10,
            ..MenuConfig::default()
        }
    }

    fn selectable(text: &str) -> TextElement {
        TextElement::label(text).with_pattern(vec![true, false])
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn recorder(text: &str, log: &Log, kinds: &[EventKind]) -> TextElement {
        let log = Rc::clone(log);
        let tag = text.to_string();
        TextElement::label(text).on(kinds.iter().copied(), move |_, event| {
            log.borrow_mut().push(format!("{tag}:{}", event.kind().as_str()));
            Ok(Refresh::None)
        })
    }

    #[test]
    fn pagination_follows_cursor_row() {
        let mut menu = Menu::new("paged", &config()).unwrap();
        for i in 0..20 {
            menu.add_element(selectable(&format!("item {i}")));
        }
        assert!(menu.set_cursor(0, 9));
        assert_eq!(menu.menu_level(), 1);

        let lines = menu.render().unwrap();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "item 8");
        assert_eq!(lines[1], "█tem 9");
        assert_eq!(lines[7], "item 15");
    }

    #[test]
    fn paging_off_renders_everything() {
        let mut menu = Menu::new(
            "flat",
            &MenuConfig {
                enforce_max_lines: false,
                ..config()
            },
        )
        .unwrap();
        for i in 0..12 {
            menu.add_element(TextElement::label(format!("line {i}")));
        }
        assert_eq!(menu.render().unwrap().len(), 12);
    }

    #[test]
    fn cursor_down_skips_rows_without_cells() {
        let mut menu = Menu::new("sparse", &config())
            .unwrap()
            .with_element(selectable("first"))
            .with_element(TextElement::label("----------"))
            .with_element(TextElement::label("third").with_pattern(vec![false, false, true]));
        assert_eq!(menu.cursor(), Cursor::new(0, 0));
        assert!(menu.cursor_down());
        assert_eq!(menu.cursor(), Cursor::new(2, 2));
        assert!(!menu.cursor_down());
        assert_eq!(menu.cursor(), Cursor::new(2, 2));
    }

    #[test]
    fn hidden_elements_do_not_take_rows() {
        let menu = Menu::new("rows", &config())
            .unwrap()
            .with_element(CursorControl::new())
            .with_element(selectable("a"))
            .with_element(TextElement::hidden("background"))
            .with_element(selectable("b"));
        assert_eq!(menu.zone().height(), 2);
        assert_eq!(menu.displayable_count(), 2);
        assert_eq!(menu.element_count(), 4);
    }

    #[test]
    fn only_cursor_row_listener_receives_presses() {
        let log: Log = Rc::default();
        let mut menu = Menu::new("rows", &config())
            .unwrap()
            .with_element(recorder("top", &log, &[EventKind::Press]))
            .with_element(recorder("bottom", &log, &[EventKind::Press]));
        let now = Instant::now();

        menu.update(&InputSnapshot::new().with(Button::A), now).unwrap();
        let presses: Vec<String> = log.borrow().iter().filter(|e| e.ends_with("press")).cloned().collect();
        assert_eq!(presses, vec!["top:press".to_string()]);

        log.borrow_mut().clear();
        assert!(menu.cursor_down());
        menu.update(&InputSnapshot::new(), now).unwrap();
        menu.update(&InputSnapshot::new().with(Button::A), now).unwrap();
        let presses: Vec<String> = log.borrow().iter().filter(|e| e.ends_with("press")).cloned().collect();
        assert_eq!(presses, vec!["bottom:press".to_string()]);
    }

    #[test]
    fn tick_reaches_every_listener() {
        let log: Log = Rc::default();
        let mut menu = Menu::new("ticks", &config())
            .unwrap()
            .with_element(recorder("a", &log, &[EventKind::Press]))
            .with_element(recorder("b", &log, &[]).with_criteria(GamepadCriteria::new([Button::B])))
            .with_element(TextElement::label("plain"));
        menu.update(&InputSnapshot::new(), Instant::now()).unwrap();
        assert_eq!(*log.borrow(), vec!["a:tick".to_string(), "b:tick".to_string()]);
    }

    #[test]
    fn criteria_gate_events_on_the_cursor_row() {
        let log: Log = Rc::default();
        let mut menu = Menu::new("gated", &config())
            .unwrap()
            .with_element(
                recorder("toggle", &log, &[EventKind::Press])
                    .with_criteria(GamepadCriteria::new([Button::B])),
            );
        let now = Instant::now();
        menu.update(&InputSnapshot::new().with(Button::A), now).unwrap();
        assert!(!log.borrow().contains(&"toggle:press".to_string()));
        menu.update(&InputSnapshot::new().with(Button::B), now).unwrap();
        assert!(log.borrow().contains(&"toggle:press".to_string()));
    }

    #[test]
    fn universal_listener_ignores_cursor_row() {
        let log: Log = Rc::default();
        let mut menu = Menu::new("universal", &config())
            .unwrap()
            .with_element(selectable("row zero"))
            .with_element(recorder("status", &log, &[EventKind::Held]).universal());
        menu.update(&InputSnapshot::new().with(Button::Y), Instant::now()).unwrap();
        assert!(log.borrow().contains(&"status:held".to_string()));
        assert_eq!(menu.cursor(), Cursor::new(0, 0));
    }

    #[test]
    fn events_drain_by_priority() {
        let seen: Rc<RefCell<Vec<Event>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let mut priorities = BTreeMap::new();
        priorities.insert(Button::X, 5);
        priorities.insert(Button::Y, 1);
        let mut menu = Menu::new(
            "priority",
            &MenuConfig {
                input_priorities: priorities,
                ..config()
            },
        )
        .unwrap()
        .with_element(
            TextElement::hidden("observer")
                .on([EventKind::Press, EventKind::Custom], move |_, event| {
                    sink.borrow_mut().push(*event);
                    Ok(Refresh::None)
                })
                .universal(),
        );
        menu.inject(Event::custom(3, 77));
        menu.update(&InputSnapshot::new().with(Button::Y).with(Button::X), Instant::now())
            .unwrap();

        let order: Vec<EventPayload> = seen.borrow().iter().map(|event| *event.payload()).collect();
        assert_eq!(
            order,
            vec![
                EventPayload::Press(Button::X),
                EventPayload::Custom(77),
                EventPayload::Press(Button::Y),
                EventPayload::Tick { frame: 1 },
            ]
        );
    }

    #[test]
    fn cursor_control_moves_and_forces_visible_cursor() {
        let start = Instant::now();
        let mut menu = Menu::new("nav", &config())
            .unwrap()
            .with_element(CursorControl::new())
            .with_element(selectable("one"))
            .with_element(selectable("two"));

        menu.update(&InputSnapshot::new(), start).unwrap();
        // Let the blink turn the cursor off.
        menu.update(&InputSnapshot::new(), start + Duration::from_millis(600)).unwrap();
        assert_eq!(menu.blink_phase(), BlinkPhase::Off);

        let report = menu
            .update(&InputSnapshot::new().with(Button::DpadDown), start + Duration::from_millis(700))
            .unwrap();
        assert_eq!(report.refresh, Refresh::Force);
        assert_eq!(menu.cursor(), Cursor::new(0, 1));
        assert_eq!(menu.blink_phase(), BlinkPhase::On);
        assert_eq!(menu.render().unwrap(), vec!["one".to_string(), "█wo".to_string()]);
    }

    #[test]
    fn no_blink_refresh_hides_cursor_for_one_frame() {
        let now = Instant::now();
        let mut menu = Menu::new("quiet", &config()).unwrap().with_element(
            TextElement::label("value").on([EventKind::Press], |_, event| {
                if event.is_press_of(Button::A) {
                    Ok(Refresh::ForceNoBlink)
                } else {
                    Ok(Refresh::None)
                }
            }),
        );
        let frame = menu.frame(&InputSnapshot::new().with(Button::A), now).unwrap();
        assert_eq!(frame.lines, vec!["value".to_string()]);
        let frame = menu.frame(&InputSnapshot::new(), now).unwrap();
        assert_eq!(frame.lines, vec!["█alue".to_string()]);
    }

    #[test]
    fn blink_event_carries_next_phase() {
        let phases: Rc<RefCell<Vec<BlinkPhase>>> = Rc::default();
        let sink = Rc::clone(&phases);
        let start = Instant::now();
        let mut menu = Menu::new("blink", &config()).unwrap().with_element(
            TextElement::hidden("animator")
                .on([EventKind::Blink], move |_, event| {
                    if let EventPayload::Blink(phase) = event.payload() {
                        sink.borrow_mut().push(*phase);
                    }
                    Ok(Refresh::None)
                })
                .universal(),
        );
        for ms in [0, 100, 500, 800, 1000] {
            menu.update(&InputSnapshot::new(), start + Duration::from_millis(ms)).unwrap();
        }
        assert_eq!(*phases.borrow(), vec![BlinkPhase::Off, BlinkPhase::On]);
    }

    #[test]
    fn listener_error_aborts_frame_and_clears_queue() {
        let mut menu = Menu::new("broken", &config()).unwrap().with_element(
            TextElement::label("boom").on([EventKind::Press], |_, event| {
                if event.is_tick() {
                    return Ok(Refresh::None);
                }
                Err(MenuError::listener("boom", "missing subsystem"))
            }),
        );
        let now = Instant::now();
        let err = menu.update(&InputSnapshot::new().with(Button::A), now).unwrap_err();
        assert!(matches!(err, MenuError::Listener { .. }));
        let report = menu.update(&InputSnapshot::new(), now).unwrap();
        assert_eq!(report.events, 2);
    }

    #[test]
    fn listener_requests_apply_after_return() {
        let mut menu = Menu::new("ctx", &config())
            .unwrap()
            .with_element(
                TextElement::label("jump")
                    .on([EventKind::Press], |ctx, event| {
                        if !event.is_press_of(Button::A) {
                            return Ok(Refresh::None);
                        }
                        assert!(ctx.is_selected());
                        ctx.payload_mut().add("jumped", true);
                        ctx.set_cursor(0, 2);
                        ctx.back(Payload::new().with("from", "jump".to_string()));
                        Ok(Refresh::None)
                    }),
            )
            .with_element(selectable("middle"))
            .with_element(selectable("last"));

        let frame = menu.frame(&InputSnapshot::new().with(Button::A), Instant::now()).unwrap();
        assert_eq!(menu.cursor(), Cursor::new(0, 2));
        assert_eq!(menu.payload().get::<bool>("jumped"), Ok(&true));
        assert!(matches!(frame.navigation, Some(Navigation::Back(_))));
    }

    #[test]
    fn degenerate_zone_never_shows_cursor() {
        let mut menu = Menu::new("static", &config())
            .unwrap()
            .with_element(TextElement::label("hello"))
            .with_element(TextElement::label("world"));
        assert!(menu.zone().is_zero());
        assert_eq!(menu.cursor(), Cursor::new(0, 0));
        assert_eq!(menu.render().unwrap(), vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn zero_lines_per_screen_is_rejected() {
        let err = Menu::new(
            "bad",
            &MenuConfig {
                lines_per_screen: 0,
                ..config()
            },
        )
        .unwrap_err();
        assert!(matches!(err, MenuError::InvalidConfig(_)));
    }

    struct Shrinking {
        text: Rc<RefCell<Option<String>>>,
    }

    impl Element for Shrinking {
        fn text(&self) -> Option<String> {
            self.text.borrow().clone()
        }
    }

    #[test]
    fn rows_stay_aligned_when_text_goes_empty() {
        let text = Rc::new(RefCell::new(Some("status".to_string())));
        let log: Log = Rc::default();
        let mut menu = Menu::new("shrink", &config())
            .unwrap()
            .with_element(Shrinking { text: Rc::clone(&text) })
            .with_element(recorder("beta", &log, &[EventKind::Press]));
        assert_eq!(menu.cursor(), Cursor::new(0, 1));

        *text.borrow_mut() = None;
        assert_eq!(menu.render().unwrap(), vec![String::new(), "█eta".to_string()]);
        assert_eq!(menu.displayable_count(), 2);

        menu.update(&InputSnapshot::new().with(Button::A), Instant::now()).unwrap();
        assert!(log.borrow().contains(&"beta:press".to_string()));
    }
}
