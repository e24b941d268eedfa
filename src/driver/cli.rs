use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use serde_json::json;

use crate::error::{MenuError, Result};
use crate::gui::GuiContext;
use crate::input::{Button, InputSnapshot};
use crate::logging::{GUI_TARGET, LogLevel, emit, json_kv};
use crate::render::{AnsiLineSink, LineSink, SinkSettings};

/// Map a key to the controller button it stands in for.
pub fn key_to_button(key: &KeyEvent) -> Option<Button> {
    let button = match key.code {
        KeyCode::Up => Button::DpadUp,
        KeyCode::Down => Button::DpadDown,
        KeyCode::Left => Button::DpadLeft,
        KeyCode::Right => Button::DpadRight,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('a') => Button::A,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Button::B,
        KeyCode::Char('x') => Button::X,
        KeyCode::Char('y') => Button::Y,
        KeyCode::BackTab => Button::LeftBumper,
        KeyCode::Tab => Button::RightBumper,
        KeyCode::Char('s') => Button::Start,
        KeyCode::Char('z') => Button::Back,
        KeyCode::Char('g') => Button::Guide,
        _ => return None,
    };
    Some(button)
}

/// `q` or Ctrl+C ends the session.
pub fn is_exit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Terminals report key presses, not key state. A button stays down for
/// `hold_frames` frames after its last press or auto-repeat so that holding
/// a key yields held events.
#[derive(Debug, Clone)]
pub struct KeyLatch {
    hold_frames: u32,
    remaining: BTreeMap<Button, u32>,
}

impl KeyLatch {
    pub fn new(hold_frames: u32) -> Self {
        Self {
            hold_frames: hold_frames.max(1),
            remaining: BTreeMap::new(),
        }
    }

    pub fn press(&mut self, button: Button) {
        self.remaining.insert(button, self.hold_frames);
    }

    /// Buttons down this frame; ages every latch by one frame.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let mut snapshot = InputSnapshot::new();
        for (button, frames) in self.remaining.iter_mut() {
            snapshot.set(*button, true);
            *frames -= 1;
        }
        self.remaining.retain(|_, frames| *frames > 0);
        snapshot
    }
}

#[derive(Debug, Clone)]
pub struct DriverSettings {
    pub frame_interval: Duration,
    pub hold_frames: u32,
    pub sink: SinkSettings,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(50),
            hold_frames: 3,
            sink: SinkSettings::default(),
        }
    }
}

/// Runs a [`GuiContext`] in the terminal: raw mode, alternate screen, one
/// frame per `frame_interval`.
pub struct TerminalDriver {
    gui: GuiContext,
    settings: DriverSettings,
}

impl TerminalDriver {
    pub fn new(gui: GuiContext) -> Self {
        Self::with_settings(gui, DriverSettings::default())
    }

    pub fn with_settings(gui: GuiContext, settings: DriverSettings) -> Self {
        Self { gui, settings }
    }

    pub fn gui(&self) -> &GuiContext {
        &self.gui
    }

    /// Run until an exit key, then tear the session down.
    pub fn run(mut self) -> Result<()> {
        let mut stdout = io::stdout();
        self.enter(&mut stdout)?;
        let result = self.run_inner(&mut stdout);
        self.exit(&mut stdout);
        self.gui.teardown();
        result
    }

    fn run_inner(&mut self, stdout: &mut impl Write) -> Result<()> {
        let mut sink = AnsiLineSink::new(stdout, self.settings.sink.clone());
        let mut latch = KeyLatch::new(self.settings.hold_frames);
        let interval = self.settings.frame_interval;

        loop {
            let frame_start = Instant::now();
            while let Some(timeout) = interval.checked_sub(frame_start.elapsed()) {
                if !event::poll(timeout)? {
                    break;
                }
                match event::read()? {
                    TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                        if is_exit_key(&key) {
                            emit(
                                self.gui.config().logger.as_ref(),
                                LogLevel::Info,
                                GUI_TARGET,
                                "exit_requested",
                                [json_kv("frames", json!(self.gui.frames()))],
                            );
                            return Ok(());
                        }
                        if let Some(button) = key_to_button(&key) {
                            latch.press(button);
                        }
                    }
                    TermEvent::Resize(..) => sink.invalidate(),
                    _ => {}
                }
            }

            let lines = self.gui.frame(&latch.snapshot(), Instant::now());
            sink.write_frame(&lines)?;
        }
    }

    fn enter(&self, stdout: &mut impl Write) -> Result<()> {
        terminal::enable_raw_mode().map_err(|err| MenuError::Terminal(err.to_string()))?;
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(())
    }

    fn exit(&self, stdout: &mut impl Write) {
        execute!(stdout, Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_confirm_keys_map_to_buttons() {
        assert_eq!(key_to_button(&key(KeyCode::Up)), Some(Button::DpadUp));
        assert_eq!(key_to_button(&key(KeyCode::Right)), Some(Button::DpadRight));
        assert_eq!(key_to_button(&key(KeyCode::Enter)), Some(Button::A));
        assert_eq!(key_to_button(&key(KeyCode::Esc)), Some(Button::B));
        assert_eq!(key_to_button(&key(KeyCode::F(5))), None);
    }

    #[test]
    fn exit_keys() {
        assert!(is_exit_key(&key(KeyCode::Char('q'))));
        assert!(is_exit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_exit_key(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn latch_holds_for_configured_frames() {
        let mut latch = KeyLatch::new(2);
        latch.press(Button::A);
        assert!(latch.snapshot().is_pressed(Button::A));
        assert!(latch.snapshot().is_pressed(Button::A));
        assert!(!latch.snapshot().is_pressed(Button::A));

        latch.press(Button::B);
        latch.snapshot();
        latch.press(Button::B);
        assert!(latch.snapshot().is_pressed(Button::B));
        assert!(latch.snapshot().is_pressed(Button::B));
        assert!(!latch.snapshot().is_pressed(Button::B));
    }
}
