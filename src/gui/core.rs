use std::time::{Duration, Instant};

use serde_json::json;

use crate::config::MenuConfig;
use crate::error::{MenuError, Result};
use crate::input::InputSnapshot;
use crate::logging::{GUI_TARGET, LogLevel, METRICS_TARGET, emit, json_kv};
use crate::menu::{Menu, MenuFrame, Navigation};
use crate::metrics::MetricSnapshot;
use crate::params::ParamRegistry;
use crate::payload::Payload;
use crate::render::LineSink;

/// Prefix of the line shown once a menu has failed.
pub const ERROR_PREFIX: &str = "ERROR: ";

/// Session object owned by the application loop. Holds the menu stack, the
/// parameter registry and the failure state.
pub struct GuiContext {
    config: MenuConfig,
    stack: Vec<Menu>,
    params: ParamRegistry,
    failure: Option<String>,
    last_input: InputSnapshot,
    frames: u64,
    started: Instant,
    last_metrics_emit: Instant,
}

impl GuiContext {
    pub fn create(config: MenuConfig, root: Menu) -> Self {
        let now = Instant::now();
        let gui = Self {
            config,
            stack: vec![root],
            params: ParamRegistry::new(),
            failure: None,
            last_input: InputSnapshot::new(),
            frames: 0,
            started: now,
            last_metrics_emit: now,
        };
        gui.log(
            LogLevel::Info,
            "gui_created",
            [json_kv("root", json!(gui.active_name()))],
        );
        gui
    }

    pub fn with_params(mut self, params: ParamRegistry) -> Self {
        self.params = params;
        self
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn params(&self) -> &ParamRegistry {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParamRegistry {
        &mut self.params
    }

    pub fn active(&self) -> Option<&Menu> {
        self.stack.last()
    }

    pub fn active_mut(&mut self) -> Option<&mut Menu> {
        self.stack.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Message of the contract violation that halted the session, if any.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run the active menu for one frame and return the lines to show. After
    /// a failure every frame returns the error line.
    pub fn frame(&mut self, snapshot: &InputSnapshot, now: Instant) -> Vec<String> {
        self.frames += 1;
        self.last_input = snapshot.clone();
        if let Some(message) = &self.failure {
            return vec![format!("{ERROR_PREFIX}{message}")];
        }
        let Some(menu) = self.stack.last_mut() else {
            return Vec::new();
        };

        let lines = match menu.frame(snapshot, now) {
            Ok(MenuFrame { lines, navigation }) => {
                if let Some(navigation) = navigation {
                    self.navigate(navigation);
                }
                lines
            }
            Err(err) => self.fail(err),
        };
        self.maybe_emit_metrics(now);
        lines
    }

    /// Feed a fixed input script through the session, one snapshot per
    /// frame spaced `frame_interval` apart, writing each frame to `sink`.
    pub fn run_scripted<I>(
        &mut self,
        sink: &mut dyn LineSink,
        inputs: I,
        start: Instant,
        frame_interval: Duration,
    ) -> Result<u64>
    where
        I: IntoIterator<Item = InputSnapshot>,
    {
        let mut now = start;
        let mut count = 0;
        for snapshot in inputs {
            let lines = self.frame(&snapshot, now);
            sink.write_frame(&lines)?;
            now += frame_interval;
            count += 1;
        }
        Ok(count)
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::Forward(menu, payload) => self.forward(*menu, payload),
            Navigation::Back(payload) => {
                self.back(payload);
            }
            Navigation::Inflate(menu, payload) => self.inflate(*menu, payload),
        }
    }

    /// Push `menu` with `payload` merged into its own. The incoming menu
    /// sees buttons held from the last frame as already down.
    pub fn forward(&mut self, mut menu: Menu, payload: Payload) {
        menu.payload_mut().merge(payload);
        menu.seed_input(&self.last_input);
        self.stack.push(menu);
        self.log_navigation("forward");
    }

    /// Pop the active menu and hand `payload` to the one revealed. Returns
    /// false, changing nothing, at the root.
    pub fn back(&mut self, payload: Payload) -> bool {
        if self.stack.len() <= 1 {
            self.log(LogLevel::Debug, "back_at_root", std::iter::empty());
            return false;
        }
        self.stack.pop();
        if let Some(revealed) = self.stack.last_mut() {
            revealed.payload_mut().merge(payload);
            revealed.seed_input(&self.last_input);
        }
        self.log_navigation("back");
        true
    }

    /// Replace the whole stack with `menu`. Clears a previous failure.
    pub fn inflate(&mut self, mut menu: Menu, payload: Payload) {
        menu.payload_mut().merge(payload);
        menu.seed_input(&self.last_input);
        self.stack.clear();
        self.stack.push(menu);
        self.failure = None;
        self.log_navigation("inflate");
    }

    /// End the session and return the final metrics, if collected.
    pub fn teardown(mut self) -> Option<MetricSnapshot> {
        let uptime = self.started.elapsed();
        let snapshot = self.metrics_snapshot(uptime);
        if let Some(snapshot) = &snapshot {
            if let Some(logger) = self.config.logger.as_ref() {
                let _ = logger.log_event(snapshot.to_log_event(METRICS_TARGET));
            }
        }
        self.log(
            LogLevel::Info,
            "gui_teardown",
            [
                json_kv("frames", json!(self.frames)),
                json_kv("depth", json!(self.stack.len())),
                json_kv("failed", json!(self.failure.is_some())),
                json_kv("uptime_ms", json!(uptime.as_millis() as u64)),
            ],
        );
        self.stack.clear();
        snapshot
    }

    fn fail(&mut self, err: MenuError) -> Vec<String> {
        let message = err.to_string();
        self.log(
            LogLevel::Error,
            "menu_failed",
            [
                json_kv("menu", json!(self.active_name())),
                json_kv("error", json!(message)),
            ],
        );
        let line = format!("{ERROR_PREFIX}{message}");
        self.failure = Some(message);
        vec![line]
    }

    fn maybe_emit_metrics(&mut self, now: Instant) {
        let interval = self.config.metrics_interval();
        if interval.is_zero() || now.saturating_duration_since(self.last_metrics_emit) < interval {
            return;
        }
        self.last_metrics_emit = now;
        let uptime = now.saturating_duration_since(self.started);
        if let (Some(logger), Some(snapshot)) =
            (self.config.logger.as_ref(), self.metrics_snapshot(uptime))
        {
            let _ = logger.log_event(snapshot.to_log_event(METRICS_TARGET));
        }
    }

    fn metrics_snapshot(&self, uptime: Duration) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(uptime))
    }

    fn active_name(&self) -> Option<&str> {
        self.stack.last().map(Menu::name)
    }

    fn log_navigation(&self, action: &str) {
        self.log(
            LogLevel::Info,
            "navigation",
            [
                json_kv("action", action),
                json_kv("menu", json!(self.active_name())),
                json_kv("depth", json!(self.stack.len())),
            ],
        );
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        emit(self.config.logger.as_ref(), level, GUI_TARGET, message, fields);
    }
}

impl std::fmt::Debug for GuiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuiContext")
            .field("stack", &self.stack)
            .field("params", &self.params.len())
            .field("failure", &self.failure)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}
