//! Teleop tuning menu
//!
//! Lists the parameters of two subsystems, lets the operator step numeric
//! values with the D-pad and writes them back to `teleop.params` on exit.
//!
//! ```bash
//! cargo run --example teleop_menu              # interactive, arrows + Enter/Esc, q quits
//! cargo run --example teleop_menu -- capture   # scripted frames printed to stdout
//! ```
//!
//! Set `LINE_MENU_LOG=path` to write JSON-lines logs.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use line_menu::{
    Button, Capabilities, CursorControl, Element, Event, EventKind, FileParamStore, FileSink,
    GuiContext, InputSnapshot, Logger, MemoryLineSink, Menu, MenuConfig, MenuContext, MenuError,
    Param, ParamRegistry, ParamSource, ParamValue, Payload, Refresh, Result, TerminalDriver,
    TextElement,
};

const PARAMS_PATH: &str = "teleop.params";

struct Arm;

impl ParamSource for Arm {
    fn list_teleop_params(&self) -> Vec<Param> {
        vec![
            Param::new("arm", "speed", ParamValue::Float(0.5)),
            Param::new("arm", "steps", ParamValue::Int(4)).with_gamepad(Button::Y),
        ]
    }
}

struct Claw;

impl ParamSource for Claw {
    fn list_teleop_params(&self) -> Vec<Param> {
        vec![Param::new("claw", "inverted", ParamValue::Bool(false)).with_gamepad(Button::X)]
    }
}

type SharedParams = Rc<RefCell<ParamRegistry>>;

fn main() -> Result<()> {
    let capture_only = std::env::args().any(|arg| arg == "capture");

    let mut config = MenuConfig::default();
    if let Ok(path) = std::env::var("LINE_MENU_LOG") {
        config = config.with_logger(Logger::new(FileSink::new(path, 1 << 20)?));
    }
    config.enable_metrics();

    let mut registry = ParamRegistry::new();
    registry.register(&Arm)?;
    registry.register(&Claw)?;
    let mut store = FileParamStore::new(PARAMS_PATH);
    registry.load_from(&store, config.logger.as_ref());
    let params: SharedParams = Rc::new(RefCell::new(registry));

    let root = param_list(&config, &params)?;
    let mut gui = GuiContext::create(config, root);

    if capture_only {
        let mut sink = MemoryLineSink::new();
        gui.run_scripted(&mut sink, script(), Instant::now(), Duration::from_millis(50))?;
        for (idx, frame) in sink.frames().iter().enumerate() {
            println!("-- frame {idx}");
            for line in frame {
                println!("{line}");
            }
        }
        gui.teardown();
    } else {
        TerminalDriver::new(gui).run()?;
    }

    params.borrow().save_to(&mut store)?;
    Ok(())
}

fn param_list(config: &MenuConfig, params: &SharedParams) -> Result<Menu> {
    let mut menu = Menu::new("params", config)?.with_element(CursorControl::new());
    let entries: Vec<(String, String)> = params
        .borrow()
        .params()
        .map(|param| (param.subsystem.clone(), param.name.clone()))
        .collect();

    for (subsystem, name) in entries {
        let label = format!("{subsystem}.{name}");
        let child_config = config.clone();
        let child_params = Rc::clone(params);
        menu.add_element(TextElement::label(label).on([EventKind::Press], move |ctx, event| {
            if event.is_press_of(Button::A) {
                let editor = param_editor(&child_config, &child_params, &subsystem, &name)?;
                ctx.forward(editor, Payload::new());
            }
            Ok(Refresh::None)
        }));
    }
    Ok(menu)
}

/// The edited value. Left and right step numbers and flip booleans; every
/// change goes straight into the shared registry.
struct ValueLine {
    subsystem: String,
    name: String,
    value: ParamValue,
    params: SharedParams,
}

impl Element for ValueLine {
    fn name(&self) -> &str {
        "value"
    }

    fn text(&self) -> Option<String> {
        Some(format!("= {}", self.value))
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::LISTENER | Capabilities::UNIVERSAL | Capabilities::CURSOR_CONFIGURABLE
    }

    fn event_kinds(&self) -> &[EventKind] {
        &[EventKind::Press]
    }

    fn selection_pattern(&self) -> Option<Vec<bool>> {
        Some(vec![false])
    }

    fn on_event(&mut self, _ctx: &mut MenuContext<'_>, event: &Event) -> Result<Refresh> {
        let step = match event.input() {
            Some(Button::DpadRight) => 1,
            Some(Button::DpadLeft) => -1,
            _ => return Ok(Refresh::None),
        };
        let next = match &self.value {
            ParamValue::Float(v) => ParamValue::Float(v + 0.05 * f64::from(step)),
            ParamValue::Int(v) => ParamValue::Int(v + i64::from(step)),
            ParamValue::Bool(v) => ParamValue::Bool(!v),
            ParamValue::Text(_) => return Ok(Refresh::None),
        };
        self.params
            .borrow_mut()
            .set(&self.subsystem, &self.name, next.clone())?;
        self.value = next;
        Ok(Refresh::ForceNoBlink)
    }
}

fn param_editor(config: &MenuConfig, params: &SharedParams, subsystem: &str, name: &str) -> Result<Menu> {
    let value = params
        .borrow()
        .value(subsystem, name)
        .cloned()
        .ok_or_else(|| MenuError::listener(name, "parameter vanished"))?;

    Ok(Menu::new("editor", config)?
        .with_element(CursorControl::new())
        .with_element(TextElement::label(format!("{subsystem}.{name}")))
        .with_element(ValueLine {
            subsystem: subsystem.to_string(),
            name: name.to_string(),
            value,
            params: Rc::clone(params),
        })
        .with_element(TextElement::label("Back").on([EventKind::Press], |ctx, event| {
            if event.is_press_of(Button::A) || event.is_press_of(Button::B) {
                ctx.back(Payload::new());
            }
            Ok(Refresh::None)
        })))
}

fn script() -> Vec<InputSnapshot> {
    let idle = InputSnapshot::new;
    vec![
        idle(),
        InputSnapshot::new().with(Button::A),
        idle(),
        InputSnapshot::new().with(Button::DpadRight),
        idle(),
        InputSnapshot::new().with(Button::DpadRight),
        idle(),
        InputSnapshot::new().with(Button::B),
        idle(),
        InputSnapshot::new().with(Button::DpadDown),
        idle(),
    ]
}
