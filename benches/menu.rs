use std::io;
use std::time::{Duration, Instant};

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use line_menu::logging::{LogEvent, LogSink};
use line_menu::{
    AnsiLineSink, Button, CursorControl, EventKind, GamepadCriteria, GuiContext, HeapOrder,
    InputSnapshot, LoggingResult, Logger, Menu, MenuConfig, Payload, PriorityHeap, Refresh,
    Result, TextElement,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

fn menu_session_script(c: &mut Criterion) {
    let script = scripted_inputs();
    c.bench_function("menu_session_script", |b| {
        b.iter(|| {
            let mut gui = build_session().expect("session");
            let mut sink = AnsiLineSink::with_default(io::sink());
            gui.run_scripted(
                &mut sink,
                black_box(script.clone()),
                Instant::now(),
                Duration::from_millis(20),
            )
            .expect("scripted run");
        });
    });
}

fn heap_throughput(c: &mut Criterion) {
    let keys: Vec<i64> = (0..1024).map(|i| (i * 7919) % 613).collect();
    c.bench_function("heap_insert_extract_1024", |b| {
        b.iter(|| {
            let mut heap = PriorityHeap::new(HeapOrder::Max);
            for (idx, key) in keys.iter().enumerate() {
                heap.insert(*key, idx);
            }
            while let Some(item) = heap.extract_top() {
                black_box(item);
            }
        });
    });
}

fn cursor_sweep(c: &mut Criterion) {
    c.bench_function("cursor_sweep_sparse_zone", |b| {
        b.iter(|| {
            let mut menu = sparse_menu().expect("menu");
            while menu.cursor_down() {}
            while menu.cursor_up() {}
            black_box(menu.cursor());
        });
    });
}

fn build_session() -> Result<GuiContext> {
    let mut config = MenuConfig::default().with_logger(Logger::new(NullSink));
    config.enable_metrics();

    let detail_config = config.clone();
    let mut root = Menu::new("bench.root", &config)?.with_element(CursorControl::new());
    for idx in 0..24 {
        let detail_config = detail_config.clone();
        root.add_element(
            TextElement::label(format!("Subsystem {idx:02}"))
                .on([EventKind::Press], move |ctx, event| {
                    if event.is_press_of(Button::A) {
                        let detail = detail_menu(&detail_config)?;
                        ctx.forward(detail, Payload::new().with("index", idx));
                    }
                    Ok(Refresh::None)
                }),
        );
    }
    Ok(GuiContext::create(config, root))
}

fn detail_menu(config: &MenuConfig) -> Result<Menu> {
    Ok(Menu::new("bench.detail", config)?
        .with_element(CursorControl::new())
        .with_element(TextElement::label("Speed 0.50").with_pattern(vec![true, false]))
        .with_element(
            TextElement::label("Back")
                .on([EventKind::Press], |ctx, _| {
                    ctx.back(Payload::new());
                    Ok(Refresh::ForceNoBlink)
                })
                .with_criteria(GamepadCriteria::new([Button::B])),
        ))
}

fn sparse_menu() -> Result<Menu> {
    let config = MenuConfig::default();
    let mut menu = Menu::new("bench.sparse", &config)?;
    for idx in 0..200 {
        let pattern = if idx % 3 == 0 {
            vec![false]
        } else {
            vec![false, true, false, false, true]
        };
        menu.add_element(TextElement::label(format!("row {idx:03} ----------")).with_pattern(pattern));
    }
    Ok(menu)
}

fn scripted_inputs() -> Vec<InputSnapshot> {
    let mut frames = Vec::with_capacity(128);
    for _ in 0..4 {
        for _ in 0..10 {
            frames.push(InputSnapshot::new().with(Button::DpadDown));
            frames.push(InputSnapshot::new());
        }
        frames.push(InputSnapshot::new().with(Button::A));
        frames.push(InputSnapshot::new());
        frames.push(InputSnapshot::new().with(Button::DpadDown));
        frames.push(InputSnapshot::new());
        frames.push(InputSnapshot::new().with(Button::B));
        frames.push(InputSnapshot::new());
    }
    frames
}

criterion_group!(benches, menu_session_script, heap_throughput, cursor_sweep);
criterion_main!(benches);
