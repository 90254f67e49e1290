//! Performance benchmarks for the live log path
//!
//! Covers buffer appends at capacity, message classification and drawing
//! the log panel from a full buffer.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ratatui::{backend::TestBackend, Terminal};
use surimon::logstream::{
    LineBuffer, LiveLine, LogSource, LogStreamController, StreamConnection, StreamConnector,
    StreamEvent,
};
use surimon::ui::render_log_panel;

const EVE_ALERT: &str = r#"{"timestamp":"2026-10-16T10:00:00.000000+0000","flow_id":1234567,"event_type":"alert","src_ip":"10.0.0.5","src_port":51514,"dest_ip":"192.0.2.10","dest_port":443,"proto":"TCP","alert":{"action":"allowed","signature_id":2019401,"signature":"ET POLICY Session Traversal Utilities for NAT","severity":3}}"#;

struct Idle;

impl StreamConnection for Idle {
    fn close(&mut self) {}
}

struct IdleConnector;

impl StreamConnector for IdleConnector {
    fn open(&mut self, _source: LogSource, _generation: u64) -> Box<dyn StreamConnection> {
        Box::new(Idle)
    }
}

fn streaming_controller(capacity: usize) -> LogStreamController {
    let mut controller = LogStreamController::new(capacity, Box::new(IdleConnector));
    controller.select_source(LogSource::Eve);
    let generation = controller.generation();
    controller.handle_event(generation, StreamEvent::Opened);
    for _ in 0..capacity {
        controller.handle_event(generation, StreamEvent::Message(EVE_ALERT.to_string()));
    }
    controller
}

/// Benchmark appends into a full buffer (every append evicts)
fn bench_buffer_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_append_full");
    group.throughput(Throughput::Elements(1));

    for capacity in [100, 500, 5_000].iter() {
        let mut buffer = LineBuffer::new(*capacity);
        for i in 0..*capacity {
            buffer.append(LiveLine::status(i.to_string()));
        }

        group.bench_with_input(BenchmarkId::from_parameter(capacity), capacity, |b, _| {
            b.iter(|| black_box(buffer.append(LiveLine::status("line"))));
        });
    }

    group.finish();
}

/// Benchmark classifying one eve.json payload
fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_eve_alert", |b| {
        b.iter(|| black_box(LiveLine::classify(black_box(EVE_ALERT))));
    });
    c.bench_function("classify_invalid", |b| {
        b.iter(|| black_box(LiveLine::classify(black_box("{\"truncated\": "))));
    });
}

/// Benchmark drawing the log panel over a full buffer
fn bench_log_panel_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_panel_render");

    for (width, height) in [(80u16, 24u16), (200, 60)].iter() {
        let mut controller = streaming_controller(500);
        let mut terminal =
            Terminal::new(TestBackend::new(*width, *height)).expect("failed to create terminal");

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, height)),
            &(),
            |b, _| {
                b.iter(|| {
                    terminal
                        .draw(|f| {
                            let area = f.area();
                            render_log_panel(f, area, &mut controller)
                        })
                        .expect("failed to draw");
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_buffer_append,
    bench_classify,
    bench_log_panel_render
);
criterion_main!(benches);
