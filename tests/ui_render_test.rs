//! Full dashboard rendering with TestBackend.

use std::sync::Arc;

use ratatui::{backend::TestBackend, Terminal};
use serde_json::json;
use surimon::adapters::MockHttpClient;
use surimon::app::{App, AppMessage, SnapshotView};
use surimon::charts::ChartId;
use surimon::config::DashConfig;
use surimon::control::{LogSnapshot, SnapshotError};
use surimon::error::FetchFailure;
use surimon::logstream::LogSource;

fn draw(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("failed to create terminal");
    terminal
        .draw(|f| surimon::ui::render(f, app))
        .expect("failed to draw");
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn test_app() -> App {
    App::new(
        DashConfig::default().with_base_url("http://sensor:5001"),
        Arc::new(MockHttpClient::new()),
    )
}

fn apply_chart(app: &mut App, id: ChartId, result: Result<serde_json::Value, FetchFailure>) {
    let request = app.charts.begin_refresh_one(id);
    app.handle_message(AppMessage::ChartFetched { request, result });
}

#[test]
fn test_charts_and_placeholders_render() {
    let mut app = test_app();
    apply_chart(
        &mut app,
        ChartId::TopDns,
        Ok(json!({"labels": ["example.org"], "values": [17]})),
    );
    apply_chart(
        &mut app,
        ChartId::TopSignatures,
        Err(FetchFailure::from_status(
            "/api/stats/top_signatures",
            404,
            br#"{"error": "eve.json not found in the logs directory."}"#,
        )),
    );
    apply_chart(
        &mut app,
        ChartId::DecoderProtocols,
        Ok(json!({"decoder": {"pkts": 100, "tcp": 60, "udp": 30}})),
    );

    let text = draw(&mut app, 160, 50);

    assert!(text.contains("example.org"));
    assert!(text.contains("eve.json not found"));
    assert!(text.contains("TCP"));
    assert!(text.contains("Autre"));
    assert!(text.contains("60.0%"));
}

#[test]
fn test_snapshot_overlay_renders() {
    let mut app = test_app();
    app.snapshot = SnapshotView::Loading;
    app.handle_message(AppMessage::SnapshotLoaded(Ok(LogSnapshot {
        source: LogSource::SuricataText,
        text: "engine started\nall threads running".to_string(),
        pretty: false,
    })));

    let text = draw(&mut app, 120, 40);
    assert!(text.contains("suricata.log"));
    assert!(text.contains("all threads running"));
}

#[test]
fn test_snapshot_failure_renders() {
    let mut app = test_app();
    app.snapshot = SnapshotView::Loading;
    app.handle_message(AppMessage::SnapshotLoaded(Err(SnapshotError::BothUnavailable {
        eve_status: 404,
        text_status: 404,
    })));

    let text = draw(&mut app, 120, 40);
    assert!(text.contains("HTTP error! status: 404 and 404"));
}

#[test]
fn test_log_panel_sets_viewport_height() {
    let mut app = test_app();
    assert_eq!(app.log_stream.viewport().height(), 0);
    draw(&mut app, 120, 40);
    let height = app.log_stream.viewport().height();
    // Log panel gets at least its minimum rows, minus borders
    assert!((3..=38).contains(&height), "height {}", height);
}
