//! UI rendering for the dashboard.
//!
//! Layout, top to bottom: header, a 3x2 chart grid, the live log, the
//! status line and key help. The log snapshot, when open, is drawn over
//! everything else.

mod helpers;
mod log_panel;
mod surface;
mod theme;

pub use helpers::{centered_rect, format_count, truncate_label};
pub use log_panel::render_log_panel;
pub use surface::{prepare, proportions, BoundChart, ChartBoard, PreparedChart, DATA_UNAVAILABLE};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, SnapshotView, StatusLevel};
use crate::charts::ChartId;
use crate::logstream::StreamState;

use helpers::spinner_frame;
use theme::{
    COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_PENDING,
};

const KEY_HELP: &str =
    "1/2 source  x stop  g charts  r reload  u uptime  i ifaces  S shutdown  U update  e rules  c config  l logs  q quit";
const CONFIRM_HELP: &str = "y confirm  any other key cancels";
const SNAPSHOT_HELP: &str = "↑↓ PgUp PgDn scroll  Esc/l close  q quit";

/// Main render function - draws the whole dashboard.
pub fn render(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(60),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, rows[0], app);
    render_chart_grid(frame, rows[1], app);
    render_log_panel(frame, rows[2], &mut app.log_stream);
    render_status(frame, rows[3], app);
    render_help(frame, rows[4], app);

    if app.snapshot.is_visible() {
        let area = frame.area();
        render_snapshot(frame, area, &app.snapshot);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.log_stream.state();
    let (marker, color) = match state {
        StreamState::Streaming(_) => ("●", COLOR_ACTIVE),
        StreamState::Connecting(_) => (spinner_frame(app.tick_count), COLOR_PENDING),
        StreamState::Errored(_) => ("✕", COLOR_ERROR),
        StreamState::Idle | StreamState::Closed => ("○", COLOR_DIM),
    };

    let line = Line::from(vec![
        Span::styled(
            " surimon ",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.client.base_url().to_string(), Style::default().fg(COLOR_DIM)),
        Span::raw("  "),
        Span::styled(format!("{} ", marker), Style::default().fg(color)),
        Span::styled(state.to_string(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_chart_grid(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (row, ids) in rows.iter().zip(ChartId::ALL.chunks(2)) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2); 2])
            .split(*row);
        for (cell, id) in cells.iter().zip(ids) {
            app.chart_board.render(frame, *cell, id.spec().canvas);
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let color = match app.status.level {
        StatusLevel::Info => COLOR_ACCENT,
        StatusLevel::Success => COLOR_ACTIVE,
        StatusLevel::Error => COLOR_ERROR,
    };
    let line = Line::from(Span::styled(
        format!(" {}", app.status.text),
        Style::default().fg(color),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let help = if app.confirm.is_some() {
        CONFIRM_HELP
    } else if app.snapshot.is_visible() {
        SNAPSHOT_HELP
    } else {
        KEY_HELP
    };
    let line = Line::from(Span::styled(format!(" {}", help), Style::default().fg(COLOR_DIM)));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_snapshot(frame: &mut Frame, area: Rect, view: &SnapshotView) {
    let area = centered_rect(90, 80, area);
    let (title, body, scroll, color) = match view {
        SnapshotView::Hidden => return,
        SnapshotView::Loading => (" Logs ".to_string(), "Loading...".to_string(), 0, COLOR_DIM),
        SnapshotView::Shown { snapshot, scroll } => (
            format!(" {} ", snapshot.source.file_name()),
            snapshot.text.clone(),
            *scroll,
            COLOR_ACCENT,
        ),
        SnapshotView::Failed(reason) => (
            " Logs ".to_string(),
            format!("Error loading logs: {}", reason),
            0,
            COLOR_ERROR,
        ),
    };

    let paragraph = Paragraph::new(body)
        .style(Style::default().fg(color))
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(title),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
