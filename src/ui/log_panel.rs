//! Live log panel.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::logstream::{LineKind, LiveLine, LogStreamController, StreamState};

use super::theme::{
    COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_LOG_ERROR, COLOR_LOG_EVENT,
    COLOR_LOG_RAW, COLOR_PENDING,
};

fn line_style(line: &LiveLine) -> Style {
    match line.kind {
        LineKind::ParsedEvent => Style::default().fg(COLOR_LOG_EVENT),
        LineKind::RawFallback => Style::default().fg(COLOR_LOG_RAW),
        LineKind::StreamError => Style::default()
            .fg(COLOR_LOG_ERROR)
            .add_modifier(Modifier::BOLD),
        LineKind::Status => Style::default()
            .fg(COLOR_DIM)
            .add_modifier(Modifier::ITALIC),
    }
}

fn state_style(state: StreamState) -> Style {
    match state {
        StreamState::Streaming(_) => Style::default().fg(COLOR_ACTIVE),
        StreamState::Connecting(_) => Style::default().fg(COLOR_PENDING),
        StreamState::Errored(_) => Style::default().fg(COLOR_ERROR),
        StreamState::Idle | StreamState::Closed => Style::default().fg(COLOR_DIM),
    }
}

/// Draw the visible window of the live log.
///
/// Sets the viewport height from `area` first, so scrolling keys always
/// page by what is actually on screen.
pub fn render_log_panel(frame: &mut Frame, area: Rect, log_stream: &mut LogStreamController) {
    let height = area.height.saturating_sub(2) as usize;
    let (len, viewport) = log_stream.scroll();
    viewport.set_height(height, len);

    let state = log_stream.state();
    let buffer = log_stream.buffer();
    let viewport = log_stream.viewport();

    let mut title = vec![
        Span::raw(" Live log "),
        Span::styled(format!("[{}]", state), state_style(state)),
        Span::styled(
            format!(" {}/{} ", buffer.len(), buffer.capacity()),
            Style::default().fg(COLOR_DIM),
        ),
    ];
    if log_stream.decode_errors() > 0 {
        title.push(Span::styled(
            format!("{} undecoded ", log_stream.decode_errors()),
            Style::default().fg(COLOR_LOG_RAW),
        ));
    }
    if !viewport.is_following() {
        title.push(Span::styled(
            "scrolled, End to follow ",
            Style::default().fg(COLOR_PENDING),
        ));
    }

    let range = viewport.visible_range(buffer.len());
    let lines: Vec<Line> = buffer
        .iter()
        .skip(range.start)
        .take(range.len())
        .map(|line| Line::from(Span::styled(line.text.clone(), line_style(line))))
        .collect();

    let lines = if lines.is_empty() {
        vec![Line::from(Span::styled(
            "Press 1 for eve.json or 2 for suricata.log",
            Style::default().fg(COLOR_DIM),
        ))]
    } else {
        lines
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(Line::from(title)),
    );
    frame.render_widget(paragraph, area);
}
