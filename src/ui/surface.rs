//! Chart board: the terminal render surface for prepared charts.
//!
//! The aggregator binds content per canvas through [`RenderSurface`]; the
//! layout later draws each canvas into its grid cell. Binding validates the
//! series, so drawing never sees inconsistent data.

use std::collections::HashMap;

use ratatui::{
    layout::{Direction, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::charts::{ChartKind, ChartSpec, Series, CHART_SPECS};
use crate::error::{ChartRenderError, DashError};
use crate::traits::{ChartContent, RenderSurface};

use super::helpers::{format_count, truncate_label};
use super::theme::{
    segment_color, COLOR_ACCENT, COLOR_BAR, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_LINE_DROPPED,
    COLOR_LINE_RECEIVED,
};

/// Placeholder text for an empty series.
pub const DATA_UNAVAILABLE: &str = "data unavailable";

/// A series checked against its chart kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedChart {
    pub spec: ChartSpec,
    pub series: Series,
}

/// What is currently bound at one canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundChart {
    Prepared(PreparedChart),
    Placeholder(String),
}

/// Canvas-keyed chart bindings. Binding replaces, so redraws never stack.
#[derive(Debug, Default)]
pub struct ChartBoard {
    bound: HashMap<&'static str, BoundChart>,
}

/// Check that `series` can be drawn as `spec.kind`.
pub fn prepare(spec: &ChartSpec, series: &Series) -> Result<PreparedChart, ChartRenderError> {
    let expected = match spec.kind {
        ChartKind::Line => 2,
        ChartKind::Bar | ChartKind::Pie | ChartKind::Doughnut => 1,
    };
    if series.datasets.len() != expected {
        return Err(ChartRenderError::DatasetCount {
            kind: spec.kind.as_str(),
            expected,
            found: series.datasets.len(),
        });
    }

    for dataset in &series.datasets {
        if dataset.values.len() != series.labels.len() {
            return Err(ChartRenderError::LengthMismatch {
                dataset: dataset.label.clone(),
                expected: series.labels.len(),
                found: dataset.values.len(),
            });
        }
        for (index, value) in dataset.values.iter().enumerate() {
            if !value.is_finite() {
                return Err(ChartRenderError::NonFiniteValue {
                    dataset: dataset.label.clone(),
                    index,
                });
            }
            if *value < 0.0 {
                return Err(ChartRenderError::NegativeValue {
                    dataset: dataset.label.clone(),
                    index,
                });
            }
        }
    }

    Ok(PreparedChart {
        spec: *spec,
        series: series.clone(),
    })
}

impl RenderSurface for ChartBoard {
    fn draw(&mut self, spec: &ChartSpec, content: ChartContent<'_>) {
        let bound = match content {
            ChartContent::Series(series) if series.is_empty() => {
                BoundChart::Placeholder(DATA_UNAVAILABLE.to_string())
            }
            ChartContent::Series(series) => match prepare(spec, series) {
                Ok(prepared) => BoundChart::Prepared(prepared),
                Err(e) => {
                    tracing::warn!("{}: {}", spec.canvas, e);
                    BoundChart::Placeholder(DashError::from(e).user_message())
                }
            },
            ChartContent::Unavailable(reason) => BoundChart::Placeholder(reason.to_string()),
        };
        self.bound.insert(spec.canvas, bound);
    }
}

impl ChartBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound(&self, canvas: &str) -> Option<&BoundChart> {
        self.bound.get(canvas)
    }

    /// Draw whatever is bound at `canvas` into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, canvas: &str) {
        let title = CHART_SPECS
            .iter()
            .find(|spec| spec.canvas == canvas)
            .map(|spec| spec.title)
            .unwrap_or(canvas);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(Span::styled(
                format!(" {} ", title),
                Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
            ));

        match self.bound.get(canvas) {
            None => render_message(frame, area, block, "Loading...", COLOR_DIM),
            Some(BoundChart::Placeholder(text)) => {
                let color = if text == DATA_UNAVAILABLE { COLOR_DIM } else { COLOR_ERROR };
                render_message(frame, area, block, text, color);
            }
            Some(BoundChart::Prepared(chart)) => match chart.spec.kind {
                ChartKind::Bar => render_bars(frame, area, block, chart),
                ChartKind::Line => render_timeline(frame, area, block, chart),
                ChartKind::Pie | ChartKind::Doughnut => render_segments(frame, area, block, chart),
            },
        }
    }
}

fn render_message(frame: &mut Frame, area: Rect, block: Block, text: &str, color: ratatui::style::Color) {
    let paragraph = Paragraph::new(Line::from(Span::styled(text.to_string(), Style::default().fg(color))))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_bars(frame: &mut Frame, area: Rect, block: Block, chart: &PreparedChart) {
    let options = chart.spec.options;
    let bars: Vec<Bar> = chart
        .series
        .pairs()
        .map(|(label, value)| {
            Bar::default()
                .value(value.round() as u64)
                .text_value(format_count(value))
                .label(Line::from(truncate_label(label, options.max_label_width as usize)))
        })
        .collect();

    let direction = if options.horizontal {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    let widget = BarChart::default()
        .block(block)
        .direction(direction)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(COLOR_BAR))
        .value_style(Style::default().fg(COLOR_ACCENT))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(widget, area);
}

fn render_timeline(frame: &mut Frame, area: Rect, block: Block, chart: &PreparedChart) {
    let series = &chart.series;
    let points: Vec<Vec<(f64, f64)>> = series
        .datasets
        .iter()
        .map(|d| d.values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect())
        .collect();
    let max_y = series
        .datasets
        .iter()
        .flat_map(|d| d.values.iter().copied())
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let max_x = series.labels.len().saturating_sub(1).max(1) as f64;

    let colors = [COLOR_LINE_RECEIVED, COLOR_LINE_DROPPED];
    let datasets: Vec<Dataset> = series
        .datasets
        .iter()
        .zip(&points)
        .zip(colors)
        .map(|((dataset, data), color)| {
            Dataset::default()
                .name(dataset.label.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(data)
        })
        .collect();

    let first = series.labels.first().cloned().unwrap_or_default();
    let last = series.labels.last().cloned().unwrap_or_default();
    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(COLOR_DIM))
                .bounds([0.0, max_x])
                .labels(vec![first, last]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(COLOR_DIM))
                .bounds([0.0, max_y])
                .labels(vec!["0".to_string(), format_count(max_y)]),
        );
    frame.render_widget(widget, area);
}

/// Share of each category, as `(label, value, percent)`.
pub fn proportions(series: &Series) -> Vec<(&str, f64, f64)> {
    let total: f64 = series.pairs().map(|(_, v)| v).sum();
    series
        .pairs()
        .map(|(label, value)| {
            let percent = if total > 0.0 { value * 100.0 / total } else { 0.0 };
            (label, value, percent)
        })
        .collect()
}

/// Pie and doughnut: one proportional bar across the width, then a legend.
fn render_segments(frame: &mut Frame, area: Rect, block: Block, chart: &PreparedChart) {
    let width = area.width.saturating_sub(2) as usize;
    let glyph = if chart.spec.kind == ChartKind::Doughnut { "▓" } else { "█" };
    let shares = proportions(&chart.series);

    let mut bar: Vec<Span> = Vec::new();
    let mut used = 0;
    for (index, (_, _, percent)) in shares.iter().enumerate() {
        let cells = ((percent / 100.0) * width as f64).round() as usize;
        let cells = cells.min(width - used.min(width));
        if cells > 0 {
            bar.push(Span::styled(glyph.repeat(cells), Style::default().fg(segment_color(index))));
            used += cells;
        }
    }
    if used < width {
        bar.push(Span::styled("░".repeat(width - used), Style::default().fg(COLOR_DIM)));
    }

    let mut lines = vec![Line::from(bar), Line::default()];
    if chart.spec.options.show_legend {
        let label_width = chart.spec.options.max_label_width as usize;
        lines.extend(shares.iter().enumerate().map(|(index, (label, value, percent))| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(segment_color(index))),
                Span::raw(format!("{:<w$} ", truncate_label(label, label_width), w = label_width)),
                Span::styled(
                    format!("{:>5.1}% ({})", percent, format_count(*value)),
                    Style::default().fg(COLOR_DIM),
                ),
            ])
        }));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
