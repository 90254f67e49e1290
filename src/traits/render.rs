//! Render surface contract consumed by the chart aggregator.

use crate::charts::{ChartSpec, Series};

/// What to bind at a chart's canvas.
#[derive(Debug, Clone, Copy)]
pub enum ChartContent<'a> {
    Series(&'a Series),
    /// Fetch or transform failed; the text is shown in place of the chart.
    Unavailable(&'a str),
}

/// A destination for prepared charts, keyed by canvas identity.
///
/// `draw` replaces whatever was bound at `spec.canvas` before. It must not
/// panic on bad data: a series that cannot be drawn is bound as a
/// placeholder carrying the error text instead. An empty series is bound as
/// the "data unavailable" placeholder.
pub trait RenderSurface {
    fn draw(&mut self, spec: &ChartSpec, content: ChartContent<'_>);
}
