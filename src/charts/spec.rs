//! Static chart descriptors.

use std::fmt;

use crate::telemetry::endpoints;

/// Identity of one chart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartId {
    TopSignatures,
    TopDns,
    TopTlsSni,
    DecoderProtocols,
    AppLayerFlows,
    CaptureHistory,
}

impl ChartId {
    /// All charts in layout order.
    pub const ALL: [ChartId; 6] = [
        ChartId::TopSignatures,
        ChartId::DecoderProtocols,
        ChartId::TopDns,
        ChartId::AppLayerFlows,
        ChartId::TopTlsSni,
        ChartId::CaptureHistory,
    ];

    pub fn spec(self) -> &'static ChartSpec {
        // CHART_SPECS is laid out in discriminant order
        &CHART_SPECS[self as usize]
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().canvas)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
    Doughnut,
    Line,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Line => "line",
        }
    }
}

/// How a fetched body becomes a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesBuilder {
    /// `{labels, values}` ranked by the server
    TopN,
    /// `decoder.*` counters plus the residual bucket
    DecoderBreakdown,
    /// `app_layer.flow.*` counters
    AppLayerBreakdown,
    /// `{timestamps, packets, drops}`
    CaptureHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Bars run left to right with labels on the side.
    pub horizontal: bool,
    pub show_legend: bool,
    /// Labels longer than this are truncated with an ellipsis.
    pub max_label_width: u16,
}

impl RenderOptions {
    const RANKED: RenderOptions = RenderOptions {
        horizontal: true,
        show_legend: false,
        max_label_width: 28,
    };

    const BREAKDOWN: RenderOptions = RenderOptions {
        horizontal: false,
        show_legend: true,
        max_label_width: 12,
    };

    const TIMELINE: RenderOptions = RenderOptions {
        horizontal: false,
        show_legend: true,
        max_label_width: 8,
    };
}

/// Static descriptor of one chart view. Fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub id: ChartId,
    /// Canvas identity the render surface binds the chart to.
    pub canvas: &'static str,
    pub kind: ChartKind,
    pub endpoint: &'static str,
    pub builder: SeriesBuilder,
    pub options: RenderOptions,
    pub title: &'static str,
}

pub static CHART_SPECS: [ChartSpec; 6] = [
    ChartSpec {
        id: ChartId::TopSignatures,
        canvas: "topAlertsChart",
        kind: ChartKind::Bar,
        endpoint: endpoints::TOP_SIGNATURES,
        builder: SeriesBuilder::TopN,
        options: RenderOptions::RANKED,
        title: "Top alert signatures",
    },
    ChartSpec {
        id: ChartId::TopDns,
        canvas: "topDnsChart",
        kind: ChartKind::Bar,
        endpoint: endpoints::TOP_DNS,
        builder: SeriesBuilder::TopN,
        options: RenderOptions::RANKED,
        title: "Top DNS queries",
    },
    ChartSpec {
        id: ChartId::TopTlsSni,
        canvas: "topTlsSniChart",
        kind: ChartKind::Bar,
        endpoint: endpoints::TOP_TLS_SNI,
        builder: SeriesBuilder::TopN,
        options: RenderOptions::RANKED,
        title: "Top TLS SNI",
    },
    ChartSpec {
        id: ChartId::DecoderProtocols,
        canvas: "protocolChart",
        kind: ChartKind::Pie,
        endpoint: endpoints::LATEST_COUNTERS,
        builder: SeriesBuilder::DecoderBreakdown,
        options: RenderOptions::BREAKDOWN,
        title: "Decoded protocols",
    },
    ChartSpec {
        id: ChartId::AppLayerFlows,
        canvas: "appLayerChart",
        kind: ChartKind::Doughnut,
        endpoint: endpoints::LATEST_COUNTERS,
        builder: SeriesBuilder::AppLayerBreakdown,
        options: RenderOptions::BREAKDOWN,
        title: "Application-layer flows",
    },
    ChartSpec {
        id: ChartId::CaptureHistory,
        canvas: "captureHistoryChart",
        kind: ChartKind::Line,
        endpoint: endpoints::CAPTURE_HISTORY,
        builder: SeriesBuilder::CaptureHistory,
        options: RenderOptions::TIMELINE,
        title: "Capture: received vs dropped",
    },
];
