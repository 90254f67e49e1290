//! Renderer-ready series and the per-chart builders.

use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

use crate::charts::spec::SeriesBuilder;
use crate::telemetry::{CaptureHistory, LatestCounters, TopN};

/// One named value sequence, aligned with [`Series::labels`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDataset {
    pub label: String,
    pub values: Vec<f64>,
}

/// Labeled numeric data bound to one chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub labels: Vec<String>,
    pub datasets: Vec<SeriesDataset>,
}

impl Series {
    pub fn single(label: impl Into<String>, labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            labels,
            datasets: vec![SeriesDataset {
                label: label.into(),
                values,
            }],
        }
    }

    /// True when there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.datasets.iter().all(|d| d.values.is_empty())
    }

    /// `(label, value)` pairs of the first dataset.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        let values = self.datasets.first().map(|d| d.values.as_slice()).unwrap_or(&[]);
        self.labels.iter().map(String::as_str).zip(values.iter().copied())
    }
}

/// A body that could not be turned into a series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("unexpected payload shape: {0}")]
    Shape(String),

    #[error("{labels} labels but {values} values")]
    LengthMismatch { labels: usize, values: usize },
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        BuildError::Shape(err.to_string())
    }
}

/// Run `builder` against a fetched JSON body.
pub fn build_series(builder: SeriesBuilder, body: &serde_json::Value) -> Result<Series, BuildError> {
    match builder {
        SeriesBuilder::TopN => top_n(serde_json::from_value(body.clone())?),
        SeriesBuilder::DecoderBreakdown => Ok(decoder_breakdown(&serde_json::from_value(body.clone())?)),
        SeriesBuilder::AppLayerBreakdown => {
            Ok(app_layer_breakdown(&serde_json::from_value(body.clone())?))
        }
        SeriesBuilder::CaptureHistory => capture_history(serde_json::from_value(body.clone())?),
    }
}

/// Ranked pairs kept in server order.
pub fn top_n(body: TopN) -> Result<Series, BuildError> {
    if body.labels.len() != body.values.len() {
        return Err(BuildError::LengthMismatch {
            labels: body.labels.len(),
            values: body.values.len(),
        });
    }
    Ok(Series::single("count", body.labels, body.values))
}

/// Label of the residual bucket: packets not counted by any named decoder.
pub const OTHER_BUCKET: &str = "Autre";

/// Decoder breakdown with the residual bucket. Zero categories are dropped.
pub fn decoder_breakdown(counters: &LatestCounters) -> Series {
    let d = &counters.decoder;
    let named = [
        ("TCP", d.tcp),
        ("UDP", d.udp),
        ("ICMPv4", d.icmpv4),
        ("ICMPv6", d.icmpv6),
        ("IPv4", d.ipv4),
        ("IPv6", d.ipv6),
    ];
    let named_total: u64 = named.iter().map(|(_, count)| *count).sum();
    let other = d.pkts.saturating_sub(named_total);

    let (labels, values) = named
        .into_iter()
        .chain(std::iter::once((OTHER_BUCKET, other)))
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| (label.to_string(), count as f64))
        .unzip();
    Series::single("packets", labels, values)
}

/// Flows per application protocol, largest first. Zero and non-numeric
/// entries are dropped.
pub fn app_layer_breakdown(counters: &LatestCounters) -> Series {
    let mut flows: Vec<(String, f64)> = counters
        .app_layer
        .flow
        .iter()
        .filter_map(|(proto, count)| count.as_f64().map(|c| (proto.clone(), c)))
        .filter(|(_, count)| *count > 0.0)
        .collect();
    flows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let (labels, values) = flows.into_iter().unzip();
    Series::single("flows", labels, values)
}

/// Received vs dropped packets over shared timestamps.
pub fn capture_history(body: CaptureHistory) -> Result<Series, BuildError> {
    let n = body.timestamps.len();
    for values in [&body.packets, &body.drops] {
        if values.len() != n {
            return Err(BuildError::LengthMismatch {
                labels: n,
                values: values.len(),
            });
        }
    }

    Ok(Series {
        labels: body.timestamps.iter().map(|t| short_time(t)).collect(),
        datasets: vec![
            SeriesDataset {
                label: "received".to_string(),
                values: body.packets,
            },
            SeriesDataset {
                label: "dropped".to_string(),
                values: body.drops,
            },
        ],
    })
}

/// `HH:MM:SS` for ISO-8601 timestamps, the input unchanged otherwise.
fn short_time(timestamp: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format("%H:%M:%S").to_string();
    }
    // Suricata writes offsets without a colon: 2024-05-01T12:00:00.123456+0000
    if let Ok(dt) = DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return dt.format("%H:%M:%S").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%H:%M:%S").to_string();
    }
    timestamp.to_string()
}
