//! Chart aggregator: fan-out of statistics fetches with per-chart isolation.

use std::collections::BTreeMap;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::app::AppMessage;
use crate::charts::series::{build_series, Series};
use crate::charts::spec::{ChartId, CHART_SPECS};
use crate::error::FetchFailure;
use crate::telemetry::TelemetryClient;
use crate::traits::{ChartContent, RenderSurface};

/// Latest known state of one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    /// Never fetched, or a fetch is outstanding with nothing drawn yet.
    Pending,
    Ready(Series),
    /// Fetch or transform failed with this reason.
    Unavailable(String),
}

/// One fetch serving one or more charts that share an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub endpoint: &'static str,
    pub tag: u64,
    pub charts: Vec<ChartId>,
}

/// Owns chart state and the request tags that keep late results out.
///
/// Each chart remembers the tag of the newest request issued for it. A
/// result is applied to a chart only while its request's tag is still that
/// chart's newest, so a superseded refresh can never overwrite a newer one.
#[derive(Debug)]
pub struct ChartAggregator {
    states: BTreeMap<ChartId, ChartState>,
    latest_tags: BTreeMap<ChartId, u64>,
    next_tag: u64,
}

impl Default for ChartAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartAggregator {
    pub fn new() -> Self {
        Self {
            states: ChartId::ALL.iter().map(|id| (*id, ChartState::Pending)).collect(),
            latest_tags: BTreeMap::new(),
            next_tag: 1,
        }
    }

    pub fn state(&self, id: ChartId) -> &ChartState {
        self.states.get(&id).unwrap_or(&ChartState::Pending)
    }

    /// Number of charts waiting on an outstanding request.
    pub fn in_flight(&self) -> usize {
        self.latest_tags.len()
    }

    fn take_tag(&mut self) -> u64 {
        let tag = self.next_tag;
        self.next_tag += 1;
        tag
    }

    /// One request per distinct endpoint, all sharing a fresh tag.
    pub fn begin_refresh_all(&mut self) -> Vec<FetchRequest> {
        let tag = self.take_tag();
        let mut requests: Vec<FetchRequest> = Vec::new();

        for spec in CHART_SPECS.iter() {
            self.latest_tags.insert(spec.id, tag);
            match requests.iter_mut().find(|r| r.endpoint == spec.endpoint) {
                Some(request) => request.charts.push(spec.id),
                None => requests.push(FetchRequest {
                    endpoint: spec.endpoint,
                    tag,
                    charts: vec![spec.id],
                }),
            }
        }

        debug!("refresh all charts: tag {} over {} endpoints", tag, requests.len());
        requests
    }

    /// A request for one chart only. Siblings sharing its endpoint are left
    /// alone.
    pub fn begin_refresh_one(&mut self, id: ChartId) -> FetchRequest {
        let tag = self.take_tag();
        self.latest_tags.insert(id, tag);
        FetchRequest {
            endpoint: id.spec().endpoint,
            tag,
            charts: vec![id],
        }
    }

    /// Fire-and-forget fan-out; results come back as
    /// [`AppMessage::ChartFetched`].
    pub fn refresh_all(&mut self, client: &TelemetryClient, tx: &UnboundedSender<AppMessage>) {
        for request in self.begin_refresh_all() {
            spawn_fetch(request, client.clone(), tx.clone());
        }
    }

    pub fn refresh_one(&mut self, id: ChartId, client: &TelemetryClient, tx: &UnboundedSender<AppMessage>) {
        let request = self.begin_refresh_one(id);
        spawn_fetch(request, client.clone(), tx.clone());
    }

    /// Route a fetch result to every chart of `request` whose newest tag is
    /// still the request's. Returns the charts that were drawn.
    pub fn apply(
        &mut self,
        request: &FetchRequest,
        result: &Result<serde_json::Value, FetchFailure>,
        surface: &mut dyn RenderSurface,
    ) -> Vec<ChartId> {
        let mut applied = Vec::new();

        for id in &request.charts {
            if self.latest_tags.get(id) != Some(&request.tag) {
                debug!("discarding stale result for {} (tag {})", id, request.tag);
                continue;
            }
            self.latest_tags.remove(id);

            let spec = id.spec();
            let state = match result {
                Ok(body) => match build_series(spec.builder, body) {
                    Ok(series) => ChartState::Ready(series),
                    Err(e) => {
                        warn!("{}: could not build series: {}", spec.canvas, e);
                        ChartState::Unavailable(e.to_string())
                    }
                },
                Err(failure) => {
                    warn!("{}: fetch failed: {}", spec.canvas, failure.describe());
                    ChartState::Unavailable(failure.reason.clone())
                }
            };

            match &state {
                ChartState::Ready(series) => surface.draw(spec, ChartContent::Series(series)),
                ChartState::Unavailable(reason) => surface.draw(spec, ChartContent::Unavailable(reason)),
                ChartState::Pending => {}
            }
            self.states.insert(*id, state);
            applied.push(*id);
        }

        applied
    }
}

fn spawn_fetch(request: FetchRequest, client: TelemetryClient, tx: UnboundedSender<AppMessage>) {
    tokio::spawn(async move {
        let result = client.fetch_json(request.endpoint).await;
        // Receiver gone means the app is shutting down
        let _ = tx.send(AppMessage::ChartFetched { request, result });
    });
}
