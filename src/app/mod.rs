//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`AppMessage`] - Results sent back by background tasks
//! - [`StatusLine`] - The operator-facing status text
//! - [`SnapshotView`] - The log snapshot overlay

mod actions;
mod handlers;
mod messages;
mod types;

pub use messages::AppMessage;
pub use types::{SnapshotView, StatusLevel, StatusLine};

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::charts::ChartAggregator;
use crate::config::DashConfig;
use crate::control::{EditTarget, SensorCommand};
use crate::logstream::{LogStreamController, SseConnector};
use crate::telemetry::TelemetryClient;
use crate::traits::HttpClient;
use crate::ui::ChartBoard;

/// Whole dashboard state. Mutated only on the main loop.
pub struct App {
    pub config: DashConfig,
    pub client: TelemetryClient,
    pub log_stream: LogStreamController,
    pub charts: ChartAggregator,
    pub chart_board: ChartBoard,
    pub status: StatusLine,
    pub snapshot: SnapshotView,
    /// Destructive command waiting for y/n
    pub confirm: Option<SensorCommand>,
    /// Config fetched for editing; the main loop suspends the terminal for it
    pending_edit: Option<EditTarget>,
    /// Sender handed to background tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the main loop for `select!`
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    pub needs_redraw: bool,
    pub should_quit: bool,
    pub tick_count: u64,
}

impl App {
    pub fn new(config: DashConfig, http: Arc<dyn HttpClient>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let client = TelemetryClient::new(config.base_url.clone(), http);
        let connector = SseConnector::new(client.clone(), message_tx.clone());

        Self {
            log_stream: LogStreamController::new(config.buffer_capacity, Box::new(connector)),
            charts: ChartAggregator::new(),
            chart_board: ChartBoard::new(),
            status: StatusLine::info(format!("Backend {}", client.base_url())),
            snapshot: SnapshotView::Hidden,
            confirm: None,
            pending_edit: None,
            message_tx,
            message_rx: Some(message_rx),
            needs_redraw: true,
            should_quit: false,
            tick_count: 0,
            config,
            client,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    fn set_status(&mut self, status: StatusLine) {
        self.status = status;
        self.mark_dirty();
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("client", &self.client)
            .field("log_stream", &self.log_stream)
            .field("status", &self.status)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}
