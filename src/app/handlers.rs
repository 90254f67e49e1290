//! Message handling for the App.

use chrono::Local;
use tracing::{info, warn};

use crate::control::command_status;
use crate::error::DashError;
use crate::logstream::StreamEvent;

use super::{App, AppMessage, SnapshotView, StatusLine};

impl App {
    /// Handle an incoming async message.
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::Stream { generation, event } => {
                let opened = event == StreamEvent::Opened;
                let failed = matches!(event, StreamEvent::Failed(_));
                if !self.log_stream.handle_event(generation, event) {
                    return;
                }
                if opened {
                    self.status = StatusLine::success(format!("Live log: {}", self.log_stream.state()));
                } else if failed {
                    if let Some(err) = self.log_stream.last_error() {
                        self.status = StatusLine::from_error(&DashError::from(err.clone()));
                    }
                }
            }

            AppMessage::ChartFetched { request, result } => {
                let drawn = self.charts.apply(&request, &result, &mut self.chart_board);
                if !drawn.is_empty() && self.charts.in_flight() == 0 {
                    self.status = StatusLine::info(format!(
                        "Charts updated at {}",
                        Local::now().format("%H:%M:%S")
                    ));
                }
            }

            AppMessage::CommandFinished { command, result } => {
                let text = command_status(command.name(), &result);
                self.status = match &result {
                    Ok(_) => {
                        info!("{}", text);
                        StatusLine::success(text)
                    }
                    Err(failure) => {
                        warn!("command {} failed: {}", command, failure.describe());
                        StatusLine::error(text)
                    }
                };
            }

            AppMessage::RuleUpdateFinished(result) => {
                self.status = match result {
                    Ok(reply) => {
                        let detail = reply
                            .output_summary
                            .or(reply.message)
                            .unwrap_or_else(|| "done".to_string());
                        StatusLine::success(format!("Rule update succeeded: {}", detail))
                    }
                    Err(failure) => {
                        warn!("rule update failed: {}", failure.describe());
                        StatusLine::error(format!("Rule update failed: {}", failure.reason))
                    }
                };
            }

            AppMessage::EditReady(result) => match result {
                Ok(target) => {
                    self.status = StatusLine::info(format!("Editing {}...", target.describe()));
                    self.pending_edit = Some(target);
                }
                Err(failure) => {
                    warn!("could not load config for editing: {}", failure.describe());
                    self.status = StatusLine::error(format!(
                        "Could not load configuration: {}",
                        failure.reason
                    ));
                }
            },

            AppMessage::RuleChainFinished(result) => {
                self.status = match result {
                    Ok(outcome) => StatusLine::success(outcome.status_line()),
                    Err(err) => StatusLine::from_error(&DashError::from(err)),
                };
            }

            AppMessage::MainConfigSaved(result) => {
                self.status = match result {
                    Ok(()) => StatusLine::success("suricata.yaml saved"),
                    Err(err) => StatusLine::from_error(&DashError::from(err)),
                };
            }

            AppMessage::SnapshotLoaded(result) => {
                // Closed while loading
                if self.snapshot != SnapshotView::Loading {
                    return;
                }
                self.snapshot = match result {
                    Ok(snapshot) => {
                        self.status = StatusLine::info(format!(
                            "Showing {} snapshot",
                            snapshot.source.file_name()
                        ));
                        SnapshotView::Shown { snapshot, scroll: 0 }
                    }
                    Err(err) => {
                        warn!("log snapshot failed: {}", err);
                        self.status = StatusLine::error(format!("Error loading logs: {}", err));
                        SnapshotView::Failed(err.to_string())
                    }
                };
            }
        }
    }
}
