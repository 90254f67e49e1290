//! Operator actions and key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::control::{
    fetch_log_snapshot, run_command, save_main_config, save_rules_and_apply, EditTarget,
    RuleLists, SensorCommand,
};
use crate::error::DashError;
use crate::logstream::LogSource;
use crate::telemetry::endpoints::MAIN_CONFIG;

use super::{App, AppMessage, SnapshotView, StatusLine};

/// Lines moved by PgUp/PgDn in the snapshot overlay.
const SNAPSHOT_PAGE: i32 = 10;

impl App {
    /// First actions after the terminal is up: load every chart, and start
    /// the configured source if any.
    pub fn start(&mut self) {
        self.refresh_charts();
        if let Some(source) = self.config.initial_source {
            self.select_source(source);
        }
    }

    pub fn refresh_charts(&mut self) {
        info!("refreshing charts");
        self.charts.refresh_all(&self.client, &self.message_tx);
        self.set_status(StatusLine::info("Refreshing charts..."));
    }

    pub fn select_source(&mut self, source: LogSource) {
        if self.log_stream.select_source(source) {
            self.set_status(StatusLine::info(format!("Connecting to {}...", source)));
        }
    }

    pub fn stop_stream(&mut self) {
        self.log_stream.teardown();
        self.set_status(StatusLine::info("Live log stopped"));
    }

    /// Send `command`, asking first when it is destructive.
    pub fn request_command(&mut self, command: SensorCommand) {
        if command.is_destructive() {
            self.confirm = Some(command);
            self.set_status(StatusLine::error(format!("Send {} to the sensor? (y/n)", command)));
            return;
        }
        self.send_command(command);
    }

    fn send_command(&mut self, command: SensorCommand) {
        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = run_command(&client, command).await;
            let _ = tx.send(AppMessage::CommandFinished { command, result });
        });
        self.set_status(StatusLine::info(format!("Sending {}...", command)));
    }

    pub fn run_rule_update(&mut self) {
        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = client.run_rule_update().await;
            let _ = tx.send(AppMessage::RuleUpdateFinished(result));
        });
        self.set_status(StatusLine::info("Running suricata-update..."));
    }

    pub fn begin_edit_rules(&mut self) {
        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = RuleLists::fetch(&client).await.map(EditTarget::RuleLists);
            let _ = tx.send(AppMessage::EditReady(result));
        });
        self.set_status(StatusLine::info("Loading rule lists..."));
    }

    pub fn begin_edit_main_config(&mut self) {
        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = client.get_config(MAIN_CONFIG).await.map(EditTarget::MainConfig);
            let _ = tx.send(AppMessage::EditReady(result));
        });
        self.set_status(StatusLine::info(format!("Loading {}...", MAIN_CONFIG)));
    }

    /// Config waiting to be opened in the editor.
    pub fn take_pending_edit(&mut self) -> Option<EditTarget> {
        self.pending_edit.take()
    }

    /// Save what came back from the editor.
    pub fn finish_edit(&mut self, original: &EditTarget, edited: std::io::Result<Option<EditTarget>>) {
        self.mark_dirty();
        let client = self.client.clone();
        let tx = self.message_tx.clone();

        match edited {
            Ok(None) => {
                self.status = StatusLine::info(format!("{}: no changes", original.describe()));
            }
            Ok(Some(EditTarget::RuleLists(lists))) => {
                tokio::spawn(async move {
                    let result = save_rules_and_apply(&client, &lists).await;
                    let _ = tx.send(AppMessage::RuleChainFinished(result));
                });
                self.status = StatusLine::info("Saving rule lists, then update and reload...");
            }
            Ok(Some(EditTarget::MainConfig(content))) => {
                tokio::spawn(async move {
                    let result = save_main_config(&client, &content).await;
                    let _ = tx.send(AppMessage::MainConfigSaved(result));
                });
                self.status = StatusLine::info(format!("Saving {}...", MAIN_CONFIG));
            }
            Err(e) => {
                let mut status = StatusLine::from_error(&DashError::from(e));
                status.text = format!("Editor failed: {}", status.text);
                self.status = status;
            }
        }
    }

    pub fn toggle_snapshot(&mut self) {
        if self.snapshot.is_visible() {
            self.snapshot = SnapshotView::Hidden;
            self.mark_dirty();
            return;
        }

        self.snapshot = SnapshotView::Loading;
        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = fetch_log_snapshot(&client).await;
            let _ = tx.send(AppMessage::SnapshotLoaded(result));
        });
        self.set_status(StatusLine::info("Loading log snapshot..."));
    }

    pub fn quit(&mut self) {
        self.log_stream.teardown();
        self.should_quit = true;
    }

    /// Dispatch one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        if let Some(command) = self.confirm.take() {
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                self.send_command(command);
            } else {
                self.status = StatusLine::info(format!("{} cancelled", command));
            }
            return;
        }

        if self.snapshot.is_visible() && self.handle_snapshot_key(key.code) {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('1') => self.select_source(LogSource::Eve),
            KeyCode::Char('2') => self.select_source(LogSource::SuricataText),
            KeyCode::Char('x') => self.stop_stream(),
            KeyCode::Char('g') => self.refresh_charts(),
            KeyCode::Char('r') => self.request_command(SensorCommand::ReloadRules),
            KeyCode::Char('u') => self.request_command(SensorCommand::Uptime),
            KeyCode::Char('i') => self.request_command(SensorCommand::IfaceList),
            KeyCode::Char('S') => self.request_command(SensorCommand::Shutdown),
            KeyCode::Char('U') => self.run_rule_update(),
            KeyCode::Char('e') => self.begin_edit_rules(),
            KeyCode::Char('c') => self.begin_edit_main_config(),
            KeyCode::Char('l') => self.toggle_snapshot(),
            KeyCode::Up => self.log_stream.viewport_mut().scroll_up(1),
            KeyCode::Down => {
                let (len, viewport) = self.log_stream.scroll();
                viewport.scroll_down(1, len);
            }
            KeyCode::PageUp => self.log_stream.viewport_mut().page_up(),
            KeyCode::PageDown => {
                let (len, viewport) = self.log_stream.scroll();
                viewport.page_down(len);
            }
            KeyCode::Home => self.log_stream.viewport_mut().scroll_to_top(),
            KeyCode::End => {
                let (len, viewport) = self.log_stream.scroll();
                viewport.scroll_to_bottom(len);
            }
            _ => {}
        }
    }

    /// Keys that act on the open snapshot overlay. Returns false for keys
    /// that fall through to the normal bindings.
    fn handle_snapshot_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => self.snapshot = SnapshotView::Hidden,
            KeyCode::Up => self.snapshot.scroll_by(-1),
            KeyCode::Down => self.snapshot.scroll_by(1),
            KeyCode::PageUp => self.snapshot.scroll_by(-SNAPSHOT_PAGE),
            KeyCode::PageDown => self.snapshot.scroll_by(SNAPSHOT_PAGE),
            KeyCode::Home => self.snapshot.scroll_by(i32::MIN / 2),
            KeyCode::End => self.snapshot.scroll_by(i32::MAX / 2),
            _ => return false,
        }
        true
    }
}
