//! Sensor commands relayed through the backend.

use std::fmt;

use tracing::info;

use crate::error::FetchFailure;
use crate::telemetry::TelemetryClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorCommand {
    ReloadRules,
    Shutdown,
    Uptime,
    IfaceList,
}

impl SensorCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SensorCommand::ReloadRules => "ruleset-reload-rules",
            SensorCommand::Shutdown => "shutdown",
            SensorCommand::Uptime => "uptime",
            SensorCommand::IfaceList => "iface-list",
        }
    }

    /// Commands that need a y/n confirmation first.
    pub fn is_destructive(&self) -> bool {
        matches!(self, SensorCommand::Shutdown)
    }
}

impl fmt::Display for SensorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run `command` and return the status line text.
pub async fn run_command(
    client: &TelemetryClient,
    command: SensorCommand,
) -> Result<String, FetchFailure> {
    info!("sending command {}", command);
    let reply = client.send_command(command.name(), None).await?;
    Ok(reply.summary())
}

/// Status line for a finished command.
pub fn command_status(command: &str, result: &Result<String, FetchFailure>) -> String {
    match result {
        Ok(message) => format!("Command {} succeeded: {}", command, message),
        Err(failure) => format!("Command {} failed: {}", command, failure.reason),
    }
}
