//! AppMessage enum for async communication within the application.

use serde_json::Value;

use crate::charts::FetchRequest;
use crate::control::{ChainOutcome, EditTarget, LogSnapshot, SensorCommand, SnapshotError};
use crate::error::{ConfigSaveError, FetchFailure};
use crate::logstream::StreamEvent;
use crate::telemetry::RuleUpdateReply;

/// Messages sent by background tasks to the main loop.
///
/// Every variant carries everything the handler needs; tasks never touch
/// `App` directly.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Live log transport event, tagged with the subscription generation
    Stream { generation: u64, event: StreamEvent },
    /// One statistics fetch finished
    ChartFetched {
        request: FetchRequest,
        result: Result<Value, FetchFailure>,
    },
    /// A sensor command returned
    CommandFinished {
        command: SensorCommand,
        result: Result<String, FetchFailure>,
    },
    /// Standalone rule update returned
    RuleUpdateFinished(Result<RuleUpdateReply, FetchFailure>),
    /// Config fetched and ready for the editor
    EditReady(Result<EditTarget, FetchFailure>),
    /// Save / update / reload chain finished
    RuleChainFinished(Result<ChainOutcome, ConfigSaveError>),
    MainConfigSaved(Result<(), ConfigSaveError>),
    SnapshotLoaded(Result<LogSnapshot, SnapshotError>),
}
