//! Unified error type for surimon.

use thiserror::Error;

use super::category::ErrorCategory;
use super::control::ConfigSaveError;
use super::fetch::{FailureKind, FetchFailure};
use super::render::ChartRenderError;
use super::stream::StreamError;

/// Unified error type.
#[derive(Debug, Error)]
pub enum DashError {
    #[error(transparent)]
    Fetch(#[from] FetchFailure),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    ConfigSave(#[from] ConfigSaveError),

    #[error(transparent)]
    Render(#[from] ChartRenderError),

    /// Invalid settings (environment or command line).
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type DashResult<T> = Result<T, DashError>;

impl DashError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::Fetch(failure) => match failure.kind {
                FailureKind::Transport => ErrorCategory::Network,
                FailureKind::Status | FailureKind::Rejected => ErrorCategory::Server,
                FailureKind::Decode => ErrorCategory::Data,
            },
            DashError::Stream(StreamError::Transport { .. }) => ErrorCategory::Network,
            DashError::Stream(StreamError::Decode { .. }) => ErrorCategory::Data,
            DashError::ConfigSave(_) => ErrorCategory::Server,
            DashError::Render(_) => ErrorCategory::Rendering,
            DashError::Config(_) => ErrorCategory::Configuration,
            DashError::Io(_) => ErrorCategory::System,
        }
    }

    /// Whether repeating the same operator action may succeed. A dropped
    /// stream is retried by selecting the source again.
    pub fn is_retryable(&self) -> bool {
        match self {
            DashError::Fetch(failure) => failure.is_retryable(),
            DashError::Stream(StreamError::Transport { .. }) => true,
            _ => false,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DashError::Fetch(failure) => failure.error_code(),
            DashError::Stream(err) => err.error_code(),
            DashError::ConfigSave(_) => "E_CONFIG_SAVE",
            DashError::Render(_) => "E_CHART_RENDER",
            DashError::Config(_) => "E_CONFIG",
            DashError::Io(_) => "E_IO",
        }
    }

    /// Text shown on the status line.
    pub fn user_message(&self) -> String {
        match self {
            DashError::Fetch(failure) => failure.describe(),
            DashError::Stream(err) => err.user_message(),
            DashError::ConfigSave(err) => err.to_string(),
            DashError::Render(err) => format!("Chart could not be drawn: {}", err),
            DashError::Config(message) => format!("{}. {}", message, self.category().recovery_hint()),
            DashError::Io(err) => format!("{}. {}", err, self.category().recovery_hint()),
        }
    }
}
