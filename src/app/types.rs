//! Small view-state types owned by [`App`](super::App).

use tracing::warn;

use crate::control::LogSnapshot;
use crate::error::DashError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Success,
    Error,
}

/// The one-line status shown above the key help.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }

    /// Error status for `err`, logged with its code.
    pub fn from_error(err: &DashError) -> Self {
        warn!(
            code = err.error_code(),
            retryable = err.is_retryable(),
            category = ?err.category(),
            "{}",
            err
        );
        Self::error(err.user_message())
    }
}

/// Log snapshot overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SnapshotView {
    #[default]
    Hidden,
    Loading,
    Shown { snapshot: LogSnapshot, scroll: u16 },
    Failed(String),
}

impl SnapshotView {
    pub fn is_visible(&self) -> bool {
        !matches!(self, SnapshotView::Hidden)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        if let SnapshotView::Shown { snapshot, scroll } = self {
            let max = snapshot.text.lines().count().saturating_sub(1) as i32;
            *scroll = (*scroll as i32 + delta).clamp(0, max.min(u16::MAX as i32)) as u16;
        }
    }
}
