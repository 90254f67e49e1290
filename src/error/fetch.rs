//! Telemetry request failures.

use thiserror::Error;

/// What went wrong with a telemetry request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never got an HTTP response (refused, reset, bad URL).
    Transport,
    /// The server answered with a non-2xx status.
    Status,
    /// The body could not be decoded as the JSON we required.
    Decode,
    /// 2xx, but the body reported a failure (`return: "FAILED"`,
    /// `status` other than `success`).
    Rejected,
}

/// A classified telemetry request failure.
///
/// `reason` is always operator-readable: the body's `error` field when the
/// backend sent one, otherwise a generic status-based message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct FetchFailure {
    pub endpoint: String,
    pub status: Option<u16>,
    pub reason: String,
    pub kind: FailureKind,
}

/// Message used when the body carries no usable error field.
pub fn generic_status_message(status: u16) -> String {
    format!("HTTP error, status: {}", status)
}

impl FetchFailure {
    pub fn transport(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: None,
            reason: reason.into(),
            kind: FailureKind::Transport,
        }
    }

    /// Build a failure for a non-2xx response, pulling the reason out of the
    /// body's `error` field when present.
    pub fn from_status(endpoint: impl Into<String>, status: u16, body: &[u8]) -> Self {
        let reason = body_field(body, "error").unwrap_or_else(|| generic_status_message(status));
        Self {
            endpoint: endpoint.into(),
            status: Some(status),
            reason,
            kind: FailureKind::Status,
        }
    }

    pub fn decode(endpoint: impl Into<String>, status: u16, err: &serde_json::Error) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: Some(status),
            reason: format!("invalid JSON response: {}", err),
            kind: FailureKind::Decode,
        }
    }

    pub fn rejected(endpoint: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: Some(status),
            reason: reason.into(),
            kind: FailureKind::Rejected,
        }
    }

    /// Transport failures and 5xx answers are worth retrying by hand.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            FailureKind::Transport => true,
            FailureKind::Status => self.status.is_some_and(|s| s >= 500),
            FailureKind::Decode | FailureKind::Rejected => false,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self.kind {
            FailureKind::Transport => "E_FETCH_TRANSPORT",
            FailureKind::Status => "E_FETCH_STATUS",
            FailureKind::Decode => "E_FETCH_DECODE",
            FailureKind::Rejected => "E_FETCH_REJECTED",
        }
    }

    /// Longer form used in logs: endpoint, status and reason.
    pub fn describe(&self) -> String {
        match self.status {
            Some(status) => format!("{} [{}]: {}", self.endpoint, status, self.reason),
            None => format!("{}: {}", self.endpoint, self.reason),
        }
    }
}

/// Extract a string field from a JSON object body.
pub(crate) fn body_field(body: &[u8], field: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_from_error_field() {
        let failure = FetchFailure::from_status(
            "/api/stats/top_signatures",
            404,
            br#"{"error": "eve.json not found in the logs directory."}"#,
        );
        assert_eq!(failure.status, Some(404));
        assert_eq!(failure.reason, "eve.json not found in the logs directory.");
        assert_eq!(failure.kind, FailureKind::Status);
    }

    #[test]
    fn test_generic_reason_without_error_field() {
        let failure = FetchFailure::from_status("/api/stats/top_dns", 502, b"<html>bad gateway</html>");
        assert_eq!(failure.reason, "HTTP error, status: 502");

        let failure = FetchFailure::from_status("/api/stats/top_dns", 500, br#"{"message": "x"}"#);
        assert_eq!(failure.reason, "HTTP error, status: 500");
    }

    #[test]
    fn test_display_is_reason_only() {
        let failure = FetchFailure::transport("/api/stats/top_dns", "connection refused");
        assert_eq!(failure.to_string(), "connection refused");
        assert_eq!(failure.describe(), "/api/stats/top_dns: connection refused");
    }

    #[test]
    fn test_retryable() {
        assert!(FetchFailure::transport("/x", "refused").is_retryable());
        assert!(FetchFailure::from_status("/x", 500, b"").is_retryable());
        assert!(!FetchFailure::from_status("/x", 400, b"").is_retryable());
        assert!(!FetchFailure::rejected("/x", 200, "FAILED").is_retryable());
    }
}
