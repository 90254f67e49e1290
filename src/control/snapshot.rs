//! Non-streaming log view with the eve.json to suricata.log fallback.

use thiserror::Error;
use tracing::{debug, info};

use crate::error::FetchFailure;
use crate::logstream::LogSource;
use crate::telemetry::endpoints::{EVE_JSON_LOG, SURICATA_LOG};
use crate::telemetry::TelemetryClient;

/// Text of one log file, ready to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSnapshot {
    pub source: LogSource,
    pub text: String,
    /// True when the body was one JSON document and was pretty-printed.
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Neither file could be served.
    #[error("HTTP error! status: {eve_status} and {text_status}")]
    BothUnavailable { eve_status: u16, text_status: u16 },

    /// The request itself failed.
    #[error("{0}")]
    Fetch(#[from] FetchFailure),
}

fn empty_notice(source: LogSource) -> String {
    format!("{} is empty or not found.", source.file_name())
}

/// Fetch `eve.json`, falling back to `suricata.log` only when the first
/// answer has a non-success status.
///
/// A successful `eve.json` body is pretty-printed when it parses as one
/// JSON document and shown raw otherwise (an NDJSON log does not parse as a
/// whole). A parse failure never triggers the fallback.
pub async fn fetch_log_snapshot(client: &TelemetryClient) -> Result<LogSnapshot, SnapshotError> {
    let eve = client.get_raw(EVE_JSON_LOG).await?;

    if eve.is_success() {
        let text = eve.text_lossy();
        if text.is_empty() {
            return Ok(LogSnapshot {
                source: LogSource::Eve,
                text: empty_notice(LogSource::Eve),
                pretty: false,
            });
        }
        return Ok(match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => LogSnapshot {
                source: LogSource::Eve,
                text: serde_json::to_string_pretty(&value).unwrap_or(text),
                pretty: true,
            },
            Err(_) => LogSnapshot {
                source: LogSource::Eve,
                text,
                pretty: false,
            },
        });
    }

    debug!("eve.json answered {}, trying suricata.log", eve.status);
    let plain = client.get_raw(SURICATA_LOG).await?;
    if !plain.is_success() {
        return Err(SnapshotError::BothUnavailable {
            eve_status: eve.status,
            text_status: plain.status,
        });
    }

    info!("showing suricata.log snapshot");
    let text = plain.text_lossy();
    Ok(LogSnapshot {
        source: LogSource::SuricataText,
        text: if text.is_empty() {
            empty_notice(LogSource::SuricataText)
        } else {
            text
        },
        pretty: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::traits::{HttpError, Response};
    use bytes::Bytes;
    use std::sync::Arc;

    const BASE: &str = "http://sensor";

    fn respond(mock: &MockHttpClient, path: &str, status: u16, body: &'static str) {
        mock.set_response(
            &format!("{}{}", BASE, path),
            MockResponse::Success(Response::new(status, Bytes::from_static(body.as_bytes()))),
        );
    }

    #[tokio::test]
    async fn test_single_document_is_pretty_printed() {
        let mock = MockHttpClient::new();
        respond(&mock, EVE_JSON_LOG, 200, r#"{"event_type":"stats"}"#);
        let client = TelemetryClient::new(BASE, Arc::new(mock.clone()));

        let snapshot = fetch_log_snapshot(&client).await.unwrap();
        assert!(snapshot.pretty);
        assert_eq!(snapshot.text, "{\n  \"event_type\": \"stats\"\n}");
        assert!(mock.requests_to(SURICATA_LOG).is_empty());
    }

    #[tokio::test]
    async fn test_empty_eve_shows_notice() {
        let mock = MockHttpClient::new();
        respond(&mock, EVE_JSON_LOG, 200, "");
        let client = TelemetryClient::new(BASE, Arc::new(mock));

        let snapshot = fetch_log_snapshot(&client).await.unwrap();
        assert_eq!(snapshot.text, "eve.json is empty or not found.");
    }

    #[tokio::test]
    async fn test_both_missing_names_both_statuses() {
        let mock = MockHttpClient::new();
        respond(&mock, EVE_JSON_LOG, 404, "");
        respond(&mock, SURICATA_LOG, 500, "");
        let client = TelemetryClient::new(BASE, Arc::new(mock));

        let err = fetch_log_snapshot(&client).await.unwrap_err();
        assert_eq!(
            err,
            SnapshotError::BothUnavailable {
                eve_status: 404,
                text_status: 500
            }
        );
        assert_eq!(err.to_string(), "HTTP error! status: 404 and 500");
    }

    #[tokio::test]
    async fn test_transport_failure_does_not_fall_back() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &format!("{}{}", BASE, EVE_JSON_LOG),
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );
        respond(&mock, SURICATA_LOG, 200, "text");
        let client = TelemetryClient::new(BASE, Arc::new(mock.clone()));

        let err = fetch_log_snapshot(&client).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Fetch(_)));
        assert!(mock.requests_to(SURICATA_LOG).is_empty());
    }
}
