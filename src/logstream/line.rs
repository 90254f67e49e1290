//! Display lines and classification of stream messages.

use crate::error::StreamError;

/// How a line came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A message that decoded as JSON, shown re-serialized
    ParsedEvent,
    /// A decoded message carrying a `raw_line` field
    RawFallback,
    /// A message that did not decode, or a transport notice
    StreamError,
    /// Placeholder and marker lines written by the controller itself
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveLine {
    pub kind: LineKind,
    pub text: String,
}

impl LiveLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn status(text: impl Into<String>) -> Self {
        Self::new(LineKind::Status, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LineKind::StreamError, text)
    }

    /// Classify one inbound payload.
    ///
    /// A decode failure yields a `StreamError` line and the matching
    /// [`StreamError::Decode`]; it never fails the caller.
    pub fn classify(payload: &str) -> (LiveLine, Option<StreamError>) {
        match serde_json::from_str::<serde_json::Value>(payload) {
            Ok(value) => {
                let raw = value.get("raw_line").and_then(|v| v.as_str());
                let line = match raw {
                    Some(raw) => LiveLine::new(LineKind::RawFallback, format!("[RAW] {}", raw)),
                    None => LiveLine::new(LineKind::ParsedEvent, value.to_string()),
                };
                (line, None)
            }
            Err(e) => {
                let reason = e.to_string();
                let line = LiveLine::error(format!("[PARSE ERROR] {} | {}", reason, payload));
                let err = StreamError::Decode {
                    reason,
                    payload: payload.to_string(),
                };
                (line, Some(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_parsed_event() {
        let (line, err) = LiveLine::classify(r#"{"event_type": "alert", "src_port": 53}"#);
        assert_eq!(line.kind, LineKind::ParsedEvent);
        assert_eq!(line.text, r#"{"event_type":"alert","src_port":53}"#);
        assert!(err.is_none());
    }

    #[test]
    fn test_classify_raw_line() {
        let (line, _) = LiveLine::classify(r#"{"raw_line": "12/5/2024 -- <Notice> - all 4 packet processing threads"}"#);
        assert_eq!(line.kind, LineKind::RawFallback);
        assert_eq!(line.text, "[RAW] 12/5/2024 -- <Notice> - all 4 packet processing threads");
    }

    #[test]
    fn test_non_string_raw_line_is_parsed_event() {
        let (line, _) = LiveLine::classify(r#"{"raw_line": 7}"#);
        assert_eq!(line.kind, LineKind::ParsedEvent);
    }

    #[test]
    fn test_classify_decode_failure() {
        let (line, err) = LiveLine::classify("{not json");
        assert_eq!(line.kind, LineKind::StreamError);
        assert!(line.text.starts_with("[PARSE ERROR] "));
        assert!(line.text.ends_with(" | {not json"));
        assert!(matches!(err, Some(StreamError::Decode { .. })));
    }
}
