//! Live log stream errors.

use thiserror::Error;

/// Failures of the live log subscription.
///
/// `Transport` ends the subscription; `Decode` only affects the message it
/// was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The connection dropped, could not be opened, or was closed by the server.
    #[error("stream {log} interrupted: {message}")]
    Transport { log: String, message: String },

    /// A single message was not valid JSON.
    #[error("could not decode stream message: {reason}")]
    Decode { reason: String, payload: String },
}

impl StreamError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Transport { .. } => "E_STREAM_TRANSPORT",
            StreamError::Decode { .. } => "E_STREAM_DECODE",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            StreamError::Transport { log, message } => format!(
                "Live log {} disconnected ({}). Select a source to reconnect.",
                log, message
            ),
            StreamError::Decode { reason, .. } => {
                format!("A log message could not be decoded: {}", reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_messages() {
        let transport = StreamError::Transport {
            log: "eve".to_string(),
            message: "connection reset".to_string(),
        };
        let decode = StreamError::Decode {
            reason: "expected value at line 1 column 1".to_string(),
            payload: "not json".to_string(),
        };
        assert_eq!(transport.error_code(), "E_STREAM_TRANSPORT");
        assert_eq!(decode.error_code(), "E_STREAM_DECODE");
        assert_eq!(transport.to_string(), "stream eve interrupted: connection reset");
        assert!(transport.user_message().contains("Select a source"));
    }
}
