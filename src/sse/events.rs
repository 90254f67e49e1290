//! SSE line and message types.

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: log")
    Event(String),
    /// Data payload (e.g., "data: {\"event_type\": \"alert\"}")
    Data(String),
    /// `id:` line
    Id(String),
    /// Empty line - signals end of event
    Empty,
    /// Comment line (starts with ':')
    Comment(String),
}

/// One complete event as delivered by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseMessage {
    /// Value of the `event:` field, if the server sent one
    pub event: Option<String>,
    /// All `data:` lines of the event joined with `\n`
    pub data: String,
    pub id: Option<String>,
}
