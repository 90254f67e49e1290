//! SSE line parsing and event accumulation.

use crate::sse::events::{SseLine, SseMessage};

/// Strip the field name and at most one space after the colon.
fn field_value<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(field)?.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(value) = field_value(line, "data") {
        return SseLine::Data(value.to_string());
    }

    if let Some(value) = field_value(line, "event") {
        return SseLine::Event(value.trim().to_string());
    }

    if let Some(value) = field_value(line, "id") {
        return SseLine::Id(value.trim().to_string());
    }

    if line == "data" {
        return SseLine::Data(String::new());
    }

    // Unknown field (retry:, garbage) - ignore like a comment
    SseLine::Comment(line.to_string())
}

/// Stateful SSE parser that accumulates lines and emits complete events
#[derive(Debug, Default)]
pub struct SseParser {
    current_event_type: Option<String>,
    current_id: Option<String>,
    /// SSE allows multiple data: lines per event
    data_buffer: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line (without its line terminator) to the parser.
    ///
    /// Returns a message when the line completes an event that carried at
    /// least one `data:` line.
    pub fn feed_line(&mut self, line: &str) -> Option<SseMessage> {
        match parse_sse_line(line) {
            SseLine::Event(event_type) => {
                self.current_event_type = Some(event_type);
                None
            }
            SseLine::Data(data) => {
                self.data_buffer.push(data);
                None
            }
            SseLine::Id(id) => {
                self.current_id = Some(id);
                None
            }
            SseLine::Empty => self.try_emit_event(),
            SseLine::Comment(_) => None,
        }
    }

    /// Flush a final event left open when the body ended without a blank line.
    pub fn finish(&mut self) -> Option<SseMessage> {
        self.try_emit_event()
    }

    fn try_emit_event(&mut self) -> Option<SseMessage> {
        let event = self.current_event_type.take();
        let id = self.current_id.take();

        if self.data_buffer.is_empty() {
            return None;
        }

        let data = self.data_buffer.join("\n");
        self.data_buffer.clear();
        Some(SseMessage { event, data, id })
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.current_event_type = None;
        self.current_id = None;
        self.data_buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_sse_line(""), SseLine::Empty);
    }

    #[test]
    fn test_parse_comment_line() {
        assert_eq!(
            parse_sse_line(": keep-alive"),
            SseLine::Comment("keep-alive".to_string())
        );
    }

    #[test]
    fn test_parse_data_keeps_inner_spacing() {
        assert_eq!(
            parse_sse_line("data: {\"a\": 1}"),
            SseLine::Data("{\"a\": 1}".to_string())
        );
        assert_eq!(
            parse_sse_line("data:  indented"),
            SseLine::Data(" indented".to_string())
        );
        assert_eq!(parse_sse_line("data:x"), SseLine::Data("x".to_string()));
    }

    #[test]
    fn test_parse_event_and_id() {
        assert_eq!(parse_sse_line("event: log"), SseLine::Event("log".to_string()));
        assert_eq!(parse_sse_line("id: 42"), SseLine::Id("42".to_string()));
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        assert!(matches!(parse_sse_line("retry: 1000"), SseLine::Comment(_)));
        assert!(matches!(parse_sse_line("database: x"), SseLine::Comment(_)));
    }

    #[test]
    fn test_parser_emits_on_blank_line() {
        let mut parser = SseParser::new();
        assert_eq!(parser.feed_line("event: log"), None);
        assert_eq!(parser.feed_line("data: {\"event_type\":\"alert\"}"), None);

        let message = parser.feed_line("").unwrap();
        assert_eq!(message.event.as_deref(), Some("log"));
        assert_eq!(message.data, "{\"event_type\":\"alert\"}");
    }

    #[test]
    fn test_parser_joins_multiline_data() {
        let mut parser = SseParser::new();
        parser.feed_line("data: first");
        parser.feed_line("data: second");
        let message = parser.feed_line("").unwrap();
        assert_eq!(message.data, "first\nsecond");
        assert_eq!(message.event, None);
    }

    #[test]
    fn test_parser_ignores_comment_only_events() {
        let mut parser = SseParser::new();
        parser.feed_line(": ping");
        assert_eq!(parser.feed_line(""), None);
        parser.feed_line("event: heartbeat");
        assert_eq!(parser.feed_line(""), None);
    }

    #[test]
    fn test_event_type_does_not_leak_into_next_event() {
        let mut parser = SseParser::new();
        parser.feed_line("event: log");
        parser.feed_line("data: a");
        parser.feed_line("");
        parser.feed_line("data: b");
        let message = parser.feed_line("").unwrap();
        assert_eq!(message.event, None);
    }

    #[test]
    fn test_finish_flushes_open_event() {
        let mut parser = SseParser::new();
        parser.feed_line("data: tail");
        assert_eq!(parser.finish().unwrap().data, "tail");
        assert_eq!(parser.finish(), None);
    }

    #[test]
    fn test_reset() {
        let mut parser = SseParser::new();
        parser.feed_line("data: stale");
        parser.reset();
        assert_eq!(parser.feed_line(""), None);
    }
}
