//! Log stream controller: the subscription state machine.

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::StreamError;
use crate::logstream::buffer::LineBuffer;
use crate::logstream::connector::{StreamConnection, StreamConnector, StreamEvent};
use crate::logstream::line::LiveLine;
use crate::logstream::source::LogSource;
use crate::logstream::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No source chosen yet
    Idle,
    Connecting(LogSource),
    Streaming(LogSource),
    /// The transport failed; re-select a source to retry
    Errored(LogSource),
    Closed,
}

impl StreamState {
    pub fn source(&self) -> Option<LogSource> {
        match self {
            StreamState::Connecting(s) | StreamState::Streaming(s) | StreamState::Errored(s) => {
                Some(*s)
            }
            StreamState::Idle | StreamState::Closed => None,
        }
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamState::Idle => write!(f, "idle"),
            StreamState::Connecting(s) => write!(f, "connecting to {}", s),
            StreamState::Streaming(s) => write!(f, "streaming {}", s),
            StreamState::Errored(s) => write!(f, "{} failed", s),
            StreamState::Closed => write!(f, "closed"),
        }
    }
}

/// Owns the single live subscription, the line buffer and the viewport.
///
/// Every subscription gets a new generation. Events tagged with any other
/// generation, or arriving in a state that cannot accept them, are dropped
/// without touching the buffer.
pub struct LogStreamController {
    state: StreamState,
    buffer: LineBuffer,
    viewport: Viewport,
    connector: Box<dyn StreamConnector>,
    connection: Option<Box<dyn StreamConnection>>,
    generation: u64,
    last_error: Option<StreamError>,
    decode_errors: u64,
}

impl LogStreamController {
    pub fn new(capacity: usize, connector: Box<dyn StreamConnector>) -> Self {
        Self {
            state: StreamState::Idle,
            buffer: LineBuffer::new(capacity),
            viewport: Viewport::default(),
            connector,
            connection: None,
            generation: 0,
            last_error: None,
            decode_errors: 0,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Buffer length and viewport together, for scrolling.
    pub fn scroll(&mut self) -> (usize, &mut Viewport) {
        (self.buffer.len(), &mut self.viewport)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_error(&self) -> Option<&StreamError> {
        self.last_error.as_ref()
    }

    /// Messages that failed to decode on the current subscription.
    pub fn decode_errors(&self) -> u64 {
        self.decode_errors
    }

    pub fn has_connection(&self) -> bool {
        self.connection.is_some()
    }

    /// Switch to `source`. Returns false for the no-op re-selection of the
    /// source already streaming.
    pub fn select_source(&mut self, source: LogSource) -> bool {
        if self.state == StreamState::Streaming(source) {
            debug!("{} already streaming, ignoring re-selection", source);
            return false;
        }

        self.close_connection();
        self.generation += 1;
        self.last_error = None;
        self.decode_errors = 0;

        info!("selecting {} (generation {})", source, self.generation);
        self.connection = Some(self.connector.open(source, self.generation));
        self.buffer.reset(vec![LiveLine::status(format!(
            "Connecting to the {} stream...",
            source
        ))]);
        self.viewport.reset();
        self.state = StreamState::Connecting(source);
        true
    }

    /// Dispatch one transport event. Returns whether it was applied.
    pub fn handle_event(&mut self, generation: u64, event: StreamEvent) -> bool {
        match event {
            StreamEvent::Opened => self.on_opened(generation),
            StreamEvent::Message(payload) => self.on_message(generation, &payload),
            StreamEvent::Failed(message) => self.on_transport_error(generation, &message),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                "dropping event from generation {} (current {})",
                generation, self.generation
            );
            return false;
        }
        true
    }

    pub fn on_opened(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        let StreamState::Connecting(source) = self.state else {
            return false;
        };

        self.buffer.reset(vec![LiveLine::status(format!(
            "Connected to the {} stream. Waiting for events...",
            source
        ))]);
        self.viewport.reset();
        self.state = StreamState::Streaming(source);
        true
    }

    pub fn on_message(&mut self, generation: u64, payload: &str) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        if !matches!(self.state, StreamState::Streaming(_)) {
            return false;
        }

        let (line, err) = LiveLine::classify(payload);
        if let Some(err) = err {
            self.decode_errors += 1;
            debug!("{}", err);
            self.last_error = Some(err);
        }
        self.push_line(line);
        true
    }

    pub fn on_transport_error(&mut self, generation: u64, message: &str) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        let source = match self.state {
            StreamState::Connecting(s) | StreamState::Streaming(s) => s,
            _ => return false,
        };

        warn!("{} stream error: {}", source, message);
        self.push_line(LiveLine::error(format!(
            "[STREAM ERROR] {}: {}. Select a source to reconnect.",
            source, message
        )));
        self.last_error = Some(StreamError::Transport {
            log: source.query_name().to_string(),
            message: message.to_string(),
        });
        self.close_connection();
        self.state = StreamState::Errored(source);
        true
    }

    /// Close the subscription if any. Safe in every state.
    pub fn teardown(&mut self) {
        self.close_connection();
        if self.state != StreamState::Closed {
            info!("log stream closed ({})", self.state);
        }
        self.state = StreamState::Closed;
    }

    fn close_connection(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
    }

    /// Append with the follow rule: a following view tracks the new line,
    /// a scrolled-up view keeps showing the same lines.
    fn push_line(&mut self, line: LiveLine) {
        let evicted = self.buffer.append(line);
        if self.viewport.is_following() {
            self.viewport.scroll_to_bottom(self.buffer.len());
        } else if evicted {
            self.viewport.shift_for_eviction(1);
        }
    }
}

impl Drop for LogStreamController {
    fn drop(&mut self) {
        self.close_connection();
    }
}

impl fmt::Debug for LogStreamController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStreamController")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("lines", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logstream::line::LineKind;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Log {
        opened: Vec<(LogSource, u64)>,
        closed: Vec<u64>,
    }

    struct FakeConnector(Arc<Mutex<Log>>);

    struct FakeConnection {
        generation: u64,
        log: Arc<Mutex<Log>>,
    }

    impl StreamConnection for FakeConnection {
        fn close(&mut self) {
            self.log.lock().unwrap().closed.push(self.generation);
        }
    }

    impl StreamConnector for FakeConnector {
        fn open(&mut self, source: LogSource, generation: u64) -> Box<dyn StreamConnection> {
            self.0.lock().unwrap().opened.push((source, generation));
            Box::new(FakeConnection {
                generation,
                log: self.0.clone(),
            })
        }
    }

    fn controller(capacity: usize) -> (LogStreamController, Arc<Mutex<Log>>) {
        let log = Arc::new(Mutex::new(Log::default()));
        let controller = LogStreamController::new(capacity, Box::new(FakeConnector(log.clone())));
        (controller, log)
    }

    #[test]
    fn test_select_then_open() {
        let (mut c, _) = controller(10);
        assert!(c.select_source(LogSource::Eve));
        assert_eq!(c.state(), StreamState::Connecting(LogSource::Eve));
        assert_eq!(c.buffer().len(), 1);
        assert!(c.buffer().last().unwrap().text.contains("Connecting"));

        assert!(c.on_opened(1));
        assert_eq!(c.state(), StreamState::Streaming(LogSource::Eve));
        assert!(c.buffer().last().unwrap().text.contains("Connected"));
    }

    #[test]
    fn test_message_before_open_is_ignored() {
        let (mut c, _) = controller(10);
        c.select_source(LogSource::Eve);
        assert!(!c.on_message(1, "{}"));
        assert_eq!(c.buffer().len(), 1);
    }

    #[test]
    fn test_transport_error_closes_and_errors() {
        let (mut c, log) = controller(10);
        c.select_source(LogSource::SuricataText);
        c.on_opened(1);

        assert!(c.on_transport_error(1, "connection reset"));
        assert_eq!(c.state(), StreamState::Errored(LogSource::SuricataText));
        assert!(!c.has_connection());
        assert_eq!(log.lock().unwrap().closed, vec![1]);
        let last = c.buffer().last().unwrap();
        assert_eq!(last.kind, LineKind::StreamError);
        assert!(last.text.contains("connection reset"));

        // Late messages from the dead subscription change nothing
        assert!(!c.on_message(1, "{}"));
    }

    #[test]
    fn test_reselect_after_error_reconnects() {
        let (mut c, log) = controller(10);
        c.select_source(LogSource::Eve);
        c.on_opened(1);
        c.on_transport_error(1, "reset");

        assert!(c.select_source(LogSource::Eve));
        assert_eq!(c.generation(), 2);
        assert_eq!(log.lock().unwrap().opened.len(), 2);
    }

    #[test]
    fn test_teardown_from_idle() {
        let (mut c, log) = controller(10);
        c.teardown();
        assert_eq!(c.state(), StreamState::Closed);
        assert!(log.lock().unwrap().closed.is_empty());
    }

    #[test]
    fn test_scrolled_up_view_stays_anchored() {
        let (mut c, _) = controller(20);
        c.select_source(LogSource::Eve);
        c.on_opened(1);
        c.viewport_mut().set_height(5, 1);
        for i in 0..30 {
            c.on_message(1, &format!("{{\"n\":{}}}", i));
        }
        // Full buffer, following the bottom
        assert_eq!(c.viewport().offset(), 15);

        c.viewport_mut().scroll_up(5);
        let first_visible = c.buffer().iter().nth(10).unwrap().text.clone();
        c.on_message(1, "{\"n\":30}");

        assert_eq!(c.viewport().offset(), 9);
        assert_eq!(c.buffer().iter().nth(9).unwrap().text, first_visible);
    }
}
