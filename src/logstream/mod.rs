//! Live log tailing: one subscription at a time feeding a bounded buffer.
//!
//! # Module structure
//! - `source` - the log sources that can be tailed
//! - `line` - display lines and message classification
//! - `buffer` - bounded FIFO of display lines
//! - `viewport` - scroll position over the buffer, with follow-bottom
//! - `connector` - opening subscriptions (SSE in production)
//! - `controller` - the subscription state machine

pub mod buffer;
pub mod connector;
pub mod controller;
pub mod line;
pub mod source;
pub mod viewport;

pub use buffer::LineBuffer;
pub use connector::{
    run_subscription, SseConnector, CLOSED_BY_SERVER, StreamConnection, StreamConnector, StreamEvent,
};
pub use controller::{LogStreamController, StreamState};
pub use line::{LineKind, LiveLine};
pub use source::LogSource;
pub use viewport::Viewport;

/// Default number of lines kept in the live log.
pub const DEFAULT_CAPACITY: usize = 500;
