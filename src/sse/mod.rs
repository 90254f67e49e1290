//! SSE (Server-Sent Events) stream parser
//!
//! The live log endpoint speaks plain SSE:
//! - `event: <type>` - optional event type line
//! - `data: <payload>` - data line; several lines join with `\n`
//! - Empty line - ends the event
//! - Lines starting with `:` - comments (keep-alives), ignored
//!
//! # Module structure
//! - `events` - SseLine and SseMessage
//! - `parser` - line classification and the stateful SseParser
//! - `stream` - turning a chunked HTTP body into a stream of messages

mod events;
mod parser;
mod stream;

pub use events::{SseLine, SseMessage};
pub use parser::{parse_sse_line, SseParser};
pub use stream::{message_stream, LineSplitter};
