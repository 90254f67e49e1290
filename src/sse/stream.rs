//! Chunked body to SSE message stream.

use futures::{stream, Stream, StreamExt};

use crate::sse::events::SseMessage;
use crate::sse::parser::SseParser;
use crate::traits::{ByteStream, HttpError};

/// Splits a byte stream into lines.
///
/// Bytes are buffered until a `\n` arrives, so a multi-byte UTF-8 sequence
/// split across two chunks is decoded intact. `\r\n` endings are accepted.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            lines.push(decode_line(&self.buffer[start..end]));
            start = end + 1;
        }
        self.buffer.drain(..start);
        lines
    }

    /// Return the unterminated remainder, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = decode_line(&self.buffer);
        self.buffer.clear();
        Some(line)
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

struct DecodeState {
    body: ByteStream,
    splitter: LineSplitter,
    parser: SseParser,
    pending: std::collections::VecDeque<String>,
    done: bool,
}

/// Decode a chunked SSE body into messages.
///
/// The stream ends when the body ends; a body read error is yielded once and
/// ends the stream.
pub fn message_stream(body: ByteStream) -> impl Stream<Item = Result<SseMessage, HttpError>> + Send {
    let state = DecodeState {
        body,
        splitter: LineSplitter::new(),
        parser: SseParser::new(),
        pending: std::collections::VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            // First drain lines already split off
            while let Some(line) = state.pending.pop_front() {
                if let Some(message) = state.parser.feed_line(&line) {
                    return Some((Ok(message), state));
                }
            }

            if state.done {
                return state.parser.finish().map(|message| (Ok(message), state));
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let lines = state.splitter.push(&chunk);
                    state.pending.extend(lines);
                }
                Some(Err(e)) => {
                    state.done = true;
                    state.pending.clear();
                    state.parser.reset();
                    return Some((Err(e), state));
                }
                None => {
                    state.done = true;
                    if let Some(rest) = state.splitter.finish() {
                        state.pending.push_back(rest);
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn body_from_chunks(chunks: Vec<Bytes>) -> ByteStream {
        Box::pin(stream::iter(chunks.into_iter().map(Ok)))
    }

    #[test]
    fn test_splitter_across_chunks() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"data: hel").is_empty());
        assert_eq!(splitter.push(b"lo\r\n\n"), vec!["data: hello", ""]);
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn test_splitter_keeps_split_utf8_intact() {
        let text = "data: caf\u{e9}\n";
        let bytes = text.as_bytes();
        // Split inside the two-byte encoding of 'é'
        let cut = bytes.len() - 2;
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(&bytes[..cut]).is_empty());
        assert_eq!(splitter.push(&bytes[cut..]), vec!["data: caf\u{e9}"]);
    }

    #[tokio::test]
    async fn test_message_stream_in_order() {
        let body = body_from_chunks(vec![
            Bytes::from("data: {\"n\":1}\n\ndata: {\"n\""),
            Bytes::from(":2}\n\n: keep-alive\n\ndata: {\"n\":3}\n\n"),
        ]);

        let messages: Vec<_> = message_stream(body).collect().await;
        let data: Vec<_> = messages
            .into_iter()
            .map(|m| m.unwrap().data)
            .collect();
        assert_eq!(data, vec!["{\"n\":1}", "{\"n\":2}", "{\"n\":3}"]);
    }

    #[tokio::test]
    async fn test_message_stream_flushes_unterminated_event() {
        let body = body_from_chunks(vec![Bytes::from("data: last")]);
        let messages: Vec<_> = message_stream(body).collect().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].as_ref().unwrap().data, "last");
    }

    #[tokio::test]
    async fn test_message_stream_yields_read_error_once() {
        let body: ByteStream = Box::pin(stream::iter(vec![
            Ok(Bytes::from("data: a\n\n")),
            Err(HttpError::Io("reset".to_string())),
            Ok(Bytes::from("data: never\n\n")),
        ]));

        let messages: Vec<_> = message_stream(body).collect().await;
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_ok());
        assert_eq!(messages[1], Err(HttpError::Io("reset".to_string())));
    }
}
