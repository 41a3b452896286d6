//! Server-Sent Events (SSE) streaming parser.
//!
//! Gemini's `streamGenerateContent?alt=sse` endpoint sends one JSON
//! document per event. This module turns any byte stream (usually
//! `reqwest::Response::bytes_stream`) into a stream of [`SseEvent`]s.

use bytes::Buf;
use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio_util::io::StreamReader;

use crate::AiError;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The event type, when the server names one.
    pub event: Option<String>,
    /// The event data (JSON string). Multi-line data is joined with `\n`.
    pub data: String,
}

struct SseState<R> {
    lines: Lines<BufReader<R>>,
    event: Option<String>,
    data: String,
    done: bool,
}

impl<R> SseState<R> {
    fn push_line(&mut self, line: &str) {
        if let Some(event_type) = field_value(line, "event") {
            self.event = Some(event_type.to_string());
        } else if let Some(data) = field_value(line, "data") {
            if !self.data.is_empty() {
                self.data.push('\n');
            }
            self.data.push_str(data);
        }
        // Ignore other fields (id:, retry:, comments)
    }

    fn take_event(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        Some(SseEvent {
            event,
            data: std::mem::take(&mut self.data),
        })
    }
}

fn field_value<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(field)?.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Parse an SSE byte stream into events.
///
/// A read error ends the stream after yielding one `NetworkError`. Data
/// left without a trailing blank line is flushed as a final event.
pub fn sse_events<S, B, E>(byte_stream: S) -> impl Stream<Item = Result<SseEvent, AiError>> + Send
where
    S: Stream<Item = Result<B, E>> + Send + Unpin + 'static,
    B: Buf + Send + 'static,
    E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
{
    let reader = StreamReader::new(byte_stream.map(|chunk| chunk.map_err(std::io::Error::other)));
    let state = SseState {
        lines: BufReader::new(reader).lines(),
        event: None,
        data: String::new(),
        done: false,
    };

    futures_util::stream::unfold(state, |mut state| async move {
        if state.done {
            return None;
        }
        loop {
            match state.lines.next_line().await {
                Ok(Some(line)) => {
                    if line.is_empty() {
                        // Empty line = end of event
                        if let Some(event) = state.take_event() {
                            return Some((Ok(event), state));
                        }
                        continue;
                    }
                    state.push_line(&line);
                }
                Ok(None) => {
                    state.done = true;
                    let event = state.take_event();
                    return event.map(|event| (Ok(event), state));
                }
                Err(e) => {
                    state.done = true;
                    return Some((Err(AiError::NetworkError(e.to_string())), state));
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn chunks(parts: &[&'static str]) -> Vec<Result<&'static [u8], std::io::Error>> {
        parts.iter().map(|p| Ok(p.as_bytes())).collect()
    }

    async fn collect(parts: &[&'static str]) -> Vec<Result<SseEvent, AiError>> {
        sse_events(stream::iter(chunks(parts))).collect().await
    }

    #[tokio::test]
    async fn parses_data_events() {
        let events = collect(&["data: {\"a\":1}\n\n", "data: {\"a\":2}\n\n"]).await;
        let data: Vec<_> = events.into_iter().map(|e| e.unwrap().data).collect();
        assert_eq!(data, vec!["{\"a\":1}", "{\"a\":2}"]);
    }

    #[tokio::test]
    async fn joins_events_split_across_chunks() {
        let events = collect(&["da", "ta: {\"text\":", "\"hi\"}\n", "\n"]).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap().data, "{\"text\":\"hi\"}");
    }

    #[tokio::test]
    async fn keeps_event_name_and_multiline_data() {
        let events = collect(&["event: delta\ndata: one\ndata: two\n\n"]).await;
        let event = events[0].as_ref().unwrap();
        assert_eq!(event.event.as_deref(), Some("delta"));
        assert_eq!(event.data, "one\ntwo");
    }

    #[tokio::test]
    async fn accepts_data_without_space() {
        let events = collect(&["data:{}\n\n"]).await;
        assert_eq!(events[0].as_ref().unwrap().data, "{}");
    }

    #[tokio::test]
    async fn ignores_comments_and_blank_events() {
        let events = collect(&[": keep-alive\n\n", "id: 7\n\n", "data: x\n\n"]).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap().data, "x");
    }

    #[tokio::test]
    async fn flushes_trailing_event_without_blank_line() {
        let events = collect(&["data: tail"]).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap().data, "tail");
    }

    #[tokio::test]
    async fn read_error_ends_stream() {
        let parts: Vec<Result<&'static [u8], std::io::Error>> = vec![
            Ok(b"data: first\n\n"),
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset",
            )),
            Ok(b"data: never\n\n"),
        ];
        let events: Vec<_> = sse_events(stream::iter(parts)).collect().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].as_ref().unwrap().data, "first");
        assert!(matches!(events[1], Err(AiError::NetworkError(_))));
    }
}
