//! Streaming response consumer for the `/api/chat` event feed.
//!
//! The feed is line oriented: `data: <JSON>` lines carry tokens and an
//! `event: end` line terminates the stream. Chunk boundaries do not align
//! with lines, so [`EventFeed`] buffers the partial tail of each chunk and
//! only parses complete lines, flushing the remainder at stream end.

use chat_logging::chat_debug;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use crate::{BackendConfig, ChatError};

#[derive(Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub(crate) query: &'a str,
    /// The backend accepts prior turns here; this client always sends an
    /// empty list, as the original frontend does.
    pub(crate) history: Vec<serde_json::Value>,
}

impl<'a> ChatRequest<'a> {
    pub(crate) fn new(query: &'a str) -> Self {
        Self {
            query,
            history: Vec::new(),
        }
    }
}

/// Receives parsed tokens, one call per token.
pub trait TokenSink: Send + Sync {
    fn token(&self, text: String);
}

/// Something the feed produced from one or more complete lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Token(String),
    /// The `event: end` marker was seen; consumption stops here.
    End,
}

#[derive(Deserialize)]
struct EventPayload {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

const END_MARKER: &str = "event: end";
const DATA_PREFIX: &str = "data: ";

/// Incremental line accumulator with a carry-over buffer across reads.
#[derive(Debug, Default)]
pub struct EventFeed {
    buffer: Vec<u8>,
    ended: bool,
}

impl EventFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk and drain the events from every complete line in
    /// the buffer. After the end marker, remaining input is discarded.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<FeedEvent> {
        let mut events = Vec::new();
        if self.ended {
            return events;
        }
        self.buffer.extend_from_slice(chunk);
        while let Some(pos) = self.buffer.iter().position(|&byte| byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.apply_line(&line[..pos], &mut events);
            if self.ended {
                self.buffer.clear();
                break;
            }
        }
        events
    }

    /// Flush the buffered remainder as a final line once the underlying
    /// read reports completion.
    pub fn finish(&mut self) -> Vec<FeedEvent> {
        let mut events = Vec::new();
        if self.ended {
            return events;
        }
        let tail = std::mem::take(&mut self.buffer);
        if !tail.is_empty() {
            self.apply_line(&tail, &mut events);
        }
        self.ended = true;
        events
    }

    fn apply_line(&mut self, line: &[u8], events: &mut Vec<FeedEvent>) {
        let line = String::from_utf8_lossy(line);
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.starts_with(END_MARKER) {
            self.ended = true;
            events.push(FeedEvent::End);
            return;
        }
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            return;
        };
        match serde_json::from_str::<EventPayload>(payload) {
            Ok(event) if event.kind == "token" && !event.text.is_empty() => {
                events.push(FeedEvent::Token(event.text));
            }
            Ok(_) => {}
            Err(err) => {
                // Malformed lines are skipped, not fatal.
                chat_debug!("skipping unparseable feed line: {err}");
            }
        }
    }
}

/// Send a query to the streaming chat endpoint and forward each token to
/// `sink` as soon as it is parsed. Returns once the end marker is seen or
/// the body is exhausted.
pub async fn stream_chat(
    http: &reqwest::Client,
    config: &BackendConfig,
    query: &str,
    sink: &dyn TokenSink,
) -> Result<(), ChatError> {
    let response = http
        .post(config.chat_stream_url())
        .header(ACCEPT, "text/event-stream")
        .json(&ChatRequest::new(query))
        .send()
        .await
        .map_err(|err| ChatError::Transport(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ChatError::Status {
            code: status.as_u16(),
            body,
        });
    }

    let mut feed = EventFeed::new();
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|err| ChatError::Transport(err.to_string()))?;
        for event in feed.push(&chunk) {
            match event {
                FeedEvent::Token(text) => sink.token(text),
                FeedEvent::End => return Ok(()),
            }
        }
    }
    for event in feed.finish() {
        if let FeedEvent::Token(text) = event {
            sink.token(text);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{EventFeed, FeedEvent};

    fn token(text: &str) -> FeedEvent {
        FeedEvent::Token(text.to_string())
    }

    #[test]
    fn whole_lines_yield_tokens_until_the_end_marker() {
        let mut feed = EventFeed::new();
        let events = feed.push(
            b"data: {\"type\":\"token\",\"text\":\"Hel\"}\n\
              data: {\"type\":\"token\",\"text\":\"lo\"}\n\
              event: end\n",
        );
        assert_eq!(events, vec![token("Hel"), token("lo"), FeedEvent::End]);
    }

    #[test]
    fn line_split_across_chunks_is_reassembled() {
        let mut feed = EventFeed::new();
        assert!(feed.push(b"data: {\"type\":\"token\"").is_empty());
        let events = feed.push(b",\"text\":\"Hi\"}\n");
        assert_eq!(events, vec![token("Hi")]);
    }

    #[test]
    fn remainder_without_newline_is_flushed_at_finish() {
        let mut feed = EventFeed::new();
        assert!(feed.push(b"data: {\"type\":\"token\",\"text\":\"tail\"}").is_empty());
        assert_eq!(feed.finish(), vec![token("tail")]);
        assert!(feed.finish().is_empty());
    }

    #[test]
    fn input_after_the_end_marker_is_discarded() {
        let mut feed = EventFeed::new();
        let events =
            feed.push(b"event: end\ndata: {\"type\":\"token\",\"text\":\"late\"}\n");
        assert_eq!(events, vec![FeedEvent::End]);
        assert!(feed.push(b"data: {\"type\":\"token\",\"text\":\"more\"}\n").is_empty());
        assert!(feed.finish().is_empty());
    }

    #[test]
    fn malformed_data_lines_are_skipped() {
        let mut feed = EventFeed::new();
        assert!(feed.push(b"data: not-json\n").is_empty());
        assert!(feed.push(b"noise without prefix\n").is_empty());
        let events = feed.push(b"data: {\"type\":\"token\",\"text\":\"ok\"}\n");
        assert_eq!(events, vec![token("ok")]);
    }

    #[test]
    fn non_token_and_empty_payloads_are_ignored() {
        let mut feed = EventFeed::new();
        assert!(feed.push(b"data: {\"type\":\"sources\",\"text\":\"x\"}\n").is_empty());
        assert!(feed.push(b"data: {\"type\":\"token\",\"text\":\"\"}\n").is_empty());
        assert!(feed.push(b"data: {\"type\":\"token\"}\n").is_empty());
    }

    #[test]
    fn crlf_lines_are_handled() {
        let mut feed = EventFeed::new();
        let events = feed.push(b"data: {\"type\":\"token\",\"text\":\"a\"}\r\nevent: end\r\n");
        assert_eq!(events, vec![token("a"), FeedEvent::End]);
    }

    #[test]
    fn multibyte_text_split_mid_character_survives() {
        let line = "data: {\"type\":\"token\",\"text\":\"héllo\"}\n".as_bytes();
        let mid = line.iter().position(|&b| b > 0x7f).expect("multibyte byte") + 1;
        let (a, b) = line.split_at(mid);
        let mut feed = EventFeed::new();
        assert!(feed.push(a).is_empty());
        let events = feed.push(b);
        assert_eq!(events, vec![token("héllo")]);
    }
}
