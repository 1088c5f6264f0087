use serde::Deserialize;
use thiserror::Error;

/// A cited document exactly as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceDoc {
    pub source: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// A finished batch answer: cleaned text plus de-duplicated sources.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatReply {
    pub text: String,
    pub sources: Vec<SourceDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("backend answered {code}: {body}")]
    Status { code: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Could not read {path}: {message}")]
    File { path: String, message: String },
    /// Short note extracted from the backend's failure body.
    #[error("{0}")]
    Rejected(String),
    #[error("Upload failed: {0}")]
    Transport(String),
}

/// What the backend reports for a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub saved: Vec<String>,
    #[serde(default)]
    pub chunks_added: u64,
}

/// Everything the background client reports back to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// One streamed answer token, forwarded as soon as it is parsed.
    Token(String),
    /// The token stream finished (end marker or connection closed).
    StreamEnded,
    /// Outcome of a batch request, or of a streaming request that failed.
    Reply(Result<ChatReply, ChatError>),
    UploadDone(Result<UploadReceipt, UploadError>),
}
