use std::fmt;

use crate::message::Source;

/// A finished batch answer, already cleaned and with sources de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatReply {
    pub text: String,
    pub sources: Vec<Source>,
}

/// Why a chat request produced no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatFailure {
    /// The backend answered with a non-success status.
    Status { code: u16, body: String },
    /// The request never completed.
    Transport(String),
}

impl fmt::Display for ChatFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatFailure::Status { code, body } => write!(f, "Error {code}: {body}"),
            ChatFailure::Transport(message) => write!(f, "Network error: {message}"),
        }
    }
}

/// What the backend reported for a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadReceipt {
    /// Filenames the backend saved, verbatim.
    pub saved: Vec<String>,
    /// Number of index chunks added, verbatim.
    pub chunks_added: u64,
}
