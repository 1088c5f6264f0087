use std::path::PathBuf;

use crate::{ChatFailure, ChatReply, UploadReceipt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the input line.
    InputChanged(String),
    /// User submitted the current input as a question.
    Submitted,
    /// A streamed token arrived for the in-progress reply.
    TokenArrived(String),
    /// The token stream ended (end marker or connection closed).
    StreamFinished,
    /// A complete batch reply, or the failure that stands in for one.
    ReplyArrived(Result<ChatReply, ChatFailure>),
    /// User asked to upload the given files for indexing.
    UploadRequested(Vec<PathBuf>),
    /// The upload attempt finished; `Err` carries a short error string.
    UploadFinished(Result<UploadReceipt, String>),
    /// Fallback for placeholder wiring.
    NoOp,
}
