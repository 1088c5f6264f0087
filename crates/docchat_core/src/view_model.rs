use crate::Message;

/// Snapshot of the conversation for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub messages: Vec<Message>,
    pub input: String,
    /// True while a question is waiting on the backend.
    pub busy: bool,
    /// Outcome of the last upload attempt, overwritten per attempt.
    pub upload_status: Option<String>,
}
