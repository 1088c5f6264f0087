/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A document the backend cited for an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Path or identifier of the cited document.
    pub source: String,
    /// Short excerpt from the document, when the backend provides one.
    pub snippet: Option<String>,
}

/// One entry in the conversation. Ordering is insertion order; a message has
/// no identity beyond its list position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub sources: Vec<Source>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            sources: Vec::new(),
        }
    }

    /// An assistant message that has not received any text yet.
    pub fn assistant_pending() -> Self {
        Self {
            role: Role::Assistant,
            text: String::new(),
            sources: Vec::new(),
        }
    }
}
