use crate::reply::{ChatFailure, ChatReply};
use crate::update::NO_REPLY_PLACEHOLDER;
use crate::view_model::ChatViewModel;
use crate::{Message, Source};

/// Conversation state for one page view. Held only in memory; mutated only
/// through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatState {
    input: String,
    messages: Vec<Message>,
    /// Index of the assistant message currently receiving a reply, captured
    /// when the message is created so tokens never re-scan the list.
    pending: Option<usize>,
    busy: bool,
    upload_status: Option<String>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ChatViewModel {
        ChatViewModel {
            messages: self.messages.clone(),
            input: self.input.clone(),
            busy: self.busy,
            upload_status: self.upload_status.clone(),
        }
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    /// Take the current input as a query. Appends the user message and an
    /// empty assistant message, and records the assistant index as pending.
    /// Whitespace-only input yields `None` and changes nothing.
    pub(crate) fn submit(&mut self) -> Option<String> {
        let query = self.input.trim().to_owned();
        if query.is_empty() {
            return None;
        }
        self.input.clear();
        self.messages.push(Message::user(query.clone()));
        self.messages.push(Message::assistant_pending());
        self.pending = Some(self.messages.len() - 1);
        self.busy = true;
        Some(query)
    }

    /// Append one streamed token to the pending reply. Tokens arriving with
    /// no reply in progress are dropped.
    pub(crate) fn append_token(&mut self, text: &str) {
        if let Some(index) = self.pending {
            self.messages[index].text.push_str(text);
        }
    }

    pub(crate) fn finish_stream(&mut self) {
        self.pending = None;
        self.busy = false;
    }

    /// Fill the pending assistant message from a batch outcome. Failures
    /// become the message text so the user never sees a dangling question.
    pub(crate) fn resolve_reply(&mut self, outcome: Result<ChatReply, ChatFailure>) {
        let index = match self.pending.take() {
            Some(index) => index,
            None => {
                self.messages.push(Message::assistant_pending());
                self.messages.len() - 1
            }
        };
        match outcome {
            Ok(reply) => {
                self.messages[index].text = if reply.text.is_empty() {
                    NO_REPLY_PLACEHOLDER.to_owned()
                } else {
                    reply.text
                };
                self.messages[index].sources = reply.sources;
            }
            Err(failure) => {
                self.messages[index].text = failure.to_string();
            }
        }
        self.busy = false;
    }

    pub(crate) fn set_upload_status(&mut self, status: String) {
        self.upload_status = Some(status);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn sources_of_last_reply(&self) -> &[Source] {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == crate::Role::Assistant)
            .map(|message| message.sources.as_slice())
            .unwrap_or(&[])
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn upload_status(&self) -> Option<&str> {
        self.upload_status.as_deref()
    }
}
