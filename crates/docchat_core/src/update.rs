use crate::{ChatState, Effect, Msg, UploadReceipt};

/// Shown in place of an answer whose cleaned text came back empty.
pub const NO_REPLY_PLACEHOLDER: &str = "(no reply)";

/// Shown when the user asks to upload without selecting any files.
pub const UPLOAD_PROMPT: &str = "Select at least one document to upload.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChatState, msg: Msg) -> (ChatState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submitted => match state.submit() {
            Some(query) => vec![Effect::SendQuery { query }],
            None => Vec::new(),
        },
        Msg::TokenArrived(text) => {
            state.append_token(&text);
            Vec::new()
        }
        Msg::StreamFinished => {
            state.finish_stream();
            Vec::new()
        }
        Msg::ReplyArrived(outcome) => {
            state.resolve_reply(outcome);
            Vec::new()
        }
        Msg::UploadRequested(paths) => {
            if paths.is_empty() {
                state.set_upload_status(UPLOAD_PROMPT.to_owned());
                Vec::new()
            } else {
                state.set_upload_status(format!("Uploading {} file(s)...", paths.len()));
                vec![Effect::UploadFiles { paths }]
            }
        }
        Msg::UploadFinished(outcome) => {
            state.set_upload_status(format_upload_status(outcome));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn format_upload_status(outcome: Result<UploadReceipt, String>) -> String {
    match outcome {
        Ok(receipt) => format!(
            "Uploaded: {} (chunks: {})",
            receipt.saved.join(", "),
            receipt.chunks_added
        ),
        Err(message) => message,
    }
}
