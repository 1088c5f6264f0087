//! Docchat core: pure conversation state machine and view-model helpers.
mod effect;
mod message;
mod msg;
mod reply;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use message::{Message, Role, Source};
pub use msg::Msg;
pub use reply::{ChatFailure, ChatReply, UploadReceipt};
pub use state::ChatState;
pub use update::{update, NO_REPLY_PLACEHOLDER, UPLOAD_PROMPT};
pub use view_model::ChatViewModel;
