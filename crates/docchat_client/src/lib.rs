//! Docchat client: HTTP engine for the RAG chat backend.
mod batch;
mod cleanup;
mod client;
mod config;
mod stream;
mod types;
mod upload;

pub use batch::{dedupe_sources, send_batch};
pub use cleanup::clean_answer;
pub use client::ClientHandle;
pub use config::{BackendConfig, BACKEND_URL_ENV, DEFAULT_BASE_URL};
pub use stream::{stream_chat, EventFeed, FeedEvent, TokenSink};
pub use types::{ChatError, ChatReply, ClientEvent, SourceDoc, UploadError, UploadReceipt};
pub use upload::upload_files;
