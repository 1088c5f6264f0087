use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use chat_logging::chat_info;

use crate::stream::{stream_chat, TokenSink};
use crate::{send_batch, upload_files, BackendConfig, ClientEvent};

enum ClientCommand {
    SendQuery { query: String, streaming: bool },
    Upload { paths: Vec<PathBuf> },
}

/// Handle to the background HTTP client. Commands go in over a channel and
/// are executed on a dedicated Tokio runtime; results come back as
/// [`ClientEvent`]s for the shell to drain.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(config: BackendConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let http = reqwest::Client::new();
            while let Ok(command) = cmd_rx.recv() {
                let http = http.clone();
                let config = config.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&http, &config, command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn send_query(&self, query: impl Into<String>, streaming: bool) {
        let query = query.into();
        chat_info!("SendQuery streaming={} query_len={}", streaming, query.len());
        let _ = self.cmd_tx.send(ClientCommand::SendQuery { query, streaming });
    }

    pub fn upload(&self, paths: Vec<PathBuf>) {
        chat_info!("Upload file_count={}", paths.len());
        let _ = self.cmd_tx.send(ClientCommand::Upload { paths });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Block until the next event, or `None` once the client is gone.
    pub fn recv(&self) -> Option<ClientEvent> {
        self.event_rx.recv().ok()
    }
}

struct ChannelTokenSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl TokenSink for ChannelTokenSink {
    fn token(&self, text: String) {
        let _ = self.tx.send(ClientEvent::Token(text));
    }
}

async fn handle_command(
    http: &reqwest::Client,
    config: &BackendConfig,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::SendQuery { query, streaming: true } => {
            let sink = ChannelTokenSink {
                tx: event_tx.clone(),
            };
            let event = match stream_chat(http, config, &query, &sink).await {
                Ok(()) => ClientEvent::StreamEnded,
                Err(err) => ClientEvent::Reply(Err(err)),
            };
            let _ = event_tx.send(event);
        }
        ClientCommand::SendQuery { query, streaming: false } => {
            let result = send_batch(http, config, &query).await;
            let _ = event_tx.send(ClientEvent::Reply(result));
        }
        ClientCommand::Upload { paths } => {
            let result = upload_files(http, config, &paths).await;
            let _ = event_tx.send(ClientEvent::UploadDone(result));
        }
    }
}
