//! Terminal event loop: stdin lines become `Msg`s, effects go to the
//! background client, and client events are dispatched back through the
//! pure update function.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chat_logging::chat_warn;
use docchat_client::{BackendConfig, ClientEvent, ClientHandle};
use docchat_core::{update, ChatFailure, ChatReply, ChatState, Effect, Msg, Source, UploadReceipt};

use crate::render;

pub fn run(streaming: bool) -> io::Result<()> {
    let config = BackendConfig::from_env();
    println!("{}", render::banner(config.base_url(), streaming));

    let client = ClientHandle::new(config);
    let mut state = ChatState::new();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("you> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();

        if trimmed == "/quit" {
            break;
        }
        if trimmed == "/upload" || trimmed.starts_with("/upload ") {
            let rest = &trimmed["/upload".len()..];
            let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
            let (next, sent) = dispatch(state, Msg::UploadRequested(paths), &client, streaming);
            state = next;
            if sent {
                state = wait_for_upload(state, &client, streaming);
            }
            if let Some(status) = state.upload_status() {
                println!("{status}");
            }
            continue;
        }

        let (next, _) = dispatch(state, Msg::InputChanged(line), &client, streaming);
        let (next, sent) = dispatch(next, Msg::Submitted, &client, streaming);
        state = next;
        if sent {
            state = wait_for_reply(state, &client, streaming)?;
        }
    }
    Ok(())
}

/// Apply one message and forward any resulting effects to the client.
/// Returns the new state and whether a request went out.
fn dispatch(
    state: ChatState,
    msg: Msg,
    client: &ClientHandle,
    streaming: bool,
) -> (ChatState, bool) {
    let (state, effects) = update(state, msg);
    let sent = !effects.is_empty();
    for effect in effects {
        match effect {
            Effect::SendQuery { query } => client.send_query(query, streaming),
            Effect::UploadFiles { paths } => client.upload(paths),
        }
    }
    (state, sent)
}

/// Drain client events until the in-flight question is answered. Streamed
/// tokens are printed as they arrive, one write per token.
fn wait_for_reply(
    mut state: ChatState,
    client: &ClientHandle,
    streaming: bool,
) -> io::Result<ChatState> {
    print!("bot> ");
    io::stdout().flush()?;
    while state.busy() {
        let Some(event) = client.recv() else {
            chat_warn!("client channel closed with a question in flight");
            break;
        };
        match event {
            ClientEvent::Token(text) => {
                print!("{text}");
                io::stdout().flush()?;
                let (next, _) = dispatch(state, Msg::TokenArrived(text), client, streaming);
                state = next;
            }
            ClientEvent::StreamEnded => {
                println!();
                let (next, _) = dispatch(state, Msg::StreamFinished, client, streaming);
                state = next;
            }
            ClientEvent::Reply(result) => {
                let had_tokens = matches!(
                    state.messages().last(),
                    Some(message) if !message.text.is_empty()
                );
                let (next, _) =
                    dispatch(state, Msg::ReplyArrived(map_reply(result)), client, streaming);
                state = next;
                if had_tokens {
                    // Partial tokens were already printed; start a new line
                    // for the failure text that replaced them.
                    println!();
                }
                if let Some(message) = state.messages().last() {
                    println!("{}", message.text);
                }
                for line in render::source_lines(state.sources_of_last_reply()) {
                    println!("{line}");
                }
            }
            ClientEvent::UploadDone(result) => {
                // Late upload outcome from an earlier attempt; record it.
                let (next, _) =
                    dispatch(state, Msg::UploadFinished(map_upload(result)), client, streaming);
                state = next;
            }
        }
    }
    Ok(state)
}

/// Block until the single in-flight upload reports back.
fn wait_for_upload(state: ChatState, client: &ClientHandle, streaming: bool) -> ChatState {
    let mut state = state;
    loop {
        let Some(event) = client.recv() else {
            chat_warn!("client channel closed with an upload in flight");
            return state;
        };
        match event {
            ClientEvent::UploadDone(result) => {
                let (next, _) =
                    dispatch(state, Msg::UploadFinished(map_upload(result)), client, streaming);
                return next;
            }
            // Stray chat events from an abandoned stream are still applied
            // so the conversation stays consistent.
            ClientEvent::Token(text) => {
                let (next, _) = dispatch(state, Msg::TokenArrived(text), client, streaming);
                state = next;
            }
            ClientEvent::StreamEnded => {
                let (next, _) = dispatch(state, Msg::StreamFinished, client, streaming);
                state = next;
            }
            ClientEvent::Reply(result) => {
                let (next, _) =
                    dispatch(state, Msg::ReplyArrived(map_reply(result)), client, streaming);
                state = next;
            }
        }
    }
}

fn map_reply(
    result: Result<docchat_client::ChatReply, docchat_client::ChatError>,
) -> Result<ChatReply, ChatFailure> {
    match result {
        Ok(reply) => Ok(ChatReply {
            text: reply.text,
            sources: reply.sources.into_iter().map(map_source).collect(),
        }),
        Err(docchat_client::ChatError::Status { code, body }) => {
            Err(ChatFailure::Status { code, body })
        }
        Err(docchat_client::ChatError::Transport(message)) => {
            Err(ChatFailure::Transport(message))
        }
    }
}

fn map_source(doc: docchat_client::SourceDoc) -> Source {
    Source {
        source: doc.source,
        snippet: doc.snippet,
    }
}

fn map_upload(
    result: Result<docchat_client::UploadReceipt, docchat_client::UploadError>,
) -> Result<UploadReceipt, String> {
    match result {
        Ok(receipt) => Ok(UploadReceipt {
            saved: receipt.saved,
            chunks_added: receipt.chunks_added,
        }),
        Err(err) => Err(err.to_string()),
    }
}
