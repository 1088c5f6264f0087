use std::sync::Once;

use docchat_core::{
    update, ChatFailure, ChatReply, ChatState, Effect, Msg, Role, Source, NO_REPLY_PLACEHOLDER,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

fn submit(state: ChatState, input: &str) -> (ChatState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::Submitted)
}

#[test]
fn submit_appends_pair_and_emits_send() {
    init_logging();
    let (state, effects) = submit(ChatState::new(), "  what is in my resume?  ");
    let view = state.view();

    assert_eq!(
        effects,
        vec![Effect::SendQuery {
            query: "what is in my resume?".to_string(),
        }]
    );
    assert_eq!(view.messages.len(), 2);
    assert_eq!(view.messages[0].role, Role::User);
    assert_eq!(view.messages[0].text, "what is in my resume?");
    assert_eq!(view.messages[1].role, Role::Assistant);
    assert_eq!(view.messages[1].text, "");
    assert!(view.busy);
    assert_eq!(view.input, "");
}

#[test]
fn whitespace_submit_is_ignored() {
    init_logging();
    let (state, effects) = submit(ChatState::new(), "   \n");

    assert!(effects.is_empty());
    assert!(state.view().messages.is_empty());
    assert!(!state.view().busy);
}

#[test]
fn tokens_accumulate_on_the_pending_reply() {
    init_logging();
    let (state, _) = submit(ChatState::new(), "hi");
    let (state, effects) = update(state, Msg::TokenArrived("Hel".to_string()));
    assert!(effects.is_empty());
    let (state, _) = update(state, Msg::TokenArrived("lo".to_string()));

    assert_eq!(state.view().messages[1].text, "Hello");
}

#[test]
fn token_without_pending_reply_is_dropped() {
    init_logging();
    let (state, _) = submit(ChatState::new(), "hi");
    let (state, _) = update(state, Msg::StreamFinished);
    let before = state.view();

    let (state, effects) = update(state, Msg::TokenArrived("late".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn stream_finish_clears_busy() {
    init_logging();
    let (state, _) = submit(ChatState::new(), "hi");
    let (state, _) = update(state, Msg::TokenArrived("answer".to_string()));
    let (state, _) = update(state, Msg::StreamFinished);

    let view = state.view();
    assert!(!view.busy);
    assert_eq!(view.messages[1].text, "answer");
}

#[test]
fn http_failure_embeds_status_and_body() {
    init_logging();
    let (state, _) = submit(ChatState::new(), "hi");
    let (state, _) = update(
        state,
        Msg::ReplyArrived(Err(ChatFailure::Status {
            code: 500,
            body: "boom".to_string(),
        })),
    );

    let view = state.view();
    assert!(!view.busy);
    let text = &view.messages[1].text;
    assert!(text.contains("500"), "missing status in {text:?}");
    assert!(text.contains("boom"), "missing body in {text:?}");
}

#[test]
fn transport_failure_becomes_a_message() {
    init_logging();
    let (state, _) = submit(ChatState::new(), "hi");
    let (state, _) = update(
        state,
        Msg::ReplyArrived(Err(ChatFailure::Transport(
            "connection refused".to_string(),
        ))),
    );

    let text = &state.view().messages[1].text;
    assert!(text.contains("connection refused"), "got {text:?}");
}

#[test]
fn reply_fills_text_and_sources() {
    init_logging();
    let (state, _) = submit(ChatState::new(), "hi");
    let reply = ChatReply {
        text: "From the docs.".to_string(),
        sources: vec![Source {
            source: "docs/a.pdf".to_string(),
            snippet: Some("excerpt".to_string()),
        }],
    };
    let (state, _) = update(state, Msg::ReplyArrived(Ok(reply.clone())));

    let view = state.view();
    assert_eq!(view.messages[1].text, reply.text);
    assert_eq!(view.messages[1].sources, reply.sources);
    assert!(!view.busy);
}

#[test]
fn empty_reply_uses_placeholder() {
    init_logging();
    let (state, _) = submit(ChatState::new(), "hi");
    let (state, _) = update(state, Msg::ReplyArrived(Ok(ChatReply::default())));

    assert_eq!(state.view().messages[1].text, NO_REPLY_PLACEHOLDER);
}

#[test]
fn resubmit_points_tokens_at_the_new_reply() {
    init_logging();
    let (state, _) = submit(ChatState::new(), "first");
    let (state, _) = submit(state, "second");
    let (state, _) = update(state, Msg::TokenArrived("x".to_string()));

    let view = state.view();
    assert_eq!(view.messages.len(), 4);
    assert_eq!(view.messages[1].text, "");
    assert_eq!(view.messages[3].text, "x");
}
