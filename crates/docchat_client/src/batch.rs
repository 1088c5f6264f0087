//! Batch response consumer for the `/chat_text` endpoint.

use serde::Deserialize;

use crate::cleanup::clean_answer;
use crate::stream::ChatRequest;
use crate::{BackendConfig, ChatError, ChatReply, SourceDoc};

#[derive(Deserialize, Default)]
struct ReplyBody {
    #[serde(default)]
    text: String,
    #[serde(default)]
    sources: Vec<SourceDoc>,
}

/// Send a query and wait for the complete reply. Non-success statuses and
/// transport failures come back as values; the UI renders them inline.
pub async fn send_batch(
    http: &reqwest::Client,
    config: &BackendConfig,
    query: &str,
) -> Result<ChatReply, ChatError> {
    let response = http
        .post(config.chat_text_url())
        .json(&ChatRequest::new(query))
        .send()
        .await
        .map_err(|err| ChatError::Transport(err.to_string()))?;

    let status = response.status();
    let raw = response
        .text()
        .await
        .map_err(|err| ChatError::Transport(err.to_string()))?;
    if !status.is_success() {
        return Err(ChatError::Status {
            code: status.as_u16(),
            body: raw,
        });
    }

    // A body that is not the expected JSON is still an answer: show it raw.
    let body = serde_json::from_str::<ReplyBody>(&raw).unwrap_or_else(|_| ReplyBody {
        text: raw,
        sources: Vec::new(),
    });

    Ok(ChatReply {
        text: clean_answer(&body.text),
        sources: dedupe_sources(body.sources),
    })
}

/// Keep one entry per distinct `source` path. A later duplicate replaces the
/// earlier entry's data but keeps its first-seen position.
pub fn dedupe_sources(sources: Vec<SourceDoc>) -> Vec<SourceDoc> {
    let mut unique: Vec<SourceDoc> = Vec::with_capacity(sources.len());
    for source in sources {
        match unique.iter_mut().find(|seen| seen.source == source.source) {
            Some(seen) => *seen = source,
            None => unique.push(source),
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::dedupe_sources;
    use crate::SourceDoc;

    fn doc(source: &str, snippet: Option<&str>) -> SourceDoc {
        SourceDoc {
            source: source.to_string(),
            snippet: snippet.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn later_duplicates_win_but_keep_position() {
        let deduped = dedupe_sources(vec![
            doc("a", None),
            doc("b", None),
            doc("a", Some("x")),
        ]);

        assert_eq!(deduped, vec![doc("a", Some("x")), doc("b", None)]);
    }

    #[test]
    fn distinct_sources_pass_through() {
        let sources = vec![doc("a", None), doc("b", Some("y"))];
        assert_eq!(dedupe_sources(sources.clone()), sources);
    }
}
