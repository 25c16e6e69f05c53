use std::fmt::Display;
use std::future;

use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;

use crate::application::TextStream;
use crate::domain::DomainError;

const DONE_MARKER: &str = "[DONE]";

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Default, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// Turn a chat-completions server-sent-event body into its text deltas.
///
/// Event framing is left to `eventsource-stream`. `data: [DONE]` ends the
/// stream; events without content (role-only deltas, keep-alives) are skipped.
pub fn decode_text_deltas<S, B, E>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    bytes
        .eventsource()
        .take_while(|event| {
            future::ready(!matches!(event, Ok(event) if event.data.trim() == DONE_MARKER))
        })
        .filter_map(|event| {
            future::ready(match event {
                Ok(event) => parse_event_data(&event.data).transpose(),
                Err(e) => Some(Err(DomainError::upstream(format!(
                    "completion stream interrupted: {e}"
                )))),
            })
        })
        .boxed()
}

/// Text carried by one event's `data`, if any.
fn parse_event_data(data: &str) -> Result<Option<String>, DomainError> {
    if data.trim().is_empty() {
        return Ok(None);
    }

    let chunk: StreamChunk = serde_json::from_str(data)
        .map_err(|e| DomainError::upstream(format!("malformed stream chunk: {e}")))?;
    let text: String = chunk
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    Ok((!text.is_empty()).then_some(text))
}
