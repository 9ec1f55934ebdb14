//! Pure projection of `SearchState` into what the widget displays.
//!
//! Deterministic and side-effect free; front-ends call it on every repaint.

use crate::state::{SearchPhase, SearchState};

/// Literal notices, preserved verbatim from the shipped widget.
pub const VALIDATION_NOTICE: &str = "Please enter something search.";
pub const EMPTY_RESULTS_NOTICE: &str = "No search results found.";
pub const QUERY_FAILURE_NOTICE: &str = "Search error please try search again";
pub const MALFORMED_RESPONSE_NOTICE: &str = "Search error unexpected server response";

const ENTRY_PREFIX: &str = "Result:";
const ENTRY_SEPARATOR: &str = "  \".......";
const ENTRY_SUFFIX: &str = ".......\"";

/// One numbered hit. Ordinals are 1-indexed in server-supplied order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderEntry {
    pub ordinal: usize,
    pub payload: String,
}

impl RenderEntry {
    /// Fixed prefix, ordinal, fixed separator, payload unmodified, fixed
    /// suffix.
    pub fn formatted(&self) -> String {
        format!(
            "{ENTRY_PREFIX}{}{ENTRY_SEPARATOR}{}{ENTRY_SUFFIX}",
            self.ordinal, self.payload
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPayload {
    /// Nothing to show: the decorative placeholder keeps the results slot.
    /// `searching` is true while a dispatched query has not settled.
    Placeholder { searching: bool },
    /// Inline text next to the input box, separate from the results area.
    ValidationNotice(&'static str),
    /// The results area overwritten with a literal message.
    Notice(&'static str),
    /// Enumerated hits.
    Entries(Vec<RenderEntry>),
}

pub fn project(state: &SearchState) -> RenderPayload {
    match &state.phase {
        SearchPhase::Idle => RenderPayload::Placeholder { searching: false },
        SearchPhase::Querying { .. } => RenderPayload::Placeholder { searching: true },
        SearchPhase::ValidationFailed => RenderPayload::ValidationNotice(VALIDATION_NOTICE),
        SearchPhase::Empty => RenderPayload::Notice(EMPTY_RESULTS_NOTICE),
        SearchPhase::QueryFailed(_) => RenderPayload::Notice(QUERY_FAILURE_NOTICE),
        SearchPhase::MalformedResponse(_) => RenderPayload::Notice(MALFORMED_RESPONSE_NOTICE),
        SearchPhase::Success(hits) => RenderPayload::Entries(
            hits.iter()
                .enumerate()
                .map(|(index, payload)| RenderEntry {
                    ordinal: index + 1,
                    payload: payload.clone(),
                })
                .collect(),
        ),
    }
}
