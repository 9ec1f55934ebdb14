//! Search control flow as an explicit state machine.
//!
//! `reduce` is the only mutation path: it consumes the current state plus one
//! event and returns the next state along with at most one side-effect
//! description. Nothing here performs I/O, so every transition is testable
//! without a rendering surface or a live server.

use shared::{
    domain::{RequestId, ResultSet},
    error::QueryError,
};

/// Exactly one variant is active for display purposes at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPhase {
    /// No query has produced output yet.
    Idle,
    /// A dispatched query has not settled.
    Querying { request: RequestId },
    /// Non-empty hits, server order preserved.
    Success(ResultSet),
    /// A query completed with zero hits. A results-state, not an error.
    Empty,
    /// Submit rejected before any network activity.
    ValidationFailed,
    /// Transport or server failure; the reason is operator-facing.
    QueryFailed(String),
    /// The response body was not an array of strings.
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Live text of the input box, replaced on every keystroke.
    pub input: String,
    pub phase: SearchPhase,
    /// Correlation id handed to the next dispatched query.
    pub next_request: RequestId,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            phase: SearchPhase::Idle,
            next_request: RequestId(1),
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    InputChanged(String),
    SubmitRequested,
    QuerySettled {
        request: RequestId,
        outcome: Result<ResultSet, QueryError>,
    },
}

/// Side effect requested by a transition. The reducer never executes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    Dispatch { request: RequestId, query: String },
}

pub fn reduce(state: &SearchState, event: SearchEvent) -> (SearchState, Option<SearchCommand>) {
    match event {
        SearchEvent::InputChanged(text) => {
            let mut next = state.clone();
            next.input = text;
            (next, None)
        }
        SearchEvent::SubmitRequested => {
            // Length >= 1 with no trimming: whitespace-only input is valid.
            if state.input.is_empty() {
                let mut next = state.clone();
                next.phase = SearchPhase::ValidationFailed;
                return (next, None);
            }
            let request = state.next_request;
            let mut next = state.clone();
            next.phase = SearchPhase::Querying { request };
            next.next_request = request.next();
            let command = SearchCommand::Dispatch {
                request,
                query: state.input.clone(),
            };
            (next, Some(command))
        }
        SearchEvent::QuerySettled { request: _, outcome } => {
            // Last write wins: a settle overwrites the phase wholesale no
            // matter which request it answers or which phase it lands in.
            // Overlapping submits stay independent and unserialized.
            let mut next = state.clone();
            next.phase = match outcome {
                Ok(hits) if hits.is_empty() => SearchPhase::Empty,
                Ok(hits) => SearchPhase::Success(hits),
                Err(QueryError::MalformedResponse(reason)) => {
                    SearchPhase::MalformedResponse(reason)
                }
                Err(QueryError::Transport(reason)) => SearchPhase::QueryFailed(reason),
            };
            (next, None)
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
