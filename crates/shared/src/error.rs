use thiserror::Error;

/// Failure of one outbound query, after validation passed.
///
/// Timeouts, DNS failures, refused connections, and non-2xx statuses all
/// collapse into `Transport`; the reason string is operator-facing only and
/// never shown verbatim to the user. A body that decodes but is not an array
/// of strings is `MalformedResponse`, surfaced distinctly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl QueryError {
    pub fn reason(&self) -> &str {
        match self {
            Self::Transport(reason) | Self::MalformedResponse(reason) => reason,
        }
    }
}
