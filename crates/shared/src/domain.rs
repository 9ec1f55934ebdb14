use serde::{Deserialize, Serialize};

/// Correlation id for one outbound query. Monotonic per widget session;
/// carried through dispatch, settle, and the diagnostic log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub i64);

impl RequestId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Ordered sequence of hits, exactly as the server returned them.
pub type ResultSet = Vec<String>;
