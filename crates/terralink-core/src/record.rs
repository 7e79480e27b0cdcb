//! Raw mention records.

use serde::{Deserialize, Serialize};

/// One mention-level join row from the upstream event feed: a mention of an
/// event, carrying the event's two actor codes.
///
/// Codes are kept raw here; normalization happens during aggregation so that
/// unresolvable codes can be dropped and reported in one place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MentionRecord {
    /// Global event identifier.
    pub event_id: String,
    /// Mention identifier (e.g. the article URL).
    pub mention_id: String,
    /// First actor code as reported upstream.
    pub actor1: String,
    /// Second actor code as reported upstream.
    pub actor2: String,
}

impl MentionRecord {
    /// Create a new mention record.
    pub fn new(
        event_id: impl Into<String>,
        mention_id: impl Into<String>,
        actor1: impl Into<String>,
        actor2: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            mention_id: mention_id.into(),
            actor1: actor1.into(),
            actor2: actor2.into(),
        }
    }

    /// Create from string slices (cloning into owned strings).
    pub fn from_strs(event_id: &str, mention_id: &str, actor1: &str, actor2: &str) -> Self {
        Self::new(event_id, mention_id, actor1, actor2)
    }
}
