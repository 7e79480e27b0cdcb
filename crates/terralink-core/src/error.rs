//! Error types for terralink-core.

use thiserror::Error;

/// Errors that can occur while building interaction graphs.
#[derive(Debug, Error)]
pub enum Error {
    /// The record join or aggregation produced zero edges for the requested
    /// window. A hard stop: the caller should pick a different window rather
    /// than proceed with an empty actor set.
    #[error("no interactions found in the requested window")]
    EmptyWindow,

    /// An actor code that should resolve to a graph id does not.
    #[error("unknown actor: {0}")]
    UnknownActor(String),
}

/// Result type alias for terralink-core.
pub type Result<T> = std::result::Result<T, Error>;
