//! Error types for terralink-nn.

use thiserror::Error;

/// Inference errors.
///
/// Shape and contract violations are programming or data errors; they abort
/// the embedding step and are never coerced into a best-effort result.
#[derive(Debug, Error)]
pub enum Error {
    /// Candle tensor error.
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    /// Feature matrix width does not match the configured input dimension.
    #[error("feature width mismatch: expected {expected} columns, got {got}")]
    FeatureWidthMismatch { expected: usize, got: usize },

    /// Edge endpoint out of range for the node count.
    #[error("edge {edge} references node {node}, but the graph has {nodes} nodes")]
    InvalidEdge {
        edge: usize,
        node: usize,
        nodes: usize,
    },

    /// Relation tag out of range for the configured relation count.
    #[error("edge {edge} has relation {relation}, but the layer supports {relations} relations")]
    InvalidRelation {
        edge: usize,
        relation: usize,
        relations: usize,
    },

    /// Edge list and relation tag list disagree in length.
    #[error("edge index has {edges} edges but {tags} relation tags")]
    EdgeTagMismatch { edges: usize, tags: usize },

    /// Invalid configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for terralink-nn.
pub type Result<T> = std::result::Result<T, Error>;
