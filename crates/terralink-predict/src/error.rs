//! Error types for terralink-predict.

use thiserror::Error;

/// Pipeline errors.
///
/// Data-sparsity conditions (an empty window) come through from the core
/// crate and are recoverable by choosing a different window; inference
/// contract violations come through from the model crate and are fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// Graph construction error.
    #[error(transparent)]
    Graph(#[from] terralink_core::Error),

    /// Embedding inference error.
    #[error(transparent)]
    Inference(#[from] terralink_nn::Error),
}

/// Result type alias for terralink-predict.
pub type Result<T> = std::result::Result<T, Error>;
