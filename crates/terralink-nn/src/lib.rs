#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

//! Relational graph convolution for actor embeddings.
//!
//! This crate holds the parametric half of the terralink pipeline:
//!
//! - [`RelGraphConv`] - A single relation-aware convolution layer
//! - [`RgcnEncoder`] - The two-layer encoder with a final linear projection
//! - [`ParamSource`] - Explicit parameter origin (seeded random init or a
//!   safetensors checkpoint)
//!
//! Inputs are a node feature matrix, an edge list of dense node ids, and a
//! relation tag per edge; output is one embedding row per node. There is no
//! training loop — inference only, over whatever parameters the caller
//! supplies.

mod conv;
mod encoder;
mod error;

pub use conv::RelGraphConv;
pub use encoder::{EncoderConfig, ParamSource, RgcnEncoder};
pub use error::{Error, Result};

// Re-export the tensor types that appear in this crate's public API.
pub use candle_core::{Device, Tensor};
