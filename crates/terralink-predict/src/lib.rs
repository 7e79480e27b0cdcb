#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

//! Link prediction over actor embeddings.
//!
//! The top of the terralink pipeline:
//!
//! - [`build_snapshot`] - aggregate a window of mention records, index it,
//!   build features, and embed every actor in one forward pass
//! - [`cosine_similarity`] - epsilon-guarded cosine over embedding rows
//! - [`predict`] - top-k unobserved partners per query actor, with
//!   deterministic first-seen tie-breaking
//!
//! # Example
//!
//! ```rust
//! use terralink_core::{ActorCode, MentionRecord};
//! use terralink_nn::ParamSource;
//! use terralink_predict::{build_snapshot, predict, PipelineConfig, PredictorConfig};
//!
//! let records = vec![
//!     MentionRecord::from_strs("e1", "m1", "USA", "CHN"),
//!     MentionRecord::from_strs("e2", "m2", "USA", "CHN"),
//!     MentionRecord::from_strs("e3", "m3", "CHN", "RUS"),
//! ];
//!
//! let config = PipelineConfig::new(ParamSource::Random { seed: Some(42) });
//! let snapshot = build_snapshot(&records, &[], &config).unwrap();
//!
//! let predictions = predict(
//!     &snapshot,
//!     &PredictorConfig {
//!         queries: vec![ActorCode::new("USA")],
//!         k: 1,
//!         known_locations: None,
//!     },
//! );
//! // CHN is an existing partner, so the only candidate is RUS.
//! assert_eq!(predictions[0].candidate, ActorCode::new("RUS"));
//! ```

mod error;
mod pipeline;
mod predict;
mod scoring;

pub use error::{Error, Result};
pub use pipeline::{build_snapshot, PipelineConfig, Snapshot};
pub use predict::{predict, Prediction, PredictorConfig};
pub use scoring::{cosine_similarity, EPSILON};
