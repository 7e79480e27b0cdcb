#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]

//! Core types for country-interaction graphs.
//!
//! This crate provides the data layer of the terralink pipeline:
//!
//! - [`ActorCode`] - A 3-letter actor code (ISO3 country code or pass-through
//!   entity code) with best-effort normalization
//! - [`MentionRecord`] - A raw (event, mention, actor1, actor2) input row
//! - [`aggregate`] - Count mention records into a weighted [`EdgeTable`]
//! - [`InteractionGraph`] - The aggregated table indexed as a petgraph
//!   directed graph with dense, first-seen actor ids
//! - [`build_features`] - An N x 3 node feature matrix aligned to actor ids
//!
//! Edges are derived data: each query window is aggregated from scratch into
//! a fresh table and graph, and the actor ids minted for one graph are never
//! valid against another.
//!
//! # Example
//!
//! ```rust
//! use terralink_core::{aggregate, AggregateConfig, InteractionGraph, MentionRecord};
//!
//! let records = vec![
//!     MentionRecord::from_strs("e1", "m1", "USA", "CHN"),
//!     MentionRecord::from_strs("e2", "m2", "USA", "CHN"),
//!     MentionRecord::from_strs("e3", "m3", "CHN", "RUS"),
//! ];
//!
//! let agg = aggregate(&records, &AggregateConfig::default()).unwrap();
//! let graph = InteractionGraph::from_table(agg.table());
//!
//! assert_eq!(graph.actor_count(), 3);
//! assert_eq!(graph.edge_count(), 2);
//! ```

mod actor;
mod error;
mod features;
mod graph;
mod record;

pub use actor::ActorCode;
pub use error::{Error, Result};
pub use features::{build_features, CountryRecord, FeatureMatrix, FEATURE_DIM};
pub use graph::{
    aggregate, ActorEdges, AggregateConfig, Aggregation, EdgeRow, EdgeTable, Interaction,
    InteractionGraph, NeighborEdge, INTERACTION_RELATION,
};
pub use record::MentionRecord;

// Re-export petgraph for advanced graph operations
pub use petgraph;
