//! Top-k link prediction.
//!
//! Scores every plausible-but-unobserved partner for each query actor by
//! cosine similarity of their embeddings, and returns the k best. Candidates
//! are drawn from the snapshot's vocabulary in first-seen order, which doubles
//! as the tie-break: the descending sort is stable, so equal scores keep
//! vocabulary order and repeated calls produce identical rankings.

use crate::pipeline::Snapshot;
use crate::scoring::cosine_similarity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use terralink_core::ActorCode;

/// Link prediction request.
#[derive(Debug, Clone, Default)]
pub struct PredictorConfig {
    /// Actors to predict partners for. Queries absent from the snapshot's
    /// index are skipped, not errors.
    pub queries: Vec<ActorCode>,
    /// Number of candidates to return per query. Fewer are returned when
    /// fewer exist; zero candidates yields zero rows, not an error.
    pub k: usize,
    /// Optional filter: restrict candidates to actors with a resolvable
    /// location (or any other externally known subset). `None` falls back to
    /// the full vocabulary.
    pub known_locations: Option<HashSet<ActorCode>>,
}

/// A predicted link, safe to render directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The query actor.
    pub actor: ActorCode,
    /// The predicted partner.
    pub candidate: ActorCode,
    /// Cosine similarity, rounded to 3 decimals.
    pub score: f32,
}

fn round3(score: f32) -> f32 {
    (score * 1000.0).round() / 1000.0
}

/// Predict the top-k unobserved partners for each query actor.
///
/// For a query actor A the exclusion set is every actor already connected to
/// A in either direction, plus A itself; nothing in it is ever returned.
pub fn predict(snapshot: &Snapshot, config: &PredictorConfig) -> Vec<Prediction> {
    let mut predictions = Vec::new();
    let vocabulary = snapshot.graph.vocabulary();

    for query in &config.queries {
        let Some(query_id) = snapshot.graph.actor_id(query) else {
            continue;
        };

        let mut excluded = snapshot.graph.neighbors(query);
        excluded.insert(query.clone());

        // Candidates in vocabulary (first-seen) order; stable sort below
        // keeps that order among equal scores.
        let mut scored: Vec<(&ActorCode, f32)> = Vec::new();
        for (candidate_id, candidate) in vocabulary.iter().enumerate() {
            if excluded.contains(candidate) {
                continue;
            }
            if let Some(known) = &config.known_locations {
                if !known.contains(candidate) {
                    continue;
                }
            }
            let score = cosine_similarity(
                &snapshot.embeddings[query_id],
                &snapshot.embeddings[candidate_id],
            );
            scored.push((candidate, score));
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(config.k);

        for (candidate, score) in scored {
            predictions.push(Prediction {
                actor: query.clone(),
                candidate: candidate.clone(),
                score: round3(score),
            });
        }
    }

    predictions
}
