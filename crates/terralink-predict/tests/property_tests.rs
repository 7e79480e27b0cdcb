//! Property-based tests for scoring and ranking invariants.

use proptest::prelude::*;
use std::collections::HashSet;
use terralink_core::{aggregate, ActorCode, AggregateConfig, InteractionGraph, MentionRecord};
use terralink_predict::{cosine_similarity, predict, PredictorConfig, Snapshot};

const CODES: [&str; 8] = ["USA", "CHN", "RUS", "FRA", "DEU", "IND", "BRA", "JPN"];

mod cosine_props {
    use super::*;

    fn arb_pair() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
        (1usize..16).prop_flat_map(|n| {
            (
                prop::collection::vec(-100.0f32..100.0, n),
                prop::collection::vec(-100.0f32..100.0, n),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn symmetric((x, y) in arb_pair()) {
            prop_assert_eq!(cosine_similarity(&x, &y), cosine_similarity(&y, &x));
        }

        #[test]
        fn bounded((x, y) in arb_pair()) {
            let s = cosine_similarity(&x, &y);
            prop_assert!(s.is_finite());
            prop_assert!((-1.0 - 1e-4..=1.0 + 1e-4).contains(&s));
        }

        #[test]
        fn self_similarity_is_one(x in prop::collection::vec(0.1f32..100.0, 1..16)) {
            let s = cosine_similarity(&x, &x);
            prop_assert!((s - 1.0).abs() < 1e-4);
        }
    }
}

mod ranking_props {
    use super::*;

    /// A snapshot over `n` actors: a star keeps every actor connected, extra
    /// edges and embeddings are arbitrary.
    fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
        (3usize..=CODES.len()).prop_flat_map(|n| {
            let extra_edges = prop::collection::vec((0..n, 0..n), 0..12);
            let embeddings = prop::collection::vec(
                prop::collection::vec(-10.0f32..10.0, 4),
                n,
            );
            (Just(n), extra_edges, embeddings).prop_map(|(n, extra, embeddings)| {
                let mut records = Vec::new();
                for i in 1..n {
                    records.push(MentionRecord::from_strs(
                        &format!("e{i}"),
                        &format!("m{i}"),
                        CODES[0],
                        CODES[i],
                    ));
                }
                for (j, &(src, dst)) in extra.iter().enumerate() {
                    let dst = if src == dst { (dst + 1) % n } else { dst };
                    records.push(MentionRecord::from_strs(
                        &format!("x{j}"),
                        &format!("y{j}"),
                        CODES[src],
                        CODES[dst],
                    ));
                }

                let agg = aggregate(&records, &AggregateConfig::default()).unwrap();
                let graph = InteractionGraph::from_table(agg.table());
                assert_eq!(graph.actor_count(), n);

                Snapshot {
                    table: agg.table().clone(),
                    graph,
                    embeddings,
                    skipped: Vec::new(),
                }
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn candidates_exclude_self_and_neighbors(
            snapshot in arb_snapshot(),
            query_idx in 0usize..CODES.len(),
            k in 1usize..10,
        ) {
            let query = ActorCode::new(CODES[query_idx % snapshot.graph.actor_count()]);
            let preds = predict(&snapshot, &PredictorConfig {
                queries: vec![query.clone()],
                k,
                known_locations: None,
            });

            let excluded: HashSet<ActorCode> = {
                let mut e = snapshot.graph.neighbors(&query);
                e.insert(query.clone());
                e
            };
            for p in &preds {
                prop_assert!(!excluded.contains(&p.candidate));
            }
        }

        #[test]
        fn output_is_sorted_and_truncated(
            snapshot in arb_snapshot(),
            k in 1usize..10,
        ) {
            let query = ActorCode::new(CODES[0]);
            let preds = predict(&snapshot, &PredictorConfig {
                queries: vec![query],
                k,
                known_locations: None,
            });

            prop_assert!(preds.len() <= k);
            for w in preds.windows(2) {
                prop_assert!(w[0].score >= w[1].score);
            }
        }

        #[test]
        fn ranking_is_deterministic(snapshot in arb_snapshot()) {
            let cfg = PredictorConfig {
                queries: snapshot.graph.vocabulary(),
                k: 5,
                known_locations: None,
            };
            prop_assert_eq!(predict(&snapshot, &cfg), predict(&snapshot, &cfg));
        }
    }
}
