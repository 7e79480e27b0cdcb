//! Weighted aggregation of mention records and the interaction graph.
//!
//! Raw records are counted into an [`EdgeTable`] — a flat, first-seen-ordered
//! list of (actor1, actor2, weight) rows — and the table is then indexed into
//! an [`InteractionGraph`], a petgraph directed graph whose node indices are
//! the dense actor ids the embedding model and predictor work with.
//!
//! The table is the presentation-facing view (stable row order, per-actor
//! lookup); the graph is the session snapshot structure (dense ids, neighbor
//! queries, model-consumable edge arrays). Both are recomputed per query
//! window and never mutated in place.

use crate::{ActorCode, Error, MentionRecord, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Relation id assigned to every aggregated edge.
///
/// The schema supports multiple interaction categories, but the upstream
/// feed currently populates a single one.
pub const INTERACTION_RELATION: usize = 0;

/// Aggregation configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateConfig {
    /// When `false` (default), edges are keyed on the ordered
    /// (actor1, actor2) pair as the upstream feed reports them, so (A,B) and
    /// (B,A) count separately. When `true`, the key is the sorted pair and
    /// both directions fold into one edge.
    ///
    /// [`EdgeTable::edges_for`] treats edges symmetrically under either
    /// policy; the flag only changes how weights accumulate.
    pub symmetrize: bool,
}

/// One row of the aggregated weight table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRow {
    /// First endpoint (as keyed, see [`AggregateConfig::symmetrize`]).
    pub actor1: ActorCode,
    /// Second endpoint.
    pub actor2: ActorCode,
    /// Number of mention records that produced this pair.
    pub weight: u64,
}

/// The aggregated weight table: one row per actor-pair key, in first-seen
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EdgeTable {
    rows: Vec<EdgeRow>,
}

/// An edge touching a queried actor, with the other endpoint normalized into
/// a uniform column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborEdge {
    /// The endpoint opposite the queried actor.
    pub code: ActorCode,
    /// Aggregated weight of the edge.
    pub weight: u64,
}

/// Result of a per-actor edge lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorEdges {
    /// The queried actor (the "source" side of every row).
    pub source: ActorCode,
    /// Edges touching the actor, regardless of which side it appeared on.
    pub edges: Vec<NeighborEdge>,
    /// Opposite-endpoint codes that failed normalization and were dropped.
    pub skipped: Vec<String>,
}

impl EdgeTable {
    /// Rows in first-seen order.
    pub fn rows(&self) -> &[EdgeRow] {
        &self.rows
    }

    /// Number of distinct actor-pair keys.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All edges touching `code`, from either side.
    ///
    /// The opposite endpoint of each row is re-normalized; endpoints that
    /// fail normalization are dropped from the result and collected into
    /// `skipped` instead of failing the lookup.
    pub fn edges_for(&self, code: &ActorCode) -> ActorEdges {
        let mut edges = Vec::new();
        let mut skipped = Vec::new();

        for row in &self.rows {
            let other = if &row.actor1 == code {
                &row.actor2
            } else if &row.actor2 == code {
                &row.actor1
            } else {
                continue;
            };

            match ActorCode::normalize(other.as_str()) {
                Some(normalized) => edges.push(NeighborEdge {
                    code: normalized,
                    weight: row.weight,
                }),
                None => skipped.push(other.as_str().to_string()),
            }
        }

        ActorEdges {
            source: code.clone(),
            edges,
            skipped,
        }
    }
}

/// Result of aggregating one window of mention records.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    table: EdgeTable,
    skipped: Vec<String>,
}

impl Aggregation {
    /// The aggregated weight table.
    pub fn table(&self) -> &EdgeTable {
        &self.table
    }

    /// Consume the aggregation, returning the table.
    pub fn into_table(self) -> EdgeTable {
        self.table
    }

    /// Raw codes from records that were dropped: endpoints that failed
    /// normalization, plus one entry per dropped self-loop record.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}

/// Count mention records into a weighted edge table.
///
/// Records are grouped by actor-pair key (see [`AggregateConfig`]) and the
/// group sizes become edge weights. Records with an unnormalizable endpoint,
/// and self-loop records, are skipped and reported on the [`Aggregation`].
///
/// # Errors
///
/// [`Error::EmptyWindow`] if the input is empty or every record was dropped —
/// an empty window is a terminal condition for the caller, never a silent
/// zero-actor graph.
pub fn aggregate(records: &[MentionRecord], config: &AggregateConfig) -> Result<Aggregation> {
    if records.is_empty() {
        return Err(Error::EmptyWindow);
    }

    let mut keys: HashMap<(ActorCode, ActorCode), usize> = HashMap::new();
    let mut rows: Vec<EdgeRow> = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    for record in records {
        let Some(actor1) = ActorCode::normalize(&record.actor1) else {
            skipped.push(record.actor1.clone());
            continue;
        };
        let Some(actor2) = ActorCode::normalize(&record.actor2) else {
            skipped.push(record.actor2.clone());
            continue;
        };
        if actor1 == actor2 {
            // Self-loops carry no relational signal; the edge model excludes
            // them outright.
            skipped.push(actor1.as_str().to_string());
            continue;
        }

        let key = if config.symmetrize && actor2 < actor1 {
            (actor2, actor1)
        } else {
            (actor1, actor2)
        };

        match keys.get(&key) {
            Some(&idx) => rows[idx].weight += 1,
            None => {
                keys.insert(key.clone(), rows.len());
                rows.push(EdgeRow {
                    actor1: key.0,
                    actor2: key.1,
                    weight: 1,
                });
            }
        }
    }

    if rows.is_empty() {
        return Err(Error::EmptyWindow);
    }

    Ok(Aggregation {
        table: EdgeTable { rows },
        skipped,
    })
}

/// Edge payload in the interaction graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Aggregated mention count.
    pub weight: u64,
    /// Interaction category (currently always [`INTERACTION_RELATION`]).
    pub relation: usize,
}

/// The aggregated window as a directed graph with dense actor ids.
///
/// Node indices are minted in first-seen order over the edge table (actor1
/// before actor2, rows in table order), so `NodeIndex::index()` is the dense
/// actor id in `[0, N)` that the feature matrix and embedding matrix are
/// aligned to. The id assignment is stable for the lifetime of one graph;
/// embeddings computed against one graph are meaningless against another.
#[derive(Debug, Clone)]
pub struct InteractionGraph {
    graph: DiGraph<ActorCode, Interaction>,
    index: HashMap<ActorCode, NodeIndex>,
}

impl InteractionGraph {
    /// Build the graph from an aggregated edge table.
    pub fn from_table(table: &EdgeTable) -> Self {
        fn node_of(
            graph: &mut DiGraph<ActorCode, Interaction>,
            index: &mut HashMap<ActorCode, NodeIndex>,
            code: &ActorCode,
        ) -> NodeIndex {
            if let Some(&idx) = index.get(code) {
                return idx;
            }
            let idx = graph.add_node(code.clone());
            index.insert(code.clone(), idx);
            idx
        }

        let mut graph = DiGraph::new();
        let mut index: HashMap<ActorCode, NodeIndex> = HashMap::new();

        for row in table.rows() {
            let a = node_of(&mut graph, &mut index, &row.actor1);
            let b = node_of(&mut graph, &mut index, &row.actor2);
            graph.add_edge(
                a,
                b,
                Interaction {
                    weight: row.weight,
                    relation: INTERACTION_RELATION,
                },
            );
        }

        Self { graph, index }
    }

    /// Number of actors.
    pub fn actor_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of aggregated edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Dense id for an actor code, if present.
    pub fn actor_id(&self, code: &ActorCode) -> Option<usize> {
        self.index.get(code).map(|ix| ix.index())
    }

    /// Dense id for an actor code, or [`Error::UnknownActor`].
    pub fn require_actor_id(&self, code: &ActorCode) -> Result<usize> {
        self.actor_id(code)
            .ok_or_else(|| Error::UnknownActor(code.as_str().to_string()))
    }

    /// Actor code for a dense id, if in range.
    pub fn code(&self, id: usize) -> Option<&ActorCode> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    /// All actor codes in dense id order.
    pub fn vocabulary(&self) -> Vec<ActorCode> {
        self.graph.node_weights().cloned().collect()
    }

    /// Whether an actor is present.
    pub fn contains(&self, code: &ActorCode) -> bool {
        self.index.contains_key(code)
    }

    /// Codes adjacent to `code` in either direction.
    ///
    /// This is the exclusion set the link predictor uses: edge direction is
    /// an artifact of how the upstream feed ordered the pair, so adjacency is
    /// treated symmetrically.
    pub fn neighbors(&self, code: &ActorCode) -> HashSet<ActorCode> {
        let Some(&idx) = self.index.get(code) else {
            return HashSet::new();
        };
        self.graph
            .neighbors_undirected(idx)
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Edge endpoints as (source id, destination id) pairs, in edge insertion
    /// order.
    pub fn edge_endpoints(&self) -> Vec<(usize, usize)> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (a.index(), b.index()))
            .collect()
    }

    /// Relation id per edge, aligned with [`InteractionGraph::edge_endpoints`].
    pub fn edge_relations(&self) -> Vec<usize> {
        self.graph
            .edge_weights()
            .map(|interaction| interaction.relation)
            .collect()
    }

    /// Get the underlying petgraph for advanced operations.
    pub fn as_petgraph(&self) -> &DiGraph<ActorCode, Interaction> {
        &self.graph
    }
}
