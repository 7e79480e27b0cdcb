//! Node feature construction.
//!
//! Maps each actor in a graph to a fixed-width numeric row drawn from an
//! external country attribute table: GDP, trade balance, and a
//! category-encoded political-regime label. The attribute table comes from a
//! scraping collaborator, so numeric fields arrive as strings with currency
//! symbols and thousands separators; they are sanitized here rather than
//! upstream.
//!
//! Actors with no country record get an all-zero row. That is deliberate —
//! an unknown actor must not block embedding the rest of the graph — but it
//! makes unknown actors indistinguishable from known actors whose attributes
//! are all zero.

use crate::graph::InteractionGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Width of a feature row: GDP, trade balance, regime category.
pub const FEATURE_DIM: usize = 3;

/// One row of the country attribute table, keyed by ISO3 code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// ISO3 country code.
    pub code: String,
    /// GDP in millions USD, possibly with formatting characters.
    pub gdp: String,
    /// Trade balance in billions USD, possibly with formatting characters.
    pub trade_balance: String,
    /// Political-regime label ("Full democracy", "Hybrid regime", ...).
    pub regime: Option<String>,
}

/// An N x [`FEATURE_DIM`] feature matrix in dense actor-id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    data: Vec<f32>,
    rows: usize,
}

impl FeatureMatrix {
    /// Number of rows (one per actor id).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        FEATURE_DIM
    }

    /// Row for actor id `i`, if in range.
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.rows {
            return None;
        }
        Some(&self.data[i * FEATURE_DIM..(i + 1) * FEATURE_DIM])
    }

    /// Row-major backing slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume into the row-major backing vector.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Strip formatting characters from a scraped numeric field and parse it.
///
/// Everything outside `[0-9.-]` is removed ("$1,234" -> "1234"); values that
/// still fail to parse default to 0.0.
fn sanitize_numeric(raw: &str) -> f32 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Category-encode regime labels: distinct labels sorted, each mapped to its
/// position. Missing labels encode as -1.
fn encode_regimes(countries: &[CountryRecord]) -> HashMap<&str, f32> {
    let mut labels: Vec<&str> = countries
        .iter()
        .filter_map(|c| c.regime.as_deref())
        .collect();
    labels.sort_unstable();
    labels.dedup();
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| (label, i as f32))
        .collect()
}

/// Build the node feature matrix for a graph.
///
/// The result has exactly one row per actor id, in id order. Actors present
/// in the attribute table get (GDP, trade balance, regime category); absent
/// actors get zeros.
pub fn build_features(countries: &[CountryRecord], graph: &InteractionGraph) -> FeatureMatrix {
    let regime_codes = encode_regimes(countries);
    let by_code: HashMap<&str, &CountryRecord> =
        countries.iter().map(|c| (c.code.as_str(), c)).collect();

    let n = graph.actor_count();
    let mut data = Vec::with_capacity(n * FEATURE_DIM);

    for code in graph.vocabulary() {
        match by_code.get(code.as_str()) {
            Some(country) => {
                data.push(sanitize_numeric(&country.gdp));
                data.push(sanitize_numeric(&country.trade_balance));
                data.push(
                    country
                        .regime
                        .as_deref()
                        .and_then(|label| regime_codes.get(label).copied())
                        .unwrap_or(-1.0),
                );
            }
            None => data.extend_from_slice(&[0.0; FEATURE_DIM]),
        }
    }

    FeatureMatrix { data, rows: n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregate, AggregateConfig, MentionRecord};

    fn graph() -> InteractionGraph {
        let records = vec![
            MentionRecord::from_strs("e1", "m1", "USA", "CHN"),
            MentionRecord::from_strs("e2", "m2", "CHN", "RUS"),
        ];
        let agg = aggregate(&records, &AggregateConfig::default()).unwrap();
        InteractionGraph::from_table(agg.table())
    }

    fn country(code: &str, gdp: &str, trade: &str, regime: Option<&str>) -> CountryRecord {
        CountryRecord {
            code: code.to_string(),
            gdp: gdp.to_string(),
            trade_balance: trade.to_string(),
            regime: regime.map(str::to_string),
        }
    }

    #[test]
    fn sanitize_strips_formatting() {
        assert_eq!(sanitize_numeric("$1,234"), 1234.0);
        assert_eq!(sanitize_numeric("27720.7"), 27720.7);
        assert_eq!(sanitize_numeric("-42.5 bn"), -42.5);
        assert_eq!(sanitize_numeric("n/a"), 0.0);
        assert_eq!(sanitize_numeric(""), 0.0);
    }

    #[test]
    fn known_actors_get_attribute_rows() {
        let countries = vec![
            country("USA", "$27,720,700", "-773.4", Some("Flawed democracy")),
            country("CHN", "17,794,800", "593.9", Some("Authoritarian")),
        ];
        let feats = build_features(&countries, &graph());

        assert_eq!(feats.rows(), 3);
        assert_eq!(feats.cols(), FEATURE_DIM);

        // Regime codes: sorted labels -> Authoritarian = 0, Flawed democracy = 1
        assert_eq!(feats.row(0).unwrap(), &[27_720_700.0, -773.4, 1.0]);
        assert_eq!(feats.row(1).unwrap(), &[17_794_800.0, 593.9, 0.0]);
    }

    #[test]
    fn missing_actor_is_all_zero() {
        let countries = vec![
            country("USA", "27720700", "-773.4", Some("Flawed democracy")),
            country("CHN", "17794800", "593.9", Some("Authoritarian")),
        ];
        let feats = build_features(&countries, &graph());

        // RUS has no attribute row
        assert_eq!(feats.row(2).unwrap(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn missing_regime_encodes_negative_one() {
        let countries = vec![country("USA", "1", "2", None)];
        let feats = build_features(&countries, &graph());
        assert_eq!(feats.row(0).unwrap(), &[1.0, 2.0, -1.0]);
    }

    #[test]
    fn row_out_of_range_is_none() {
        let feats = build_features(&[], &graph());
        assert!(feats.row(3).is_none());
    }
}
