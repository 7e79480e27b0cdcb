//! Terralink CLI - country-interaction graphs from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Aggregate a records CSV and print the weighted edge table
//! terralink edges records.csv
//!
//! # Fold both directions of a pair into one edge
//! terralink edges records.csv --symmetrize
//!
//! # Edges touching one actor
//! terralink edges records.csv --actor CHN
//!
//! # Full pipeline: predictions for USA and CHN as JSON
//! terralink predict records.csv --countries countries.csv \
//!     --query USA --query CHN -k 5 --seed 42
//! ```
//!
//! Records CSV columns: `event_id,mention_id,actor1,actor2` (with header).
//! Countries CSV columns: `code,gdp,trade_balance,regime` (with header;
//! `regime` may be empty).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use terralink_core::{
    aggregate, ActorCode, AggregateConfig, CountryRecord, MentionRecord,
};
use terralink_nn::ParamSource;
use terralink_predict::{build_snapshot, predict, PipelineConfig, PredictorConfig};

#[derive(Parser)]
#[command(name = "terralink")]
#[command(about = "Country-interaction graph and link prediction CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a records CSV into a weighted edge table
    Edges {
        /// Records CSV (event_id,mention_id,actor1,actor2)
        records: PathBuf,

        /// Key edges on the sorted actor pair instead of the reported order
        #[arg(long)]
        symmetrize: bool,

        /// Only show edges touching this actor code
        #[arg(long)]
        actor: Option<String>,
    },

    /// Run the full pipeline and print ranked link predictions as JSON
    Predict {
        /// Records CSV (event_id,mention_id,actor1,actor2)
        records: PathBuf,

        /// Country attribute CSV (code,gdp,trade_balance,regime)
        #[arg(long)]
        countries: Option<PathBuf>,

        /// Query actor codes (repeatable)
        #[arg(long = "query", required = true)]
        queries: Vec<String>,

        /// Predictions per query actor
        #[arg(short, long, default_value_t = 5)]
        k: usize,

        /// Seed for random parameter initialization
        #[arg(long)]
        seed: Option<u64>,

        /// Safetensors checkpoint with pretrained encoder parameters
        #[arg(long, conflicts_with = "seed")]
        checkpoint: Option<PathBuf>,

        /// Key edges on the sorted actor pair
        #[arg(long)]
        symmetrize: bool,
    },
}

fn read_records(path: &Path) -> Result<Vec<MentionRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: MentionRecord =
            row.with_context(|| format!("parsing records from {}", path.display()))?;
        records.push(record);
    }
    Ok(records)
}

fn read_countries(path: &Path) -> Result<Vec<CountryRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut countries = Vec::new();
    for row in reader.deserialize() {
        let country: CountryRecord =
            row.with_context(|| format!("parsing countries from {}", path.display()))?;
        countries.push(country);
    }
    Ok(countries)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Edges {
            records,
            symmetrize,
            actor,
        } => {
            let records = read_records(&records)?;
            let agg = aggregate(&records, &AggregateConfig { symmetrize })
                .context("aggregating records")?;

            match actor {
                Some(code) => {
                    let code = ActorCode::new(code.to_ascii_uppercase());
                    let lookup = agg.table().edges_for(&code);
                    for edge in &lookup.edges {
                        println!("{}\t{}\t{}", lookup.source, edge.code, edge.weight);
                    }
                    if !lookup.skipped.is_empty() {
                        eprintln!("skipped codes: {}", lookup.skipped.join(", "));
                    }
                }
                None => {
                    for row in agg.table().rows() {
                        println!("{}\t{}\t{}", row.actor1, row.actor2, row.weight);
                    }
                }
            }
            if !agg.skipped().is_empty() {
                eprintln!("skipped codes: {}", agg.skipped().join(", "));
            }
        }

        Commands::Predict {
            records,
            countries,
            queries,
            k,
            seed,
            checkpoint,
            symmetrize,
        } => {
            let records = read_records(&records)?;
            let countries = match countries {
                Some(path) => read_countries(&path)?,
                None => Vec::new(),
            };

            let params = match checkpoint {
                Some(path) => ParamSource::Checkpoint(path),
                None => ParamSource::Random { seed },
            };
            let mut config = PipelineConfig::new(params);
            config.aggregate = AggregateConfig { symmetrize };

            let snapshot =
                build_snapshot(&records, &countries, &config).context("building snapshot")?;

            let predictions = predict(
                &snapshot,
                &PredictorConfig {
                    queries: queries
                        .iter()
                        .map(|q| ActorCode::new(q.to_ascii_uppercase()))
                        .collect(),
                    k,
                    known_locations: None,
                },
            );

            println!("{}", serde_json::to_string_pretty(&predictions)?);
            if !snapshot.skipped.is_empty() {
                eprintln!("skipped codes: {}", snapshot.skipped.join(", "));
            }
        }
    }

    Ok(())
}
