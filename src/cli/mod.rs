//! Command-line interface for set-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **solve**: Find every set in a deck file
//! - **check**: Test whether specific cards of a deck form a set
//!
//! ## Usage
//!
//! ```text
//! # Find all sets of three
//! set-solver solve deck.set
//!
//! # Sets of four, searched on all cores, as JSON
//! set-solver --format json solve deck.set --set-size 4 --parallel
//!
//! # Are cards 0, 3 and 5 a set?
//! set-solver check deck.set 0-3-5
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::core::deck::Deck;
use crate::parsing;

pub mod check;
pub mod solve;

#[derive(Parser)]
#[command(name = "set-solver")]
#[command(version)]
#[command(about = "Find every valid group of cards in a Set-style deck")]
#[command(
    long_about = "set-solver reads a tab-delimited deck (first line: feature names, one card per following line) and finds every group of cards in which each feature is either the same on all cards or different on all cards.\n\nLines starting with # are comments; lines with the wrong number of fields are skipped with a warning."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    /// Print debug messages, including every combination checked
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find every set in a deck
    Solve(solve::SolveArgs),

    /// Check whether specific cards form a set
    Check(check::CheckArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

pub(crate) fn load_deck(path: &Path) -> anyhow::Result<Deck> {
    let deck = parsing::deck::parse_deck_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {e}", path.display()))?;

    tracing::info!(
        "Loaded {} cards with {} features from {}",
        deck.len(),
        deck.schema().map_or(0, |s| s.len()),
        path.display()
    );

    Ok(deck)
}
