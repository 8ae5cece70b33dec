use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::{load_deck, OutputFormat};
use crate::core::card::Card;
use crate::core::deck::Deck;
use crate::matching::card_set::CardSet;
use crate::matching::classify::SetTypes;
use crate::matching::engine::{SolveOptions, DEFAULT_SET_SIZE};

#[derive(Args)]
pub struct SolveArgs {
    /// Tab-delimited deck file (optionally gzip-compressed)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Number of cards in each set
    #[arg(short, long, default_value_t = DEFAULT_SET_SIZE)]
    pub set_size: usize,

    /// Search on all cores
    #[arg(long)]
    pub parallel: bool,
}

/// Execute solve subcommand
///
/// # Errors
///
/// Returns an error if the deck cannot be loaded or the output cannot be
/// serialized.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SolveArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut deck = load_deck(&args.input)?;

    let options = SolveOptions {
        set_size: args.set_size,
        parallel: args.parallel,
    };
    deck.solve_with(&options);

    match format {
        OutputFormat::Text => print_text_results(&deck),
        OutputFormat::Json => print_json_results(&args, &deck)?,
        OutputFormat::Tsv => print_tsv_results(&deck),
    }

    Ok(())
}

fn print_text_results(deck: &Deck) {
    println!("Feature values:");
    for (feature, values) in deck.feature_values() {
        println!("\t{feature}: {}", values.join(", "));
    }

    println!("Cards:");
    for (position, card) in deck.cards().iter().enumerate() {
        println!("\tCard {position}: {card}");
    }

    if deck.sets().is_empty() {
        println!("No matches found.");
        return;
    }

    println!("Sets:");
    for set in deck.sets() {
        match &set.set_types {
            Some(set_types) => println!("\t{set}\t{set_types}"),
            None => println!("\t{set}"),
        }
    }
}

#[derive(Serialize)]
struct SolveReport<'a> {
    input: String,
    set_size: usize,
    features: Vec<FeatureReport<'a>>,
    cards: Vec<CardReport<'a>>,
    sets: Vec<SetReport<'a>>,
}

#[derive(Serialize)]
struct FeatureReport<'a> {
    name: &'a str,
    values: Vec<&'a str>,
}

#[derive(Serialize)]
struct CardReport<'a> {
    position: usize,
    features: &'a Card,
}

#[derive(Serialize)]
struct SetReport<'a> {
    key: String,
    positions: &'a [usize],
    #[serde(skip_serializing_if = "Option::is_none")]
    set_types: Option<&'a SetTypes>,
}

impl<'a> SetReport<'a> {
    fn new(set: &'a CardSet) -> Self {
        Self {
            key: set.positions_string(),
            positions: set.positions.as_deref().unwrap_or_default(),
            set_types: set.set_types.as_ref(),
        }
    }
}

fn print_json_results(args: &SolveArgs, deck: &Deck) -> anyhow::Result<()> {
    let report = SolveReport {
        input: args.input.display().to_string(),
        set_size: args.set_size,
        features: deck
            .feature_values()
            .into_iter()
            .map(|(name, values)| FeatureReport { name, values })
            .collect(),
        cards: deck
            .cards()
            .iter()
            .enumerate()
            .map(|(position, features)| CardReport { position, features })
            .collect(),
        sets: deck.sets().iter().map(SetReport::new).collect(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_tsv_results(deck: &Deck) {
    let features: Vec<&str> = deck
        .schema()
        .map(|s| s.names().iter().map(String::as_str).collect())
        .unwrap_or_default();

    println!("positions\t{}", features.join("\t"));
    for set in deck.sets() {
        let columns: Vec<String> = features
            .iter()
            .map(|f| {
                set.set_types
                    .as_ref()
                    .and_then(|t| t.get(f))
                    .map_or_else(|| "NA".to_string(), |t| t.to_string())
            })
            .collect();
        println!("{}\t{}", set.positions_string(), columns.join("\t"));
    }
}
