use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::{load_deck, OutputFormat};
use crate::core::card::Card;
use crate::matching::card_set::CardSet;
use crate::matching::classify::{GroupMatch, SetTypes};
use crate::utils::validation::parse_positions;

#[derive(Args)]
pub struct CheckArgs {
    /// Tab-delimited deck file (optionally gzip-compressed)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Card positions, e.g. `0 3 5` or `0-3-5`
    #[arg(required = true, num_args = 1..)]
    pub positions: Vec<String>,
}

/// Execute check subcommand
///
/// # Errors
///
/// Returns an error if the deck cannot be loaded or a position is invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckArgs, format: OutputFormat) -> anyhow::Result<()> {
    let deck = load_deck(&args.input)?;
    let positions = parse_positions(&args.positions, deck.len())?;

    let cards: Vec<Card> = positions
        .iter()
        .filter_map(|&p| deck.card(p).cloned())
        .collect();
    let set = CardSet::new(cards).with_positions(positions);
    let result = set.check_set();

    match format {
        OutputFormat::Text => print_text_result(&set, &result),
        OutputFormat::Json => print_json_result(&set, &result)?,
        OutputFormat::Tsv => print_tsv_result(&set, &result),
    }

    Ok(())
}

fn print_text_result(set: &CardSet, result: &GroupMatch) {
    let positions = set.positions.as_deref().unwrap_or_default();
    println!("Cards:");
    for (position, card) in positions.iter().zip(&set.cards) {
        println!("\tCard {position}: {card}");
    }

    match result {
        GroupMatch::Match(set_types) => println!("{set} is a set: {set_types}"),
        GroupMatch::NoMatch(reason) => println!("{set} is not a set: {reason}"),
    }
}

#[derive(Serialize)]
struct CheckReport<'a> {
    key: String,
    positions: &'a [usize],
    is_set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    set_types: Option<&'a SetTypes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn print_json_result(set: &CardSet, result: &GroupMatch) -> anyhow::Result<()> {
    let report = CheckReport {
        key: set.positions_string(),
        positions: set.positions.as_deref().unwrap_or_default(),
        is_set: result.is_match(),
        set_types: result.set_types(),
        reason: match result {
            GroupMatch::Match(_) => None,
            GroupMatch::NoMatch(reason) => Some(reason.to_string()),
        },
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_tsv_result(set: &CardSet, result: &GroupMatch) {
    println!("positions\tis_set\tdetail");
    let detail = match result {
        GroupMatch::Match(set_types) => set_types.to_string(),
        GroupMatch::NoMatch(reason) => reason.to_string(),
    };
    println!(
        "{}\t{}\t{}",
        set.positions_string(),
        result.is_match(),
        detail
    );
}
