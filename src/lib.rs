//! # set-solver
//!
//! Solves the generalized "Set" card puzzle: given a deck of cards that all
//! share the same named features, find every group of `k` cards in which each
//! feature is either the same on every card or different on every card.
//!
//! ## Example
//!
//! ```rust
//! use set_solver::{Card, Deck, SetType};
//!
//! let mut deck = Deck::new();
//! for (color, number) in [("red", "1"), ("green", "2"), ("purple", "3")] {
//!     let card = Card::from_pairs([("Color", color), ("Number", number)]).unwrap();
//!     assert!(deck.add_card(card));
//! }
//!
//! let sets = deck.solve(3);
//! assert_eq!(sets.len(), 1);
//! assert_eq!(sets[0].positions_string(), "0-1-2");
//! assert_eq!(
//!     sets[0].set_types.as_ref().unwrap().get("Color"),
//!     Some(SetType::Different)
//! );
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Schemas, cards and decks
//! - [`matching`]: Set rule, combination generator and solving engine
//! - [`parsing`]: Tab-delimited deck loader
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Diagnostic sinks and input validation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::card::{Card, CardError};
pub use crate::core::deck::Deck;
pub use crate::core::schema::{FeatureNames, Schema, SchemaError};
pub use matching::card_set::CardSet;
pub use matching::classify::{
    classify_feature, group_set_types, match_group, FeatureMatch, GroupMatch, Rejection, SetType, SetTypes,
};
pub use matching::combinations::{combination_count, combinations, PositionCombinations};
pub use matching::engine::{SolveOptions, SolvingEngine, DEFAULT_SET_SIZE};
pub use parsing::deck::{parse_deck_file, parse_deck_text, ParseError};
pub use utils::diagnostics::{DiagnosticSink, RecordingSink, TracingSink};
