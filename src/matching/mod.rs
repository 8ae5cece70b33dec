//! Set detection and the search over a deck.
//!
//! - [`classify_feature`](classify::classify_feature): one feature column → `Same`, `Different` or `NotAMatch`
//! - [`match_group`](classify::match_group): every feature of a group → [`GroupMatch`](classify::GroupMatch)
//! - [`PositionCombinations`](combinations::PositionCombinations): lazy k-of-n position selections
//! - [`SolvingEngine`](engine::SolvingEngine): drives the two above over a deck
//!
//! ## The set rule
//!
//! A group of `k` cards is a set when, for every feature independently, the
//! `k` values are either all equal or pairwise distinct. With four features of
//! three values each and `k = 3` this is the physical card game.

pub mod card_set;
pub mod classify;
pub mod combinations;
pub mod engine;

pub use card_set::CardSet;
pub use classify::{GroupMatch, SetType, SetTypes};
