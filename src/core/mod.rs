//! Core data types for Set decks.
//!
//! - [`Schema`](schema::Schema): the ordered, unique feature names of a deck
//! - [`Card`](card::Card): one value per schema feature, immutable once built
//! - [`Deck`](deck::Deck): cards in insertion order plus the last solve's results
//!
//! ## Compatibility
//!
//! Two cards are compatible when they have exactly the same feature names.
//! Column order is irrelevant, but a card with an extra or missing feature is
//! never compatible, and never equal, to the others.

pub mod card;
pub mod deck;
pub mod schema;
