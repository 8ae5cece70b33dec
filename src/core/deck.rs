use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::core::card::Card;
use crate::core::schema::Schema;
use crate::matching::card_set::CardSet;
use crate::matching::combinations::{combinations, PositionCombinations};
use crate::matching::engine::{SolveOptions, SolvingEngine};
use crate::utils::diagnostics::{DiagnosticSink, TracingSink};

/// An ordered collection of cards sharing one schema.
///
/// A card's position is its index at insertion time and is how solved sets
/// refer back to it.
pub struct Deck {
    schema: Option<Arc<Schema>>,
    cards: Vec<Card>,
    /// Distinct values seen per feature
    feature_values: BTreeMap<String, BTreeSet<String>>,
    /// Comment lines kept by the loader
    comments: Vec<String>,
    /// Results of the last solve
    sets: Vec<CardSet>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    pub fn new() -> Self {
        Self {
            schema: None,
            cards: Vec::new(),
            feature_values: BTreeMap::new(),
            comments: Vec::new(),
            sets: Vec::new(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Create an empty deck that only accepts cards with `schema`'s features
    pub fn with_schema(schema: Arc<Schema>) -> Self {
        let mut deck = Self::new();
        deck.schema = Some(schema);
        deck
    }

    /// Send solver diagnostics to `sink` instead of `tracing`
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Append a card if it fits the deck's schema.
    ///
    /// The first card of a deck without a schema defines it. Returns false,
    /// leaving the deck untouched, for an incompatible card.
    pub fn add_card(&mut self, card: Card) -> bool {
        let schema: &Schema = self
            .schema
            .get_or_insert_with(|| Arc::clone(card.shared_schema()));
        if !card.compatible(schema) {
            return false;
        }

        for (feature, value) in card.features() {
            self.feature_values
                .entry(feature.to_string())
                .or_default()
                .insert(value.to_string());
        }
        self.cards.push(card);
        true
    }

    pub fn push_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    /// Find every set of `set_size` cards
    pub fn solve(&mut self, set_size: usize) -> &[CardSet] {
        self.solve_with(&SolveOptions::with_set_size(set_size))
    }

    /// Find every set, replacing the results of any earlier solve.
    ///
    /// Asking for more cards per set than there are features only triggers a
    /// warning; an empty result is a valid answer.
    pub fn solve_with(&mut self, options: &SolveOptions) -> &[CardSet] {
        self.sets.clear();

        if let Some(schema) = &self.schema {
            if options.set_size > schema.len() {
                self.sink.warn(format_args!(
                    "Solving for a set size of {}, but only have {} features",
                    options.set_size,
                    schema.len()
                ));
            }
        }

        let engine = SolvingEngine::new(&self.cards, &*self.sink);
        self.sets = engine.find_sets(options);
        &self.sets
    }

    /// Sets found by the most recent solve
    pub fn sets(&self) -> &[CardSet] {
        &self.sets
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_deref()
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Distinct values per feature, in schema order
    pub fn feature_values(&self) -> Vec<(&str, Vec<&str>)> {
        let Some(schema) = &self.schema else {
            return Vec::new();
        };

        schema
            .names()
            .iter()
            .map(|name| {
                let values = self
                    .feature_values
                    .get(name)
                    .map(|set| set.iter().map(String::as_str).collect())
                    .unwrap_or_default();
                (name.as_str(), values)
            })
            .collect()
    }

    /// All `set_size` position combinations of this deck
    pub fn position_combinations(&self, set_size: usize) -> PositionCombinations {
        PositionCombinations::new(self.cards.len(), set_size)
    }

    /// All `set_size` card combinations of this deck
    pub fn card_combinations(&self, set_size: usize) -> impl Iterator<Item = Vec<&Card>> + '_ {
        combinations(&self.cards, set_size)
    }
}

impl std::fmt::Debug for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deck")
            .field("schema", &self.schema)
            .field("cards", &self.cards.len())
            .field("sets", &self.sets.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::card;
    use crate::matching::classify::SetType;
    use crate::utils::diagnostics::{Level, RecordingSink};

    fn card4(color: &str, number: &str, shape: &str, fill: &str) -> Card {
        card(&[
            ("Color", color),
            ("Number", number),
            ("Shape", shape),
            ("Fill", fill),
        ])
    }

    fn recording_deck() -> (Deck, Arc<RecordingSink>) {
        let sink = RecordingSink::new();
        let deck = Deck::new().with_sink(sink.clone());
        (deck, sink)
    }

    #[test]
    fn test_add_card_adopts_first_schema() {
        let mut deck = Deck::new();
        assert!(deck.schema().is_none());
        assert!(deck.add_card(card4("red", "1", "oval", "solid")));
        assert_eq!(deck.schema().unwrap().len(), 4);

        // Same features in another order are still compatible
        let reordered = card(&[
            ("Fill", "empty"),
            ("Shape", "oval"),
            ("Number", "2"),
            ("Color", "green"),
        ]);
        assert!(deck.add_card(reordered));
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_add_card_rejects_incompatible() {
        let mut deck = Deck::new();
        deck.add_card(card4("red", "1", "oval", "solid"));

        let subset = card(&[("Color", "red"), ("Number", "1"), ("Shape", "oval")]);
        assert!(!deck.add_card(subset));
        assert_eq!(deck.len(), 1);
        // Values of a rejected card are not recorded
        assert_eq!(deck.feature_values()[0], ("Color", vec!["red"]));
    }

    #[test]
    fn test_with_schema_checks_first_card() {
        let schema = Arc::new(Schema::new(["Color", "Number"]).unwrap());
        let mut deck = Deck::with_schema(schema);
        assert!(!deck.add_card(card4("red", "1", "oval", "solid")));
        assert!(deck.add_card(card(&[("Color", "red"), ("Number", "1")])));
    }

    #[test]
    fn test_feature_values_in_schema_order() {
        let mut deck = Deck::new();
        deck.add_card(card4("red", "1", "oval", "solid"));
        deck.add_card(card4("green", "1", "oval", "empty"));
        deck.add_card(card4("red", "2", "oval", "solid"));

        let values = deck.feature_values();
        let names: Vec<&str> = values.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["Color", "Number", "Shape", "Fill"]);
        assert_eq!(values[0].1, vec!["green", "red"]);
        assert_eq!(values[2].1, vec!["oval"]);
    }

    #[test]
    fn test_solve_end_to_end() {
        let (mut deck, _sink) = recording_deck();
        deck.add_card(card4("purple", "1", "square", "solid"));
        deck.add_card(card4("green", "2", "square", "solid"));
        deck.add_card(card4("red", "3", "square", "solid"));

        let sets = deck.solve(3);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].positions_string(), "0-1-2");

        let set_types = sets[0].set_types.as_ref().unwrap();
        assert_eq!(set_types.get("Color"), Some(SetType::Different));
        assert_eq!(set_types.get("Number"), Some(SetType::Different));
        assert_eq!(set_types.get("Shape"), Some(SetType::Same));
        assert_eq!(set_types.get("Fill"), Some(SetType::Same));
    }

    #[test]
    fn test_solve_counter_example() {
        let (mut deck, _sink) = recording_deck();
        deck.add_card(card4("purple", "1", "square", "solid"));
        deck.add_card(card4("purple", "2", "square", "solid"));
        deck.add_card(card4("red", "3", "square", "solid"));

        assert!(deck.solve(3).is_empty());
    }

    #[test]
    fn test_solve_degenerate_sizes() {
        let (mut deck, _sink) = recording_deck();
        deck.add_card(card4("purple", "1", "square", "solid"));
        deck.add_card(card4("green", "2", "square", "solid"));

        assert!(deck.solve(0).is_empty());
        assert!(deck.solve(3).is_empty());
        assert_eq!(deck.solve(2).len(), 1);
    }

    #[test]
    fn test_solve_discards_previous_results() {
        let (mut deck, _sink) = recording_deck();
        deck.add_card(card4("purple", "1", "square", "solid"));
        deck.add_card(card4("green", "2", "square", "solid"));
        deck.add_card(card4("red", "3", "square", "solid"));

        assert_eq!(deck.solve(1).len(), 3);
        assert_eq!(deck.solve(3).len(), 1);
        assert_eq!(deck.sets().len(), 1);
    }

    #[test]
    fn test_warns_when_set_size_exceeds_features() {
        let (mut deck, sink) = recording_deck();
        deck.add_card(card(&[("Color", "red"), ("Number", "1")]));
        deck.add_card(card(&[("Color", "green"), ("Number", "2")]));
        deck.add_card(card(&[("Color", "blue"), ("Number", "3")]));

        let sets = deck.solve(3);
        assert_eq!(sets.len(), 1);
        assert_eq!(
            sink.messages(Level::Warn),
            vec!["Solving for a set size of 3, but only have 2 features"]
        );

        deck.solve(2);
        assert_eq!(sink.messages(Level::Warn).len(), 1);
    }

    #[test]
    fn test_combinations_over_deck() {
        let mut deck = Deck::new();
        for color in ["red", "green", "blue", "purple"] {
            deck.add_card(card(&[("Color", color)]));
        }
        assert_eq!(deck.position_combinations(2).count(), 6);

        let first: Vec<&str> = deck
            .card_combinations(3)
            .next()
            .unwrap()
            .iter()
            .map(|c| c.get("Color").unwrap())
            .collect();
        assert_eq!(first, vec!["red", "green", "blue"]);
    }
}
