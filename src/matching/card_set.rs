use serde::Serialize;

use crate::core::card::Card;
use crate::matching::classify::{match_group, GroupMatch, SetTypes};

/// A group of cards, optionally with their deck positions and set types.
///
/// Solving a deck produces `CardSet`s with positions and set types filled in;
/// a hand-built `CardSet` can be checked with [`CardSet::check_set`].
#[derive(Debug, Clone, Serialize)]
pub struct CardSet {
    /// Ascending deck positions of the cards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<usize>>,

    pub cards: Vec<Card>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_types: Option<SetTypes>,
}

impl CardSet {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            positions: None,
            cards,
            set_types: None,
        }
    }

    pub fn with_positions(mut self, positions: Vec<usize>) -> Self {
        self.positions = Some(positions);
        self
    }

    pub fn with_set_types(mut self, set_types: SetTypes) -> Self {
        self.set_types = Some(set_types);
        self
    }

    /// Run the group matcher on these cards
    pub fn check_set(&self) -> GroupMatch {
        let cards: Vec<&Card> = self.cards.iter().collect();
        match_group(&cards)
    }

    /// Positions joined by dashes, e.g. `0-3-5`
    pub fn positions_string(&self) -> String {
        match &self.positions {
            Some(positions) if !positions.is_empty() => DashJoined(positions).to_string(),
            _ => "No positions available".to_string(),
        }
    }

    pub fn cards_string(&self) -> String {
        self.cards
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl std::fmt::Display for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.positions {
            Some(positions) if !positions.is_empty() => write!(f, "{}", self.positions_string()),
            _ => write!(f, "{}", self.cards_string()),
        }
    }
}

/// Displays positions as `0-3-5` without allocating
pub(crate) struct DashJoined<'a>(pub &'a [usize]);

impl std::fmt::Display for DashJoined<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, position) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{position}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::card;
    use crate::matching::classify::{Rejection, SetType};

    fn cards() -> Vec<Card> {
        vec![
            card(&[("Color", "red"), ("Number", "1")]),
            card(&[("Color", "green"), ("Number", "1")]),
            card(&[("Color", "blue"), ("Number", "1")]),
        ]
    }

    #[test]
    fn test_positions_string() {
        let set = CardSet::new(cards()).with_positions(vec![0, 3, 5]);
        assert_eq!(set.positions_string(), "0-3-5");
        assert_eq!(set.to_string(), "0-3-5");
    }

    #[test]
    fn test_display_falls_back_to_cards() {
        let set = CardSet::new(cards());
        assert_eq!(set.positions_string(), "No positions available");
        assert_eq!(
            set.to_string(),
            "red (Color),\t1 (Number) / green (Color),\t1 (Number) / blue (Color),\t1 (Number)"
        );
    }

    #[test]
    fn test_check_set() {
        let set = CardSet::new(cards());
        let set_types = set.check_set().into_set_types().unwrap();
        assert_eq!(set_types.get("Color"), Some(SetType::Different));
        assert_eq!(set_types.get("Number"), Some(SetType::Same));

        let mut not_a_set = cards();
        not_a_set[2] = card(&[("Color", "red"), ("Number", "1")]);
        assert!(matches!(
            CardSet::new(not_a_set).check_set(),
            GroupMatch::NoMatch(Rejection::Feature { .. })
        ));
    }
}
