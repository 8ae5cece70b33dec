use std::collections::HashSet;
use std::hash::Hash;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::card::Card;

/// How a feature satisfies the set rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetType {
    /// Every card has the same value
    Same,
    /// Every card has a different value
    Different,
}

impl std::fmt::Display for SetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Same => write!(f, "Same"),
            Self::Different => write!(f, "Different"),
        }
    }
}

/// Classification of one feature column across a candidate group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureMatch {
    Same,
    Different,
    NotAMatch,
}

impl FeatureMatch {
    pub fn set_type(self) -> Option<SetType> {
        match self {
            Self::Same => Some(SetType::Same),
            Self::Different => Some(SetType::Different),
            Self::NotAMatch => None,
        }
    }
}

/// Classify the values one feature takes across a group.
///
/// Only the multiset of values matters, not their order.
pub fn classify_feature<T: Eq + Hash>(values: &[T]) -> FeatureMatch {
    let distinct: HashSet<&T> = values.iter().collect();
    match distinct.len() {
        0 => FeatureMatch::NotAMatch,
        1 => FeatureMatch::Same,
        d if d == values.len() => FeatureMatch::Different,
        _ => FeatureMatch::NotAMatch,
    }
}

/// Per-feature set types of a matching group, in schema order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetTypes {
    entries: Vec<(String, SetType)>,
}

impl SetTypes {
    pub fn get(&self, feature: &str) -> Option<SetType> {
        self.entries
            .iter()
            .find(|(name, _)| name == feature)
            .map(|(_, set_type)| *set_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SetType)> {
        self.entries.iter().map(|(name, t)| (name.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, feature: &str, set_type: SetType) {
        self.entries.push((feature.to_string(), set_type));
    }
}

impl<'a> FromIterator<(&'a str, SetType)> for SetTypes {
    fn from_iter<I: IntoIterator<Item = (&'a str, SetType)>>(iter: I) -> Self {
        let mut set_types = Self::default();
        for (feature, set_type) in iter {
            set_types.push(feature, set_type);
        }
        set_types
    }
}

impl std::fmt::Display for SetTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(name, set_type)| format!("{name}: {set_type}"))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl Serialize for SetTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, set_type) in &self.entries {
            map.serialize_entry(name, set_type)?;
        }
        map.end()
    }
}

/// Why a group of cards is not a set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No cards at all
    EmptyGroup,
    /// The cards do not share one schema
    IncompatibleCards,
    /// A feature whose values are neither all the same nor all different
    Feature { feature: String, values: Vec<String> },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGroup => write!(f, "no cards in group"),
            Self::IncompatibleCards => write!(f, "cards have different features"),
            Self::Feature { feature, values } => write!(
                f,
                "{feature} values [{}] are neither all the same nor all different",
                values.join(", ")
            ),
        }
    }
}

/// Outcome of testing a group of cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupMatch {
    Match(SetTypes),
    NoMatch(Rejection),
}

impl GroupMatch {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match(_))
    }

    pub fn set_types(&self) -> Option<&SetTypes> {
        match self {
            Self::Match(set_types) => Some(set_types),
            Self::NoMatch(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Match(_) => None,
            Self::NoMatch(rejection) => Some(rejection),
        }
    }

    pub fn into_set_types(self) -> Option<SetTypes> {
        match self {
            Self::Match(set_types) => Some(set_types),
            Self::NoMatch(_) => None,
        }
    }
}

/// Where a group first broke the set rule. Feature failures leave the
/// offending values in the caller's column buffer.
enum Failure<'a> {
    Empty,
    Incompatible,
    Feature(&'a str),
}

fn scan_group<'a>(
    cards: &[&'a Card],
    column: &mut Vec<&'a str>,
) -> Result<SetTypes, Failure<'a>> {
    let Some(&first) = cards.first() else {
        return Err(Failure::Empty);
    };

    if cards[1..].iter().any(|card| !card.compatible(first)) {
        return Err(Failure::Incompatible);
    }

    let mut set_types = SetTypes::default();
    for feature in first.feature_names() {
        column.clear();
        // Compatibility was checked above, so every card has this feature
        column.extend(cards.iter().filter_map(|&card| card.get(feature)));

        match classify_feature(column.as_slice()).set_type() {
            Some(set_type) => set_types.push(feature, set_type),
            None => return Err(Failure::Feature(feature)),
        }
    }

    Ok(set_types)
}

/// Set types of `cards`, or `None` when they are not a set.
///
/// Cheaper than [`match_group`] for rejected groups: nothing is built to
/// explain the rejection.
pub fn group_set_types(cards: &[&Card]) -> Option<SetTypes> {
    let mut column = Vec::with_capacity(cards.len());
    scan_group(cards, &mut column).ok()
}

/// Test whether `cards` form a set.
///
/// Every feature of the first card's schema is classified in turn; the first
/// feature that fails rejects the whole group.
pub fn match_group(cards: &[&Card]) -> GroupMatch {
    let mut column = Vec::with_capacity(cards.len());
    match scan_group(cards, &mut column) {
        Ok(set_types) => GroupMatch::Match(set_types),
        Err(Failure::Empty) => GroupMatch::NoMatch(Rejection::EmptyGroup),
        Err(Failure::Incompatible) => GroupMatch::NoMatch(Rejection::IncompatibleCards),
        Err(Failure::Feature(feature)) => GroupMatch::NoMatch(Rejection::Feature {
            feature: feature.to_string(),
            values: column.iter().map(|v| (*v).to_string()).collect(),
        }),
    }
}
