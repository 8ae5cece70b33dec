use std::collections::BTreeSet;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::core::schema::{FeatureNames, Schema, SchemaError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("Expected {expected} feature values, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },
}

/// A single card: one value per feature of its schema.
///
/// Values are opaque tokens; "2" and "02" are different values.
#[derive(Debug, Clone)]
pub struct Card {
    schema: Arc<Schema>,
    values: Vec<String>,
}

impl Card {
    /// Create a card whose values follow the column order of `schema`.
    ///
    /// # Errors
    ///
    /// Returns `CardError::FieldCountMismatch` if `values` does not have one
    /// entry per feature.
    pub fn new<I, S>(schema: Arc<Schema>, values: I) -> Result<Self, CardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.len() != schema.len() {
            return Err(CardError::FieldCountMismatch {
                expected: schema.len(),
                found: values.len(),
            });
        }
        Ok(Self { schema, values })
    }

    /// Create a card from `(feature, value)` pairs, building its own schema.
    ///
    /// # Errors
    ///
    /// Returns `CardError::Schema` if the feature names are empty or repeated.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CardError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (names, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        let schema = Arc::new(Schema::new(names)?);
        Ok(Self { schema, values })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn shared_schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.schema.names().iter().map(String::as_str)
    }

    /// Value of one feature, if the card has it
    pub fn get(&self, feature: &str) -> Option<&str> {
        self.schema
            .index_of(feature)
            .map(|i| self.values[i].as_str())
    }

    /// `(feature, value)` pairs in schema order
    pub fn features(&self) -> impl Iterator<Item = (&str, &str)> {
        self.feature_names()
            .zip(self.values.iter().map(String::as_str))
    }

    /// True if `other` has exactly the same feature names as this card
    pub fn compatible<T: FeatureNames + ?Sized>(&self, other: &T) -> bool {
        self.same_names(other)
    }
}

impl FeatureNames for Card {
    fn name_set(&self) -> BTreeSet<&str> {
        self.schema.name_set()
    }

    fn same_names<T: FeatureNames + ?Sized>(&self, other: &T) -> bool {
        self.schema.same_names(other)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        // Cards sharing only part of a schema are never equal, even if the
        // shared values agree.
        if !Arc::ptr_eq(&self.schema, &other.schema) && !self.compatible(other) {
            return false;
        }
        self.features()
            .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for Card {}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self
            .features()
            .map(|(name, value)| format!("{value} ({name})"))
            .collect();
        write!(f, "{}", pairs.join(",\t"))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.features() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
pub(crate) fn card(pairs: &[(&str, &str)]) -> Card {
    Card::from_pairs(pairs.iter().copied()).unwrap()
}
