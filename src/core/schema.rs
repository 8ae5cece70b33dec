use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Feature name is empty")]
    EmptyFeatureName,

    #[error("Duplicate feature name: {0}")]
    DuplicateFeature(String),

    #[error("Schema has no features")]
    NoFeatures,
}

/// The ordered feature names shared by every card in a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Schema {
    names: Vec<String>,
}

impl Schema {
    /// Build a schema, rejecting empty and duplicate feature names.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NoFeatures` if `names` is empty,
    /// `SchemaError::EmptyFeatureName` if any name is blank, or
    /// `SchemaError::DuplicateFeature` if a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();

        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(SchemaError::EmptyFeatureName);
            }
            if !seen.insert(name.clone()) {
                return Err(SchemaError::DuplicateFeature(name));
            }
            ordered.push(name);
        }

        if ordered.is_empty() {
            return Err(SchemaError::NoFeatures);
        }

        Ok(Self { names: ordered })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column index of a feature name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

impl TryFrom<Vec<String>> for Schema {
    type Error = SchemaError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<Schema> for Vec<String> {
    fn from(schema: Schema) -> Self {
        schema.names
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}

/// Anything that exposes a set of feature names.
///
/// Compatibility is decided on name *sets*: column order does not matter, but
/// a strict subset or superset is never compatible.
pub trait FeatureNames {
    fn name_set(&self) -> BTreeSet<&str>;

    /// True if both sides expose exactly the same feature names
    fn same_names<T: FeatureNames + ?Sized>(&self, other: &T) -> bool {
        self.name_set()
            .symmetric_difference(&other.name_set())
            .next()
            .is_none()
    }
}

impl FeatureNames for Schema {
    fn name_set(&self) -> BTreeSet<&str> {
        self.names.iter().map(String::as_str).collect()
    }
}

impl<S: AsRef<str>> FeatureNames for [S] {
    fn name_set(&self) -> BTreeSet<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<S: AsRef<str>, const N: usize> FeatureNames for [S; N] {
    fn name_set(&self) -> BTreeSet<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<S: AsRef<str>> FeatureNames for Vec<S> {
    fn name_set(&self) -> BTreeSet<&str> {
        self.as_slice().name_set()
    }
}

#[allow(clippy::implicit_hasher)]
impl FeatureNames for HashSet<String> {
    fn name_set(&self) -> BTreeSet<&str> {
        self.iter().map(String::as_str).collect()
    }
}

impl FeatureNames for BTreeSet<String> {
    fn name_set(&self) -> BTreeSet<&str> {
        self.iter().map(String::as_str).collect()
    }
}
