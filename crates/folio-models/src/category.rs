//! Category filter selector.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Reserved category name meaning "no category restriction".
///
/// Never stored on a record.
pub const ALL_CATEGORIES: &str = "All";

/// Category selector used by the gallery filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,
    /// Exactly one category
    Named(String),
}

impl CategoryFilter {
    /// Parse a selector. `"All"` and blank strings select every category.
    pub fn parse(s: &str) -> Self {
        if s.trim().is_empty() || s == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(s.to_string())
        }
    }

    /// Selector for a specific category.
    pub fn named(category: impl Into<String>) -> Self {
        Self::parse(&category.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether a record's category passes this selector (exact match).
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }

    /// Looser test used by the home page: `Anime` also admits `Anime + Music`.
    pub fn includes(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => category.contains(name.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
