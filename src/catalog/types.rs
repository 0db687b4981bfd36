// Catalog data types
//
// `CatalogFile` mirrors the on-disk document one to one. It is only turned
// into a `ResponseCatalog` after validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of a topic bucket (e.g. "academic_stress", "crisis")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicCategory(String);

impl TopicCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TopicCategory {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for TopicCategory {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TopicCategory {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A topic with its matching patterns and candidate responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub name: TopicCategory,
    pub patterns: Vec<String>,
    pub responses: Vec<String>,
}

impl TopicEntry {
    pub fn new<P, R>(name: &str, patterns: P, responses: R) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            name: TopicCategory::new(name),
            patterns: patterns.into_iter().map(Into::into).collect(),
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-language section of a catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSection {
    pub fallback_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis_category: Option<String>,
    pub topics: Vec<TopicEntry>,
}

/// Raw catalog document, as read from TOML or JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub default_language: String,
    #[serde(default = "default_emergency_contact")]
    pub emergency_contact: String,
    /// Keyed by language code ("english", "pidgin", ...)
    pub languages: BTreeMap<String, LanguageSection>,
}

fn default_emergency_contact() -> String {
    "112".to_string()
}
