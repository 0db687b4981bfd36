// Validated, read-only response catalog

use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use super::types::{CatalogFile, LanguageSection, TopicCategory, TopicEntry};
use crate::errors::{EngineError, EngineResult};
use crate::language::LanguageCode;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

static SHARED_BUILTIN: OnceCell<Arc<ResponseCatalog>> = OnceCell::new();

/// Topics of one language, in declaration order
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    fallback: TopicCategory,
    crisis: Option<TopicCategory>,
    topics: Vec<TopicEntry>,
}

impl LanguageCatalog {
    pub fn topics(&self) -> &[TopicEntry] {
        &self.topics
    }

    pub fn topic(&self, name: &TopicCategory) -> Option<&TopicEntry> {
        self.topics.iter().find(|t| &t.name == name)
    }

    pub fn fallback_category(&self) -> &TopicCategory {
        &self.fallback
    }

    pub fn crisis_category(&self) -> Option<&TopicCategory> {
        self.crisis.as_ref()
    }
}

/// Language -> topic -> {patterns, responses}.
///
/// Can only be built through validation, so every language has a fallback
/// topic, the default language has a crisis topic, and every topic has at
/// least one pattern and one response. Share it with `Arc`; it is never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    default_language: LanguageCode,
    emergency_contact: String,
    languages: BTreeMap<LanguageCode, LanguageCatalog>,
}

impl ResponseCatalog {
    /// Validate a catalog document
    pub fn new(file: CatalogFile) -> EngineResult<Self> {
        let default_language = parse_language(&file.default_language)?;

        let emergency_contact = file.emergency_contact.trim().to_string();
        if emergency_contact.is_empty() {
            return Err(EngineError::config("emergency_contact must not be empty"));
        }

        let mut languages = BTreeMap::new();
        for (code, section) in file.languages {
            let language = parse_language(&code)?;
            let catalog = validate_language(
                language,
                section,
                language == default_language,
                &emergency_contact,
            )?;
            if languages.insert(language, catalog).is_some() {
                return Err(EngineError::config(format!(
                    "language '{}' is declared twice",
                    language
                )));
            }
        }

        if !languages.contains_key(&default_language) {
            return Err(EngineError::config(format!(
                "default language '{}' has no topics",
                default_language
            )));
        }

        Ok(Self {
            default_language,
            emergency_contact,
            languages,
        })
    }

    /// Parse and validate a TOML catalog; `origin` is only used in errors
    pub fn from_toml_str(contents: &str, origin: &Path) -> EngineResult<Self> {
        let file: CatalogFile = toml::from_str(contents).map_err(|e| EngineError::CatalogParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::new(file)
    }

    /// Parse and validate a JSON catalog; `origin` is only used in errors
    pub fn from_json_str(contents: &str, origin: &Path) -> EngineResult<Self> {
        let file: CatalogFile =
            serde_json::from_str(contents).map_err(|e| EngineError::CatalogParse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::new(file)
    }

    /// The catalog embedded in the binary
    pub fn builtin() -> EngineResult<Self> {
        Self::from_toml_str(BUILTIN_CATALOG, Path::new("<builtin catalog.toml>"))
    }

    /// Process-wide shared copy of the embedded catalog, parsed once
    pub fn shared_builtin() -> EngineResult<Arc<Self>> {
        SHARED_BUILTIN
            .get_or_try_init(|| Self::builtin().map(Arc::new))
            .map(Arc::clone)
    }

    pub fn default_language(&self) -> LanguageCode {
        self.default_language
    }

    pub fn emergency_contact(&self) -> &str {
        &self.emergency_contact
    }

    pub fn language(&self, code: LanguageCode) -> Option<&LanguageCatalog> {
        self.languages.get(&code)
    }

    /// The default language's topics. Always present.
    pub fn default_catalog(&self) -> &LanguageCatalog {
        match self.languages.get(&self.default_language) {
            Some(catalog) => catalog,
            None => unreachable!("validated catalog lost its default language"),
        }
    }

    pub fn languages(&self) -> impl Iterator<Item = LanguageCode> + '_ {
        self.languages.keys().copied()
    }

    /// Responses for (language, topic), if that pair exists
    pub fn responses(&self, language: LanguageCode, topic: &TopicCategory) -> Option<&[String]> {
        self.language(language)?
            .topic(topic)
            .map(|entry| entry.responses.as_slice())
    }

    /// Crisis category to use for `language`: its own, or the default language's
    pub fn crisis_route(&self, language: LanguageCode) -> (LanguageCode, &TopicCategory) {
        if let Some(crisis) = self.language(language).and_then(|l| l.crisis_category()) {
            return (language, crisis);
        }
        let default = self.default_catalog();
        match default.crisis_category() {
            Some(crisis) => (self.default_language, crisis),
            None => unreachable!("validated catalog has no default crisis category"),
        }
    }
}

fn parse_language(code: &str) -> EngineResult<LanguageCode> {
    code.parse::<LanguageCode>().map_err(EngineError::Configuration)
}

fn validate_language(
    language: LanguageCode,
    section: LanguageSection,
    is_default: bool,
    emergency_contact: &str,
) -> EngineResult<LanguageCatalog> {
    if section.topics.is_empty() {
        return Err(EngineError::config(format!("{}: no topics", language)));
    }

    let mut seen = HashSet::new();
    let mut topics = Vec::with_capacity(section.topics.len());
    for topic in section.topics {
        let name = topic.name.as_str().trim();
        if name.is_empty() {
            return Err(EngineError::config(format!("{}: unnamed topic", language)));
        }
        if !seen.insert(name.to_string()) {
            return Err(EngineError::config(format!(
                "{}: topic '{}' is declared twice",
                language, name
            )));
        }
        if topic.patterns.is_empty() || topic.patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(EngineError::config(format!(
                "{}/{}: patterns must be non-empty",
                language, name
            )));
        }
        if topic.responses.is_empty() || topic.responses.iter().any(|r| r.trim().is_empty()) {
            return Err(EngineError::config(format!(
                "{}/{}: responses must be non-empty",
                language, name
            )));
        }

        topics.push(TopicEntry {
            name: TopicCategory::new(name),
            patterns: topic.patterns.iter().map(|p| p.to_lowercase()).collect(),
            responses: topic.responses,
        });
    }

    let fallback = TopicCategory::new(section.fallback_category.trim());
    if !topics.iter().any(|t| t.name == fallback) {
        return Err(EngineError::config(format!(
            "{}: fallback category '{}' is not one of its topics",
            language, fallback
        )));
    }

    let crisis = section
        .crisis_category
        .as_deref()
        .map(|name| TopicCategory::new(name.trim()));
    match &crisis {
        Some(crisis) => {
            let Some(entry) = topics.iter().find(|t| &t.name == crisis) else {
                return Err(EngineError::config(format!(
                    "{}: crisis category '{}' is not one of its topics",
                    language, crisis
                )));
            };
            if let Some(missing) = entry
                .responses
                .iter()
                .find(|r| !r.contains(emergency_contact))
            {
                return Err(EngineError::config(format!(
                    "{}/{}: crisis response does not mention {}: {:?}",
                    language, crisis, emergency_contact, missing
                )));
            }
        }
        None if is_default => {
            return Err(EngineError::config(format!(
                "default language '{}' must declare a crisis_category",
                language
            )));
        }
        None => {}
    }

    Ok(LanguageCatalog {
        fallback,
        crisis,
        topics,
    })
}
