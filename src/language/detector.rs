// Language variety detector
//
// Rules are checked in priority order; the first rule with an indicator
// substring present in the lower-cased text wins. No match means the default
// variety.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language variety a message is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    English,
    Pidgin,
}

impl LanguageCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "english",
            LanguageCode::Pidgin => "pidgin",
        }
    }

    /// Human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::Pidgin => "Nigerian Pidgin",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(LanguageCode::English),
            "pidgin" | "pcm" | "nigerian pidgin" => Ok(LanguageCode::Pidgin),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}

const PIDGIN_INDICATORS: &[&str] = &[
    "wetin", "dey", "how far", "wahala", "no be", "fit", "make we",
];

/// One detection rule: any indicator present selects `language`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRule {
    pub language: LanguageCode,
    pub indicators: Vec<String>,
}

impl LanguageRule {
    pub fn new<I, S>(language: LanguageCode, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            language,
            indicators: indicators
                .into_iter()
                .map(|s| s.into().to_lowercase())
                .collect(),
        }
    }

    /// First indicator found in already lower-cased text
    fn first_hit(&self, text_lower: &str) -> Option<&str> {
        self.indicators
            .iter()
            .map(String::as_str)
            .find(|indicator| text_lower.contains(indicator))
    }
}

#[derive(Debug, Clone)]
pub struct LanguageDetector {
    default: LanguageCode,
    rules: Vec<LanguageRule>,
}

impl LanguageDetector {
    /// Detector with explicit default and ordered rules
    pub fn new(default: LanguageCode, rules: Vec<LanguageRule>) -> Self {
        Self { default, rules }
    }

    /// Same rules, different default variety
    pub fn with_default(mut self, default: LanguageCode) -> Self {
        self.default = default;
        self
    }

    pub fn default_language(&self) -> LanguageCode {
        self.default
    }

    pub fn rules(&self) -> &[LanguageRule] {
        &self.rules
    }

    pub fn detect(&self, text: &str) -> LanguageCode {
        let text_lower = text.to_lowercase();

        for rule in &self.rules {
            if let Some(indicator) = rule.first_hit(&text_lower) {
                tracing::debug!(
                    "Language detected: {} (indicator '{}')",
                    rule.language,
                    indicator
                );
                return rule.language;
            }
        }

        self.default
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(
            LanguageCode::English,
            vec![LanguageRule::new(LanguageCode::Pidgin, PIDGIN_INDICATORS.iter().copied())],
        )
    }
}
