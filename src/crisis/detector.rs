// Crisis keyword detector
//
// Weighted substring scoring. Matching is deliberately not word-bounded, so
// "die" also fires inside longer words: recall over precision.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{EngineError, EngineResult};

const BUILTIN_KEYWORDS: &str = include_str!("../../data/crisis_keywords.json");

/// Score added per occurrence of a crisis keyword
pub const CRISIS_KEYWORD_WEIGHT: u32 = 2;
/// Score added per occurrence of a severity indicator (plan, method, timing)
pub const SEVERITY_INDICATOR_WEIGHT: u32 = 3;
/// Minimum score that counts as a crisis
pub const CRISIS_THRESHOLD: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisKeywords {
    pub crisis_keywords: Vec<String>,
    pub severity_indicators: Vec<String>,
}

impl CrisisKeywords {
    fn validate(&self) -> EngineResult<()> {
        if self.crisis_keywords.is_empty() {
            return Err(EngineError::config("crisis keyword list is empty"));
        }
        if self.severity_indicators.is_empty() {
            return Err(EngineError::config("severity indicator list is empty"));
        }
        if let Some(blank) = self
            .crisis_keywords
            .iter()
            .chain(&self.severity_indicators)
            .find(|k| k.trim().is_empty())
        {
            return Err(EngineError::config(format!(
                "blank crisis keyword {:?}",
                blank
            )));
        }
        Ok(())
    }

    fn lowercased(self) -> Self {
        Self {
            crisis_keywords: self.crisis_keywords.iter().map(|k| k.to_lowercase()).collect(),
            severity_indicators: self
                .severity_indicators
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }
}

/// Outcome of scoring one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrisisAssessment {
    pub score: u32,
    pub matched: Vec<String>,
}

impl CrisisAssessment {
    pub fn is_crisis(&self) -> bool {
        self.score >= CRISIS_THRESHOLD
    }
}

#[derive(Debug, Clone)]
pub struct CrisisDetector {
    keywords: CrisisKeywords,
}

impl CrisisDetector {
    pub fn new(keywords: CrisisKeywords) -> EngineResult<Self> {
        keywords.validate()?;
        Ok(Self {
            keywords: keywords.lowercased(),
        })
    }

    /// Detector over the keyword table shipped with the crate
    pub fn builtin() -> EngineResult<Self> {
        Self::from_json(BUILTIN_KEYWORDS, Path::new("<builtin crisis_keywords.json>"))
    }

    /// Load crisis keywords from a JSON file
    pub fn load_from_file(path: &Path) -> EngineResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents, path)
    }

    fn from_json(contents: &str, path: &Path) -> EngineResult<Self> {
        let keywords: CrisisKeywords =
            serde_json::from_str(contents).map_err(|e| EngineError::CatalogParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::new(keywords)
    }

    /// Score a message. Every occurrence of a keyword adds its weight.
    pub fn assess(&self, text: &str) -> CrisisAssessment {
        let text_lower = text.to_lowercase();
        let mut score = 0;
        let mut matched = Vec::new();

        let weighted = self
            .keywords
            .crisis_keywords
            .iter()
            .map(|k| (k, CRISIS_KEYWORD_WEIGHT))
            .chain(
                self.keywords
                    .severity_indicators
                    .iter()
                    .map(|k| (k, SEVERITY_INDICATOR_WEIGHT)),
            );

        for (keyword, weight) in weighted {
            let hits = text_lower.matches(keyword.as_str()).count() as u32;
            if hits > 0 {
                score += weight * hits;
                matched.push(keyword.clone());
            }
        }

        CrisisAssessment { score, matched }
    }

    /// Detect if a message carries crisis signals
    pub fn detect(&self, text: &str) -> bool {
        let assessment = self.assess(text);
        if assessment.is_crisis() {
            tracing::warn!(
                "Crisis detected: score {} (keywords: {})",
                assessment.score,
                assessment.matched.join(", ")
            );
        }
        assessment.is_crisis()
    }

    /// Get all keywords (for display purposes)
    pub fn all_keywords(&self) -> Vec<String> {
        let mut all = Vec::new();
        all.extend(self.keywords.crisis_keywords.clone());
        all.extend(self.keywords.severity_indicators.clone());
        all
    }
}
