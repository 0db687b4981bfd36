// Configuration structs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::{load_catalog, ResponseCatalog};
use crate::crisis::CrisisDetector;
use crate::engine::{
    ConversationEngine, EngineLimits, DEFAULT_MAX_INPUT_CHARS, DEFAULT_MOOD_WINDOW,
    DEFAULT_TURN_WINDOW,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External catalog (.toml or .json); built-in catalog when unset
    pub catalog_path: Option<PathBuf>,

    /// External crisis_keywords.json; built-in table when unset
    pub crisis_keywords_path: Option<PathBuf>,

    /// Input longer than this many characters is truncated
    pub max_input_chars: usize,

    /// Turns kept per conversation
    pub turn_window: usize,

    /// Moods kept per conversation
    pub mood_window: usize,

    /// Fixed RNG seed for reproducible replies
    pub seed: Option<u64>,

    pub debug_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            crisis_keywords_path: None,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            turn_window: DEFAULT_TURN_WINDOW,
            mood_window: DEFAULT_MOOD_WINDOW,
            seed: None,
            debug_logging: false,
        }
    }
}

impl Config {
    pub fn engine_limits(&self) -> EngineLimits {
        EngineLimits {
            max_input_chars: self.max_input_chars,
            turn_window: self.turn_window,
            mood_window: self.mood_window,
        }
    }

    /// Load the catalog this config points at
    pub fn load_catalog(&self) -> Result<Arc<ResponseCatalog>> {
        load_catalog(self.catalog_path.as_deref()).with_context(|| match &self.catalog_path {
            Some(path) => format!("Failed to load catalog {}", path.display()),
            None => "Failed to load built-in catalog".to_string(),
        })
    }

    pub fn load_crisis_detector(&self) -> Result<CrisisDetector> {
        match &self.crisis_keywords_path {
            Some(path) => CrisisDetector::load_from_file(path).with_context(|| {
                format!("Failed to load crisis keywords from {}", path.display())
            }),
            None => CrisisDetector::builtin().context("Failed to load built-in crisis keywords"),
        }
    }

    /// Build an engine from this configuration
    pub fn build_engine(&self) -> Result<ConversationEngine> {
        let catalog = self.load_catalog()?;
        let crisis = self.load_crisis_detector()?;

        let engine = match self.seed {
            Some(seed) => ConversationEngine::seeded(catalog, crisis, seed)?,
            None => ConversationEngine::new(catalog, crisis)?,
        };
        Ok(engine.with_limits(self.engine_limits())?)
    }
}
