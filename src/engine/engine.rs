// Conversation engine
//
// Per turn, in order: crisis check, language, mood (recorded), topic route,
// response lookup with fallback, random pick, turn recorded. Crisis always
// wins over topic scoring.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;

use super::conversation::{ConversationState, Turn, DEFAULT_MOOD_WINDOW, DEFAULT_TURN_WINDOW};
use crate::catalog::{ResponseCatalog, TopicCategory};
use crate::crisis::CrisisDetector;
use crate::errors::{EngineError, EngineResult};
use crate::language::{LanguageCode, LanguageDetector};
use crate::mood::{MoodClassifier, MoodLabel};
use crate::router::{RouteDecision, TopicClassifier};

pub const DEFAULT_MAX_INPUT_CHARS: usize = 500;

/// Size limits applied by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    /// Longer input is truncated to this many characters
    pub max_input_chars: usize,
    pub turn_window: usize,
    pub mood_window: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            turn_window: DEFAULT_TURN_WINDOW,
            mood_window: DEFAULT_MOOD_WINDOW,
        }
    }
}

impl EngineLimits {
    fn validate(&self) -> EngineResult<()> {
        if self.max_input_chars == 0 || self.turn_window == 0 || self.mood_window == 0 {
            return Err(EngineError::config(format!(
                "engine limits must be at least 1: {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// Result of one `generate` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineResponse {
    pub response: String,
    pub is_crisis: bool,
    pub mood: MoodLabel,
    /// Detected language (crisis replies may come from the default language)
    pub language: LanguageCode,
    pub topic: TopicCategory,
}

#[derive(Debug)]
pub struct ConversationEngine<R = StdRng> {
    catalog: Arc<ResponseCatalog>,
    crisis: CrisisDetector,
    language: LanguageDetector,
    mood: MoodClassifier,
    topics: TopicClassifier,
    limits: EngineLimits,
    rng: R,
}

impl ConversationEngine<StdRng> {
    /// Engine with an entropy-seeded RNG
    pub fn new(catalog: Arc<ResponseCatalog>, crisis: CrisisDetector) -> EngineResult<Self> {
        Self::with_rng(catalog, crisis, StdRng::from_entropy())
    }

    /// Engine whose response choices are reproducible
    pub fn seeded(
        catalog: Arc<ResponseCatalog>,
        crisis: CrisisDetector,
        seed: u64,
    ) -> EngineResult<Self> {
        Self::with_rng(catalog, crisis, StdRng::seed_from_u64(seed))
    }

    /// Engine over the embedded catalog and keyword table
    pub fn builtin() -> EngineResult<Self> {
        Self::new(ResponseCatalog::shared_builtin()?, CrisisDetector::builtin()?)
    }
}

impl<R: Rng> ConversationEngine<R> {
    pub fn with_rng(
        catalog: Arc<ResponseCatalog>,
        crisis: CrisisDetector,
        rng: R,
    ) -> EngineResult<Self> {
        let language = LanguageDetector::default().with_default(catalog.default_language());
        tracing::info!(
            "Conversation engine ready (default language: {}, languages: {})",
            catalog.default_language(),
            catalog.languages().count()
        );

        Ok(Self {
            catalog,
            crisis,
            language,
            mood: MoodClassifier::default(),
            topics: TopicClassifier::new(),
            limits: EngineLimits::default(),
            rng,
        })
    }

    pub fn with_limits(mut self, limits: EngineLimits) -> EngineResult<Self> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    /// Replace the language rules. The detector must default to the catalog's
    /// default language.
    pub fn with_language_detector(mut self, detector: LanguageDetector) -> EngineResult<Self> {
        if detector.default_language() != self.catalog.default_language() {
            return Err(EngineError::config(format!(
                "language detector defaults to '{}' but the catalog defaults to '{}'",
                detector.default_language(),
                self.catalog.default_language()
            )));
        }
        self.language = detector;
        Ok(self)
    }

    pub fn with_mood_classifier(mut self, classifier: MoodClassifier) -> Self {
        self.mood = classifier;
        self
    }

    pub fn catalog(&self) -> &Arc<ResponseCatalog> {
        &self.catalog
    }

    pub fn limits(&self) -> EngineLimits {
        self.limits
    }

    /// Fresh session state sized to this engine's windows
    pub fn new_conversation_state(&self) -> ConversationState {
        ConversationState::with_limits(self.limits.turn_window, self.limits.mood_window)
    }

    /// Clear a session's turn and mood history
    pub fn reset_history(&self, state: &mut ConversationState) {
        tracing::debug!("Resetting conversation history ({} turns)", state.turn_count());
        state.reset();
    }

    /// Routing decision for already-truncated text
    pub fn route(&self, text: &str, language: LanguageCode, is_crisis: bool) -> RouteDecision {
        if is_crisis {
            let (language, topic) = self.catalog.crisis_route(language);
            return RouteDecision::Crisis {
                language,
                topic: topic.clone(),
            };
        }

        match self.catalog.language(language) {
            Some(topics) => self.topics.route(text, topics),
            None => {
                tracing::warn!(
                    "No topics for language '{}', routing with '{}'",
                    language,
                    self.catalog.default_language()
                );
                self.topics.route(text, self.catalog.default_catalog())
            }
        }
    }

    /// Process one user message
    pub fn generate(&mut self, text: &str, state: &mut ConversationState) -> EngineResponse {
        let text = truncate_input(text, self.limits.max_input_chars);

        let is_crisis = self.crisis.detect(text);
        let language = self.language.detect(text);
        let mood = self.mood.classify(text);
        state.record_mood(mood);

        let decision = self.route(text, language, is_crisis);
        let lookup_language = match &decision {
            RouteDecision::Crisis { language, .. } => *language,
            _ if self.catalog.language(language).is_some() => language,
            _ => self.catalog.default_language(),
        };
        tracing::debug!(
            "Route: {} -> {}/{} (detected {})",
            decision.as_str(),
            lookup_language,
            decision.topic(),
            language
        );

        let catalog = Arc::clone(&self.catalog);
        let responses = match catalog.responses(lookup_language, decision.topic()) {
            Some(responses) => responses,
            None => {
                let default = catalog.default_catalog();
                tracing::warn!(
                    "No responses for {}/{}, using {}/{}",
                    lookup_language,
                    decision.topic(),
                    catalog.default_language(),
                    default.fallback_category()
                );
                catalog
                    .responses(catalog.default_language(), default.fallback_category())
                    .unwrap_or_default()
            }
        };

        // A validated catalog never has an empty response list here. Failing
        // quietly could swallow a crisis reply.
        let response = match responses.choose(&mut self.rng) {
            Some(response) => response.clone(),
            None => panic!(
                "no responses for {}/{} after fallback",
                lookup_language,
                decision.topic()
            ),
        };

        state.record_turn(Turn {
            user_text: text.to_string(),
            response_text: response.clone(),
            mood,
            timestamp: Some(chrono::Utc::now()),
        });

        EngineResponse {
            response,
            is_crisis,
            mood,
            language,
            topic: decision.topic().clone(),
        }
    }
}

/// First `max_chars` characters of `text`
fn truncate_input(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            tracing::debug!("Input truncated to {} characters", max_chars);
            &text[..idx]
        }
        None => text,
    }
}
