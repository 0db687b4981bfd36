// Routing decision types

use crate::catalog::TopicCategory;
use crate::language::LanguageCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No pattern of any topic occurred in the text
    NoMatch,
    /// Several topics share the best score
    Tie { topics: Vec<TopicCategory> },
}

impl FallbackReason {
    pub fn as_str(&self) -> &str {
        match self {
            FallbackReason::NoMatch => "no_match",
            FallbackReason::Tie { .. } => "tie",
        }
    }
}

/// Where a message was routed, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Crisis signals override topic scoring. `language` may differ from the
    /// detected one when that language has no crisis topic.
    Crisis {
        language: LanguageCode,
        topic: TopicCategory,
    },
    /// A single topic scored highest
    Matched { topic: TopicCategory, score: usize },
    /// The language's fallback topic
    Fallback {
        topic: TopicCategory,
        reason: FallbackReason,
    },
}

impl RouteDecision {
    pub fn topic(&self) -> &TopicCategory {
        match self {
            RouteDecision::Crisis { topic, .. }
            | RouteDecision::Matched { topic, .. }
            | RouteDecision::Fallback { topic, .. } => topic,
        }
    }

    pub fn is_crisis(&self) -> bool {
        matches!(self, RouteDecision::Crisis { .. })
    }

    pub fn as_str(&self) -> &str {
        match self {
            RouteDecision::Crisis { .. } => "crisis",
            RouteDecision::Matched { .. } => "matched",
            RouteDecision::Fallback { reason, .. } => reason.as_str(),
        }
    }
}
