// Topic classifier
//
// Score of a topic = sum over its patterns of
//   (pattern length in chars) x (non-overlapping occurrences in the text).
// The unique best topic wins. A zero best score or a tie at the top selects
// the language's fallback topic, so the result never depends on topic order.

use super::decision::{FallbackReason, RouteDecision};
use crate::catalog::{LanguageCatalog, ResponseCatalog, TopicCategory, TopicEntry};
use crate::language::LanguageCode;

#[derive(Debug, Clone, Copy, Default)]
pub struct TopicClassifier;

impl TopicClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Score of a single topic against already lower-cased text
    pub fn score_topic(topic: &TopicEntry, text_lower: &str) -> usize {
        topic
            .patterns
            .iter()
            .map(|pattern| pattern.chars().count() * text_lower.matches(pattern.as_str()).count())
            .sum()
    }

    /// Scores for every topic except the crisis one, in catalog order.
    /// The crisis topic is only reachable through crisis detection.
    pub fn scores(&self, text: &str, topics: &LanguageCatalog) -> Vec<(TopicCategory, usize)> {
        let text_lower = text.to_lowercase();
        let crisis = topics.crisis_category();
        topics
            .topics()
            .iter()
            .filter(|topic| Some(&topic.name) != crisis)
            .map(|topic| (topic.name.clone(), Self::score_topic(topic, &text_lower)))
            .collect()
    }

    /// Route text within one language's topics
    pub fn route(&self, text: &str, topics: &LanguageCatalog) -> RouteDecision {
        let scores = self.scores(text, topics);
        let best = scores.iter().map(|(_, score)| *score).max().unwrap_or(0);
        let fallback = topics.fallback_category().clone();

        if best == 0 {
            return RouteDecision::Fallback {
                topic: fallback,
                reason: FallbackReason::NoMatch,
            };
        }

        let mut leaders: Vec<TopicCategory> = scores
            .into_iter()
            .filter(|(_, score)| *score == best)
            .map(|(topic, _)| topic)
            .collect();

        if leaders.len() > 1 {
            tracing::debug!(
                "Topic tie at score {} between {:?}, using fallback '{}'",
                best,
                leaders,
                fallback
            );
            return RouteDecision::Fallback {
                topic: fallback,
                reason: FallbackReason::Tie { topics: leaders },
            };
        }

        match leaders.pop() {
            Some(topic) => RouteDecision::Matched { topic, score: best },
            None => RouteDecision::Fallback {
                topic: fallback,
                reason: FallbackReason::NoMatch,
            },
        }
    }

    /// Best topic for `text` in `language`. A language without its own topics
    /// is classified against the default language.
    pub fn classify(
        &self,
        text: &str,
        language: LanguageCode,
        catalog: &ResponseCatalog,
    ) -> TopicCategory {
        let topics = match catalog.language(language) {
            Some(topics) => topics,
            None => {
                tracing::warn!(
                    "No topics for language '{}', classifying with '{}'",
                    language,
                    catalog.default_language()
                );
                catalog.default_catalog()
            }
        };
        self.route(text, topics).topic().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogFile, LanguageSection};
    use std::collections::BTreeMap;

    fn catalog() -> ResponseCatalog {
        ResponseCatalog::builtin().unwrap()
    }

    fn tie_catalog() -> ResponseCatalog {
        let mut languages = BTreeMap::new();
        languages.insert(
            "english".to_string(),
            LanguageSection {
                fallback_category: "greetings".to_string(),
                crisis_category: Some("crisis".to_string()),
                topics: vec![
                    TopicEntry::new("alpha", ["abcd"], ["A"]),
                    TopicEntry::new("beta", ["wxyz"], ["B"]),
                    TopicEntry::new("greetings", ["hello"], ["Hello"]),
                    TopicEntry::new("crisis", ["suicide"], ["Call 112"]),
                ],
            },
        );
        ResponseCatalog::new(CatalogFile {
            default_language: "english".to_string(),
            emergency_contact: "112".to_string(),
            languages,
        })
        .unwrap()
    }

    #[test]
    fn test_academic_stress() {
        let topic = TopicClassifier::new().classify(
            "I have an exam tomorrow and I'm so stressed",
            LanguageCode::English,
            &catalog(),
        );
        assert_eq!(topic.as_str(), "academic_stress");
    }

    #[test]
    fn test_pidgin_greeting() {
        let topic = TopicClassifier::new().classify(
            "wetin dey happen, how far",
            LanguageCode::Pidgin,
            &catalog(),
        );
        assert_eq!(topic.as_str(), "greetings");
    }

    #[test]
    fn test_no_match_falls_back() {
        let catalog = catalog();
        let english = catalog.language(LanguageCode::English).unwrap();
        let decision = TopicClassifier::new().route("qqq zzz", english);
        assert_eq!(
            decision,
            RouteDecision::Fallback {
                topic: "greetings".into(),
                reason: FallbackReason::NoMatch,
            }
        );
    }

    #[test]
    fn test_longer_patterns_weigh_more() {
        let catalog = catalog();
        let english = catalog.language(LanguageCode::English).unwrap();
        let scores = TopicClassifier::new().scores("School fees, school fees", english);
        let financial = scores
            .iter()
            .find(|(topic, _)| topic.as_str() == "financial_stress")
            .unwrap();
        // "fees" x2 (8) + "school fees" x2 (22)
        assert_eq!(financial.1, 30);
    }

    #[test]
    fn test_tie_resolves_to_fallback() {
        let catalog = tie_catalog();
        let english = catalog.default_catalog();
        let decision = TopicClassifier::new().route("abcd wxyz", english);
        assert_eq!(decision.topic().as_str(), "greetings");
        assert_eq!(
            decision,
            RouteDecision::Fallback {
                topic: "greetings".into(),
                reason: FallbackReason::Tie {
                    topics: vec!["alpha".into(), "beta".into()],
                },
            }
        );
    }

    #[test]
    fn test_classification_is_idempotent() {
        let catalog = catalog();
        let classifier = TopicClassifier::new();
        let text = "I feel lonely and my family does not understand, also exams";
        let first = classifier.classify(text, LanguageCode::English, &catalog);
        let second = classifier.classify(text, LanguageCode::English, &catalog);
        assert_eq!(first, second);
    }

    #[test]
    fn test_crisis_topic_never_scored() {
        let catalog = tie_catalog();
        let english = catalog.default_catalog();
        let classifier = TopicClassifier::new();

        let scores = classifier.scores("suicide abcd", english);
        assert!(scores.iter().all(|(topic, _)| topic.as_str() != "crisis"));

        let decision = classifier.route("suicide", english);
        assert_eq!(
            decision,
            RouteDecision::Fallback {
                topic: "greetings".into(),
                reason: FallbackReason::NoMatch,
            }
        );
        assert!(!decision.is_crisis());
    }

    #[test]
    fn test_overlapping_occurrences_not_double_counted() {
        let catalog = tie_catalog();
        let english = catalog.default_catalog();
        let alpha = &english.topics()[0];
        assert_eq!(TopicClassifier::score_topic(alpha, "abcdabcd"), 8);
        assert_eq!(TopicClassifier::score_topic(alpha, "abcabc"), 0);
    }
}
