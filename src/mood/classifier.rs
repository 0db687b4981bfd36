// Mood classifier

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Good,
    Okay,
    Bad,
}

impl MoodLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Good => "good",
            MoodLabel::Okay => "okay",
            MoodLabel::Bad => "bad",
        }
    }

    /// Emoji used by the mood pattern display
    pub fn emoji(&self) -> &'static str {
        match self {
            MoodLabel::Good => "😊",
            MoodLabel::Okay => "😐",
            MoodLabel::Bad => "😔",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const POSITIVE_WORDS: &[&str] = &["good", "great", "happy", "fine", "better", "okay"];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "depressed",
    "anxious",
    "overwhelmed",
    "stressed",
];

/// Counts how many listed words are present (each word once, however often
/// it repeats) and compares the two totals.
#[derive(Debug, Clone)]
pub struct MoodClassifier {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl MoodClassifier {
    pub fn new(positive: Vec<String>, negative: Vec<String>) -> Self {
        Self {
            positive: positive.into_iter().map(|w| w.to_lowercase()).collect(),
            negative: negative.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn classify(&self, text: &str) -> MoodLabel {
        let text_lower = text.to_lowercase();
        let positive = count_present(&self.positive, &text_lower);
        let negative = count_present(&self.negative, &text_lower);

        let mood = if positive > negative {
            MoodLabel::Good
        } else if negative > positive {
            MoodLabel::Bad
        } else {
            MoodLabel::Okay
        };

        tracing::debug!(
            "Mood: {} (positive={}, negative={})",
            mood,
            positive,
            negative
        );
        mood
    }
}

fn count_present(words: &[String], text_lower: &str) -> usize {
    words
        .iter()
        .filter(|word| text_lower.contains(word.as_str()))
        .count()
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::new(
            POSITIVE_WORDS.iter().map(|w| w.to_string()).collect(),
            NEGATIVE_WORDS.iter().map(|w| w.to_string()).collect(),
        )
    }
}
