// Per-session conversation state with bounded rolling windows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::mood::MoodLabel;

pub const DEFAULT_TURN_WINDOW: usize = 8;
pub const DEFAULT_MOOD_WINDOW: usize = 20;

/// One user message and the reply it got
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user_text: String,
    pub response_text: String,
    pub mood: MoodLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Recent turns and moods of one session.
///
/// Owned by the caller and mutated only by `ConversationEngine::generate`.
/// Both windows evict their oldest entry once full. Serializable so a
/// presentation layer can keep it across refreshes. Deserialized state gets
/// the same window clamping as `with_limits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredState")]
pub struct ConversationState {
    turns: VecDeque<Turn>,
    moods: VecDeque<MoodLabel>,
    turn_capacity: usize,
    mood_capacity: usize,
}

/// Wire form of `ConversationState`, before clamping
#[derive(Deserialize)]
struct StoredState {
    #[serde(default)]
    turns: VecDeque<Turn>,
    #[serde(default)]
    moods: VecDeque<MoodLabel>,
    #[serde(default = "default_turn_window")]
    turn_capacity: usize,
    #[serde(default = "default_mood_window")]
    mood_capacity: usize,
}

impl From<StoredState> for ConversationState {
    fn from(stored: StoredState) -> Self {
        let mut state = Self::with_limits(stored.turn_capacity, stored.mood_capacity);
        for turn in stored.turns {
            state.record_turn(turn);
        }
        for mood in stored.moods {
            state.record_mood(mood);
        }
        state
    }
}

fn default_turn_window() -> usize {
    DEFAULT_TURN_WINDOW
}

fn default_mood_window() -> usize {
    DEFAULT_MOOD_WINDOW
}

impl ConversationState {
    /// Create an empty state with default window sizes
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TURN_WINDOW, DEFAULT_MOOD_WINDOW)
    }

    /// Create an empty state with custom window sizes (at least 1 each)
    pub fn with_limits(turn_capacity: usize, mood_capacity: usize) -> Self {
        let turn_capacity = turn_capacity.max(1);
        let mood_capacity = mood_capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(turn_capacity),
            moods: VecDeque::with_capacity(mood_capacity),
            turn_capacity,
            mood_capacity,
        }
    }

    pub(crate) fn record_turn(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.turn_capacity {
            self.turns.pop_front();
        }
    }

    pub(crate) fn record_mood(&mut self, mood: MoodLabel) {
        self.moods.push_back(mood);
        while self.moods.len() > self.mood_capacity {
            self.moods.pop_front();
        }
    }

    /// Clear both windows (start a new conversation)
    pub fn reset(&mut self) {
        self.turns.clear();
        self.moods.clear();
    }

    /// Turns, oldest first
    pub fn turns(&self) -> impl DoubleEndedIterator<Item = &Turn> + ExactSizeIterator {
        self.turns.iter()
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.back()
    }

    /// Moods, oldest first
    pub fn moods(&self) -> impl DoubleEndedIterator<Item = &MoodLabel> + ExactSizeIterator {
        self.moods.iter()
    }

    /// The last `n` moods, oldest first
    pub fn recent_moods(&self, n: usize) -> Vec<MoodLabel> {
        let skip = self.moods.len().saturating_sub(n);
        self.moods.iter().skip(skip).copied().collect()
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty() && self.moods.is_empty()
    }

    pub fn turn_capacity(&self) -> usize {
        self.turn_capacity
    }

    pub fn mood_capacity(&self) -> usize {
        self.mood_capacity
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
