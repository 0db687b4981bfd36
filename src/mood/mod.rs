// Mood module
// Coarse keyword-based mood classification

mod classifier;

pub use classifier::{MoodClassifier, MoodLabel};
