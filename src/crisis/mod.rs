// Crisis module
// Weighted keyword scoring for self-harm risk

mod detector;

pub use detector::{
    CrisisAssessment, CrisisDetector, CrisisKeywords, CRISIS_KEYWORD_WEIGHT, CRISIS_THRESHOLD,
    SEVERITY_INDICATOR_WEIGHT,
};
