// Language module
// Language varieties and indicator-based detection

mod detector;

pub use detector::{LanguageCode, LanguageDetector, LanguageRule};
