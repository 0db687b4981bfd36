// TalkSafe - culturally-aware support conversation engine
// Library exports

pub mod catalog;
pub mod cli;
pub mod config;
pub mod crisis;
pub mod engine;
pub mod errors;
pub mod language;
pub mod mood;
pub mod router;

pub use catalog::{ResponseCatalog, TopicCategory};
pub use engine::{ConversationEngine, ConversationState, EngineResponse, Turn};
pub use errors::{EngineError, EngineResult};
pub use language::LanguageCode;
pub use mood::MoodLabel;
