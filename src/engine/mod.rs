// Engine module
// Per-turn orchestration and caller-owned session state

mod conversation;
#[allow(clippy::module_inception)]
mod engine;

pub use conversation::{ConversationState, Turn, DEFAULT_MOOD_WINDOW, DEFAULT_TURN_WINDOW};
pub use engine::{ConversationEngine, EngineLimits, EngineResponse, DEFAULT_MAX_INPUT_CHARS};
