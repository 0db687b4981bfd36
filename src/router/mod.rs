// Router module
// Public interface for topic routing decisions

mod decision;
mod topic_classifier;

pub use decision::{FallbackReason, RouteDecision};
pub use topic_classifier::TopicClassifier;
