// Engine error types and user-friendly error messages
//
// The library reports failures through `EngineError`. The CLI turns them into
// actionable messages that tell the user how to fix the catalog or config file.

use std::fmt;
use std::path::PathBuf;

/// Errors raised while building or configuring the conversation engine.
///
/// None of these can happen while generating a response: every catalog
/// invariant is checked once, at construction time.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The catalog (or keyword table) breaks an invariant the engine relies on.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A catalog, keyword or config file could not be parsed.
    #[error("failed to parse {path}: {message}")]
    CatalogParse { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        EngineError::Configuration(message.into())
    }

    /// True for invariant violations (as opposed to unreadable files)
    pub fn is_configuration(&self) -> bool {
        matches!(self, EngineError::Configuration(_))
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Format a catalog validation failure with helpful suggestions
pub fn catalog_invalid_error(path: &str, error: impl fmt::Display) -> String {
    format!(
        "Catalog {} is not usable\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Every language needs a fallback_category that exists in its topics\n\
        2. The default language needs a crisis_category\n\
        3. Every topic needs at least one pattern and one response\n\
        4. Every crisis response must mention the emergency contact\n\n\
        Validate the file with:\n\
           \x1b[36mtalksafe check-catalog {}\x1b[0m",
        path, error, path
    )
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(error: &str) -> String {
    format!(
        "Failed to parse config file\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat ~/.talksafe/config.toml\x1b[0m\n\n\
        2. Backup and start from defaults:\n\
           \x1b[36mmv ~/.talksafe/config.toml ~/.talksafe/config.toml.backup\x1b[0m\n\n\
        3. Common mistakes:\n\
           • Missing quotes around paths\n\
           • Negative or zero window sizes\n\
           • Invalid TOML syntax",
        error
    )
}

/// Format a file not found error with helpful suggestions
pub fn file_not_found_error(path: &str, description: &str) -> String {
    format!(
        "{} not found: {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • File has been deleted\n\
        • Wrong path specified\n\
        • Relative path resolved from another directory\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check if file exists:\n\
           \x1b[36mls -la {}\x1b[0m\n\n\
        2. Unset the override to use the built-in data:\n\
           \x1b[36munset TALKSAFE_CATALOG\x1b[0m",
        description, path, path
    )
}
