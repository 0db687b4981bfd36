// Catalog module
// Language-keyed topics with matching patterns and response templates

mod loader;
mod response_catalog;
mod types;

pub use loader::load_catalog;
pub use response_catalog::{LanguageCatalog, ResponseCatalog};
pub use types::{CatalogFile, LanguageSection, TopicCategory, TopicEntry};
