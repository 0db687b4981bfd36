// Catalog loader
// Reads an external catalog (TOML or JSON by extension) or falls back to the
// embedded one

use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::ResponseCatalog;
use crate::errors::{EngineError, EngineResult};

/// Load and validate the catalog at `path`, or the shared built-in catalog
pub fn load_catalog(path: Option<&Path>) -> EngineResult<Arc<ResponseCatalog>> {
    let Some(path) = path else {
        tracing::debug!("Using built-in response catalog");
        return ResponseCatalog::shared_builtin();
    };

    let contents = fs::read_to_string(path)?;
    let catalog = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            ResponseCatalog::from_json_str(&contents, path)?
        }
        Some(ext) if ext.eq_ignore_ascii_case("toml") => {
            ResponseCatalog::from_toml_str(&contents, path)?
        }
        _ => {
            return Err(EngineError::CatalogParse {
                path: path.to_path_buf(),
                message: "unsupported catalog format (expected .toml or .json)".to_string(),
            })
        }
    };

    tracing::info!(
        "Loaded response catalog from {} ({} languages)",
        path.display(),
        catalog.languages().count()
    );
    Ok(Arc::new(catalog))
}
