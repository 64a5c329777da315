use std::path::Path;

use patterns_core::model::{Catalog, CatalogError, Pattern};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("cannot read catalog {path}: {message}")]
    Io { path: String, message: String },

    #[error("catalog is not valid JSON: {0}")]
    Json(String),

    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// Parse a catalog from a JSON array of patterns.
///
/// # Errors
///
/// Returns `CatalogLoadError::Json` for malformed input and
/// `CatalogLoadError::Invalid` if the patterns fail validation.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogLoadError> {
    let patterns: Vec<Pattern> =
        serde_json::from_str(json).map_err(|err| CatalogLoadError::Json(err.to_string()))?;
    Ok(Catalog::new(patterns)?)
}

/// Read and parse a catalog file.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let json = std::fs::read_to_string(path).map_err(|err| CatalogLoadError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    let catalog = parse_catalog(&json)?;
    info!(
        path = %path.display(),
        patterns = catalog.patterns().len(),
        problems = catalog.total_problems(),
        "loaded catalog"
    );
    Ok(catalog)
}
