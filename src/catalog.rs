//! Catalog file loading.
//!
//! Reads the products JSON file and hands it to
//! [`Catalog::from_json`](product_assistant_core::catalog::Catalog::from_json).
//! Absent, unreadable, malformed, and duplicate-id catalogs each map to
//! their own [`CatalogError`] variant; an empty array is a valid catalog.

use std::io::ErrorKind;
use std::path::Path;

use product_assistant_core::catalog::{Catalog, CatalogError};
use tracing::{info, warn};

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => CatalogError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CatalogError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let catalog = Catalog::from_json(&text)?;
    if catalog.is_empty() {
        warn!(path = %path.display(), "catalog is empty; searches will return nothing");
    } else {
        info!(path = %path.display(), products = catalog.len(), "catalog loaded");
    }
    Ok(catalog)
}
