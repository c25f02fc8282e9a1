//! Product catalog parsing and validation.
//!
//! A catalog is a JSON array of `{ id, name, description, price }` objects.
//! Parsing validates that every id is unique so that index hits always map
//! back to exactly one product. Reading the file is left to the caller;
//! [`CatalogError`] nonetheless carries the file-level variants so the app
//! crate can report absent, unreadable, and malformed catalogs distinctly.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Product, ProductId};

/// Why a catalog could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read catalog file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not a valid product list: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate product id in catalog: {id}")]
    DuplicateId { id: ProductId },
}

/// An immutable, id-validated list of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from already-parsed products, rejecting duplicate ids.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            if by_id.insert(product.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId {
                    id: product.id.clone(),
                });
            }
        }
        Ok(Self { products, by_id })
    }

    /// Parse a catalog from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> =
            serde_json::from_str(text).map_err(|source| CatalogError::Malformed { source })?;
        Self::new(products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.by_id.get(id).map(|&pos| &self.products[pos])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
