//! Vector storage abstraction for the catalog index.
//!
//! The [`VectorStore`] trait holds embedded documents and answers
//! nearest-neighbour queries. [`memory::InMemoryStore`] is the only
//! backend; the trait keeps [`CatalogIndex`](crate::index::CatalogIndex)
//! independent of how vectors are kept.
//!
//! Implementations must be `Send + Sync` so a built index can be shared
//! across tasks behind an `Arc`.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{IndexedDocument, ProductId};

/// A stored document that matched a vector query.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorHit {
    /// Id of the product the matching document was derived from.
    pub source_id: ProductId,
    pub title: String,
    /// Cosine similarity between the query and the stored vector.
    pub score: f32,
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store a document with its embedding vector.
    async fn insert(&self, document: IndexedDocument, vector: Vec<f32>) -> Result<()>;

    /// Number of stored vectors.
    async fn len(&self) -> Result<usize>;

    /// Return up to `limit` documents ranked by descending similarity to
    /// `query_vec`. Equal scores keep insertion order.
    async fn vector_search(&self, query_vec: &[f32], limit: usize) -> Result<Vec<VectorHit>>;
}
