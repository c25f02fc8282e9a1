//! In-memory [`VectorStore`] implementation.
//!
//! Documents and vectors live in a `Vec` behind `std::sync::RwLock`.
//! Vector search is brute-force cosine similarity over every stored
//! vector, which is plenty for catalogs of a few thousand products.

use std::cmp::Ordering;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::embedding::cosine_similarity;
use crate::models::IndexedDocument;

use super::{VectorHit, VectorStore};

struct StoredVector {
    document: IndexedDocument,
    vector: Vec<f32>,
}

/// Brute-force in-memory vector store.
pub struct InMemoryStore {
    vectors: RwLock<Vec<StoredVector>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            vectors: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("in-memory vector store lock poisoned")
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn insert(&self, document: IndexedDocument, vector: Vec<f32>) -> Result<()> {
        let mut vectors = self.vectors.write().map_err(poisoned)?;
        vectors.push(StoredVector { document, vector });
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.vectors.read().map_err(poisoned)?.len())
    }

    async fn vector_search(&self, query_vec: &[f32], limit: usize) -> Result<Vec<VectorHit>> {
        let vectors = self.vectors.read().map_err(poisoned)?;
        let mut hits: Vec<VectorHit> = vectors
            .iter()
            .map(|sv| VectorHit {
                source_id: sv.document.source_id.clone(),
                title: sv.document.title.clone(),
                score: cosine_similarity(query_vec, &sv.vector),
            })
            .collect();
        // sort_by is stable, so ties keep insertion order
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(limit);
        Ok(hits)
    }
}
