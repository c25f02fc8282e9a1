//! The catalog index: built once at startup, searched by text afterwards.
//!
//! # Build
//!
//! 1. Derive one [`IndexedDocument`] per product.
//! 2. Embed all document texts (one provider call per `batch_size` texts).
//! 3. Store each vector with its document in a [`VectorStore`].
//!
//! # Search
//!
//! 1. Embed the query text.
//! 2. Rank stored vectors by cosine similarity.
//! 3. Map the top `k` hits back to their [`Product`]s.
//!
//! The index is never modified after [`CatalogIndex::build`] returns.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::embedding::EmbeddingProvider;
use crate::models::{IndexedDocument, Product, ScoredProduct};
use crate::store::memory::InMemoryStore;
use crate::store::VectorStore;

/// Default number of texts per embedding request.
pub const DEFAULT_BATCH_SIZE: usize = 512;

/// Searchable, immutable index over a [`Catalog`].
pub struct CatalogIndex {
    catalog: Catalog,
    store: Box<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl CatalogIndex {
    /// Build an index backed by an [`InMemoryStore`].
    pub async fn build(
        catalog: Catalog,
        embedder: Arc<dyn EmbeddingProvider>,
        batch_size: usize,
    ) -> Result<Self> {
        Self::build_with_store(catalog, embedder, Box::new(InMemoryStore::new()), batch_size).await
    }

    /// Build an index into the given store.
    ///
    /// An empty catalog makes no embedding call. Fails if the provider
    /// errors or returns a different number of vectors than texts.
    pub async fn build_with_store(
        catalog: Catalog,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Box<dyn VectorStore>,
        batch_size: usize,
    ) -> Result<Self> {
        if batch_size == 0 {
            bail!("batch_size must be > 0");
        }

        let documents: Vec<IndexedDocument> = catalog
            .products()
            .iter()
            .map(IndexedDocument::from_product)
            .collect();

        for batch in documents.chunks(batch_size) {
            let texts: Vec<String> = batch.iter().map(|d| d.text.clone()).collect();
            let vectors = embedder
                .embed_texts(&texts)
                .await
                .with_context(|| format!("Failed to embed {} catalog documents", texts.len()))?;

            if vectors.len() != batch.len() {
                bail!(
                    "Embedding provider returned {} vectors for {} documents",
                    vectors.len(),
                    batch.len()
                );
            }

            for (doc, vector) in batch.iter().zip(vectors) {
                store.insert(doc.clone(), vector).await?;
            }
            debug!(count = batch.len(), "embedded catalog batch");
        }

        info!(
            products = catalog.len(),
            model = embedder.model_name(),
            "catalog index built"
        );

        Ok(Self {
            catalog,
            store,
            embedder,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Return up to `k` products nearest to `query`, most similar first.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<Product>> {
        Ok(self
            .search_scored(query, k)
            .await?
            .into_iter()
            .map(|hit| hit.product)
            .collect())
    }

    /// Like [`search`](Self::search) but keeps each hit's cosine score.
    ///
    /// Returns an empty list without calling the embedder when the index
    /// is empty or `k` is zero.
    pub async fn search_scored(&self, query: &str, k: usize) -> Result<Vec<ScoredProduct>> {
        if k == 0 || self.store.len().await? == 0 {
            return Ok(Vec::new());
        }

        let query_vec = self
            .embedder
            .embed_query(query)
            .await
            .context("Failed to embed search query")?;

        let hits = self.store.vector_search(&query_vec, k).await?;

        let results = hits
            .into_iter()
            .map(|hit| {
                let product = self.catalog.get(&hit.source_id).ok_or_else(|| {
                    anyhow!("Index hit refers to unknown product id {}", hit.source_id)
                })?;
                Ok(ScoredProduct {
                    product: product.clone(),
                    score: hit.score,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let scores: Vec<f32> = results.iter().map(|r| r.score).collect();
        debug!(query, hits = results.len(), ?scores, "catalog search");
        Ok(results)
    }
}
