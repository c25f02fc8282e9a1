//! Core data models shared by the index and the sessions.
//!
//! A [`Product`] is read from the catalog file, turned into exactly one
//! [`IndexedDocument`] when the index is built, and handed back to callers
//! as a search hit. [`Message`] is a single transcript entry in the
//! OpenAI chat wire shape.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identity of a product.
///
/// Catalog files in the wild use both integer and string ids, so both are
/// accepted. Two ids are equal only if they have the same kind and value
/// (`1` and `"1"` are distinct). Whole-valued floats such as `1.0` are read
/// as integers; fractional or out-of-range numbers are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

struct ProductIdVisitor;

impl<'de> Visitor<'de> for ProductIdVisitor {
    type Value = ProductId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a product id (integer or string)")
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<ProductId, E> {
        Ok(ProductId::Number(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<ProductId, E> {
        i64::try_from(n)
            .map(ProductId::Number)
            .map_err(|_| E::custom(format!("product id {} is out of range", n)))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<ProductId, E> {
        // i64::MAX as f64 rounds up to 2^63, hence the strict bound
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Ok(ProductId::Number(n as i64))
        } else {
            Err(E::custom(format!(
                "product id {} is not a whole number in range",
                n
            )))
        }
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<ProductId, E> {
        Ok(ProductId::Text(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<ProductId, E> {
        Ok(ProductId::Text(s))
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ProductIdVisitor)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

/// A catalog entry. Read-only for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    /// The `"name: description"` line used in retrieval context and
    /// search listings.
    pub fn summary_line(&self) -> String {
        format!("{}: {}", self.name, self.description)
    }
}

/// The embeddable form of a [`Product`].
///
/// Carries the text sent to the embedding provider plus the metadata
/// needed to map a hit back to its product.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedDocument {
    /// `"Title: {name}\n{description}\n{price}"`.
    pub text: String,
    /// Id of the product this document was derived from.
    pub source_id: ProductId,
    pub title: String,
}

impl IndexedDocument {
    pub fn from_product(product: &Product) -> Self {
        Self {
            text: format!(
                "Title: {}\n{}\n{}",
                product.name, product.description, product.price
            ),
            source_id: product.id.clone(),
            title: product.name.clone(),
        }
    }
}

/// A product returned from the index together with its cosine score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProduct {
    pub product: Product,
    pub score: f32,
}

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
