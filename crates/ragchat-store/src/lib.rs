//! ragchat store — hosted vector index access.
//!
//! `VectorIndex` is the retrieval seam; `PineconeIndex` talks to a named
//! Pinecone index over its REST API.

pub mod config;
pub mod pinecone;
pub mod types;

use async_trait::async_trait;
use ragchat_core::Result;

pub use config::PineconeConfig;
pub use pinecone::PineconeIndex;
pub use types::RetrievedDocument;

/// A similarity-searchable index of documents.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return up to `top_k` documents closest to `vector`, best first.
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<RetrievedDocument>>;
}
