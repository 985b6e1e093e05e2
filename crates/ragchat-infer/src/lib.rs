//! ragchat infer — embedding backends.
//!
//! Provides the `Embedder` trait used by retrieval. `OpenAiEmbedder` calls the
//! hosted embeddings endpoint with the same credentials as the chat model.

pub mod embedder;

pub use embedder::{Embedder, OpenAiEmbedder};
