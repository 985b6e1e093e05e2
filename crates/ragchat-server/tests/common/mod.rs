//! Recording fakes for the providers behind `/api/chat`.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::Router;
use bytes::Bytes;
use parking_lot::Mutex;
use ragchat_chat::{ByteStream, ChatModel};
use ragchat_core::{Error, Result};
use ragchat_infer::Embedder;
use ragchat_runtime::ChatPipeline;
use ragchat_server::auth::{Authenticator, UserId};
use ragchat_server::{build_router, AppState};
use ragchat_store::{RetrievedDocument, VectorIndex};

/// Authenticates every request as `user`, or none of them.
pub struct FixedAuth(pub Option<UserId>);

#[async_trait]
impl Authenticator for FixedAuth {
    async fn authenticate(&self, _headers: &HeaderMap) -> Option<UserId> {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct FakeChat {
    pub completion: String,
    pub chunks: Vec<&'static str>,
    pub fail_with: Option<String>,
    pub complete_prompts: Mutex<Vec<String>>,
    pub stream_prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl ChatModel for FakeChat {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.complete_prompts.lock().push(prompt.to_string());
        Ok(self.completion.clone())
    }

    async fn stream(&self, prompt: &str) -> Result<ByteStream> {
        self.stream_prompts.lock().push(prompt.to_string());
        if let Some(msg) = &self.fail_with {
            return Err(Error::Provider(msg.clone()));
        }
        let items: Vec<Result<Bytes>> = self
            .chunks
            .iter()
            .map(|c| Ok(Bytes::from_static(c.as_bytes())))
            .collect();
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

#[derive(Default)]
pub struct FakeEmbedder {
    pub queries: Mutex<Vec<String>>,
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.queries.lock().push(text.to_string());
        Ok(vec![0.25; 4])
    }
}

#[derive(Default)]
pub struct FakeIndex {
    pub texts: Vec<&'static str>,
    pub calls: Mutex<usize>,
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn query(&self, _vector: Vec<f32>, top_k: usize) -> Result<Vec<RetrievedDocument>> {
        *self.calls.lock() += 1;
        Ok(self
            .texts
            .iter()
            .take(top_k)
            .map(|t| RetrievedDocument::new(*t))
            .collect())
    }
}

pub struct Harness {
    pub chat: Arc<FakeChat>,
    pub embedder: Arc<FakeEmbedder>,
    pub index: Arc<FakeIndex>,
    pub app: Router,
}

impl Harness {
    pub fn new(user: Option<&str>, chat: FakeChat, index: FakeIndex) -> Self {
        let chat = Arc::new(chat);
        let embedder = Arc::new(FakeEmbedder::default());
        let index = Arc::new(index);
        let pipeline = ChatPipeline::from_providers(
            chat.clone(),
            embedder.clone(),
            index.clone(),
            4,
            "Chinese",
        );
        let auth = Arc::new(FixedAuth(user.map(str::to_string)));
        let app = build_router(Arc::new(AppState::new(auth, pipeline)));
        Self {
            chat,
            embedder,
            index,
            app,
        }
    }

    /// Total calls made to any provider.
    pub fn provider_calls(&self) -> usize {
        self.chat.complete_prompts.lock().len()
            + self.chat.stream_prompts.lock().len()
            + self.embedder.queries.lock().len()
            + *self.index.calls.lock()
    }
}
