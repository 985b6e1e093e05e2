//! In-memory providers that record how they were called.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use parking_lot::Mutex;
use ragchat_chat::{ByteStream, ChatModel};
use ragchat_core::{Error, Result};
use ragchat_infer::Embedder;
use ragchat_store::{RetrievedDocument, VectorIndex};

pub struct MockChat {
    completion: String,
    chunks: Vec<String>,
    failure: Option<String>,
    complete_prompts: Mutex<Vec<String>>,
    stream_prompts: Mutex<Vec<String>>,
}

impl MockChat {
    pub fn new(completion: &str, chunks: &[&str]) -> Self {
        Self {
            completion: completion.to_string(),
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            failure: None,
            complete_prompts: Mutex::new(Vec::new()),
            stream_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            failure: Some(msg.to_string()),
            ..Self::new("", &[])
        }
    }

    pub fn complete_calls(&self) -> usize {
        self.complete_prompts.lock().len()
    }

    pub fn stream_calls(&self) -> usize {
        self.stream_prompts.lock().len()
    }

    pub fn complete_prompts(&self) -> Vec<String> {
        self.complete_prompts.lock().clone()
    }

    pub fn stream_prompts(&self) -> Vec<String> {
        self.stream_prompts.lock().clone()
    }
}

#[async_trait]
impl ChatModel for MockChat {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.complete_prompts.lock().push(prompt.to_string());
        match &self.failure {
            Some(msg) => Err(Error::Provider(msg.clone())),
            None => Ok(self.completion.clone()),
        }
    }

    async fn stream(&self, prompt: &str) -> Result<ByteStream> {
        self.stream_prompts.lock().push(prompt.to_string());
        if let Some(msg) = &self.failure {
            return Err(Error::Provider(msg.clone()));
        }
        let items: Vec<Result<Bytes>> = self
            .chunks
            .iter()
            .map(|c| Ok(Bytes::from(c.clone())))
            .collect();
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

#[derive(Default)]
pub struct MockEmbedder {
    queries: Mutex<Vec<String>>,
}

impl MockEmbedder {
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.queries.lock().push(text.to_string());
        Ok(vec![0.5; 8])
    }
}

pub struct MockIndex {
    docs: Vec<RetrievedDocument>,
    failure: Option<String>,
    top_ks: Mutex<Vec<usize>>,
}

impl MockIndex {
    pub fn new(texts: &[&str]) -> Self {
        Self {
            docs: texts.iter().map(|t| RetrievedDocument::new(*t)).collect(),
            failure: None,
            top_ks: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            failure: Some(msg.to_string()),
            ..Self::new(&[])
        }
    }

    pub fn calls(&self) -> usize {
        self.top_ks.lock().len()
    }

    pub fn last_top_k(&self) -> Option<usize> {
        self.top_ks.lock().last().copied()
    }
}

#[async_trait]
impl VectorIndex for MockIndex {
    async fn query(&self, _vector: Vec<f32>, top_k: usize) -> Result<Vec<RetrievedDocument>> {
        self.top_ks.lock().push(top_k);
        match &self.failure {
            Some(msg) => Err(Error::Provider(msg.clone())),
            None => Ok(self.docs.iter().take(top_k).cloned().collect()),
        }
    }
}

/// Drain an answer stream into one buffer, panicking on stream errors.
pub async fn collect_body(mut stream: ByteStream) -> Vec<u8> {
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk.expect("stream chunk"));
    }
    body
}
