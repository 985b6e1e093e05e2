//! Shared application state.

use std::sync::Arc;

use ragchat_chat::{LLMConfig, OpenAiChat};
use ragchat_core::{Error, RagChatConfig, Result};
use ragchat_infer::OpenAiEmbedder;
use ragchat_runtime::ChatPipeline;
use ragchat_store::{PineconeConfig, PineconeIndex};
use reqwest::{Client, Proxy};
use tracing::info;

use crate::auth::{Authenticator, SessionAuthenticator};

/// Everything a request handler needs. Built once in `main`; read-only
/// afterwards.
pub struct AppState {
    pub authenticator: Arc<dyn Authenticator>,
    pub pipeline: ChatPipeline,
}

impl AppState {
    pub fn new(authenticator: Arc<dyn Authenticator>, pipeline: ChatPipeline) -> Self {
        Self {
            authenticator,
            pipeline,
        }
    }

    /// Wire the production providers. All of them share one HTTP client, so
    /// the proxy applies to every outbound call.
    pub fn from_config(
        config: &RagChatConfig,
        llm: LLMConfig,
        pinecone: PineconeConfig,
    ) -> Result<Self> {
        let client = build_http_client(config.proxy.as_deref())?;

        info!(
            "Chat model {} / embeddings {} / index {} (top_k={})",
            llm.chat_model, llm.embedding_model, pinecone.index_name, pinecone.top_k
        );

        let top_k = pinecone.top_k;
        let model = Arc::new(OpenAiChat::new(client.clone(), llm.clone()));
        let embedder = Arc::new(OpenAiEmbedder::new(client.clone(), llm));
        let index = Arc::new(PineconeIndex::new(client, pinecone));
        let pipeline = ChatPipeline::from_providers(
            model,
            embedder,
            index,
            top_k,
            config.answer_language.clone(),
        );

        Ok(Self::new(
            Arc::new(SessionAuthenticator::new(&config.auth)),
            pipeline,
        ))
    }
}

/// Build the outbound client, routing HTTP and HTTPS through `proxy` when set.
pub fn build_http_client(proxy: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(url) = proxy {
        let proxy =
            Proxy::all(url).map_err(|e| Error::Config(format!("Invalid PROXY {:?}: {}", url, e)))?;
        builder = builder.proxy(proxy);
        info!("Outbound requests go through proxy {}", url);
    }
    builder
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
}
