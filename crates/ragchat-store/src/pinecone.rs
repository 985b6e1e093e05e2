//! Pinecone backend over the REST data plane.

use async_trait::async_trait;
use ragchat_core::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::PineconeConfig;
use crate::types::RetrievedDocument;
use crate::VectorIndex;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: Option<f32>,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

/// A named Pinecone index.
///
/// The data-plane host is looked up on the first query and reused for the
/// rest of the process.
pub struct PineconeIndex {
    client: Client,
    config: PineconeConfig,
    host: OnceCell<String>,
}

impl PineconeIndex {
    pub fn new(client: Client, config: PineconeConfig) -> Self {
        let host = OnceCell::new_with(config.index_host.as_deref().map(normalize_host));
        Self {
            client,
            config,
            host,
        }
    }

    async fn host(&self) -> Result<&str> {
        let host = self
            .host
            .get_or_try_init(|| self.describe_host())
            .await?;
        Ok(host.as_str())
    }

    async fn describe_host(&self) -> Result<String> {
        let url = self.config.describe_url();
        debug!("Describing Pinecone index {}", self.config.index_name);

        let response = self
            .client
            .get(&url)
            .header("Api-Key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Pinecone describe_index {} failed {}: {}",
                self.config.index_name, status, body
            )));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Invalid describe_index body: {}", e)))?;
        let host = host_from_description(&parsed).ok_or_else(|| {
            Error::Provider(format!(
                "Pinecone index {} has no host yet",
                self.config.index_name
            ))
        })?;

        info!("Pinecone index {} served from {}", self.config.index_name, host);
        Ok(host)
    }

    fn query_body(&self, vector: Vec<f32>, top_k: usize) -> Value {
        let mut body = json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true,
            "includeValues": false,
        });
        if let Some(ns) = &self.config.namespace {
            body["namespace"] = json!(ns);
        }
        body
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<RetrievedDocument>> {
        let url = format!("{}/query", self.host().await?);

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.config.api_key)
            .json(&self.query_body(vector, top_k))
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!("Pinecone query failed {}: {}", status, body)));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Invalid query body: {}", e)))?;

        let docs = documents_from_matches(parsed.matches, &self.config.text_key);
        debug!("Pinecone returned {} documents", docs.len());
        Ok(docs)
    }
}

/// Both the legacy controller (`status.host`) and the current control
/// plane (`host`) shapes are accepted.
fn host_from_description(parsed: &Value) -> Option<String> {
    parsed["host"]
        .as_str()
        .or_else(|| parsed["status"]["host"].as_str())
        .filter(|h| !h.is_empty())
        .map(normalize_host)
}

fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

fn documents_from_matches(matches: Vec<QueryMatch>, text_key: &str) -> Vec<RetrievedDocument> {
    matches
        .into_iter()
        .map(|m| {
            let mut metadata = m.metadata.unwrap_or_default();
            let page_content = match metadata.remove(text_key) {
                Some(Value::String(text)) => text,
                Some(other) => other.to_string(),
                None => String::new(),
            };
            RetrievedDocument {
                page_content,
                id: Some(m.id),
                score: m.score,
                metadata,
            }
        })
        .collect()
}
