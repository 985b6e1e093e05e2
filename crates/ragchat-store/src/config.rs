//! Pinecone configuration.

use ragchat_core::{EnvLookup, ProcessEnv, Result};

pub const DEFAULT_TEXT_KEY: &str = "text";
pub const DEFAULT_TOP_K: usize = 4;

/// Pinecone configuration.
#[derive(Clone, PartialEq)]
pub struct PineconeConfig {
    /// Pinecone API key.
    pub api_key: String,
    /// Index name.
    pub index_name: String,
    /// Legacy pod environment (e.g. "us-west1-gcp"). When unset the index
    /// is described through the global control plane.
    pub environment: Option<String>,
    /// Control-plane root used to describe the index. Defaults to the
    /// Pinecone cloud endpoint for `environment`.
    pub controller_url: Option<String>,
    /// Data-plane host; skips the describe-index lookup when set.
    pub index_host: Option<String>,
    pub namespace: Option<String>,
    /// Metadata key holding the document text.
    pub text_key: String,
    /// Documents returned per query.
    pub top_k: usize,
}

impl std::fmt::Debug for PineconeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PineconeConfig")
            .field("api_key", &"<redacted>")
            .field("index_name", &self.index_name)
            .field("environment", &self.environment)
            .field("controller_url", &self.controller_url)
            .field("index_host", &self.index_host)
            .field("namespace", &self.namespace)
            .field("text_key", &self.text_key)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl PineconeConfig {
    /// Creates a new Pinecone configuration.
    pub fn new(api_key: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            index_name: index_name.into(),
            environment: None,
            controller_url: None,
            index_host: None,
            namespace: None,
            text_key: DEFAULT_TEXT_KEY.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Sets the legacy environment.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Sets the control-plane root.
    pub fn with_controller_url(mut self, url: impl Into<String>) -> Self {
        self.controller_url = Some(url.into());
        self
    }

    /// Sets the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&ProcessEnv)
    }

    pub fn from_lookup(env: &impl EnvLookup) -> Result<Self> {
        Ok(Self {
            api_key: env.required("PINECONE_API_KEY")?,
            index_name: env.required("PINECONE_INDEX_NAME")?,
            environment: env.optional("PINECONE_ENVIRONMENT"),
            controller_url: env.optional("PINECONE_CONTROLLER_URL"),
            index_host: env.optional("PINECONE_INDEX_HOST"),
            namespace: env.optional("PINECONE_NAMESPACE"),
            text_key: env
                .optional("PINECONE_TEXT_KEY")
                .unwrap_or_else(|| DEFAULT_TEXT_KEY.into()),
            top_k: env.parse_or("PINECONE_TOP_K", DEFAULT_TOP_K)?,
        })
    }

    /// Control-plane URL that describes this index.
    ///
    /// Legacy pod environments expose `/databases/{name}`, the global
    /// control plane `/indexes/{name}`.
    pub fn describe_url(&self) -> String {
        let root = match (&self.controller_url, &self.environment) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, Some(env)) => format!("https://controller.{}.pinecone.io", env),
            (None, None) => "https://api.pinecone.io".to_string(),
        };
        let collection = if self.environment.is_some() {
            "databases"
        } else {
            "indexes"
        };
        format!("{}/{}/{}", root, collection, self.index_name)
    }
}
