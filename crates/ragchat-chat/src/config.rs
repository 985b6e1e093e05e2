//! LLM provider configuration.

use ragchat_core::{EnvLookup, ProcessEnv, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_TEMPERATURE: f64 = 0.0;

/// OpenAI credentials and model selection, shared by the chat and
/// embeddings clients.
#[derive(Clone)]
pub struct LLMConfig {
    pub api_key: String,
    /// OpenAI-compatible API root, without trailing slash.
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub temperature: f64,
    /// Log full prompts and completions at debug level.
    pub verbose: bool,
}

impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("embedding_model", &self.embedding_model)
            .field("temperature", &self.temperature)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl LLMConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            chat_model: DEFAULT_CHAT_MODEL.into(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            verbose: false,
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&ProcessEnv)
    }

    pub fn from_lookup(env: &impl EnvLookup) -> Result<Self> {
        let base_url = env
            .optional("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());

        Ok(Self {
            api_key: env.required("OPENAI_API_KEY")?,
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_model: env
                .optional("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.into()),
            embedding_model: env
                .optional("OPENAI_EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.into()),
            temperature: env.parse_or("OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            verbose: env.flag("LLM_VERBOSE"),
        })
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub fn embeddings_url(&self) -> String {
        format!("{}/embeddings", self.base_url)
    }
}
