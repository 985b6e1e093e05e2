//! Process configuration read from the environment.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ANSWER_LANGUAGE: &str = "Chinese";
pub const DEFAULT_AUTH_COOKIE: &str = "session-token";

/// Source of configuration values.
///
/// Blank values are treated as unset, so `FOO=` behaves like a missing `FOO`.
pub trait EnvLookup {
    fn lookup(&self, key: &str) -> Option<String>;

    fn optional(&self, key: &str) -> Option<String> {
        self.lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.optional(key)
            .ok_or_else(|| Error::Config(format!("{} is not set", key)))
    }

    fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T> {
        match self.optional(key) {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::Config(format!("{} has an invalid value: {:?}", key, raw))),
            None => Ok(default),
        }
    }

    fn flag(&self, key: &str) -> bool {
        matches!(
            self.optional(key).as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("1" | "true" | "yes" | "on")
        )
    }
}

/// Reads from the real process environment.
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Session authentication settings.
#[derive(Clone)]
pub struct AuthSettings {
    /// HMAC secret used to verify session tokens.
    pub secret: String,
    /// Name of the cookie carrying the session token.
    pub cookie_name: String,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret", &"<redacted>")
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct RagChatConfig {
    /// HTTP server port.
    pub port: u16,
    /// Outbound proxy applied to every provider request.
    pub proxy: Option<String>,
    /// Language the answer prompt asks the model to reply in.
    pub answer_language: String,
    pub auth: AuthSettings,
}

impl RagChatConfig {
    /// Create configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&ProcessEnv)
    }

    pub fn from_lookup(env: &impl EnvLookup) -> Result<Self> {
        Ok(Self {
            port: env.parse_or("PORT", DEFAULT_PORT)?,
            proxy: env.optional("PROXY"),
            answer_language: env
                .optional("ANSWER_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_ANSWER_LANGUAGE.into()),
            auth: AuthSettings {
                secret: env.required("AUTH_SECRET")?,
                cookie_name: env
                    .optional("AUTH_COOKIE_NAME")
                    .unwrap_or_else(|| DEFAULT_AUTH_COOKIE.into()),
            },
        })
    }
}
