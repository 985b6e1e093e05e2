//! ragchat core — error taxonomy and process-wide configuration.

pub mod config;
pub mod error;

pub use config::{AuthSettings, EnvLookup, ProcessEnv, RagChatConfig};
pub use error::{Error, Result};
