//! Error types for ragchat.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Empty conversation: at least one message is required")]
    EmptyConversation,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the caller is at fault (as opposed to an upstream provider).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated | Self::EmptyConversation | Self::InvalidRequest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
