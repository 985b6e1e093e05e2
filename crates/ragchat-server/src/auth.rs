//! Caller authentication.
//!
//! Handlers take a [`CurrentUser`] argument; the extractor asks the
//! configured [`Authenticator`] for the caller's id and rejects the request
//! with 401 before the body is read when there is none.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use ragchat_core::{AuthSettings, Error};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

pub type UserId = String;

/// Resolves the user behind a request.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// `None` means the request is anonymous.
    async fn authenticate(&self, headers: &HeaderMap) -> Option<UserId>;
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub sub: String,
    /// Expiry, seconds since the epoch.
    pub exp: u64,
}

/// Verifies HS256 session tokens from the `Authorization` header or the
/// session cookie.
pub struct SessionAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_name: String,
}

impl SessionAuthenticator {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            cookie_name: settings.cookie_name.clone(),
        }
    }

    /// Bearer token wins over the cookie.
    fn token(&self, headers: &HeaderMap) -> Option<String> {
        if let Some(auth) = headers.typed_get::<Authorization<Bearer>>() {
            return Some(auth.token().to_string());
        }
        CookieJar::from_headers(headers)
            .get(&self.cookie_name)
            .map(|c| c.value().to_string())
    }

    pub fn verify(&self, token: &str) -> Option<UserId> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims.sub).filter(|sub| !sub.is_empty()),
            Err(e) => {
                debug!("Rejected session token: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn authenticate(&self, headers: &HeaderMap) -> Option<UserId> {
        let token = self.token(headers)?;
        self.verify(&token)
    }
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match state.authenticator.authenticate(&parts.headers).await {
            Some(user_id) => Ok(CurrentUser(user_id)),
            None => {
                debug!("Unauthenticated request to {}", parts.uri.path());
                Err(Error::Unauthenticated.into())
            }
        }
    }
}
