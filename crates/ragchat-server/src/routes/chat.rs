//! Chat route: authenticated RAG answer streamed as raw bytes.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use futures::TryStreamExt;
use ragchat_chat::ChatRequest;
use ragchat_core::Error;
use tracing::{error, info};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(chat))
}

/// `POST /api/chat`
///
/// The body is only parsed once the caller is authenticated, and is read as
/// JSON whatever its `Content-Type`. The answer is forwarded chunk by chunk
/// as the model produces it, with no content type set; a provider failure
/// after the first chunk aborts the body.
async fn chat(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: ChatRequest =
        serde_json::from_slice(&body).map_err(|e| Error::InvalidRequest(e.to_string()))?;

    info!(
        "Chat request from {} with {} messages",
        user_id,
        req.messages.len()
    );

    let answer = state.pipeline.run(&req.messages).await?;
    let body = Body::from_stream(answer.inspect_err(|e| error!("Answer stream aborted: {}", e)));

    Ok(Response::new(body))
}
