//! ragchat — authenticated retrieval-augmented chat server.

use std::sync::Arc;

use ragchat_chat::LLMConfig;
use ragchat_core::RagChatConfig;
use ragchat_server::{build_router, AppState};
use ragchat_store::PineconeConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the filter reads RUST_LOG
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let config = RagChatConfig::from_env()?;
    let llm = LLMConfig::from_env()?;
    let pinecone = PineconeConfig::from_env()?;
    let port = config.port;

    let state = Arc::new(AppState::from_config(&config, llm, pinecone)?);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("ragchat server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
