//! Chat pipeline: normalize, then retrieve and answer.

use std::sync::Arc;

use ragchat_chat::{ByteStream, ChatMessage, ChatModel};
use ragchat_core::Result;
use ragchat_infer::Embedder;
use ragchat_store::VectorIndex;
use tracing::info;

use crate::normalizer::QuestionNormalizer;
use crate::responder::Responder;

/// The full per-request chain. Built once at start-up and shared read-only
/// by every request.
pub struct ChatPipeline {
    normalizer: QuestionNormalizer,
    responder: Responder,
}

impl ChatPipeline {
    pub fn new(normalizer: QuestionNormalizer, responder: Responder) -> Self {
        Self {
            normalizer,
            responder,
        }
    }

    /// Wire both steps to the same chat model.
    pub fn from_providers(
        model: Arc<dyn ChatModel>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        top_k: usize,
        answer_language: impl Into<String>,
    ) -> Self {
        Self::new(
            QuestionNormalizer::new(model.clone()),
            Responder::new(model, embedder, index, top_k, answer_language),
        )
    }

    /// Run the chain and return the answer stream.
    pub async fn run(&self, messages: &[ChatMessage]) -> Result<ByteStream> {
        let question = self.normalizer.standalone_question(messages).await?;
        info!("Standalone question: {}", question);
        self.responder.answer(&question).await
    }
}
