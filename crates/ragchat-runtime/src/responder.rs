//! Retrieval-augmented responder.

use std::sync::Arc;

use ragchat_chat::{prompts, ByteStream, ChatModel};
use ragchat_core::Result;
use ragchat_infer::Embedder;
use ragchat_store::{RetrievedDocument, VectorIndex};
use tracing::debug;

/// Join document texts with a blank line between them.
pub fn build_context(docs: &[RetrievedDocument]) -> String {
    docs.iter()
        .map(|d| d.page_content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Answers a standalone question from documents in the vector index.
pub struct Responder {
    model: Arc<dyn ChatModel>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    top_k: usize,
    answer_language: String,
}

impl Responder {
    pub fn new(
        model: Arc<dyn ChatModel>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        top_k: usize,
        answer_language: impl Into<String>,
    ) -> Self {
        Self {
            model,
            embedder,
            index,
            top_k,
            answer_language: answer_language.into(),
        }
    }

    /// Embed the question and fetch the closest documents.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<RetrievedDocument>> {
        let vector = self.embedder.embed_query(question).await?;
        let docs = self.index.query(vector, self.top_k).await?;
        debug!("Retrieved {} documents (top_k={})", docs.len(), self.top_k);
        Ok(docs)
    }

    /// Retrieve context and start streaming the answer.
    ///
    /// An empty retrieval still reaches the model; the prompt tells it to
    /// say it does not know.
    pub async fn answer(&self, question: &str) -> Result<ByteStream> {
        let docs = self.retrieve(question).await?;
        let context = build_context(&docs);
        let prompt = prompts::answer_prompt(&context, question, &self.answer_language);
        self.model.stream(&prompt).await
    }
}
