//! Folds a conversation into one standalone question.

use std::sync::Arc;

use ragchat_chat::{prompts, ChatMessage, ChatModel};
use ragchat_core::{Error, Result};
use tracing::debug;

pub struct QuestionNormalizer {
    model: Arc<dyn ChatModel>,
}

impl QuestionNormalizer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Derive the single question retrieval and answering will see.
    ///
    /// A lone message is used verbatim. Longer conversations are rephrased by
    /// the model, keeping the follow-up's language.
    pub async fn standalone_question(&self, messages: &[ChatMessage]) -> Result<String> {
        match messages {
            [] => Err(Error::EmptyConversation),
            [only] => Ok(only.content.clone()),
            [history @ .., follow_up] => {
                debug!("Rephrasing follow-up against {} prior messages", history.len());
                let prompt =
                    prompts::rephrase_prompt(&prompts::chat_history(history), &follow_up.content);
                self.model.complete(&prompt).await
            }
        }
    }
}
