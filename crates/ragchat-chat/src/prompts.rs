//! Prompt templates for the rephrase and answer calls.

use crate::types::ChatMessage;

/// Render prior turns as `role: content` lines.
pub fn chat_history(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ask the model to turn a follow-up into a standalone question in the
/// follow-up's own language.
pub fn rephrase_prompt(chat_history: &str, question: &str) -> String {
    format!(
        "Given the following conversation and a follow up question, rephrase the follow up question to be a standalone question. The standalone question must be in the same language with the follow-up question\n\
         ----------------\n\
         CHAT HISTORY:\n\
         {chat_history}\n\
         ----------------\n\
         FOLLOWUP QUESTION: {question}\n\
         ----------------\n\
         Standalone question:"
    )
}

/// Ask the model to answer from `context` only, in `language`.
pub fn answer_prompt(context: &str, question: &str, language: &str) -> String {
    format!(
        "Use the following pieces of context to answer the question at the end. If you don't know the answer, just say that you don't know, don't try to make up an answer. Answer should always be in {language}.\n\
         ----------------\n\
         CONTEXT:\n\
         {context}\n\
         ----------------\n\
         QUESTION: {question}\n\
         ----------------\n\
         Helpful Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_history_lines() {
        let history = chat_history(&[
            ChatMessage::user("什么是向量数据库？"),
            ChatMessage::assistant("一种存储向量的数据库。"),
        ]);
        assert_eq!(history, "user: 什么是向量数据库？\nassistant: 一种存储向量的数据库。");
    }

    #[test]
    fn test_rephrase_prompt_layout() {
        let prompt = rephrase_prompt("user: a\nassistant: b", "and c?");
        assert!(prompt.starts_with("Given the following conversation"));
        assert!(prompt.contains("CHAT HISTORY:\nuser: a\nassistant: b\n----------------\n"));
        assert!(prompt.contains("FOLLOWUP QUESTION: and c?\n"));
        assert!(prompt.ends_with("Standalone question:"));
    }

    #[test]
    fn test_answer_prompt_layout() {
        let prompt = answer_prompt("A\n\nB", "what?", "Chinese");
        assert!(prompt.contains("Answer should always be in Chinese.\n----------------\n"));
        assert!(prompt.contains("CONTEXT:\nA\n\nB\n----------------\n"));
        assert!(prompt.contains("QUESTION: what?\n"));
        assert!(prompt.ends_with("Helpful Answer:"));
    }

    #[test]
    fn test_answer_prompt_empty_context() {
        let prompt = answer_prompt("", "what?", "English");
        assert!(prompt.contains("CONTEXT:\n\n----------------\n"));
    }
}
