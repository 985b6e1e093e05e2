//! ragchat runtime — the per-request chat pipeline.
//!
//! A request flows through two steps, strictly in order:
//! `QuestionNormalizer` folds the conversation into one standalone question,
//! then `Responder` retrieves context for it and streams the answer.

pub mod normalizer;
pub mod pipeline;
pub mod responder;

#[cfg(test)]
mod testing;

pub use normalizer::QuestionNormalizer;
pub use pipeline::ChatPipeline;
pub use responder::{build_context, Responder};
