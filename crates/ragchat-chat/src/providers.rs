//! OpenAI chat-completion provider.
//!
//! Both calls the pipeline makes go through [`ChatModel`]: a plain completion
//! for the rephrase step and a token stream for the answer. The stream is
//! decoded from the chat-completions SSE protocol and re-emitted as the raw
//! UTF-8 bytes of each content delta.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use ragchat_core::{Error, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tokio_stream::StreamExt;
use tracing::{debug, warn};

use crate::config::LLMConfig;

/// Boxed stream of answer bytes.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// A chat model that turns a single prompt into text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run a completion and return the whole output.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Start a completion and stream its output as it is generated.
    ///
    /// Errors raised before the first byte (bad credentials, unknown model)
    /// are returned directly; later failures surface as stream items.
    async fn stream(&self, prompt: &str) -> Result<ByteStream>;
}

/// Chat model backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiChat {
    client: Client,
    config: LLMConfig,
}

impl OpenAiChat {
    pub fn new(client: Client, config: LLMConfig) -> Self {
        Self { client, config }
    }

    fn request_body(&self, prompt: &str, stream: bool) -> Value {
        json!({
            "model": self.config.chat_model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.config.temperature,
            "stream": stream,
        })
    }

    async fn send(&self, prompt: &str, stream: bool) -> Result<reqwest::Response> {
        let url = self.config.chat_completions_url();
        debug!("Requesting {} with model {} (stream={})", url, self.config.chat_model, stream);
        if self.config.verbose {
            debug!("Prompt:\n{}", prompt);
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(prompt, stream))
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!("API error {}: {}", status, body)));
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self.send(prompt, false).await?;
        let parsed: Value = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Invalid completion body: {}", e)))?;
        let text = completion_text(&parsed)?;
        if self.config.verbose {
            debug!("Completion:\n{}", text);
        }
        Ok(text)
    }

    async fn stream(&self, prompt: &str) -> Result<ByteStream> {
        let response = self.send(prompt, true).await?;
        Ok(Box::pin(sse_content(response.bytes_stream(), self.config.verbose)))
    }
}

/// Pull the assistant text out of a non-streaming completion body.
pub fn completion_text(parsed: &Value) -> Result<String> {
    if let Some(msg) = parsed["error"]["message"].as_str() {
        return Err(Error::Provider(msg.to_string()));
    }
    parsed["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::Provider("Completion contained no message content".into()))
}

enum SseEvent {
    Token(String),
    Done,
    Error(String),
    Skip,
}

fn parse_sse_line(raw: &[u8]) -> SseEvent {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim();

    if line.is_empty() || line.starts_with(':') {
        return SseEvent::Skip;
    }
    let Some(data) = line.strip_prefix("data:") else {
        return SseEvent::Skip;
    };
    let data = data.trim();
    if data == "[DONE]" {
        return SseEvent::Done;
    }

    match serde_json::from_str::<Value>(data) {
        Ok(parsed) => {
            if let Some(msg) = parsed["error"]["message"].as_str() {
                return SseEvent::Error(msg.to_string());
            }
            match parsed["choices"][0]["delta"]["content"].as_str() {
                Some(content) if !content.is_empty() => SseEvent::Token(content.to_string()),
                _ => SseEvent::Skip,
            }
        }
        Err(e) => {
            warn!("Skipping unparsable SSE payload: {}", e);
            SseEvent::Skip
        }
    }
}

/// Decode a chat-completions SSE byte stream into content bytes.
///
/// Lines are split on raw bytes before UTF-8 decoding, so a character
/// straddling two network chunks comes out intact.
pub fn sse_content<S, E>(upstream: S, verbose: bool) -> impl Stream<Item = Result<Bytes>> + Send + 'static
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    async_stream::stream! {
        tokio::pin!(upstream);
        let mut buffer: Vec<u8> = Vec::new();
        let mut answer = String::new();
        let mut finished = false;

        while let Some(chunk) = upstream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    yield Err(Error::Http(format!("Stream read error: {}", e)));
                    return;
                }
            };
            buffer.extend_from_slice(&bytes);

            while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=pos).collect();
                match parse_sse_line(&line) {
                    SseEvent::Token(text) => {
                        if verbose {
                            answer.push_str(&text);
                        }
                        yield Ok(Bytes::from(text));
                    }
                    SseEvent::Done => {
                        finished = true;
                        break;
                    }
                    SseEvent::Error(msg) => {
                        yield Err(Error::Provider(msg));
                        return;
                    }
                    SseEvent::Skip => {}
                }
            }
            if finished {
                break;
            }
        }

        if !finished && !buffer.is_empty() {
            match parse_sse_line(&buffer) {
                SseEvent::Token(text) => {
                    if verbose {
                        answer.push_str(&text);
                    }
                    yield Ok(Bytes::from(text));
                }
                SseEvent::Error(msg) => {
                    yield Err(Error::Provider(msg));
                    return;
                }
                SseEvent::Done | SseEvent::Skip => {}
            }
        }

        if verbose {
            debug!("Streamed answer:\n{}", answer);
        }
    }
}
