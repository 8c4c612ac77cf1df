//! HTTP client for the external text-generation API.
//!
//! Wraps an OpenAI-compatible chat-completions endpoint using [`reqwest`]:
//! a single-completion call for curriculum generation and a streamed call
//! for chat, delivered as a channel of text chunks. Dropping the receiver
//! (or firing the cancellation token) aborts the upstream request.

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// One prior message in a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    /// `user` or `assistant`.
    pub role: String,
    pub content: String,
}

/// Configuration for the text-generation collaborator.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the chat-completions endpoint, e.g.
    /// `https://api.openai.com/v1`.
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl LlmConfig {
    /// Load LLM settings from environment variables.
    ///
    /// | Env Var       | Required | Default                     |
    /// |---------------|----------|-----------------------------|
    /// | `LLM_API_URL` | no       | `https://api.openai.com/v1` |
    /// | `LLM_API_KEY` | **yes**  | --                          |
    /// | `LLM_MODEL`   | no       | `gpt-4o-mini`               |
    pub fn from_env() -> Self {
        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let api_key = std::env::var("LLM_API_KEY").expect("LLM_API_KEY must be set");
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Self {
            api_url,
            api_key,
            model,
        }
    }
}

/// Errors from the text-generation API layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The completion payload was missing the expected fields.
    #[error("Malformed completion payload: {0}")]
    MalformedPayload(String),
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct StreamEvent {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Deserialize, Default)]
struct StreamDelta {
    content: Option<String>,
}

/// HTTP client for the text-generation API.
pub struct LlmApi {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmApi {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn request_body(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        user_prompt: &str,
        stream: bool,
    ) -> serde_json::Value {
        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": system_prompt,
        })];
        for turn in history {
            messages.push(serde_json::json!({
                "role": turn.role,
                "content": turn.content,
            }));
        }
        messages.push(serde_json::json!({
            "role": "user",
            "content": user_prompt,
        }));

        serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "stream": stream,
        })
    }

    /// Request a single completion and return the full reply text.
    pub async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        user_prompt: &str,
    ) -> Result<String, LlmApiError> {
        let body = self.request_body(system_prompt, history, user_prompt, false);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let payload: CompletionResponse = response.json().await?;

        payload
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmApiError::MalformedPayload("empty choices array".to_string()))
    }

    /// Request a streamed completion.
    ///
    /// Returns a channel of text chunks. The spawned task ends when the
    /// upstream stream finishes, the receiver is dropped, or `cancel`
    /// fires; in the latter two cases the upstream request is closed by
    /// dropping the response stream.
    pub async fn stream(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        user_prompt: &str,
        cancel: CancellationToken,
    ) -> Result<mpsc::Receiver<Result<String, LlmApiError>>, LlmApiError> {
        let body = self.request_body(system_prompt, history, user_prompt, true);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;

        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(async move {
            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();

            loop {
                let chunk = tokio::select! {
                    () = cancel.cancelled() => {
                        tracing::debug!("Generation stream cancelled");
                        break;
                    }
                    chunk = byte_stream.next() => chunk,
                };

                let bytes = match chunk {
                    Some(Ok(bytes)) => bytes,
                    Some(Err(e)) => {
                        let _ = tx.send(Err(LlmApiError::Request(e))).await;
                        break;
                    }
                    None => break,
                };

                buffer.push_str(&String::from_utf8_lossy(&bytes));

                // SSE frames are newline-delimited `data: {json}` lines.
                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim().to_string();
                    buffer.drain(..=newline);

                    let Some(data) = line.strip_prefix("data: ") else {
                        continue;
                    };
                    if data == "[DONE]" {
                        return;
                    }
                    let Ok(event) = serde_json::from_str::<StreamEvent>(data) else {
                        continue;
                    };
                    let text = event
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|c| c.delta.content)
                        .unwrap_or_default();
                    if text.is_empty() {
                        continue;
                    }
                    if tx.send(Ok(text)).await.is_err() {
                        // Consumer stopped pulling; close upstream.
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or capture the
    /// status and body text as an [`LlmApiError::ApiError`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LlmApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LlmApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
