//! AI text completion.
//!
//! Features that consume points talk to the language model through the
//! [`CompletionProvider`] trait so the OpenAI-compatible HTTP client can be swapped
//! for a scripted provider in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::server::error::{integration::IntegrationError, AppError};

/// A single chat message sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Produces the next assistant message for a conversation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the assistant's reply text.
    ///
    /// # Returns
    /// - `Ok(String)` - Non-empty reply text
    /// - `Err(AppError::IntegrationErr)` - Upstream rejected the request or returned no text
    /// - `Err(AppError::ReqwestErr)` - Transport failure
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AppError>;
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(
        http_client: reqwest::Client,
        api_key: String,
        model: String,
        base_url: String,
    ) -> Self {
        Self {
            http_client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AppError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: 0.7,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(
                IntegrationError::Completion(format!("{} returned {}", status, body)).into(),
            );
        }

        let completion: ChatCompletionResponse = response.json().await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| IntegrationError::MalformedResponse {
                service: "completion",
                reason: "no choices with content".to_string(),
            })?;

        tracing::debug!("Completion returned {} characters", content.len());

        Ok(content)
    }
}

#[cfg(test)]
pub mod mock {
    //! Scripted provider for service tests.

    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use super::*;

    /// Returns queued replies in order and records every prompt it was sent.
    ///
    /// An `Err` entry makes the call fail with an integration error.
    #[derive(Default)]
    pub struct ScriptedCompletion {
        replies: Mutex<VecDeque<Result<String, String>>>,
        calls: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedCompletion {
        pub fn replying(reply: &str) -> Arc<Self> {
            let provider = Self::default();
            provider.push(Ok(reply.to_string()));
            Arc::new(provider)
        }

        pub fn failing() -> Arc<Self> {
            let provider = Self::default();
            provider.push(Err("upstream unavailable".to_string()));
            Arc::new(provider)
        }

        pub fn push(&self, reply: Result<String, String>) {
            self.replies.lock().unwrap().push_back(reply);
        }

        pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedCompletion {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AppError> {
            self.calls.lock().unwrap().push(messages.to_vec());

            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(message)) => Err(IntegrationError::Completion(message).into()),
                None => Err(IntegrationError::Completion("no scripted reply".to_string()).into()),
            }
        }
    }
}
