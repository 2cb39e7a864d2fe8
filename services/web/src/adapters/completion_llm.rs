//! services/web/src/adapters/completion_llm.rs
//!
//! This module contains the adapter for the hosted chat-completion endpoint.
//! It implements the `CompletionService` port from the `core` crate.

use async_trait::async_trait;
use property_writer_core::{
    domain::Credential,
    ports::{CompletionError, CompletionResult, CompletionService},
};
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Upper bound on the length of every generated description.
pub const MAX_OUTPUT_TOKENS: u32 = 500;

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompletionService` against an OpenAI-compatible
/// `chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatCompletionAdapter {
    client: Client,
    endpoint: String,
    model: String,
}

impl ChatCompletionAdapter {
    /// Creates a new `ChatCompletionAdapter`.
    pub fn new(client: Client, endpoint: String, model: String) -> Self {
        Self {
            client,
            endpoint,
            model,
        }
    }
}

//=========================================================================================
// `CompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompletionService for ChatCompletionAdapter {
    async fn request_completion(
        &self,
        prompt: &str,
        credential: &Credential,
        temperature: f64,
    ) -> CompletionResult<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        debug!(
            model = %self.model,
            temperature,
            prompt_chars = prompt.chars().count(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Completion endpoint returned an error status");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        // Only the first choice is ever used.
        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            CompletionError::MalformedResponse("response contained no choices".to_string())
        })?;

        choice.message.content.ok_or_else(|| {
            CompletionError::MalformedResponse("first choice contained no text content".to_string())
        })
    }
}
