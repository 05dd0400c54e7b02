// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! OpenAI chat completions provider
//!
//! Implements the LlmProvider trait against `POST {base_url}/chat/completions`.
//! Any OpenAI-compatible endpoint works by overriding the base URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::common::{
    parse_retry_after_seconds, server_error, transport_error, DEFAULT_RETRY_AFTER_SECS,
};
use crate::config::ProviderConfig;
use crate::error::{ApiError, Result, TutorError};
use crate::llm::message::{Message, Role};
use crate::llm::provider::{CompletionRequest, CompletionResponse, LlmProvider, StopReason, Usage};

pub(crate) const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// OpenAI provider
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
}

impl Default for OpenAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAiProvider {
    /// Create a provider for the public OpenAI API
    pub fn new() -> Self {
        Self::with_base_url(OPENAI_API_URL)
    }

    /// Create with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create from provider settings, applying the request timeout
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Build the request body, keeping the message order untouched
    fn build_request(&self, request: &CompletionRequest) -> OpenAiRequest {
        OpenAiRequest {
            model: request.model.clone(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    /// Parse an error response
    fn parse_error(&self, status: u16, headers: &HeaderMap, body: &str) -> TutorError {
        let Ok(error_response) = serde_json::from_str::<OpenAiError>(body) else {
            if status == 401 {
                return TutorError::Api(ApiError::AuthenticationFailed);
            }
            return server_error(status, body);
        };

        let message = error_response.error.message;
        let code = error_response.error.code.as_deref().unwrap_or("");

        match (status, code) {
            (401, _) | (_, "invalid_api_key") => TutorError::Api(ApiError::AuthenticationFailed),
            (_, "model_not_found") => TutorError::Api(ApiError::ModelNotFound(message)),
            (_, "insufficient_quota") => server_error(status, message),
            (429, _) | (_, "rate_limit_exceeded") => TutorError::Api(ApiError::RateLimited(
                parse_retry_after_seconds(headers).unwrap_or(DEFAULT_RETRY_AFTER_SECS),
            )),
            _ => server_error(status, message),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = self.build_request(&request);

        tracing::debug!(
            target: "tutor.llm.openai",
            model = %body.model,
            messages = body.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(request.credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status.as_u16(), &headers, &body));
        }

        let text = response.text().await.map_err(transport_error)?;
        let api_response: OpenAiResponse = serde_json::from_str(&text)
            .map_err(|e| TutorError::Api(ApiError::InvalidResponse(e.to_string())))?;

        let choice = api_response.choices.into_iter().next().ok_or_else(|| {
            TutorError::Api(ApiError::InvalidResponse(
                "No choices in response".to_string(),
            ))
        })?;

        let stop_reason = choice.finish_reason.as_deref().map(|r| match r {
            "length" => StopReason::MaxTokens,
            "content_filter" => StopReason::ContentFilter,
            _ => StopReason::EndTurn,
        });

        let usage = api_response.usage.unwrap_or_default();

        Ok(CompletionResponse {
            id: api_response.id,
            model: api_response.model,
            content: choice.message.content,
            stop_reason,
            usage: Usage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        })
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

impl From<&Message> for OpenAiMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role,
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    code: Option<String>,
}
