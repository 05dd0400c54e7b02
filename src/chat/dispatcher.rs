// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat dispatcher
//!
//! Turns a module history into exactly one completion request and narrows
//! whatever goes wrong into a `DispatchError`. Nothing is retried.

use std::sync::Arc;

use reqwest::StatusCode;

use crate::error::{ApiError, DispatchError, TutorError};
use crate::llm::message::{Message, ModuleHistory};
use crate::llm::provider::{CompletionRequest, LlmProvider};
use crate::session::Session;

/// Fixed tutor persona sent ahead of every history.
pub const SYSTEM_PROMPT: &str = "You are a patient, Socratic research methods tutor for PSC 302. \
You never write full assignments. You ask probing questions, explain tradeoffs, \
and keep the student doing the substantive reasoning. \
If the student requests recent literature, \
you recommend using Web GPT (external browsing) and provide a copy-ready prompt.";

/// Sampling temperature used for tutoring turns
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Sends module histories to the completion API
pub struct ChatDispatcher {
    provider: Arc<dyn LlmProvider>,
    system_prompt: String,
    max_tokens: Option<u32>,
}

impl ChatDispatcher {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_tokens: None,
        }
    }

    /// Replace the fixed system prompt
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Cap the reply length (provider default when `None`)
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// The outbound sequence: system prompt, then the history verbatim
    pub fn assemble_messages(&self, history: &ModuleHistory) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::system(&self.system_prompt));
        messages.extend(history.iter().cloned());
        messages
    }

    /// Request one reply for `history` using the session's credential and model
    pub async fn complete(
        &self,
        session: &Session,
        history: &ModuleHistory,
        temperature: f32,
    ) -> Result<String, DispatchError> {
        let credential = session.credential();
        if credential.is_empty() {
            tracing::debug!(
                target: "tutor.chat.dispatcher",
                session = %session.id(),
                "no credential set; skipping provider call"
            );
            return Err(DispatchError::MissingCredential);
        }

        let model = session.model();
        let request = CompletionRequest::new(model.id(), self.assemble_messages(history), credential)
            .with_temperature(temperature)
            .with_max_tokens(self.max_tokens);

        tracing::debug!(
            target: "tutor.chat.dispatcher",
            session = %session.id(),
            provider = self.provider.name(),
            model = %model,
            messages = request.messages.len(),
            "dispatching completion"
        );

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(err) => {
                let classified = classify_error(err);
                tracing::warn!(
                    target: "tutor.chat.dispatcher",
                    session = %session.id(),
                    error = %classified,
                    "completion failed"
                );
                return Err(classified);
            }
        };

        tracing::debug!(
            target: "tutor.chat.dispatcher",
            session = %session.id(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "completion succeeded"
        );

        response
            .text()
            .map(str::to_string)
            .ok_or_else(|| DispatchError::Provider("empty response from provider".to_string()))
    }
}

/// Narrow a provider failure into the dispatcher's three-way taxonomy
pub fn classify_error(err: TutorError) -> DispatchError {
    match err {
        TutorError::Api(ApiError::AuthenticationFailed)
        | TutorError::Api(ApiError::ServerError { status: 401, .. }) => {
            DispatchError::InvalidCredential
        }
        TutorError::Http(ref e) if e.status() == Some(StatusCode::UNAUTHORIZED) => {
            DispatchError::InvalidCredential
        }
        other => {
            let message = match other {
                TutorError::Api(api) => api.to_string(),
                other => other.to_string(),
            };
            if mentions_rejected_key(&message) {
                DispatchError::InvalidCredential
            } else {
                DispatchError::Provider(message)
            }
        }
    }
}

fn mentions_rejected_key(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["invalid_api_key", "invalid api key", "incorrect api key", "expired"]
        .iter()
        .any(|needle| lower.contains(needle))
}
