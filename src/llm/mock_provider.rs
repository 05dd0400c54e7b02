// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock LLM provider for testing
//!
//! Provides a configurable mock implementation of the LlmProvider trait
//! that can be used in tests without making real API calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::error::Result;
use crate::llm::provider::{CompletionRequest, CompletionResponse, LlmProvider, StopReason, Usage};
use crate::llm::providers::common::server_error;

/// A mock LLM provider for testing
#[derive(Clone)]
pub struct MockProvider {
    /// Provider name
    name: String,
    /// Configured responses
    responses: Arc<Mutex<Vec<MockResponse>>>,
    /// Call counter
    call_count: Arc<AtomicUsize>,
    /// Recorded requests
    recorded_requests: Arc<Mutex<Vec<CompletionRequest>>>,
    /// Simulated network latency per call
    latency: Option<Duration>,
}

/// A pre-configured outcome for the mock provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockResponse {
    /// Assistant text
    Text(String),
    /// Successful call with no assistant content
    Empty,
    /// HTTP failure with status and provider message
    Failure { status: u16, message: String },
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::Text("Mock response".to_string())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Mock provider lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            responses: Arc::new(Mutex::new(vec![MockResponse::default()])),
            call_count: Arc::new(AtomicUsize::new(0)),
            recorded_requests: Arc::new(Mutex::new(vec![])),
            latency: None,
        }
    }

    /// Create a mock provider with a custom name
    pub fn with_name(name: impl Into<String>) -> Self {
        let mut provider = Self::new();
        provider.name = name.into();
        provider
    }

    /// Set the text response
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.with_outcomes(vec![MockResponse::Text(text.into())])
    }

    /// Queue multiple responses (returned in order)
    pub fn with_responses(self, texts: Vec<String>) -> Self {
        self.with_outcomes(texts.into_iter().map(MockResponse::Text).collect())
    }

    /// Fail every call with the given HTTP status and message
    pub fn with_failure(self, status: u16, message: impl Into<String>) -> Self {
        self.with_outcomes(vec![MockResponse::Failure {
            status,
            message: message.into(),
        }])
    }

    /// Queue arbitrary outcomes (returned in order, the last one repeats)
    pub fn with_outcomes(self, outcomes: Vec<MockResponse>) -> Self {
        {
            let mut responses = lock_or_recover(&self.responses);
            responses.clear();
            responses.extend(outcomes);
        }
        self
    }

    /// Delay every call, keeping it in flight for the given duration
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Get the number of times complete() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get all recorded requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        lock_or_recover(&self.recorded_requests).clone()
    }

    /// Get the last request made
    pub fn last_request(&self) -> Option<CompletionRequest> {
        lock_or_recover(&self.recorded_requests).last().cloned()
    }

    /// Reset call count and recorded requests
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
        lock_or_recover(&self.recorded_requests).clear();
    }

    /// Get the next response
    fn next_response(&self) -> MockResponse {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        let responses = lock_or_recover(&self.responses);
        // Cycle through responses or return the last one
        if responses.is_empty() {
            MockResponse::default()
        } else {
            responses[count.min(responses.len() - 1)].clone()
        }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        lock_or_recover(&self.recorded_requests).push(request.clone());

        let response = self.next_response();

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let content = match response {
            MockResponse::Text(text) => Some(text),
            MockResponse::Empty => None,
            MockResponse::Failure { status, message } => {
                return Err(server_error(status, message));
            }
        };

        Ok(CompletionResponse {
            id: format!("chatcmpl-{}", uuid::Uuid::new_v4().simple()),
            model: request.model,
            content,
            stop_reason: Some(StopReason::EndTurn),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
            },
        })
    }
}
