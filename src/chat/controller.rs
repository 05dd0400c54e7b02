// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Module chat controller
//!
//! Runs one interactive turn against a module's history: shows the starter
//! on first entry, appends the student's message, dispatches, and records
//! the reply in both the history and the audit log. A failed turn keeps the
//! student's message and writes nothing else.
//!
//! Each module admits one pending turn at a time. Turns on different
//! modules run independently.

use std::sync::Arc;

use super::dispatcher::{ChatDispatcher, DEFAULT_TEMPERATURE};
use crate::error::TurnError;
use crate::llm::message::ModuleHistory;
use crate::session::Session;

/// What a turn produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The assistant reply, `None` when there was nothing to submit
    pub reply: Option<String>,
    /// The module's history after the turn
    pub history: ModuleHistory,
}

/// Releases a module's in-flight claim, including when the turn future is dropped.
struct TurnClaim<'a> {
    session: &'a Session,
    module: &'a str,
}

impl Drop for TurnClaim<'_> {
    fn drop(&mut self) {
        self.session.end_turn(self.module);
    }
}

/// Orchestrates chat turns for every module of one session
pub struct ModuleChatController {
    session: Arc<Session>,
    dispatcher: ChatDispatcher,
    temperature: f32,
}

impl ModuleChatController {
    pub fn new(session: Arc<Session>, dispatcher: ChatDispatcher) -> Self {
        Self {
            session,
            dispatcher,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn dispatcher(&self) -> &ChatDispatcher {
        &self.dispatcher
    }

    /// Render a module without submitting: shows the starter on an empty history
    pub fn open_module(&self, module: &str, starter: &str) -> ModuleHistory {
        self.session.open_module(module, starter)
    }

    /// Handle one student submission for `module`.
    ///
    /// Empty `user_text` only opens the module. On a dispatcher failure the
    /// user message stays in the history and no audit entry is written.
    pub async fn handle_turn(
        &self,
        module: &str,
        user_text: &str,
        starter: &str,
    ) -> Result<TurnOutcome, TurnError> {
        if user_text.is_empty() {
            return Ok(TurnOutcome {
                reply: None,
                history: self.open_module(module, starter),
            });
        }

        tracing::debug!(
            target: "tutor.chat.controller",
            session = %self.session.id(),
            module,
            "turn started"
        );

        self.run_turn(module, user_text, starter).await
    }

    async fn run_turn(
        &self,
        module: &str,
        user_text: &str,
        starter: &str,
    ) -> Result<TurnOutcome, TurnError> {
        let history = self.session.begin_turn(module, starter, user_text)?;
        let _claim = TurnClaim {
            session: &self.session,
            module,
        };

        let reply = self
            .dispatcher
            .complete(&self.session, &history, self.temperature)
            .await?;

        let history = self.session.complete_turn(module, user_text, &reply);
        tracing::info!(
            target: "tutor.chat.controller",
            session = %self.session.id(),
            module,
            history_len = history.len(),
            "turn completed"
        );

        Ok(TurnOutcome {
            reply: Some(reply),
            history,
        })
    }
}
