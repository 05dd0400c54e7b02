// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Session-scoped state store
//!
//! Holds the credential, the selected model, one history per course module
//! and the audit log. Every accessor resolves absence to a default (empty
//! credential, default model, empty history), so any module can be opened
//! first.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::audit::{AuditEntry, AuditLog, EntryType};
use super::selector::{Credential, ModelChoice};
use crate::error::{Result, TurnError};
use crate::llm::message::{Message, ModuleHistory, Role};

/// Where a module's conversation stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// No messages yet
    Empty,
    /// Only the starter message is shown
    Started,
    /// Ready for the next submission
    AwaitingInput,
    /// A submission is waiting on the provider
    AwaitingReply,
}

#[derive(Debug, Default)]
struct SessionState {
    credential: Credential,
    model: ModelChoice,
    histories: HashMap<String, ModuleHistory>,
    audit: AuditLog,
    in_flight: HashSet<String>,
}

impl SessionState {
    fn history_mut(&mut self, module: &str) -> &mut ModuleHistory {
        self.histories.entry(module.to_string()).or_insert_with(|| {
            tracing::debug!(target: "tutor.session", module, "created module history");
            ModuleHistory::new()
        })
    }

    fn insert_starter(&mut self, module: &str, starter: &str) {
        let history = self.history_mut(module);
        if history.is_empty() && !starter.is_empty() {
            history.push(Message::assistant(starter));
        }
    }
}

/// State of one interactive tutoring session
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    state: Mutex<SessionState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a fresh, empty session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Identifier used to correlate log lines
    pub fn id(&self) -> Uuid {
        self.id
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!(target: "tutor.session", "session lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Snapshot of a module's history, creating an empty one if absent
    pub fn history(&self, module: &str) -> ModuleHistory {
        self.lock().history_mut(module).clone()
    }

    /// Modules that have a history, sorted by key
    pub fn modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = self.lock().histories.keys().cloned().collect();
        modules.sort();
        modules
    }

    pub fn set_credential(&self, value: &str) {
        self.lock().credential = Credential::new(value);
    }

    /// The stored credential; empty when none was entered
    pub fn credential(&self) -> Credential {
        self.lock().credential.clone()
    }

    pub fn set_model(&self, model: ModelChoice) {
        self.lock().model = model;
        tracing::info!(target: "tutor.session", session = %self.id, model = %model, "model selected");
    }

    /// The selected model, or the low-cost default
    pub fn model(&self) -> ModelChoice {
        self.lock().model
    }

    /// Where the module's conversation stands
    pub fn module_state(&self, module: &str) -> ModuleState {
        let state = self.lock();
        if state.in_flight.contains(module) {
            return ModuleState::AwaitingReply;
        }
        match state.histories.get(module).map(ModuleHistory::messages) {
            None | Some([]) => ModuleState::Empty,
            Some([only]) if only.role == Role::Assistant => ModuleState::Started,
            Some(_) => ModuleState::AwaitingInput,
        }
    }

    /// Append an entry to the audit log
    pub fn record_audit(&self, entry: AuditEntry) {
        self.lock().audit.record(entry);
    }

    /// Log a note or custom prompt from a non-chat page.
    ///
    /// Blank prompts are ignored. Returns whether an entry was written.
    pub fn log_note(
        &self,
        module: &str,
        prompt: &str,
        response: &str,
        entry_type: EntryType,
    ) -> bool {
        if prompt.trim().is_empty() {
            return false;
        }
        self.record_audit(AuditEntry::new(module, entry_type, prompt, response));
        true
    }

    /// Snapshot of the audit log in chronological order
    pub fn export_audit(&self) -> Vec<AuditEntry> {
        self.lock().audit.export_all()
    }

    /// Snapshot of one module's audit entries
    pub fn audit_entries_for(&self, module: &str) -> Vec<AuditEntry> {
        self.lock().audit.entries_for(module)
    }

    /// Audit log as a pretty JSON array
    pub fn export_audit_json(&self) -> Result<String> {
        self.lock().audit.to_json()
    }

    /// Show the starter on an empty history and return the history
    pub(crate) fn open_module(&self, module: &str, starter: &str) -> ModuleHistory {
        let mut state = self.lock();
        state.insert_starter(module, starter);
        state.history_mut(module).clone()
    }

    /// Claim the module for one turn and append the user's message.
    ///
    /// Returns the history to send, which ends with the new user message.
    pub(crate) fn begin_turn(
        &self,
        module: &str,
        starter: &str,
        user_text: &str,
    ) -> std::result::Result<ModuleHistory, TurnError> {
        let mut state = self.lock();
        if state.in_flight.contains(module) {
            return Err(TurnError::TurnInProgress(module.to_string()));
        }
        state.insert_starter(module, starter);
        state.in_flight.insert(module.to_string());

        let history = state.history_mut(module);
        history.push(Message::user(user_text));
        Ok(history.clone())
    }

    /// Record a successful reply in the history and the audit log together
    pub(crate) fn complete_turn(&self, module: &str, prompt: &str, reply: &str) -> ModuleHistory {
        let mut state = self.lock();
        state.history_mut(module).push(Message::assistant(reply));
        state
            .audit
            .record(AuditEntry::interaction(module, prompt, reply));
        state.history_mut(module).clone()
    }

    /// Release the module claimed by `begin_turn`
    pub(crate) fn end_turn(&self, module: &str) {
        self.lock().in_flight.remove(module);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_initialization() {
        let session = Session::new();
        assert!(session.credential().is_empty());
        assert_eq!(session.credential().expose(), "");
        assert_eq!(session.model(), ModelChoice::Gpt4oMini);
        assert!(session.export_audit().is_empty());
        assert!(session.history("Regression Logic").is_empty());
    }

    #[test]
    fn test_history_created_lazily() {
        let session = Session::new();
        assert!(session.modules().is_empty());

        session.history("Hypothesis Design");
        session.history("Hypothesis Design");

        assert_eq!(session.modules(), vec!["Hypothesis Design".to_string()]);
    }

    #[test]
    fn test_set_credential_trims() {
        let session = Session::new();
        session.set_credential("  sk-live  ");
        assert_eq!(session.credential().expose(), "sk-live");
    }

    #[test]
    fn test_open_module_inserts_starter_once() {
        let session = Session::new();
        session.open_module("Scientific Method", "Goal: X.");
        let history = session.open_module("Scientific Method", "Goal: X.");

        assert_eq!(history.len(), 1);
        assert_eq!(history.messages()[0], Message::assistant("Goal: X."));
    }

    #[test]
    fn test_open_module_without_starter() {
        let session = Session::new();
        assert!(session.open_module("Scientific Method", "").is_empty());
    }

    #[test]
    fn test_begin_turn_rejects_second_claim() {
        let session = Session::new();
        session.begin_turn("A", "", "first").unwrap();

        let err = session.begin_turn("A", "", "second").unwrap_err();
        assert_eq!(err, TurnError::TurnInProgress("A".to_string()));
        assert_eq!(session.history("A").len(), 1);

        // Another module is unaffected
        assert!(session.begin_turn("B", "", "other").is_ok());

        session.end_turn("A");
        assert!(session.begin_turn("A", "", "second").is_ok());
    }

    #[test]
    fn test_complete_turn_records_audit() {
        let session = Session::new();
        session.begin_turn("A", "", "question").unwrap();
        let history = session.complete_turn("A", "question", "answer");
        session.end_turn("A");

        assert_eq!(history.len(), 2);
        let audit = session.export_audit();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].entry_type, EntryType::Interaction);
        assert_eq!(audit[0].prompt, "question");
        assert_eq!(audit[0].response, "answer");
    }

    #[test]
    fn test_module_state_transitions() {
        let session = Session::new();
        assert_eq!(session.module_state("A"), ModuleState::Empty);

        session.open_module("A", "Goal");
        assert_eq!(session.module_state("A"), ModuleState::Started);

        session.begin_turn("A", "Goal", "answer").unwrap();
        assert_eq!(session.module_state("A"), ModuleState::AwaitingReply);

        session.complete_turn("A", "answer", "reply");
        session.end_turn("A");
        assert_eq!(session.module_state("A"), ModuleState::AwaitingInput);
    }

    #[test]
    fn test_log_note_ignores_blank() {
        let session = Session::new();
        assert!(!session.log_note("AI Research Workflow", "  ", "", EntryType::Notes));
        assert!(session.log_note(
            "AI Research Workflow",
            "Smith (2023) doi:10.1/abc",
            "",
            EntryType::Notes
        ));

        let entries = session.audit_entries_for("AI Research Workflow");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, EntryType::Notes);
    }
}
