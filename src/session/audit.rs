// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Append-only audit log of completed exchanges and student notes.

use serde::{Deserialize, Serialize};

use crate::error::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Kind of audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// A chat turn that produced a reply
    Interaction,
    /// Literature notes pasted by the student
    Notes,
    /// A research prompt written by the student
    CustomPrompt,
}

/// One audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Local time, ISO-8601 with second precision
    pub timestamp: String,
    pub module: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub prompt: String,
    /// Empty for note entries without a response
    pub response: String,
}

impl AuditEntry {
    /// Create an entry stamped with the current local time
    pub fn new(
        module: impl Into<String>,
        entry_type: EntryType,
        prompt: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            module: module.into(),
            entry_type,
            prompt: prompt.into(),
            response: response.into(),
        }
    }

    /// Entry for a completed chat turn
    pub fn interaction(
        module: impl Into<String>,
        prompt: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self::new(module, EntryType::Interaction, prompt, response)
    }
}

/// Chronological, append-only list of audit entries
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn record(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    /// Snapshot of every entry in insertion order
    pub fn export_all(&self) -> Vec<AuditEntry> {
        self.entries.clone()
    }

    /// Snapshot of the entries for one module
    pub fn entries_for(&self, module: &str) -> Vec<AuditEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.module == module)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON array of all entries
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_has_second_precision() {
        let entry = AuditEntry::interaction("Scientific Method", "q", "a");
        assert!(chrono::NaiveDateTime::parse_from_str(&entry.timestamp, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(entry.timestamp.len(), "2025-01-01T12:00:00".len());
    }

    #[test]
    fn test_record_preserves_order() {
        let mut log = AuditLog::new();
        assert!(log.is_empty());

        log.record(AuditEntry::interaction("A", "first", "1"));
        log.record(AuditEntry::new("B", EntryType::Notes, "second", ""));
        log.record(AuditEntry::interaction("A", "third", "3"));

        let prompts: Vec<String> = log.export_all().into_iter().map(|e| e.prompt).collect();
        assert_eq!(prompts, vec!["first", "second", "third"]);
        assert_eq!(log.entries_for("A").len(), 2);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_export_is_a_snapshot() {
        let mut log = AuditLog::new();
        log.record(AuditEntry::interaction("A", "q", "a"));

        let mut snapshot = log.export_all();
        snapshot.clear();

        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_to_json_field_names() {
        let mut log = AuditLog::new();
        log.record(AuditEntry::new(
            "AI Research Workflow",
            EntryType::CustomPrompt,
            "You are a research assistant",
            "",
        ));

        let json: serde_json::Value = serde_json::from_str(&log.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["type"], "custom_prompt");
        assert_eq!(json[0]["module"], "AI Research Workflow");
        assert_eq!(json[0]["response"], "");
        assert!(json[0]["timestamp"].is_string());
    }
}
