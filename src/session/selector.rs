// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Credential and model selection
//!
//! The student supplies an API key and picks one model from a fixed,
//! cost-ordered set. Both choices live for the rest of the session and apply
//! to every module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Session;
use crate::error::{Result, TutorError};

/// Secret used to authorize calls to the completion API.
///
/// Stored trimmed. Never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw secret, for the Authorization header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<unset>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

/// Whether the session currently holds a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// A non-empty credential is stored
    Loaded,
    /// No credential yet; chat turns will be refused
    Missing,
}

/// The models a student may choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelChoice {
    /// Low cost, the default
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    /// High capability
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    /// Mid cost
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
}

impl ModelChoice {
    /// All selectable models, in menu order
    pub const ALL: [ModelChoice; 3] = [
        ModelChoice::Gpt4oMini,
        ModelChoice::Gpt4o,
        ModelChoice::Gpt41Mini,
    ];

    /// Model identifier sent to the API
    pub fn id(&self) -> &'static str {
        match self {
            ModelChoice::Gpt4oMini => "gpt-4o-mini",
            ModelChoice::Gpt4o => "gpt-4o",
            ModelChoice::Gpt41Mini => "gpt-4.1-mini",
        }
    }

    /// Short cost note for menus
    pub fn description(&self) -> &'static str {
        match self {
            ModelChoice::Gpt4oMini => "low cost (default)",
            ModelChoice::Gpt4o => "high capability",
            ModelChoice::Gpt41Mini => "mid cost",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelChoice {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ModelChoice::ALL
            .into_iter()
            .find(|choice| choice.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                TutorError::InvalidInput(format!(
                    "unknown model '{}'; choose one of: {}",
                    wanted,
                    ModelChoice::ALL.map(|c| c.id()).join(", ")
                ))
            })
    }
}

impl Session {
    /// Store a credential typed by the student.
    ///
    /// Blank input leaves any stored credential in place.
    pub fn submit_credential(&self, raw: &str) -> CredentialStatus {
        if !raw.trim().is_empty() {
            self.set_credential(raw);
            tracing::info!(target: "tutor.session", session = %self.id(), "API key loaded");
        }
        self.credential_status()
    }

    /// Whether a usable credential is present
    pub fn credential_status(&self) -> CredentialStatus {
        if self.credential().is_empty() {
            CredentialStatus::Missing
        } else {
            CredentialStatus::Loaded
        }
    }

    /// Validate a model identifier and make it the session's model
    pub fn select_model(&self, id: &str) -> Result<ModelChoice> {
        let choice: ModelChoice = id.parse()?;
        self.set_model(choice);
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_trims() {
        let credential = Credential::new("  sk-abc \n");
        assert_eq!(credential.expose(), "sk-abc");
        assert!(!credential.is_empty());
        assert!(Credential::new("   ").is_empty());
    }

    #[test]
    fn test_credential_debug_redacted() {
        assert_eq!(
            format!("{:?}", Credential::new("sk-secret")),
            "Credential(<redacted>)"
        );
        assert_eq!(format!("{:?}", Credential::default()), "Credential(<unset>)");
    }

    #[test]
    fn test_model_choice_parse() {
        assert_eq!("gpt-4o".parse::<ModelChoice>().unwrap(), ModelChoice::Gpt4o);
        assert_eq!(
            " GPT-4.1-mini ".parse::<ModelChoice>().unwrap(),
            ModelChoice::Gpt41Mini
        );
        let err = "gpt-5".parse::<ModelChoice>().unwrap_err();
        assert!(err.to_string().contains("gpt-4o-mini"));
    }

    #[test]
    fn test_model_choice_default_and_serde() {
        assert_eq!(ModelChoice::default(), ModelChoice::Gpt4oMini);
        assert_eq!(
            serde_json::to_string(&ModelChoice::Gpt41Mini).unwrap(),
            "\"gpt-4.1-mini\""
        );
        for choice in ModelChoice::ALL {
            assert_eq!(choice.to_string().parse::<ModelChoice>().unwrap(), choice);
        }
    }

    #[test]
    fn test_submit_credential() {
        let session = Session::new();
        assert_eq!(session.submit_credential("   "), CredentialStatus::Missing);
        assert_eq!(session.submit_credential(" sk-1 "), CredentialStatus::Loaded);
        assert_eq!(session.credential().expose(), "sk-1");

        // Blank resubmission keeps the key
        assert_eq!(session.submit_credential(""), CredentialStatus::Loaded);
        assert_eq!(session.credential().expose(), "sk-1");
    }

    #[test]
    fn test_select_model() {
        let session = Session::new();
        assert_eq!(session.model(), ModelChoice::Gpt4oMini);

        assert_eq!(session.select_model("gpt-4o").unwrap(), ModelChoice::Gpt4o);
        assert_eq!(session.model(), ModelChoice::Gpt4o);

        assert!(session.select_model("davinci").is_err());
        assert_eq!(session.model(), ModelChoice::Gpt4o);
    }
}
