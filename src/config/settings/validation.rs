// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::{Result, TutorError};
use crate::session::ModelChoice;

use super::Settings;

const REDACTED: &str = "<redacted>";

impl Settings {
    /// Get the API key, checking the env var first.
    pub fn get_api_key(&self) -> Option<String> {
        // Priority: env var > config file.
        std::env::var(&self.provider.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.provider.api_key.clone())
    }

    /// The configured default model
    pub fn default_model(&self) -> Result<ModelChoice> {
        self.chat
            .default_model
            .parse()
            .map_err(|_| {
                TutorError::Config(format!(
                    "unknown default model '{}'",
                    self.chat.default_model
                ))
            })
    }

    /// Reject settings the tutor cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.default_model()?;

        if !(0.0..=2.0).contains(&self.chat.temperature) {
            return Err(TutorError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.chat.temperature
            )));
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(TutorError::Config("provider base_url is empty".to_string()));
        }
        if self.provider.timeout_secs == 0 {
            return Err(TutorError::Config(
                "provider timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy safe to print: a stored API key is masked.
    pub fn redacted(&self) -> Settings {
        let mut copy = self.clone();
        if copy.provider.api_key.is_some() {
            copy.provider.api_key = Some(REDACTED.to_string());
        }
        copy
    }
}
