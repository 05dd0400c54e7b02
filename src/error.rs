// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for the tutor
//!
//! `TutorError` is the crate-wide error. The chat core narrows provider
//! failures into `DispatchError`, and the controller wraps that into
//! `TurnError` together with its own rejection case.

use thiserror::Error;

/// Main error type for tutor operations
#[derive(Error, Debug)]
pub enum TutorError {
    /// API-related errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A chat turn could not produce a reply
    #[error(transparent)]
    Turn(#[from] TurnError),
}

/// API-specific error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed (invalid API key)
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// Rate limited by the API
    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u32),

    /// Requested model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid response from API
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// API returned an error
    #[error("API error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Timeout waiting for response
    #[error("Request timed out")]
    Timeout,
}

/// Why the dispatcher produced no reply for a turn
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No credential has been entered for this session
    #[error("No API key set. Enter your OpenAI API key to enable the tutor.")]
    MissingCredential,

    /// The provider rejected the credential
    #[error("Your OpenAI API key appears invalid or expired. Please check and re-enter it.")]
    InvalidCredential,

    /// Any other provider or transport failure, with the raw message
    #[error("OpenAI error: {0}")]
    Provider(String),
}

/// Why a controller turn did not complete
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// The dispatcher returned a classified failure
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A previous submission for the module has not resolved yet
    #[error("A reply is still pending for module '{0}'")]
    TurnInProgress(String),
}

/// Result type alias for tutor operations
pub type Result<T> = std::result::Result<T, TutorError>;
