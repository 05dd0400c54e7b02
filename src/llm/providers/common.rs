// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::{ApiError, TutorError};

/// Fallback wait reported for rate limits without a Retry-After header.
pub(crate) const DEFAULT_RETRY_AFTER_SECS: u32 = 60;

/// Parse numeric Retry-After header (seconds).
pub(crate) fn parse_retry_after_seconds(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u32>().ok())
}

/// Construct a standardized server error.
pub(crate) fn server_error(status: u16, message: impl Into<String>) -> TutorError {
    TutorError::Api(ApiError::ServerError {
        status,
        message: message.into(),
    })
}

/// Map a transport-level reqwest failure into the API taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> TutorError {
    if err.is_timeout() {
        TutorError::Api(ApiError::Timeout)
    } else if err.is_connect() {
        TutorError::Api(ApiError::Network(err.to_string()))
    } else {
        TutorError::Http(err)
    }
}
