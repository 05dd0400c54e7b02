// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Session state for one student
//!
//! - `store`: credential, model, per-module histories and the in-flight set
//! - `selector`: credential and model validation
//! - `audit`: append-only exchange log

pub mod audit;
pub mod selector;
pub mod store;

pub use audit::{AuditEntry, AuditLog, EntryType};
pub use selector::{Credential, CredentialStatus, ModelChoice};
pub use store::{ModuleState, Session};
