// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tutor - Socratic research methods tutor backed by a hosted LLM.
//!
//! This crate exposes the chat core used by the `tutor` CLI (`src/main.rs`).
//!
//! Architecture highlights:
//! - `session`: per-session state (credential, model, module histories, audit log)
//! - `chat`: the dispatcher that calls the completion API and the controller
//!   that runs one module turn
//! - `llm`: message types, provider abstraction and the OpenAI-compatible provider
//! - `course`: the static module catalog
//! - `config`, `cli`: settings file and command-line surface

pub mod chat;
pub mod cli;
pub mod config;
pub mod course;
pub mod error;
pub mod llm;
pub mod session;

pub use error::{Result, TutorError};
