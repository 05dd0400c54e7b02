// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Module chat
//!
//! The dispatcher sends one module history to the completion API. The
//! controller runs a full turn on top of it and keeps the session's history
//! and audit log in step.

pub mod controller;
pub mod dispatcher;
pub mod input_parser;

pub use controller::{ModuleChatController, TurnOutcome};
pub use dispatcher::{classify_error, ChatDispatcher, DEFAULT_TEMPERATURE, SYSTEM_PROMPT};
pub use input_parser::{parse_input, ChatInput};
