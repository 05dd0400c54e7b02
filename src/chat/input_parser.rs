// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Input parsing for the terminal chat
//!
//! Pure classification of one input line into a slash command or a
//! message for the tutor.

use std::path::PathBuf;

/// One line typed at the chat prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    /// Text for the tutor
    Message(String),
    /// `/key <value>`: enter or replace the API key
    SetKey(String),
    /// `/model` lists models, `/model <id>` selects one
    Model(Option<String>),
    /// `/module` lists modules, `/module <key>` switches
    Module(Option<String>),
    /// `/note <text>`: log literature notes
    Note(String),
    /// `/prompt <text>`: log a custom research prompt
    Prompt(String),
    /// `/history`: reprint the current module's dialogue
    History,
    /// `/export [path]`: print or write the audit log
    Export(Option<PathBuf>),
    /// `/help`
    Help,
    /// `/quit`, `/exit`, `quit`, `exit`
    Quit,
    /// Blank line
    Empty,
    /// A slash command we don't know
    Unknown(String),
}

/// Split `/cmd rest` into the lowercased command and the trimmed remainder
fn split_command(line: &str) -> (String, Option<&str>) {
    match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => {
            let rest = rest.trim();
            (cmd.to_lowercase(), (!rest.is_empty()).then_some(rest))
        }
        None => (line.to_lowercase(), None),
    }
}

/// Classify a line of user input
pub fn parse_input(input: &str) -> ChatInput {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ChatInput::Empty;
    }
    if matches!(trimmed.to_lowercase().as_str(), "exit" | "quit") {
        return ChatInput::Quit;
    }
    if !trimmed.starts_with('/') {
        return ChatInput::Message(trimmed.to_string());
    }

    let (command, arg) = split_command(trimmed);
    match (command.as_str(), arg) {
        ("/quit" | "/exit", _) => ChatInput::Quit,
        ("/help", _) => ChatInput::Help,
        ("/history", _) => ChatInput::History,
        ("/key", Some(key)) => ChatInput::SetKey(key.to_string()),
        ("/model" | "/models", arg) => ChatInput::Model(arg.map(str::to_string)),
        ("/module" | "/modules", arg) => ChatInput::Module(arg.map(str::to_string)),
        ("/note", Some(text)) => ChatInput::Note(text.to_string()),
        ("/prompt", Some(text)) => ChatInput::Prompt(text.to_string()),
        ("/export", arg) => ChatInput::Export(arg.map(PathBuf::from)),
        _ => ChatInput::Unknown(trimmed.to_string()),
    }
}
