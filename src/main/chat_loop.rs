// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::sync::Arc;

use tutor::chat::{parse_input, ChatDispatcher, ChatInput, ModuleChatController};
use tutor::cli::ChatArgs;
use tutor::config::Settings;
use tutor::course::{self, CourseModule, RESEARCH_WORKFLOW_KEY};
use tutor::error::{Result, TutorError};
use tutor::llm::providers::OpenAiProvider;
use tutor::session::{CredentialStatus, EntryType, Session};

use super::cli_commands::{
    model_menu, print_error, print_help, print_info, print_module, print_reply, print_welcome,
    read_user_input,
};

fn build_controller(args: &ChatArgs, settings: &Settings) -> Result<ModuleChatController> {
    let session = Arc::new(Session::new());

    let model = args
        .model
        .clone()
        .unwrap_or_else(|| settings.chat.default_model.clone());
    session.select_model(&model)?;

    if let Some(key) = args.api_key.clone().or_else(|| settings.get_api_key()) {
        session.submit_credential(&key);
    }

    let provider = OpenAiProvider::from_config(&settings.provider)?;
    let mut dispatcher =
        ChatDispatcher::new(Arc::new(provider)).with_max_tokens(settings.chat.max_tokens);
    if let Some(prompt) = &settings.chat.system_prompt {
        dispatcher = dispatcher.with_system_prompt(prompt.clone());
    }

    Ok(ModuleChatController::new(session, dispatcher).with_temperature(settings.chat.temperature))
}

fn resolve_module(query: Option<&str>) -> Result<&'static CourseModule> {
    match query {
        None => Ok(course::first()),
        Some(query) => course::find(query)
            .ok_or_else(|| TutorError::InvalidInput(format!("unknown module '{}'", query))),
    }
}

/// Log a research-workflow entry and describe what happened
fn log_research_entry(
    session: &Session,
    text: &str,
    kind: EntryType,
) -> std::result::Result<&'static str, &'static str> {
    if !session.log_note(RESEARCH_WORKFLOW_KEY, text, "", kind) {
        return Err("Nothing to log.");
    }
    Ok(match kind {
        EntryType::CustomPrompt => "Prompt logged.",
        _ => "Notes logged.",
    })
}

/// Run the interactive tutoring loop
pub(super) async fn run_chat(args: ChatArgs, settings: Settings) -> Result<()> {
    let controller = build_controller(&args, &settings)?;
    let session = Arc::clone(controller.session());
    let mut module = resolve_module(args.module.as_deref())?;

    tracing::debug!(
        target: "tutor.chat.controller",
        session = %session.id(),
        module = module.key,
        "chat session started"
    );

    print_welcome(session.model(), session.credential_status())?;
    print_module(module, &controller.open_module(module.key, module.starter))?;

    while let Some(line) = read_user_input()? {
        match parse_input(&line) {
            ChatInput::Empty => continue,
            ChatInput::Quit => break,
            ChatInput::Help => print_help()?,
            ChatInput::Message(text) => {
                match controller.handle_turn(module.key, &text, module.starter).await {
                    Ok(outcome) => {
                        if let Some(reply) = outcome.reply {
                            print_reply(&reply)?;
                        }
                    }
                    Err(err) => print_error(err)?,
                }
            }
            ChatInput::SetKey(key) => match session.submit_credential(&key) {
                CredentialStatus::Loaded => print_info("API key loaded.")?,
                CredentialStatus::Missing => print_error("No API key set.")?,
            },
            ChatInput::Model(None) => {
                for line in model_menu(session.model()) {
                    println!("{}", line);
                }
            }
            ChatInput::Model(Some(id)) => match session.select_model(&id) {
                Ok(choice) => print_info(format!("Model switched to {}", choice))?,
                Err(err) => print_error(err)?,
            },
            ChatInput::Module(None) => {
                for (index, entry) in course::modules().iter().enumerate() {
                    let marker = if entry.key == module.key { "*" } else { " " };
                    println!("{} {}. {}", marker, index + 1, entry.key);
                }
            }
            ChatInput::Module(Some(query)) => match resolve_module(Some(&query)) {
                Ok(next) => {
                    module = next;
                    print_module(module, &controller.open_module(module.key, module.starter))?;
                }
                Err(err) => print_error(err)?,
            },
            ChatInput::History => {
                print_module(module, &session.history(module.key))?;
            }
            ChatInput::Note(text) => {
                match log_research_entry(&session, &text, EntryType::Notes) {
                    Ok(confirmation) => print_info(confirmation)?,
                    Err(message) => print_error(message)?,
                }
            }
            ChatInput::Prompt(text) => {
                match log_research_entry(&session, &text, EntryType::CustomPrompt) {
                    Ok(confirmation) => print_info(confirmation)?,
                    Err(message) => print_error(message)?,
                }
            }
            ChatInput::Export(None) => {
                println!("{}", session.export_audit_json()?);
            }
            ChatInput::Export(Some(path)) => {
                let written = session
                    .export_audit_json()
                    .and_then(|json| std::fs::write(&path, json).map_err(TutorError::from));
                match written {
                    Ok(()) => print_info(format!(
                        "Wrote {} entries to {}",
                        session.export_audit().len(),
                        path.display()
                    ))?,
                    Err(err) => print_error(err)?,
                }
            }
            ChatInput::Unknown(command) => {
                print_error(format!("Unknown command: {} (try /help)", command))?;
            }
        }
    }

    Ok(())
}
