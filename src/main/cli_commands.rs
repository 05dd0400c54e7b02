// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    ExecutableCommand,
};

use tutor::cli::{SettingsArgs, SettingsCommands};
use tutor::config::Settings;
use tutor::course::{self, CourseModule};
use tutor::error::Result;
use tutor::llm::message::{ModuleHistory, Role};
use tutor::session::{CredentialStatus, ModelChoice};

const WEB_GPT_URL: &str = "https://chat.openai.com/?model=o4-mini-2024-08-06";
const GOOGLE_SCHOLAR_URL: &str = "https://scholar.google.com";

/// Where to look for recent studies; the tutor itself does not browse
fn literature_search_lines() -> [String; 2] {
    [
        format!("Need recent studies? Open Web GPT (browsing): {}", WEB_GPT_URL),
        format!(
            "or Google Scholar: {}, then paste citations back with /note",
            GOOGLE_SCHOLAR_URL
        ),
    ]
}

fn print_literature_search() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::DarkGrey))?;
    for line in literature_search_lines() {
        println!("{}", line);
    }
    stdout.execute(ResetColor)?;
    Ok(())
}

/// Run settings subcommands
pub(super) fn run_settings_command(
    args: SettingsArgs,
    settings: &Settings,
    path: &Path,
) -> Result<()> {
    match args.command {
        Some(SettingsCommands::Show) | None => {
            let json = serde_json::to_string_pretty(&settings.redacted())?;
            println!("{}", json);
        }
        Some(SettingsCommands::Path) => {
            println!("{}", path.display());
        }
        Some(SettingsCommands::Init) => {
            if init_settings_file(path)? {
                println!("Wrote default settings to {}", path.display());
            } else {
                println!("Settings already exist at {}", path.display());
            }
        }
    }
    Ok(())
}

/// Write default settings unless a file is already there
fn init_settings_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    Settings::default().save_to(path)?;
    Ok(true)
}

/// Print the course catalog
pub(super) fn print_modules() -> Result<()> {
    let mut stdout = io::stdout();
    for (index, module) in course::modules().iter().enumerate() {
        stdout.execute(SetForegroundColor(Color::Cyan))?;
        print!("{:>2}. {}", index + 1, module.key);
        stdout.execute(ResetColor)?;
        println!("  {}", module.subtitle);
    }
    Ok(())
}

pub(super) fn print_welcome(model: ModelChoice, credential: CredentialStatus) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Cyan))?;
    println!("tutor v{}", env!("CARGO_PKG_VERSION"));
    stdout.execute(ResetColor)?;
    println!("Socratic research methods tutor");
    println!("Model: {} ({})", model, model.description());

    if credential == CredentialStatus::Missing {
        stdout.execute(SetForegroundColor(Color::Yellow))?;
        println!("No API key loaded. Use /key <your OpenAI key> to enable the tutor.");
        stdout.execute(ResetColor)?;
    }
    print_literature_search()?;
    println!("Type /help for commands, exit to quit\n");
    Ok(())
}

pub(super) fn print_help() -> Result<()> {
    println!("\nCommands:");
    println!("  /key KEY       - Enter your OpenAI API key for this session");
    println!("  /model [ID]    - Show or switch the model");
    println!("  /module [KEY]  - List modules or switch by key or number");
    println!("  /history       - Reprint this module's conversation");
    println!("  /prompt TEXT   - Log a research prompt you wrote");
    println!("  /note TEXT     - Log literature notes or citations");
    println!("  /export [PATH] - Print the session log as JSON, or write it to PATH");
    println!("  /help          - Show this help message");
    println!("  exit           - Exit the tutor");
    println!();
    print_literature_search()?;
    println!();
    Ok(())
}

/// Print a module's header and conversation so far
pub(super) fn print_module(module: &CourseModule, history: &ModuleHistory) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Magenta))?;
    println!("\n{}", module.title);
    stdout.execute(ResetColor)?;
    println!("{}\n", module.subtitle);

    for message in history {
        match message.role {
            Role::User => print_labelled("you", Color::Green, &message.content)?,
            Role::Assistant => print_labelled("tutor", Color::Cyan, &message.content)?,
            Role::System => {}
        }
    }

    stdout.execute(SetForegroundColor(Color::DarkGrey))?;
    println!("({})", module.prompt_hint);
    stdout.execute(ResetColor)?;
    Ok(())
}

/// Print the tutor's reply
pub(super) fn print_reply(reply: &str) -> Result<()> {
    print_labelled("\ntutor", Color::Cyan, reply)?;
    println!();
    Ok(())
}

pub(super) fn print_error(message: impl std::fmt::Display) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Red))?;
    println!("{}", message);
    stdout.execute(ResetColor)?;
    Ok(())
}

pub(super) fn print_info(message: impl std::fmt::Display) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Yellow))?;
    println!("{}", message);
    stdout.execute(ResetColor)?;
    Ok(())
}

fn print_labelled(label: &str, color: Color, text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(color))?;
    print!("{}: ", label);
    stdout.execute(ResetColor)?;
    println!("{}", text);
    Ok(())
}

/// Model menu with the active choice marked
pub(super) fn model_menu(current: ModelChoice) -> Vec<String> {
    ModelChoice::ALL
        .iter()
        .map(|choice| {
            let marker = if *choice == current { "*" } else { " " };
            format!("{} {:<13} {}", marker, choice.id(), choice.description())
        })
        .collect()
}

/// Read user input; `None` at end of input
pub(super) fn read_user_input() -> Result<Option<String>> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Green))?;
    print!("you: ");
    stdout.execute(ResetColor)?;
    stdout.flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}
