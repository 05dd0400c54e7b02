// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Research methods tutor for your terminal
//!
//! Entry point for the tutor CLI application.

use clap::Parser;

use tutor::cli::{ChatArgs, Cli, Commands};
use tutor::config::Settings;
use tutor::error::Result;

#[path = "main/chat_loop.rs"]
mod chat_loop;
#[path = "main/cli_commands.rs"]
mod cli_commands;

use chat_loop::run_chat;
use cli_commands::{print_modules, run_settings_command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on the chat diagnostics; `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        for directive in [
            "tutor.chat.controller=debug",
            "tutor.chat.dispatcher=debug",
            "tutor.llm.openai=debug",
            "tutor.session=debug",
            "tutor.config=debug",
        ] {
            if let Ok(parsed) = directive.parse() {
                env_filter = env_filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Load settings
    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load_from(&settings_path)?;
    settings.validate()?;

    match cli.command {
        None => {
            run_chat(ChatArgs::default(), settings).await?;
        }
        Some(Commands::Chat(args)) => {
            run_chat(args, settings).await?;
        }
        Some(Commands::Modules) => {
            print_modules()?;
        }
        Some(Commands::Settings(args)) => {
            run_settings_command(args, &settings, &settings_path)?;
        }
    }

    Ok(())
}
