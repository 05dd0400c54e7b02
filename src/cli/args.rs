// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Research methods tutor for your terminal
#[derive(Parser, Debug)]
#[command(name = "tutor")]
#[command(version, about = "Socratic research methods tutor for your terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive tutoring session (default when no command given)
    Chat(ChatArgs),

    /// List the course modules
    Modules,

    /// Inspect configuration
    #[command(alias = "config")]
    Settings(SettingsArgs),
}

/// Arguments for the chat subcommand
#[derive(clap::Args, Debug, Default)]
pub struct ChatArgs {
    /// Module to start in, by key or number
    #[arg(long)]
    pub module: Option<String>,

    /// Model to use (gpt-4o-mini, gpt-4o, gpt-4.1-mini)
    #[arg(short, long)]
    pub model: Option<String>,

    /// OpenAI API key for this session
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

/// Arguments for the settings subcommand
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current configuration
    Show,

    /// Print the settings file path
    Path,

    /// Write a default settings file if none exists
    Init,
}
