//! CLI interface module
//!
//! Offline management commands. They talk to the database directly through
//! the same services the HTTP handlers use.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands, LinkCommands, TierCommands};
use crate::storage::StorageFactory;
use commands::{config_generate, create_link, list_links, list_tiers};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        let (kind, msg) = match self {
            CliError::StorageError(msg) => ("Storage error:", msg),
            CliError::CommandError(msg) => ("Command error:", msg),
        };
        format!("{} {}", kind.red().bold(), msg)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::AgencyError> for CliError {
    fn from(err: crate::errors::AgencyError) -> Self {
        if err.is_user_facing() {
            CliError::CommandError(err.message().to_string())
        } else {
            CliError::StorageError(err.to_string())
        }
    }
}

/// Run a management subcommand. `Serve` is handled by the caller.
pub async fn run_cli(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Serve => Err(CliError::CommandError(
            "serve is not a management command".to_string(),
        )),
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,
        Commands::Links { action } => {
            let storage = StorageFactory::create().await?;
            match action {
                LinkCommands::Create { label, expires } => {
                    create_link(storage, label, expires).await
                }
                LinkCommands::List => list_links(storage).await,
            }
        }
        Commands::Tiers {
            action: TierCommands::List,
        } => {
            let storage = StorageFactory::create().await?;
            list_tiers(storage).await
        }
    }
}
