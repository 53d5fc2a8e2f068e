//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Balthazaar - client intake and reporting for agencies
#[derive(Parser)]
#[command(name = "balthazaar")]
#[command(version)]
#[command(about = "Client intake, competitor tracking and report scheduling", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Manage shareable intake links
    Links {
        #[command(subcommand)]
        action: LinkCommands,
    },

    /// Inspect subscription tiers
    Tiers {
        #[command(subcommand)]
        action: TierCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate a sample configuration file
    Generate {
        /// Output path (prints to stdout when omitted)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Create a shareable intake link
    Create {
        /// Label shown in the links list
        #[arg(long, default_value = "")]
        label: String,

        /// Expiry (RFC3339, YYYY-MM-DD or relative like "7d", "2w")
        #[arg(long)]
        expires: Option<String>,
    },

    /// List shareable intake links
    List,
}

#[derive(Subcommand)]
pub enum TierCommands {
    /// List subscription tiers in display order
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_server() {
        let cli = Cli::try_parse_from(["balthazaar"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_links_create_args() {
        let cli = Cli::try_parse_from([
            "balthazaar",
            "links",
            "create",
            "--label",
            "Partner",
            "--expires",
            "7d",
            "-c",
            "prod.toml",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("prod.toml"));
        match cli.command {
            Some(Commands::Links {
                action: LinkCommands::Create { label, expires },
            }) => {
                assert_eq!(label, "Partner");
                assert_eq!(expires.as_deref(), Some("7d"));
            }
            _ => panic!("expected links create"),
        }
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["balthazaar", "frobnicate"]).is_err());
    }
}
