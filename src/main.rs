use std::process;

use clap::Parser;

use balthazaar::cli::Cli;
use balthazaar::config::{get_config, init_config_from_path};
use balthazaar::runtime::modes::{self, Mode};
use balthazaar::system::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from_path(cli.config.as_deref());

    match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => {
            let config = get_config();
            // Dropping the guard stops the background log writer
            let _log_guard = init_logging(&config.logging)?;
            modes::run_server().await
        }
        Mode::Cli => {
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                process::exit(1);
            }
            Ok(())
        }
    }
}
