//! Shareable link commands

use std::sync::Arc;

use chrono::Utc;
use colored::Colorize;

use crate::config::get_config;
use crate::interfaces::cli::CliError;
use crate::services::{CreateLinkRequest, LinkService, intake_url};
use crate::storage::SeaOrmStorage;
use crate::utils::TimeParser;

/// Base URL printed next to tokens when none is configured
fn base_url() -> String {
    let config = get_config();
    match &config.links.public_base_url {
        Some(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => format!("http://{}:{}", config.server.host, config.server.port),
    }
}

pub async fn create_link(
    storage: Arc<SeaOrmStorage>,
    label: String,
    expires: Option<String>,
) -> Result<(), CliError> {
    let service = LinkService::new(storage, &get_config().links);
    let link = service
        .create_link(CreateLinkRequest {
            label,
            expires_at: expires,
        })
        .await?;

    println!("{} {}", "✓".bold().green(), "Intake link created".green());
    println!("  {} {}", "Token:".bold(), link.token.cyan());
    println!(
        "  {} {}",
        "URL:".bold(),
        intake_url(&base_url(), &link.token).blue().underline()
    );
    if let Some(expires_at) = link.expires_at {
        println!(
            "  {} {}",
            "Expires:".bold(),
            expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().yellow()
        );
    }
    Ok(())
}

pub async fn list_links(storage: Arc<SeaOrmStorage>) -> Result<(), CliError> {
    let service = LinkService::new(storage, &get_config().links);
    let links = service
        .list_links()
        .await
        .map_err(|e| CliError::StorageError(format!("Failed to load links: {}", e)))?;

    if links.is_empty() {
        println!("{} No intake links found", "ℹ".bold().blue());
        return Ok(());
    }

    let now = Utc::now();
    println!("{}", "Intake links:".bold().green());
    println!();
    for link in &links {
        let label = if link.label.is_empty() {
            "(no label)".to_string()
        } else {
            link.label.clone()
        };
        let status = if !link.is_active {
            "inactive".red().to_string()
        } else if link.is_expired(now) {
            "expired".yellow().to_string()
        } else {
            "active".green().to_string()
        };

        let mut info_parts = vec![
            format!("[{}]", link.id).dimmed().to_string(),
            label.bold().to_string(),
            link.token.cyan().to_string(),
            status,
            format!("(uses: {})", link.use_count).dimmed().to_string(),
        ];
        if let Some(expires_at) = link.expires_at {
            info_parts.push(
                format!("(expires in: {})", TimeParser::format_remaining(now, expires_at))
                    .dimmed()
                    .yellow()
                    .to_string(),
            );
        }
        println!("  {}", info_parts.join(" "));
    }
    println!();
    println!(
        "{} Total {} links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );
    Ok(())
}
