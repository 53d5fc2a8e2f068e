//! Subscription tier commands

use std::sync::Arc;

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::TierService;
use crate::storage::SeaOrmStorage;

pub async fn list_tiers(storage: Arc<SeaOrmStorage>) -> Result<(), CliError> {
    let tiers = TierService::new(storage).list_tiers().await?;

    if tiers.is_empty() {
        println!("{} No subscription tiers configured", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Subscription tiers:".bold().green());
    println!();
    for tier in &tiers {
        let state = if tier.is_active {
            "active".green()
        } else {
            "disabled".red()
        };
        println!(
            "  {:>2}. {} ({}) {} / {} month(s) {}",
            tier.sort_order,
            tier.name.bold(),
            tier.slug.cyan(),
            tier.price_display().yellow(),
            tier.duration_months,
            state
        );
        if !tier.features.is_empty() {
            println!("      {}", tier.features.join(", ").dimmed());
        }
    }
    Ok(())
}
