//! CLI command implementations

mod config_gen;
mod links;
mod tiers;

pub use config_gen::config_generate;
pub use links::{create_link, list_links};
pub use tiers::list_tiers;
