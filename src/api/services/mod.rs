//! HTTP handlers
//!
//! Mutating handlers answer `303 See Other` with a flash message; pages are
//! rendered by [`crate::api::views`].

mod clients;
mod dashboard;
mod health;
mod helpers;
mod intake;
mod links;
mod queries;
pub mod routes;
mod settings;
mod state;

pub use health::{AppStartTime, HealthResponse};
pub use routes::configure_routes;
pub use state::AppServices;
