//! Balthazaar - agency operations web app
//!
//! Client intake (internal and through shareable public links), competitor
//! tracking, report queries and subscription tiers, served as server-rendered
//! HTML pages.
//!
//! # Architecture
//! - `storage`: SeaORM backend and domain models
//! - `services`: intake normalization, link gate, tier and client workflows
//! - `api`: HTTP handlers, views and middleware
//! - `interfaces`: management CLI commands
//! - `config`: TOML + environment configuration
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
