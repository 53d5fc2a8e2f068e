//! User-facing interfaces outside the web UI

pub mod cli;
