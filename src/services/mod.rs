//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI. Services take explicit settings
//! at construction and hold an `Arc` of the storage backend.

mod client_service;
pub mod intake;
mod link_service;
mod tier_service;

pub use client_service::*;
pub use intake::{
    CompetitorInput, IntakeLimits, IntakeOutcome, IntakeService, IntakeSubmission,
    REQUIRED_FIELDS_MESSAGE, SocialInput,
};
pub use link_service::*;
pub use tier_service::*;
