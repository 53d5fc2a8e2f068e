//! Shareable intake links
//!
//! Creates tokenized links and gates public intake on them. A token is
//! accepted only while its link exists, is active and has not expired.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::LinksConfig;
use crate::errors::{AgencyError, Result};
use crate::storage::{NewLink, SeaOrmStorage, ShareableLink};
use crate::utils::{TimeParser, generate_token};

pub const INVALID_LINK_MESSAGE: &str = "This intake link is invalid or expired.";

/// Attempts before giving up on a token collision
const TOKEN_ATTEMPTS: usize = 3;

/// Request to create a link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    pub label: String,
    /// RFC3339, `YYYY-MM-DD` or relative (`7d`, `2w`, `1d12h`); blank = never
    pub expires_at: Option<String>,
}

/// 48 random bytes encode to 64 characters, the width of the token column
pub const MAX_TOKEN_BYTES: usize = 48;
const MIN_TOKEN_BYTES: usize = 16;

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
    token_bytes: usize,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>, config: &LinksConfig) -> Self {
        Self {
            storage,
            token_bytes: config.token_bytes.clamp(MIN_TOKEN_BYTES, MAX_TOKEN_BYTES),
        }
    }

    fn parse_expires_at(
        &self,
        expires_at: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        match expires_at.map(str::trim) {
            Some(s) if !s.is_empty() => TimeParser::parse_expire_time(s, now)
                .map(Some)
                .map_err(|e| AgencyError::validation(format!("Invalid expiry: {}", e.message()))),
            _ => Ok(None),
        }
    }

    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<ShareableLink> {
        let now = Utc::now();
        let expires_at = self.parse_expires_at(req.expires_at.as_deref(), now)?;
        if expires_at.is_some_and(|exp| exp <= now) {
            return Err(AgencyError::validation("Expiry must be in the future."));
        }
        let label = req.label.trim().to_string();

        let mut last_err = None;
        for _ in 0..TOKEN_ATTEMPTS {
            let new_link = NewLink {
                token: generate_token(self.token_bytes),
                label: label.clone(),
                expires_at,
            };
            match self.storage.insert_link(new_link).await {
                Ok(link) => {
                    info!("LinkService: created link {} '{}'", link.id, link.label);
                    return Ok(link);
                }
                Err(e @ AgencyError::Conflict(_)) => {
                    warn!("Token collision while creating link, retrying");
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| AgencyError::conflict("Could not allocate a unique token")))
    }

    pub async fn list_links(&self) -> Result<Vec<ShareableLink>> {
        self.storage.list_links().await
    }

    pub async fn toggle_link(&self, id: i32) -> Result<ShareableLink> {
        self.storage.toggle_link(id).await
    }

    pub async fn delete_link(&self, id: i32) -> Result<ShareableLink> {
        self.storage.delete_link(id).await
    }

    /// Resolve a public token. Every rejection yields the same
    /// `InvalidLink` message so callers can't tell the cases apart.
    pub async fn validate_token(&self, token: &str) -> Result<ShareableLink> {
        self.validate_token_at(token, Utc::now()).await
    }

    pub async fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<ShareableLink> {
        if !is_token_shaped(token) {
            return Err(AgencyError::invalid_link(INVALID_LINK_MESSAGE));
        }

        match self.storage.find_link_by_token(token).await? {
            Some(link) if link.accepts_submissions(now) => Ok(link),
            Some(link) => {
                info!(
                    "Rejected intake link {} (active: {}, expired: {})",
                    link.id,
                    link.is_active,
                    link.is_expired(now)
                );
                Err(AgencyError::invalid_link(INVALID_LINK_MESSAGE))
            }
            None => Err(AgencyError::invalid_link(INVALID_LINK_MESSAGE)),
        }
    }
}

/// Tokens are URL-safe base64 without padding; anything else is never a
/// stored token and is rejected before the lookup.
pub fn is_token_shaped(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Public URL for a token, e.g. `https://agency.test/intake/<token>`
pub fn intake_url(base_url: &str, token: &str) -> String {
    format!("{}/intake/{}", base_url.trim_end_matches('/'), token)
}
