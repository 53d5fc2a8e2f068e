//! Subscription tier catalog: defaults, form parsing and CRUD

use std::sync::Arc;

use tracing::info;

use crate::errors::{AgencyError, Result};
use crate::storage::{SeaOrmStorage, SubscriptionTier, TierFields};

pub const DUPLICATE_TIER_MESSAGE: &str = "A tier with that name or slug already exists.";

/// Raw tier form values
#[derive(Debug, Clone, Default)]
pub struct TierForm {
    pub name: String,
    pub slug: String,
    /// Decimal price, e.g. `49.99`
    pub price: String,
    pub duration_months: String,
    /// One feature per line
    pub features: String,
}

/// The catalog seeded into an empty table
pub fn default_tiers() -> Vec<TierFields> {
    fn tier(name: &str, slug: &str, price_cents: i64, months: i32, features: &[&str]) -> TierFields {
        TierFields {
            name: name.to_string(),
            slug: slug.to_string(),
            price_cents,
            duration_months: months,
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    vec![
        tier(
            "Trial",
            "trial",
            0,
            1,
            &["Up to 100 keywords", "1 country", "Monthly report"],
        ),
        tier(
            "6-Month",
            "6month",
            150_000,
            6,
            &[
                "Up to 500 keywords",
                "Up to 25 countries",
                "Fortnightly reports",
            ],
        ),
        tier(
            "1-Year",
            "1year",
            270_000,
            12,
            &[
                "Up to 1000 keywords",
                "Up to 100 countries",
                "Fortnightly reports",
                "Auto-run scheduling",
            ],
        ),
    ]
}

/// Parse a non-negative decimal amount with at most two fractional digits
pub fn parse_price_cents(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }

    let invalid = || AgencyError::validation(format!("Invalid price '{}'.", raw));
    let (units, frac) = match raw.split_once('.') {
        Some((u, f)) => (u, f),
        None => (raw, ""),
    };
    if frac.len() > 2
        || !units.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
        || (units.is_empty() && frac.is_empty())
    {
        return Err(invalid());
    }

    let units: i64 = if units.is_empty() {
        0
    } else {
        units.parse().map_err(|_| invalid())?
    };
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    units
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or_else(invalid)
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Validate a tier form into storable fields
pub fn parse_tier_form(form: &TierForm) -> Result<TierFields> {
    let name = form.name.trim().to_string();
    let slug = form.slug.trim().to_lowercase();
    if name.is_empty() || slug.is_empty() {
        return Err(AgencyError::validation("Tier name and slug are required."));
    }
    if !is_valid_slug(&slug) {
        return Err(AgencyError::validation(
            "Slug may only contain lowercase letters, digits, '-' and '_'.",
        ));
    }

    let duration = form.duration_months.trim();
    let duration_months = if duration.is_empty() {
        1
    } else {
        duration
            .parse::<i32>()
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| {
                AgencyError::validation("Duration must be a positive number of months.")
            })?
    };

    Ok(TierFields {
        name,
        slug,
        price_cents: parse_price_cents(&form.price)?,
        duration_months,
        features: form
            .features
            .lines()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

fn map_duplicate(err: AgencyError) -> AgencyError {
    match err {
        AgencyError::Conflict(_) => AgencyError::conflict(DUPLICATE_TIER_MESSAGE),
        other => other,
    }
}

pub struct TierService {
    storage: Arc<SeaOrmStorage>,
}

impl TierService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Insert the default catalog if no tiers exist yet
    pub async fn seed_defaults(&self) -> Result<usize> {
        let seeded = self.storage.seed_tiers_if_empty(&default_tiers()).await?;
        if seeded == 0 {
            info!("Subscription tiers already present, skipping seed");
        }
        Ok(seeded)
    }

    pub async fn list_tiers(&self) -> Result<Vec<SubscriptionTier>> {
        self.storage.list_tiers(false).await
    }

    pub async fn list_active_tiers(&self) -> Result<Vec<SubscriptionTier>> {
        self.storage.list_tiers(true).await
    }

    pub async fn create_tier(&self, form: &TierForm) -> Result<SubscriptionTier> {
        let fields = parse_tier_form(form)?;
        self.storage.insert_tier(fields).await.map_err(map_duplicate)
    }

    pub async fn update_tier(&self, id: i32, form: &TierForm) -> Result<SubscriptionTier> {
        let fields = parse_tier_form(form)?;
        self.storage
            .update_tier(id, fields)
            .await
            .map_err(map_duplicate)
    }

    pub async fn delete_tier(&self, id: i32) -> Result<SubscriptionTier> {
        self.storage.delete_tier(id).await
    }

    pub async fn toggle_tier(&self, id: i32) -> Result<SubscriptionTier> {
        self.storage.toggle_tier(id).await
    }
}
