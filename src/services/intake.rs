//! Intake processing
//!
//! Turns a decoded intake form into one client, its competitors and one
//! report query. Everything is validated and normalized before the first
//! write; the write itself is a single transaction in storage.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::IntakeConfig;
use crate::errors::{AgencyError, Result};
use crate::storage::{
    Frequency, IntakeRecord, NewClient, NewCompetitor, NewQuery, SeaOrmStorage, ShareableLink,
    SocialHandle,
};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

// ============ Input DTOs ============

/// One `{platform, handle}` pair as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialInput {
    pub platform: String,
    pub handle: String,
}

/// One competitor block as submitted. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetitorInput {
    pub name: String,
    pub website: String,
    pub youtube: String,
    pub vimeo: String,
    pub review: String,
    pub social: Vec<SocialInput>,
}

/// A decoded intake form, before any trimming or validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeSubmission {
    pub client_name: String,
    pub client_website: String,
    pub contact_name: String,
    pub contact_email: String,
    /// `None` when the field was not submitted
    pub subscription_tier: Option<String>,
    pub social: Vec<SocialInput>,
    pub competitors: Vec<CompetitorInput>,
    /// Raw textarea, one keyword per line
    pub keywords: String,
    pub countries: Vec<String>,
    pub frequency: String,
    pub auto_run: bool,
    pub period_start: String,
    pub period_end: String,
}

/// Limits and defaults applied during normalization
#[derive(Debug, Clone)]
pub struct IntakeLimits {
    pub keyword_limit: usize,
    pub country_limit: usize,
    pub default_tier: String,
}

impl Default for IntakeLimits {
    fn default() -> Self {
        IntakeLimits::from(&IntakeConfig::default())
    }
}

impl From<&IntakeConfig> for IntakeLimits {
    fn from(config: &IntakeConfig) -> Self {
        Self {
            keyword_limit: config.keyword_limit,
            country_limit: config.country_limit,
            default_tier: config.default_tier.clone(),
        }
    }
}

/// A submission that passed validation, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIntake {
    pub client: NewClient,
    pub competitors: Vec<NewCompetitor>,
    pub query: NewQuery,
}

/// What was written, plus the counts used in the confirmation message
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub record: IntakeRecord,
    pub client_name: String,
    pub keyword_count: usize,
    pub country_count: usize,
}

impl IntakeOutcome {
    pub fn success_message(&self) -> String {
        format!(
            "Client '{}' created with {} keywords and {} countries.",
            self.client_name, self.keyword_count, self.country_count
        )
    }
}

// ============ Normalization ============

/// Trim and keep handles with a non-empty handle, in submitted order
pub fn normalize_handles(social: &[SocialInput]) -> Vec<SocialHandle> {
    social
        .iter()
        .filter_map(|s| {
            let handle = s.handle.trim();
            (!handle.is_empty()).then(|| SocialHandle {
                platform: s.platform.trim().to_string(),
                handle: handle.to_string(),
            })
        })
        .collect()
}

/// Competitor blocks with a blank website are dropped
pub fn normalize_competitors(competitors: &[CompetitorInput]) -> Vec<NewCompetitor> {
    competitors
        .iter()
        .filter(|c| !c.website.trim().is_empty())
        .map(|c| NewCompetitor {
            name: c.name.trim().to_string(),
            website: c.website.trim().to_string(),
            social_handles: normalize_handles(&c.social),
            youtube_url: c.youtube.trim().to_string(),
            vimeo_url: c.vimeo.trim().to_string(),
            review_page_url: c.review.trim().to_string(),
        })
        .collect()
}

/// One keyword per line, blanks skipped, capped at `limit`
pub fn parse_keywords(raw: &str, limit: usize) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect()
}

pub fn normalize_countries(countries: &[String], limit: usize) -> Vec<String> {
    countries
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Blank -> `None`; anything else must be `YYYY-MM-DD`
pub fn parse_optional_date(raw: &str, field: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            AgencyError::validation(format!(
                "Invalid {} '{}', expected YYYY-MM-DD.",
                field, raw
            ))
        })
}

/// Blank -> monthly
pub fn parse_frequency(raw: &str) -> Result<Frequency> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Frequency::default());
    }
    Frequency::from_str(&raw.to_ascii_lowercase())
        .map_err(|_| AgencyError::validation(format!("Unknown report frequency '{}'.", raw)))
}

/// Trimmed required field, or the required-fields validation error
pub fn required(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(AgencyError::validation(REQUIRED_FIELDS_MESSAGE))
    } else {
        Ok(value.to_string())
    }
}

/// Validate and normalize a submission without touching storage
pub fn normalize(submission: &IntakeSubmission, limits: &IntakeLimits) -> Result<NormalizedIntake> {
    let name = required(&submission.client_name)?;
    let website = required(&submission.client_website)?;
    let contact_name = required(&submission.contact_name)?;
    let contact_email = required(&submission.contact_email)?;

    let tier = submission
        .subscription_tier
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&limits.default_tier)
        .to_string();

    let period_start = parse_optional_date(&submission.period_start, "period start")?;
    let period_end = parse_optional_date(&submission.period_end, "period end")?;
    let frequency = parse_frequency(&submission.frequency)?;

    Ok(NormalizedIntake {
        client: NewClient {
            name,
            website,
            contact_name,
            contact_email,
            subscription_tier: tier,
            social_handles: normalize_handles(&submission.social),
        },
        competitors: normalize_competitors(&submission.competitors),
        query: NewQuery {
            keywords: parse_keywords(&submission.keywords, limits.keyword_limit),
            countries: normalize_countries(&submission.countries, limits.country_limit),
            period_start,
            period_end,
            frequency,
            auto_run: submission.auto_run,
        },
    })
}

// ============ Service ============

pub struct IntakeService {
    storage: Arc<SeaOrmStorage>,
    limits: IntakeLimits,
}

impl IntakeService {
    pub fn new(storage: Arc<SeaOrmStorage>, limits: IntakeLimits) -> Self {
        Self { storage, limits }
    }

    pub fn limits(&self) -> &IntakeLimits {
        &self.limits
    }

    /// Validate and store a submission. `link` is the already-gated
    /// shareable link for public submissions.
    pub async fn submit(
        &self,
        submission: &IntakeSubmission,
        link: Option<&ShareableLink>,
    ) -> Result<IntakeOutcome> {
        let normalized = normalize(submission, &self.limits)?;
        ensure_tier_exists(&self.storage, &normalized.client.subscription_tier).await?;

        let client_name = normalized.client.name.clone();
        let keyword_count = normalized.query.keywords.len();
        let country_count = normalized.query.countries.len();
        debug!(
            "Intake for '{}': {} competitors, {} keywords, {} countries",
            client_name,
            normalized.competitors.len(),
            keyword_count,
            country_count
        );

        let record = self
            .storage
            .create_intake(
                normalized.client,
                normalized.competitors,
                normalized.query,
                link.map(|l| l.id),
            )
            .await?;

        match link {
            Some(l) => info!("Public intake via link {} created client {}", l.id, record.client_id),
            None => info!("Intake created client {}", record.client_id),
        }

        Ok(IntakeOutcome {
            record,
            client_name,
            keyword_count,
            country_count,
        })
    }
}

/// Tier slugs are plain strings on the client row, so existence is checked
/// here before every write that sets one.
pub async fn ensure_tier_exists(storage: &SeaOrmStorage, slug: &str) -> Result<()> {
    match storage.get_tier_by_slug(slug).await? {
        Some(_) => Ok(()),
        None => Err(AgencyError::validation(format!(
            "Unknown subscription tier '{}'.",
            slug
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> IntakeSubmission {
        IntakeSubmission {
            client_name: "  Acme Ltd ".to_string(),
            client_website: "https://acme.test".to_string(),
            contact_name: "Jo Bloggs".to_string(),
            contact_email: "jo@acme.test".to_string(),
            subscription_tier: None,
            keywords: "seo\n\n  ppc  \r\nbranding\n".to_string(),
            countries: vec!["GB".to_string(), "".to_string(), " US ".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_trims_and_defaults() {
        let n = normalize(&valid_submission(), &IntakeLimits::default()).unwrap();
        assert_eq!(n.client.name, "Acme Ltd");
        assert_eq!(n.client.subscription_tier, "trial");
        assert_eq!(n.query.keywords, vec!["seo", "ppc", "branding"]);
        assert_eq!(n.query.countries, vec!["GB", "US"]);
        assert_eq!(n.query.frequency, Frequency::Monthly);
        assert!(!n.query.auto_run);
        assert!(n.query.period_start.is_none());
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let mut sub = valid_submission();
        sub.contact_email = "   ".to_string();
        match normalize(&sub, &IntakeLimits::default()) {
            Err(AgencyError::Validation(msg)) => assert_eq!(msg, REQUIRED_FIELDS_MESSAGE),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_keywords_truncated_to_limit() {
        let raw = (0..1050)
            .map(|i| format!("kw{}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let keywords = parse_keywords(&raw, 1000);
        assert_eq!(keywords.len(), 1000);
        assert_eq!(keywords[999], "kw999");
    }

    #[test]
    fn test_countries_truncated_to_limit() {
        let countries: Vec<String> = (0..130).map(|i| format!("C{}", i)).collect();
        assert_eq!(normalize_countries(&countries, 100).len(), 100);
    }

    #[test]
    fn test_blank_handles_dropped() {
        let handles = normalize_handles(&[
            SocialInput {
                platform: "instagram".to_string(),
                handle: "  ".to_string(),
            },
            SocialInput {
                platform: " x ".to_string(),
                handle: " @acme ".to_string(),
            },
        ]);
        assert_eq!(
            handles,
            vec![SocialHandle {
                platform: "x".to_string(),
                handle: "@acme".to_string(),
            }]
        );
    }

    #[test]
    fn test_competitor_without_website_skipped() {
        let comps = normalize_competitors(&[
            CompetitorInput {
                name: "Ghost".to_string(),
                website: "   ".to_string(),
                ..Default::default()
            },
            CompetitorInput {
                name: " Rival ".to_string(),
                website: " https://rival.test ".to_string(),
                youtube: "https://youtube.com/rival".to_string(),
                ..Default::default()
            },
        ]);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].name, "Rival");
        assert_eq!(comps[0].website, "https://rival.test");
        assert_eq!(comps[0].vimeo_url, "");
    }

    #[test]
    fn test_dates_and_frequency() {
        let mut sub = valid_submission();
        sub.period_start = "2026-01-01".to_string();
        sub.frequency = "Fortnightly".to_string();
        let n = normalize(&sub, &IntakeLimits::default()).unwrap();
        assert_eq!(n.query.period_start, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(n.query.frequency, Frequency::Fortnightly);

        sub.period_end = "01/02/2026".to_string();
        assert!(matches!(
            normalize(&sub, &IntakeLimits::default()),
            Err(AgencyError::Validation(_))
        ));

        let mut sub = valid_submission();
        sub.frequency = "hourly".to_string();
        assert!(matches!(
            normalize(&sub, &IntakeLimits::default()),
            Err(AgencyError::Validation(_))
        ));
    }

    #[test]
    fn test_success_message() {
        let outcome = IntakeOutcome {
            record: IntakeRecord {
                client_id: 1,
                competitor_ids: vec![],
                query_id: 1,
            },
            client_name: "Acme".to_string(),
            keyword_count: 3,
            country_count: 2,
        };
        assert_eq!(
            outcome.success_message(),
            "Client 'Acme' created with 3 keywords and 2 countries."
        );
    }
}
