use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// One `{platform, handle}` pair, stored in JSON list columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialHandle {
    pub platform: String,
    pub handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub website: String,
    pub social_handles: Vec<SocialHandle>,
    pub contact_name: String,
    pub contact_email: String,
    pub subscription_tier: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub website: String,
    pub social_handles: Vec<SocialHandle>,
    pub youtube_url: String,
    pub vimeo_url: String,
    pub review_page_url: String,
    pub created_at: DateTime<Utc>,
}

/// How often a query should be reported on
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Frequency {
    #[default]
    Monthly,
    Fortnightly,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub id: i32,
    pub client_id: i32,
    pub keywords: Vec<String>,
    pub countries: Vec<String>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub frequency: Frequency,
    pub auto_run: bool,
    pub created_at: DateTime<Utc>,
}

/// Report lifecycle. Only `Pending` is ever written today; the other
/// states are reserved for the collection pipeline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Running,
    Complete,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: i32,
    pub query_id: i32,
    pub status: ReportStatus,
    pub data: serde_json::Value,
    pub generated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionTier {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub price_cents: i64,
    pub duration_months: i32,
    pub features: Vec<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl SubscriptionTier {
    /// Price as a decimal string, e.g. `1500.00`
    pub fn price_display(&self) -> String {
        format_cents(self.price_cents)
    }
}

/// Format a cent amount as `units.cc`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareableLink {
    pub id: i32,
    pub token: String,
    pub label: String,
    pub is_active: bool,
    pub use_count: u64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ShareableLink {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// Whether the gate should let a public submission through
    pub fn accepts_submissions(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }
}

/// Aggregate counts shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub clients: u64,
    pub competitors: u64,
    pub queries: u64,
    pub reports: u64,
}

#[derive(Debug, Clone)]
pub struct QueryWithReports {
    pub query: Query,
    pub reports: Vec<Report>,
}

/// Everything the client detail page shows
#[derive(Debug, Clone)]
pub struct ClientDetail {
    pub client: Client,
    pub competitors: Vec<Competitor>,
    pub queries: Vec<QueryWithReports>,
}

impl ClientDetail {
    pub fn report_count(&self) -> usize {
        self.queries.iter().map(|q| q.reports.len()).sum()
    }
}

// ============ Write-side inputs ============

#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub website: String,
    pub contact_name: String,
    pub contact_email: String,
    pub subscription_tier: String,
    pub social_handles: Vec<SocialHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCompetitor {
    pub name: String,
    pub website: String,
    pub social_handles: Vec<SocialHandle>,
    pub youtube_url: String,
    pub vimeo_url: String,
    pub review_page_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuery {
    pub keywords: Vec<String>,
    pub countries: Vec<String>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub frequency: Frequency,
    pub auto_run: bool,
}

/// Editable client fields
#[derive(Debug, Clone, PartialEq)]
pub struct ClientUpdate {
    pub name: String,
    pub website: String,
    pub contact_name: String,
    pub contact_email: String,
    pub subscription_tier: String,
}

/// Fields shared by tier creation and tier edits
#[derive(Debug, Clone, PartialEq)]
pub struct TierFields {
    pub name: String,
    pub slug: String,
    pub price_cents: i64,
    pub duration_months: i32,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub token: String,
    pub label: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Ids of the rows written by one intake submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeRecord {
    pub client_id: i32,
    pub competitor_ids: Vec<i32>,
    pub query_id: i32,
}
