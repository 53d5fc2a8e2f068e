//! Urlencoded form decoding
//!
//! The intake form repeats fields and nests them with bracket indexes
//! (`competitors[0][social][1][handle]`), which a flat serde struct can't
//! express. Handlers take the body as ordered `(key, value)` pairs and
//! [`FormFields`] regroups them by index.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::services::{
    ClientEditRequest, CompetitorInput, CreateLinkRequest, IntakeSubmission, SocialInput, TierForm,
};

/// Ordered key/value pairs from one form body
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, or an empty string
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// Every value for `key`, in submitted order
    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Split `prefix[N]...` fields into one `FormFields` per index, ordered
    /// by N. Inside each group the leading `[field]` loses its brackets, so
    /// `competitors[2][social][0][handle]` becomes `social[0][handle]` in
    /// group 2. Keys with a non-numeric index are ignored.
    pub fn indexed_groups(&self, prefix: &str) -> Vec<FormFields> {
        let mut groups: BTreeMap<usize, Vec<(String, String)>> = BTreeMap::new();

        for (key, value) in &self.pairs {
            let Some(rest) = key
                .strip_prefix(prefix)
                .and_then(|r| r.strip_prefix('['))
            else {
                continue;
            };
            let Some((index, tail)) = rest.split_once(']') else {
                continue;
            };
            let Ok(index) = index.parse::<usize>() else {
                continue;
            };
            let Some(field) = unwrap_first_segment(tail) else {
                continue;
            };
            groups
                .entry(index)
                .or_default()
                .push((field, value.clone()));
        }

        groups.into_values().map(FormFields::new).collect()
    }
}

/// `[name]` -> `name`, `[social][0][handle]` -> `social[0][handle]`
fn unwrap_first_segment(tail: &str) -> Option<String> {
    let inner = tail.strip_prefix('[')?;
    let (head, rest) = inner.split_once(']')?;
    if head.is_empty() {
        return None;
    }
    Some(format!("{}{}", head, rest))
}

fn social_inputs(fields: &FormFields, prefix: &str) -> Vec<SocialInput> {
    fields
        .indexed_groups(prefix)
        .into_iter()
        .map(|g| SocialInput {
            platform: g.text("platform"),
            handle: g.text("handle"),
        })
        .collect()
}

impl From<&FormFields> for IntakeSubmission {
    fn from(fields: &FormFields) -> Self {
        let competitors = fields
            .indexed_groups("competitors")
            .into_iter()
            .map(|g| CompetitorInput {
                name: g.text("name"),
                website: g.text("website"),
                youtube: g.text("youtube"),
                vimeo: g.text("vimeo"),
                review: g.text("review"),
                social: social_inputs(&g, "social"),
            })
            .collect();

        let mut countries = fields.get_all("countries[]");
        if countries.is_empty() {
            countries = fields.get_all("countries");
        }

        IntakeSubmission {
            client_name: fields.text("client_name"),
            client_website: fields.text("client_website"),
            contact_name: fields.text("contact_name"),
            contact_email: fields.text("contact_email"),
            subscription_tier: fields.get("subscription_tier").map(str::to_string),
            social: social_inputs(fields, "social"),
            competitors,
            keywords: fields.text("keywords"),
            countries,
            frequency: fields.text("frequency"),
            auto_run: fields.has("auto_run"),
            period_start: fields.text("period_start"),
            period_end: fields.text("period_end"),
        }
    }
}

// ============ Flat forms ============

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ClientEditForm {
    pub client_name: String,
    pub client_website: String,
    pub contact_name: String,
    pub contact_email: String,
    pub subscription_tier: Option<String>,
}

impl From<ClientEditForm> for ClientEditRequest {
    fn from(form: ClientEditForm) -> Self {
        ClientEditRequest {
            client_name: form.client_name,
            client_website: form.client_website,
            contact_name: form.contact_name,
            contact_email: form.contact_email,
            subscription_tier: form.subscription_tier,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TierFormData {
    pub name: String,
    pub slug: String,
    pub price: String,
    pub duration_months: String,
    pub features: String,
}

impl From<TierFormData> for TierForm {
    fn from(form: TierFormData) -> Self {
        TierForm {
            name: form.name,
            slug: form.slug,
            price: form.price,
            duration_months: form.duration_months,
            features: form.features,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct LinkFormData {
    pub label: String,
    pub expires_at: String,
}

impl From<LinkFormData> for CreateLinkRequest {
    fn from(form: LinkFormData) -> Self {
        CreateLinkRequest {
            label: form.label,
            expires_at: Some(form.expires_at).filter(|e| !e.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_indexed_groups_orders_by_index() {
        let f = fields(&[
            ("social[10][platform]", "tiktok"),
            ("social[2][platform]", "x"),
            ("social[2][handle]", "@two"),
            ("social[10][handle]", "@ten"),
            ("social[abc][handle]", "ignored"),
            ("social[]", "ignored"),
        ]);
        let groups = f.indexed_groups("social");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].text("platform"), "x");
        assert_eq!(groups[0].text("handle"), "@two");
        assert_eq!(groups[1].text("handle"), "@ten");
    }

    #[test]
    fn test_prefix_must_match_exactly() {
        let f = fields(&[("socials[0][handle]", "@nope")]);
        assert!(f.indexed_groups("social").is_empty());
    }

    #[test]
    fn test_intake_submission_from_form() {
        let f = fields(&[
            ("client_name", "Acme"),
            ("client_website", "https://acme.test"),
            ("contact_name", "Jo"),
            ("contact_email", "jo@acme.test"),
            ("subscription_tier", "6month"),
            ("social[0][platform]", "instagram"),
            ("social[0][handle]", "@acme"),
            ("competitors[0][name]", "Rival"),
            ("competitors[0][website]", "https://rival.test"),
            ("competitors[0][social][0][platform]", "x"),
            ("competitors[0][social][0][handle]", "@rival"),
            ("competitors[0][social][1][platform]", "youtube"),
            ("competitors[0][social][1][handle]", ""),
            ("competitors[1][website]", ""),
            ("keywords", "seo\nppc"),
            ("countries[]", "GB"),
            ("countries[]", "US"),
            ("frequency", "fortnightly"),
            ("auto_run", "on"),
            ("period_start", "2026-01-01"),
        ]);

        let sub = IntakeSubmission::from(&f);
        assert_eq!(sub.client_name, "Acme");
        assert_eq!(sub.subscription_tier.as_deref(), Some("6month"));
        assert_eq!(sub.social.len(), 1);
        assert_eq!(sub.competitors.len(), 2);
        assert_eq!(sub.competitors[0].social.len(), 2);
        assert_eq!(sub.competitors[0].social[0].handle, "@rival");
        assert_eq!(sub.competitors[1].name, "");
        assert_eq!(sub.countries, vec!["GB", "US"]);
        assert!(sub.auto_run);
        assert_eq!(sub.period_end, "");
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let sub = IntakeSubmission::from(&fields(&[]));
        assert_eq!(sub.subscription_tier, None);
        assert!(!sub.auto_run);
        assert!(sub.competitors.is_empty());
    }

    #[test]
    fn test_link_form_blank_expiry() {
        let req = CreateLinkRequest::from(LinkFormData {
            label: "Partner".to_string(),
            expires_at: "  ".to_string(),
        });
        assert_eq!(req.expires_at, None);
    }
}
