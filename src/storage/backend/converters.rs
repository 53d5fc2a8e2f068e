//! Model <-> domain conversions
//!
//! List-valued columns are JSON text. Decoding is lenient: a corrupt column
//! is logged and read back as an empty list so one bad row can't take down a
//! page.

use std::str::FromStr;

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::errors::Result;
use crate::storage::models::{
    Client, Competitor, Frequency, NewClient, NewCompetitor, NewLink, NewQuery, Query, Report,
    ReportStatus, ShareableLink, SocialHandle, SubscriptionTier, TierFields,
};
use migration::entities::{
    client, competitor, query, report, shareable_link, subscription_tier,
};

pub fn encode_list<T: Serialize>(items: &[T]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

pub fn decode_list<T: DeserializeOwned>(raw: &str, column: &str) -> Vec<T> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Invalid JSON in column {}: {}", column, e);
        Vec::new()
    })
}

pub fn model_to_client(model: client::Model) -> Client {
    Client {
        social_handles: decode_list::<SocialHandle>(&model.social_handles, "clients.social_handles"),
        id: model.id,
        name: model.name,
        website: model.website,
        contact_name: model.contact_name,
        contact_email: model.contact_email,
        subscription_tier: model.subscription_tier,
        created_at: model.created_at,
    }
}

pub fn model_to_competitor(model: competitor::Model) -> Competitor {
    Competitor {
        social_handles: decode_list::<SocialHandle>(
            &model.social_handles,
            "competitors.social_handles",
        ),
        id: model.id,
        client_id: model.client_id,
        name: model.name,
        website: model.website,
        youtube_url: model.youtube_url,
        vimeo_url: model.vimeo_url,
        review_page_url: model.review_page_url,
        created_at: model.created_at,
    }
}

pub fn model_to_query(model: query::Model) -> Query {
    let frequency = Frequency::from_str(&model.frequency).unwrap_or_else(|_| {
        warn!(
            "Unknown frequency '{}' on query {}, treating as monthly",
            model.frequency, model.id
        );
        Frequency::Monthly
    });

    Query {
        keywords: decode_list(&model.keywords, "queries.keywords"),
        countries: decode_list(&model.countries, "queries.countries"),
        id: model.id,
        client_id: model.client_id,
        period_start: model.period_start,
        period_end: model.period_end,
        frequency,
        auto_run: model.auto_run,
        created_at: model.created_at,
    }
}

pub fn model_to_report(model: report::Model) -> Report {
    let status = ReportStatus::from_str(&model.status).unwrap_or_else(|_| {
        warn!(
            "Unknown status '{}' on report {}, treating as pending",
            model.status, model.id
        );
        ReportStatus::Pending
    });
    let data = serde_json::from_str(&model.data).unwrap_or_else(|e| {
        warn!("Invalid JSON in reports.data for report {}: {}", model.id, e);
        serde_json::Value::Object(Default::default())
    });

    Report {
        id: model.id,
        query_id: model.query_id,
        status,
        data,
        generated_at: model.generated_at,
        created_at: model.created_at,
    }
}

pub fn model_to_tier(model: subscription_tier::Model) -> SubscriptionTier {
    SubscriptionTier {
        features: decode_list(&model.features, "subscription_tiers.features"),
        id: model.id,
        name: model.name,
        slug: model.slug,
        price_cents: model.price_cents,
        duration_months: model.duration_months,
        is_active: model.is_active,
        sort_order: model.sort_order,
        created_at: model.created_at,
    }
}

pub fn model_to_link(model: shareable_link::Model) -> ShareableLink {
    ShareableLink {
        id: model.id,
        token: model.token,
        label: model.label,
        is_active: model.is_active,
        use_count: model.use_count.max(0) as u64,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

pub fn new_client_to_active_model(client: &NewClient) -> Result<client::ActiveModel> {
    Ok(client::ActiveModel {
        id: NotSet,
        name: Set(client.name.clone()),
        website: Set(client.website.clone()),
        social_handles: Set(encode_list(&client.social_handles)?),
        contact_name: Set(client.contact_name.clone()),
        contact_email: Set(client.contact_email.clone()),
        subscription_tier: Set(client.subscription_tier.clone()),
        created_at: Set(Utc::now()),
    })
}

pub fn new_competitor_to_active_model(
    client_id: i32,
    competitor: &NewCompetitor,
) -> Result<competitor::ActiveModel> {
    Ok(competitor::ActiveModel {
        id: NotSet,
        client_id: Set(client_id),
        name: Set(competitor.name.clone()),
        website: Set(competitor.website.clone()),
        social_handles: Set(encode_list(&competitor.social_handles)?),
        youtube_url: Set(competitor.youtube_url.clone()),
        vimeo_url: Set(competitor.vimeo_url.clone()),
        review_page_url: Set(competitor.review_page_url.clone()),
        created_at: Set(Utc::now()),
    })
}

pub fn new_query_to_active_model(client_id: i32, query: &NewQuery) -> Result<query::ActiveModel> {
    Ok(query::ActiveModel {
        id: NotSet,
        client_id: Set(client_id),
        keywords: Set(encode_list(&query.keywords)?),
        countries: Set(encode_list(&query.countries)?),
        period_start: Set(query.period_start),
        period_end: Set(query.period_end),
        frequency: Set(query.frequency.as_ref().to_string()),
        auto_run: Set(query.auto_run),
        created_at: Set(Utc::now()),
    })
}

pub fn pending_report_active_model(query_id: i32) -> report::ActiveModel {
    report::ActiveModel {
        id: NotSet,
        query_id: Set(query_id),
        status: Set(ReportStatus::Pending.as_ref().to_string()),
        data: Set("{}".to_string()),
        generated_at: Set(None),
        created_at: Set(Utc::now()),
    }
}

pub fn tier_fields_to_active_model(
    fields: &TierFields,
    is_active: bool,
    sort_order: i32,
) -> Result<subscription_tier::ActiveModel> {
    Ok(subscription_tier::ActiveModel {
        id: NotSet,
        name: Set(fields.name.clone()),
        slug: Set(fields.slug.clone()),
        price_cents: Set(fields.price_cents),
        duration_months: Set(fields.duration_months),
        features: Set(encode_list(&fields.features)?),
        is_active: Set(is_active),
        sort_order: Set(sort_order),
        created_at: Set(Utc::now()),
    })
}

pub fn new_link_to_active_model(link: &NewLink) -> shareable_link::ActiveModel {
    shareable_link::ActiveModel {
        id: NotSet,
        token: Set(link.token.clone()),
        label: Set(link.label.clone()),
        is_active: Set(true),
        use_count: Set(0),
        expires_at: Set(link.expires_at),
        created_at: Set(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn query_model(frequency: &str, keywords: &str) -> query::Model {
        query::Model {
            id: 7,
            client_id: 3,
            keywords: keywords.to_string(),
            countries: r#"["GB","US"]"#.to_string(),
            period_start: None,
            period_end: None,
            frequency: frequency.to_string(),
            auto_run: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_query_decodes_lists() {
        let query = model_to_query(query_model("fortnightly", r#"["seo","ppc"]"#));
        assert_eq!(query.keywords, vec!["seo", "ppc"]);
        assert_eq!(query.countries, vec!["GB", "US"]);
        assert_eq!(query.frequency, Frequency::Fortnightly);
        assert!(query.auto_run);
    }

    #[test]
    fn test_model_to_query_tolerates_bad_json_and_unknown_frequency() {
        let query = model_to_query(query_model("hourly", "not json"));
        assert!(query.keywords.is_empty());
        assert_eq!(query.frequency, Frequency::Monthly);
    }

    #[test]
    fn test_model_to_link_clamps_negative_use_count() {
        let link = model_to_link(shareable_link::Model {
            id: 1,
            token: "abc".to_string(),
            label: String::new(),
            is_active: true,
            use_count: -4,
            expires_at: None,
            created_at: Utc::now(),
        });
        assert_eq!(link.use_count, 0);
    }

    #[test]
    fn test_pending_report_active_model() {
        let model = pending_report_active_model(9);
        assert_eq!(model.status, ActiveValue::Set("pending".to_string()));
        assert_eq!(model.data, ActiveValue::Set("{}".to_string()));
        assert!(matches!(model.id, ActiveValue::NotSet));
    }

    #[test]
    fn test_new_client_social_handles_encoded_as_json() {
        let model = new_client_to_active_model(&NewClient {
            name: "Acme".to_string(),
            website: "https://acme.test".to_string(),
            contact_name: "Jo".to_string(),
            contact_email: "jo@acme.test".to_string(),
            subscription_tier: "trial".to_string(),
            social_handles: vec![SocialHandle {
                platform: "instagram".to_string(),
                handle: "@acme".to_string(),
            }],
        })
        .unwrap();
        assert_eq!(
            model.social_handles,
            ActiveValue::Set(r#"[{"platform":"instagram","handle":"@acme"}]"#.to_string())
        );
    }
}
