//! Storage integration tests
//!
//! Exercise the SeaORM backend against a throwaway SQLite file.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use balthazaar::errors::AgencyError;
use balthazaar::services::default_tiers;
use balthazaar::storage::{
    ClientUpdate, Frequency, NewClient, NewCompetitor, NewLink, NewQuery, ReportStatus,
    SeaOrmStorage, SocialHandle, TierFields,
};

// =============================================================================
// Test Setup
// =============================================================================

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("storage_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");
    (Arc::new(storage), temp_dir)
}

fn new_client(name: &str) -> NewClient {
    NewClient {
        name: name.to_string(),
        website: format!("https://{}.test", name.to_lowercase()),
        contact_name: "Dana".to_string(),
        contact_email: "dana@example.test".to_string(),
        subscription_tier: "trial".to_string(),
        social_handles: vec![SocialHandle {
            platform: "instagram".to_string(),
            handle: "@acme".to_string(),
        }],
    }
}

fn new_competitor(name: &str) -> NewCompetitor {
    NewCompetitor {
        name: name.to_string(),
        website: format!("https://{}.test", name.to_lowercase()),
        social_handles: Vec::new(),
        youtube_url: String::new(),
        vimeo_url: String::new(),
        review_page_url: String::new(),
    }
}

fn new_query() -> NewQuery {
    NewQuery {
        keywords: vec!["coffee".to_string(), "tea".to_string()],
        countries: vec!["GB".to_string()],
        period_start: None,
        period_end: None,
        frequency: Frequency::Fortnightly,
        auto_run: false,
    }
}

fn tier(name: &str, slug: &str) -> TierFields {
    TierFields {
        name: name.to_string(),
        slug: slug.to_string(),
        price_cents: 1000,
        duration_months: 1,
        features: vec!["One".to_string()],
    }
}

// =============================================================================
// Intake
// =============================================================================

#[tokio::test]
async fn test_create_intake_writes_all_rows() {
    let (storage, _dir) = create_temp_storage().await;

    let record = storage
        .create_intake(
            new_client("Acme"),
            vec![new_competitor("Rival")],
            new_query(),
            None,
        )
        .await
        .unwrap();
    assert_eq!(record.competitor_ids.len(), 1);

    let stats = storage.dashboard_stats().await.unwrap();
    assert_eq!(stats.clients, 1);
    assert_eq!(stats.competitors, 1);
    assert_eq!(stats.queries, 1);
    assert_eq!(stats.reports, 0);

    let detail = storage.client_detail(record.client_id).await.unwrap();
    assert_eq!(detail.client.name, "Acme");
    assert_eq!(detail.client.social_handles.len(), 1);
    assert_eq!(detail.competitors[0].name, "Rival");
    assert_eq!(detail.queries[0].query.keywords, vec!["coffee", "tea"]);
    assert_eq!(detail.queries[0].query.frequency, Frequency::Fortnightly);
}

#[tokio::test]
async fn test_create_intake_counts_link_use() {
    let (storage, _dir) = create_temp_storage().await;
    let link = storage
        .insert_link(NewLink {
            token: "tok-use".to_string(),
            label: "Partner".to_string(),
            expires_at: None,
        })
        .await
        .unwrap();

    storage
        .create_intake(new_client("Acme"), Vec::new(), new_query(), Some(link.id))
        .await
        .unwrap();

    let link = storage.get_link(link.id).await.unwrap();
    assert_eq!(link.use_count, 1);
}

#[tokio::test]
async fn test_create_intake_rolls_back_on_inactive_link() {
    let (storage, _dir) = create_temp_storage().await;
    let link = storage
        .insert_link(NewLink {
            token: "tok-off".to_string(),
            label: String::new(),
            expires_at: None,
        })
        .await
        .unwrap();
    storage.toggle_link(link.id).await.unwrap();

    let result = storage
        .create_intake(
            new_client("Acme"),
            vec![new_competitor("Rival")],
            new_query(),
            Some(link.id),
        )
        .await;
    assert!(matches!(result, Err(AgencyError::InvalidLink(_))));

    let stats = storage.dashboard_stats().await.unwrap();
    assert_eq!(stats.clients, 0);
    assert_eq!(stats.competitors, 0);
    assert_eq!(stats.queries, 0);
}

// =============================================================================
// Clients
// =============================================================================

#[tokio::test]
async fn test_delete_client_removes_children() {
    let (storage, _dir) = create_temp_storage().await;
    let keep = storage
        .create_intake(new_client("Keep"), vec![new_competitor("Other")], new_query(), None)
        .await
        .unwrap();
    let record = storage
        .create_intake(
            new_client("Gone"),
            vec![new_competitor("A"), new_competitor("B")],
            new_query(),
            None,
        )
        .await
        .unwrap();
    for _ in 0..3 {
        storage.create_report(record.query_id).await.unwrap();
    }

    let deleted = storage.delete_client(record.client_id).await.unwrap();
    assert_eq!(deleted.name, "Gone");

    let stats = storage.dashboard_stats().await.unwrap();
    assert_eq!(stats.clients, 1);
    assert_eq!(stats.competitors, 1);
    assert_eq!(stats.queries, 1);
    assert_eq!(stats.reports, 0);

    assert!(matches!(
        storage.get_client(record.client_id).await,
        Err(AgencyError::NotFound(_))
    ));
    assert!(storage.get_client(keep.client_id).await.is_ok());
}

#[tokio::test]
async fn test_list_clients_newest_first() {
    let (storage, _dir) = create_temp_storage().await;
    for name in ["First", "Second"] {
        storage
            .create_intake(new_client(name), Vec::new(), new_query(), None)
            .await
            .unwrap();
    }

    let clients = storage.list_clients().await.unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].name, "Second");
}

#[tokio::test]
async fn test_update_client() {
    let (storage, _dir) = create_temp_storage().await;
    let record = storage
        .create_intake(new_client("Acme"), Vec::new(), new_query(), None)
        .await
        .unwrap();

    let updated = storage
        .update_client(
            record.client_id,
            ClientUpdate {
                name: "Acme Group".to_string(),
                website: "https://acme.group".to_string(),
                contact_name: "Sam".to_string(),
                contact_email: "sam@acme.group".to_string(),
                subscription_tier: "1year".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Acme Group");
    assert_eq!(updated.subscription_tier, "1year");
    // Handles are not part of the edit form
    assert_eq!(updated.social_handles.len(), 1);
}

// =============================================================================
// Queries and reports
// =============================================================================

#[tokio::test]
async fn test_run_and_toggle_query() {
    let (storage, _dir) = create_temp_storage().await;
    let record = storage
        .create_intake(new_client("Acme"), Vec::new(), new_query(), None)
        .await
        .unwrap();

    let report = storage.create_report(record.query_id).await.unwrap();
    assert_eq!(report.status, ReportStatus::Pending);
    assert!(report.generated_at.is_none());

    let query = storage.toggle_auto_run(record.query_id).await.unwrap();
    assert!(query.auto_run);
    let query = storage.toggle_auto_run(record.query_id).await.unwrap();
    assert!(!query.auto_run);

    assert!(matches!(
        storage.create_report(9999).await,
        Err(AgencyError::NotFound(_))
    ));
}

// =============================================================================
// Tiers
// =============================================================================

#[tokio::test]
async fn test_seed_is_idempotent() {
    let (storage, _dir) = create_temp_storage().await;

    let seeded = storage.seed_tiers_if_empty(&default_tiers()).await.unwrap();
    assert_eq!(seeded, 3);
    let seeded = storage.seed_tiers_if_empty(&default_tiers()).await.unwrap();
    assert_eq!(seeded, 0);

    let tiers = storage.list_tiers(false).await.unwrap();
    assert_eq!(tiers.len(), 3);
    assert_eq!(tiers[0].slug, "trial");
    assert_eq!(tiers[2].sort_order, 3);
}

#[tokio::test]
async fn test_new_tier_sorts_last() {
    let (storage, _dir) = create_temp_storage().await;
    storage.seed_tiers_if_empty(&default_tiers()).await.unwrap();

    let created = storage.insert_tier(tier("Agency", "agency")).await.unwrap();
    assert_eq!(created.sort_order, 4);
    assert!(created.is_active);
}

#[tokio::test]
async fn test_duplicate_tier_slug_conflicts() {
    let (storage, _dir) = create_temp_storage().await;
    storage.insert_tier(tier("Basic", "basic")).await.unwrap();

    let result = storage.insert_tier(tier("Basic Two", "basic")).await;
    assert!(matches!(result, Err(AgencyError::Conflict(_))));
    assert_eq!(storage.count_tiers().await.unwrap(), 1);
}

#[tokio::test]
async fn test_referenced_tier_cannot_be_deleted() {
    let (storage, _dir) = create_temp_storage().await;
    let trial = storage.insert_tier(tier("Trial", "trial")).await.unwrap();
    storage
        .create_intake(new_client("Acme"), Vec::new(), new_query(), None)
        .await
        .unwrap();

    let result = storage.delete_tier(trial.id).await;
    match result {
        Err(AgencyError::Conflict(msg)) => assert!(msg.contains("1 client")),
        other => panic!("expected conflict, got {:?}", other),
    }
    assert!(storage.get_tier(trial.id).await.is_ok());
}

#[tokio::test]
async fn test_slug_rename_moves_clients() {
    let (storage, _dir) = create_temp_storage().await;
    let trial = storage.insert_tier(tier("Trial", "trial")).await.unwrap();
    let record = storage
        .create_intake(new_client("Acme"), Vec::new(), new_query(), None)
        .await
        .unwrap();

    storage
        .update_tier(trial.id, tier("Starter", "starter"))
        .await
        .unwrap();

    let client = storage.get_client(record.client_id).await.unwrap();
    assert_eq!(client.subscription_tier, "starter");
    assert!(
        storage
            .list_clients()
            .await
            .unwrap()
            .iter()
            .all(|c| c.subscription_tier != "trial")
    );
}

#[tokio::test]
async fn test_active_only_filter() {
    let (storage, _dir) = create_temp_storage().await;
    storage.seed_tiers_if_empty(&default_tiers()).await.unwrap();
    let trial = storage.get_tier_by_slug("trial").await.unwrap().unwrap();

    let toggled = storage.toggle_tier(trial.id).await.unwrap();
    assert!(!toggled.is_active);

    assert_eq!(storage.list_tiers(true).await.unwrap().len(), 2);
    assert_eq!(storage.list_tiers(false).await.unwrap().len(), 3);
}

// =============================================================================
// Links
// =============================================================================

#[tokio::test]
async fn test_link_lifecycle() {
    let (storage, _dir) = create_temp_storage().await;
    let expires = Utc::now() + Duration::days(7);
    let link = storage
        .insert_link(NewLink {
            token: "abc".to_string(),
            label: "Partner".to_string(),
            expires_at: Some(expires),
        })
        .await
        .unwrap();
    assert!(link.is_active);
    assert_eq!(link.use_count, 0);

    let found = storage.find_link_by_token("abc").await.unwrap();
    assert_eq!(found.map(|l| l.id), Some(link.id));
    assert!(storage.find_link_by_token("nope").await.unwrap().is_none());

    let toggled = storage.toggle_link(link.id).await.unwrap();
    assert!(!toggled.is_active);

    storage.delete_link(link.id).await.unwrap();
    assert!(storage.list_links().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_token_conflicts() {
    let (storage, _dir) = create_temp_storage().await;
    let link = NewLink {
        token: "same".to_string(),
        label: String::new(),
        expires_at: None,
    };
    storage.insert_link(link.clone()).await.unwrap();
    assert!(matches!(
        storage.insert_link(link).await,
        Err(AgencyError::Conflict(_))
    ));
}

#[tokio::test]
async fn test_ping() {
    let (storage, _dir) = create_temp_storage().await;
    assert!(storage.ping().await.is_ok());
    assert_eq!(storage.backend_name(), "sqlite");
}
