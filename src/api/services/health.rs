use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{error, trace};

use crate::storage::SeaOrmStorage;

#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub database: DatabaseCheck,
    pub response_time_ms: u64,
}

/// Liveness plus a database round trip. 503 when the database is
/// unreachable or slower than five seconds.
pub async fn health_check(
    storage: web::Data<Arc<SeaOrmStorage>>,
    app_start_time: web::Data<AppStartTime>,
) -> HttpResponse {
    let started = Instant::now();
    trace!("Received health check request");

    let backend = storage.backend_name().to_string();
    let database = match tokio::time::timeout(Duration::from_secs(5), storage.ping()).await {
        Ok(Ok(())) => DatabaseCheck {
            status: "healthy".to_string(),
            backend,
            error: None,
        },
        Ok(Err(e)) => {
            error!("Database health check failed: {}", e);
            DatabaseCheck {
                status: "unhealthy".to_string(),
                backend,
                error: Some(e.to_string()),
            }
        }
        Err(_) => {
            error!("Database health check timed out");
            DatabaseCheck {
                status: "unhealthy".to_string(),
                backend,
                error: Some("timeout".to_string()),
            }
        }
    };

    let now = chrono::Utc::now();
    let healthy = database.status == "healthy";
    let body = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: now.to_rfc3339(),
        uptime: (now - app_start_time.start_datetime).num_seconds().max(0) as u64,
        database,
        response_time_ms: started.elapsed().as_millis() as u64,
    };

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
