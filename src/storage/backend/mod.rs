//! SeaORM storage backend
//!
//! Database access for the six intake tables, supporting SQLite,
//! MySQL/MariaDB and PostgreSQL. Every multi-row write runs inside one
//! transaction.

mod clients;
mod connection;
pub mod converters;
mod links;
mod queries;
mod stats;
mod tiers;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{AgencyError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// Infer the database type from its URL
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(AgencyError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(AgencyError::database_config("database_url is not set"));
        }

        let config = crate::config::get_config();
        let timeout = config.database.timeout;

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, timeout).await?
        } else {
            connect_generic(database_url, backend_name, config.database.pool_size, timeout)
                .await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Raw connection, for health checks and shutdown
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(
            infer_backend_from_url("sqlite://balthazaar.db?mode=rwc").unwrap(),
            "sqlite"
        );
        assert_eq!(infer_backend_from_url("data/app.db").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("mariadb://u:p@localhost/db").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgresql://localhost/db").unwrap(),
            "postgres"
        );
        assert!(matches!(
            infer_backend_from_url("redis://localhost"),
            Err(AgencyError::DatabaseConfig(_))
        ));
    }
}
