//! Schema migration for Voxdial call transcripts and recordings
//!
//! The platform database is owned elsewhere; this crate only carries the
//! migration that adds provider call identifiers, recording status and the
//! `transcripts` table, plus a check that the migration is in place.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod schema;

pub use schema::{SchemaReport, verify_schema};

use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use voxdial_core::{Error, Result, config::DatabaseConfig};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Database connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection cannot be established.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .connect(&config.url)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if migrations fail to run.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Migration failed: {e}")))?;

        Ok(())
    }

    /// Health check
    ///
    /// # Errors
    ///
    /// Returns an error if the health check fails.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Health check failed: {e}")))?;

        Ok(())
    }

    /// Report which parts of the migration are present
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be queried.
    pub async fn verify_schema(&self) -> Result<SchemaReport> {
        verify_schema(&self.pool).await
    }
}

/// Migrations embedded in the binary, in apply order
#[must_use]
pub fn embedded_migrations() -> Vec<(i64, String)> {
    sqlx::migrate!("./migrations")
        .iter()
        .map(|m| (m.version, m.description.to_string()))
        .collect()
}
