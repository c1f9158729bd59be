//! Catalog checks for the transcript migration

use serde::Serialize;
use sqlx::{PgPool, Row};
use voxdial_core::{Error, Result};

/// Columns added by the migration, as `(table, column)`
pub const EXPECTED_COLUMNS: &[(&str, &str)] = &[
    ("calls", "external_call_uuid"),
    ("calls", "transcript_json"),
    ("recordings", "tenant_id"),
    ("recordings", "status"),
];

/// Indexes created by the migration
pub const EXPECTED_INDEXES: &[&str] = &[
    "idx_calls_external_call_uuid",
    "idx_recordings_tenant_id",
    "idx_recordings_status",
    "idx_transcripts_call_id",
    "idx_transcripts_full_text",
];

/// Which parts of the migration exist in the connected database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    /// `(table, column)` pairs that are missing
    pub missing_columns: Vec<(String, String)>,
    /// Indexes that are missing
    pub missing_indexes: Vec<String>,
    /// Whether the `transcripts` table exists
    pub transcripts_table: bool,
    /// Whether the `updated_at` trigger is attached to `transcripts`
    pub transcripts_trigger: bool,
}

impl SchemaReport {
    /// Whether everything the migration adds is present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_columns.is_empty()
            && self.missing_indexes.is_empty()
            && self.transcripts_table
            && self.transcripts_trigger
    }
}

/// Inspect `information_schema` and `pg_indexes` for the migration's objects
///
/// # Errors
///
/// Returns an error if a catalog query fails.
pub async fn verify_schema(pool: &PgPool) -> Result<SchemaReport> {
    let mut report = SchemaReport::default();

    for (table, column) in EXPECTED_COLUMNS {
        let row = sqlx::query(
            r"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.columns
                WHERE table_schema = current_schema()
                  AND table_name = $1 AND column_name = $2
            ) AS present
            ",
        )
        .bind(*table)
        .bind(*column)
        .fetch_one(pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        if !row.get::<bool, _>("present") {
            report
                .missing_columns
                .push(((*table).to_string(), (*column).to_string()));
        }
    }

    for index in EXPECTED_INDEXES {
        let row = sqlx::query(
            r"
            SELECT EXISTS (
                SELECT 1 FROM pg_indexes
                WHERE schemaname = current_schema() AND indexname = $1
            ) AS present
            ",
        )
        .bind(*index)
        .fetch_one(pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        if !row.get::<bool, _>("present") {
            report.missing_indexes.push((*index).to_string());
        }
    }

    report.transcripts_table = sqlx::query(
        r"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = 'transcripts'
        ) AS present
        ",
    )
    .fetch_one(pool)
    .await
    .map_err(|e| Error::Database(e.to_string()))?
    .get::<bool, _>("present");

    report.transcripts_trigger = sqlx::query(
        r"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.triggers
            WHERE event_object_table = 'transcripts'
              AND trigger_name = 'update_transcripts_updated_at'
        ) AS present
        ",
    )
    .fetch_one(pool)
    .await
    .map_err(|e| Error::Database(e.to_string()))?
    .get::<bool, _>("present");

    Ok(report)
}
