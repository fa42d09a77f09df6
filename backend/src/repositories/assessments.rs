//! Assessment history repository for database operations
//!
//! History behaves as a bounded, newest-first log: inserts trim the
//! table down to the most recent [`HISTORY_LIMIT`] entries.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Maximum number of assessments kept in history
pub const HISTORY_LIMIT: i64 = 50;

/// Assessment record from the database
///
/// The raw input and computed result snapshots are stored as JSON text;
/// the service layer owns (de)serialization.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AssessmentRecord {
    pub id: String,
    pub patient_name: String,
    pub input_json: String,
    pub results_json: String,
    pub saved_at: DateTime<Utc>,
}

/// Input for creating an assessment record
#[derive(Debug, Clone)]
pub struct CreateAssessmentRecord {
    pub id: Uuid,
    pub patient_name: String,
    pub input_json: String,
    pub results_json: String,
    pub saved_at: DateTime<Utc>,
}

/// Assessment repository for database operations
pub struct AssessmentRepository;

impl AssessmentRepository {
    /// Create a new assessment record and trim history to the limit
    pub async fn create(pool: &SqlitePool, input: CreateAssessmentRecord) -> Result<AssessmentRecord> {
        let record = sqlx::query_as::<_, AssessmentRecord>(
            r#"
            INSERT INTO assessments (id, patient_name, input_json, results_json, saved_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, patient_name, input_json, results_json, saved_at
            "#,
        )
        .bind(input.id.to_string())
        .bind(&input.patient_name)
        .bind(&input.input_json)
        .bind(&input.results_json)
        .bind(input.saved_at)
        .fetch_one(pool)
        .await?;

        Self::trim_history(pool).await?;

        Ok(record)
    }

    /// Delete everything older than the newest `HISTORY_LIMIT` entries
    pub async fn trim_history(pool: &SqlitePool) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM assessments
            WHERE id NOT IN (
                SELECT id FROM assessments
                ORDER BY saved_at DESC, rowid DESC
                LIMIT $1
            )
            "#,
        )
        .bind(HISTORY_LIMIT)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Get the N most recent assessments, newest first
    pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<AssessmentRecord>> {
        let records = sqlx::query_as::<_, AssessmentRecord>(
            r#"
            SELECT id, patient_name, input_json, results_json, saved_at
            FROM assessments
            ORDER BY saved_at DESC, rowid DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Count stored assessments
    pub async fn count(pool: &SqlitePool) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assessments")
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }

    /// Get an assessment by ID
    pub async fn get_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<AssessmentRecord>> {
        let record = sqlx::query_as::<_, AssessmentRecord>(
            r#"
            SELECT id, patient_name, input_json, results_json, saved_at
            FROM assessments
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete an assessment
    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM assessments
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clear the entire history
    pub async fn clear(pool: &SqlitePool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM assessments").execute(pool).await?;

        Ok(result.rows_affected())
    }
}
