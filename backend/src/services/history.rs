//! Advisory history store
//!
//! One row per successful advisory request, never updated afterwards.

use chrono::{DateTime, Utc};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{AdvisoryHistoryEntry, RankedAdvisory};

/// History service backed by PostgreSQL
#[derive(Clone)]
pub struct HistoryService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct HistoryRow {
    id: Uuid,
    farmer_id: Uuid,
    location: String,
    soil_type: String,
    sowing_month: i32,
    advisory: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl From<HistoryRow> for AdvisoryHistoryEntry {
    fn from(row: HistoryRow) -> Self {
        AdvisoryHistoryEntry {
            id: row.id,
            farmer_id: row.farmer_id,
            location: row.location,
            soil_type: row.soil_type,
            sowing_month: row.sowing_month.clamp(1, 12) as u32,
            advisory: row.advisory,
            created_at: row.created_at,
        }
    }
}

impl HistoryService {
    /// Create a new HistoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Store a computed advisory for a farmer
    pub async fn record(
        &self,
        farmer_id: Uuid,
        location: &str,
        soil_type: &str,
        sowing_month: u32,
        advisory: &RankedAdvisory,
    ) -> AppResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO advisory_history (farmer_id, location, soil_type, sowing_month, advisory)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(farmer_id)
        .bind(location)
        .bind(soil_type)
        .bind(sowing_month as i32)
        .bind(Json(advisory))
        .fetch_one(&self.db)
        .await?;

        Ok(id)
    }

    /// List a farmer's advisories, newest first
    pub async fn list_for_farmer(
        &self,
        farmer_id: Uuid,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<AdvisoryHistoryEntry>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM advisory_history WHERE farmer_id = $1",
        )
        .bind(farmer_id)
        .fetch_one(&self.db)
        .await?;

        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT id, farmer_id, location, soil_type, sowing_month, advisory, created_at
            FROM advisory_history
            WHERE farmer_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(farmer_id)
        .bind(i64::from(pagination.per_page))
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(Into::into).collect(),
            pagination: PaginationMeta::new(pagination, total.max(0) as u64),
        })
    }
}
