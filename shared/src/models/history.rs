//! Advisory history models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored advisory. Written once per successful request, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryHistoryEntry {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub location: String,
    pub soil_type: String,
    pub sowing_month: u32,
    pub advisory: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
