//! Farmer account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A grower's account, without credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farmer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Default forecast location, e.g. "Delhi,IN"
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}
