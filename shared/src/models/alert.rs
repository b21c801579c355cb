//! Harsh weather alert subscription models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alerts::HarshWeatherWarning;

/// A farmer's subscription to harsh weather alerts for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSubscription {
    pub id: Uuid,
    pub farmer_id: Uuid,
    /// Address alerts are sent to
    pub email: String,
    pub location: String,
    pub is_active: bool,
    pub last_checked_at: Option<DateTime<Utc>>,
    /// Warnings found by the most recent check, empty when it was quiet
    pub last_warnings: Vec<HarshWeatherWarning>,
    pub created_at: DateTime<Utc>,
}
