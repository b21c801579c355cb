//! Harsh weather alert subscriptions and the periodic forecast check

use std::time::Duration;

use chrono::{DateTime, Utc};
use shared::HarshWeatherWarning;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::WeatherClient;
use crate::models::AlertSubscription;

/// Alert service backed by PostgreSQL and the forecast provider
#[derive(Clone)]
pub struct AlertService {
    db: PgPool,
    weather: WeatherClient,
}

/// Input for subscribing to alerts
#[derive(Debug)]
pub struct SubscribeInput {
    pub email: String,
    pub location: String,
}

/// Outcome of one pass over the active subscriptions
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlertCheckReport {
    pub checked: usize,
    pub alerted: usize,
    pub failed: usize,
}

#[derive(Debug, FromRow)]
struct SubscriptionRow {
    id: Uuid,
    farmer_id: Uuid,
    email: String,
    location: String,
    is_active: bool,
    last_checked_at: Option<DateTime<Utc>>,
    last_warnings: Json<Vec<HarshWeatherWarning>>,
    created_at: DateTime<Utc>,
}

impl From<SubscriptionRow> for AlertSubscription {
    fn from(row: SubscriptionRow) -> Self {
        AlertSubscription {
            id: row.id,
            farmer_id: row.farmer_id,
            email: row.email,
            location: row.location,
            is_active: row.is_active,
            last_checked_at: row.last_checked_at,
            last_warnings: row.last_warnings.0,
            created_at: row.created_at,
        }
    }
}

const SUBSCRIPTION_COLUMNS: &str =
    "id, farmer_id, email, location, is_active, last_checked_at, last_warnings, created_at";

impl AlertService {
    pub fn new(db: PgPool, weather: WeatherClient) -> Self {
        Self { db, weather }
    }

    /// Subscribe a farmer to alerts for a location. Subscribing again to the
    /// same location updates the address and reactivates it.
    pub async fn subscribe(
        &self,
        farmer_id: Uuid,
        input: SubscribeInput,
    ) -> AppResult<AlertSubscription> {
        let row = sqlx::query_as::<_, SubscriptionRow>(&format!(
            r#"
            INSERT INTO alert_subscriptions (farmer_id, email, location)
            VALUES ($1, $2, $3)
            ON CONFLICT (farmer_id, location)
            DO UPDATE SET email = EXCLUDED.email, is_active = TRUE
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(farmer_id)
        .bind(&input.email)
        .bind(&input.location)
        .fetch_one(&self.db)
        .await?;

        tracing::info!("Farmer {} subscribed to alerts for {}", farmer_id, input.location);
        Ok(row.into())
    }

    /// List a farmer's subscriptions, newest first
    pub async fn list_for_farmer(&self, farmer_id: Uuid) -> AppResult<Vec<AlertSubscription>> {
        let rows = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "SELECT {} FROM alert_subscriptions WHERE farmer_id = $1 ORDER BY created_at DESC",
            SUBSCRIPTION_COLUMNS
        ))
        .bind(farmer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Remove one of a farmer's subscriptions
    pub async fn unsubscribe(&self, farmer_id: Uuid, subscription_id: Uuid) -> AppResult<()> {
        let result =
            sqlx::query("DELETE FROM alert_subscriptions WHERE id = $1 AND farmer_id = $2")
                .bind(subscription_id)
                .bind(farmer_id)
                .execute(&self.db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Alert subscription".to_string()));
        }

        Ok(())
    }

    /// Fetch the forecast for one subscription and store what was found
    pub async fn check_subscription(
        &self,
        subscription: &AlertSubscription,
    ) -> AppResult<Vec<HarshWeatherWarning>> {
        let samples = self.weather.get_forecast(&subscription.location).await?;
        let warnings = shared::harsh_weather_warnings(&samples);

        sqlx::query(
            r#"
            UPDATE alert_subscriptions
            SET last_checked_at = NOW(), last_warnings = $2
            WHERE id = $1
            "#,
        )
        .bind(subscription.id)
        .bind(Json(&warnings))
        .execute(&self.db)
        .await?;

        if !warnings.is_empty() {
            let lines: Vec<String> = warnings.iter().map(|w| w.describe()).collect();
            tracing::warn!(
                subscription_id = %subscription.id,
                email = %subscription.email,
                location = %subscription.location,
                "Harsh weather alert: {}",
                lines.join("; ")
            );
        }

        Ok(warnings)
    }

    /// Check every active subscription. A failing subscription is logged and
    /// does not stop the others.
    pub async fn check_all(&self) -> AppResult<AlertCheckReport> {
        let rows = sqlx::query_as::<_, SubscriptionRow>(&format!(
            "SELECT {} FROM alert_subscriptions WHERE is_active ORDER BY created_at",
            SUBSCRIPTION_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        let mut report = AlertCheckReport::default();
        for subscription in rows.into_iter().map(AlertSubscription::from) {
            report.checked += 1;
            match self.check_subscription(&subscription).await {
                Ok(warnings) if !warnings.is_empty() => report.alerted += 1,
                Ok(_) => {}
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(
                        "Alert check for subscription {} ({}) failed: {}",
                        subscription.id,
                        subscription.location,
                        e
                    );
                }
            }
        }

        Ok(report)
    }
}

/// Run `check_all` on a fixed interval for the lifetime of the server
pub fn spawn_alert_checker(service: AlertService, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match service.check_all().await {
                Ok(report) => tracing::info!(
                    checked = report.checked,
                    alerted = report.alerted,
                    failed = report.failed,
                    "Harsh weather check completed"
                ),
                Err(e) => tracing::error!("Harsh weather check failed: {}", e),
            }
        }
    })
}
