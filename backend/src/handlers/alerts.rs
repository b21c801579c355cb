//! HTTP handlers for harsh weather alert subscriptions

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::{AuthUser, CurrentUser};
use crate::models::AlertSubscription;
use crate::services::alerts::SubscribeInput;
use crate::services::AlertService;
use crate::AppState;

/// Subscription request. Both fields fall back to the farmer's profile.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
}

fn resolve_subscription(request: SubscribeRequest, user: &AuthUser) -> AppResult<SubscribeInput> {
    request.validate()?;

    let location = shared::resolve_location(request.location.as_deref(), user.location.as_deref())
        .ok_or(AppError::LocationRequired)?;

    let email = request
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| user.email.clone());

    Ok(SubscribeInput { email, location })
}

/// Subscribe the current farmer to harsh weather alerts
pub async fn subscribe_alerts(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<AlertSubscription>)> {
    let user = current_user.0;
    let input = resolve_subscription(body, &user)?;

    let service = AlertService::new(state.db, state.weather);
    let subscription = service.subscribe(user.farmer_id, input).await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// List the current farmer's alert subscriptions
pub async fn list_alert_subscriptions(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<AlertSubscription>>> {
    let service = AlertService::new(state.db, state.weather);
    let subscriptions = service.list_for_farmer(current_user.0.farmer_id).await?;
    Ok(Json(subscriptions))
}

/// Remove one of the current farmer's alert subscriptions
pub async fn unsubscribe_alerts(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(subscription_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = AlertService::new(state.db, state.weather);
    service
        .unsubscribe(current_user.0.farmer_id, subscription_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farmer(location: Option<&str>) -> AuthUser {
        AuthUser {
            farmer_id: Uuid::new_v4(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn test_profile_defaults() {
        let input = resolve_subscription(SubscribeRequest::default(), &farmer(Some("Delhi,IN")))
            .unwrap();
        assert_eq!(input.email, "asha@example.com");
        assert_eq!(input.location, "Delhi,IN");
    }

    #[test]
    fn test_request_values_win() {
        let request = SubscribeRequest {
            email: Some("Alerts@Example.com".to_string()),
            location: Some("Pune,IN".to_string()),
        };
        let input = resolve_subscription(request, &farmer(Some("Delhi,IN"))).unwrap();
        assert_eq!(input.email, "alerts@example.com");
        assert_eq!(input.location, "Pune,IN");
    }

    #[test]
    fn test_missing_location_is_rejected() {
        assert!(matches!(
            resolve_subscription(SubscribeRequest::default(), &farmer(None)),
            Err(AppError::LocationRequired)
        ));
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let request = SubscribeRequest {
            email: Some("not-an-email".to_string()),
            location: None,
        };
        assert!(matches!(
            resolve_subscription(request, &farmer(Some("Delhi,IN"))),
            Err(AppError::ValidationError(_))
        ));
    }
}
