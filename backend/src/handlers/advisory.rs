//! HTTP handlers for crop advisories

use axum::{extract::State, Json};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::advisory::{AdvisoryInput, AdvisoryResponse};
use crate::services::{AdvisoryService, HistoryService};
use crate::AppState;

/// Advisory request body. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct AdvisoryRequest {
    pub location: Option<String>,
    pub soil_type: Option<String>,
    pub sowing_month: Option<u32>,
}

/// Resolve request fields against the farmer's profile and the clock
fn resolve_input(
    request: AdvisoryRequest,
    saved_location: Option<&str>,
    current_month: u32,
) -> AppResult<AdvisoryInput> {
    let location = shared::resolve_location(request.location.as_deref(), saved_location)
        .ok_or(AppError::LocationRequired)?;

    shared::validate_location(&location).map_err(|msg| AppError::Validation {
        field: "location".to_string(),
        message: msg.to_string(),
    })?;

    let sowing_month = request.sowing_month.unwrap_or(current_month);
    shared::validate_sowing_month(sowing_month).map_err(|msg| AppError::Validation {
        field: "sowing_month".to_string(),
        message: msg.to_string(),
    })?;

    Ok(AdvisoryInput {
        location,
        soil_type: shared::normalize_soil_type(request.soil_type.as_deref()),
        sowing_month,
    })
}

/// Generate a crop advisory for the current farmer
pub async fn generate_advisory(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<AdvisoryRequest>,
) -> AppResult<Json<AdvisoryResponse>> {
    let user = current_user.0;
    let input = resolve_input(body, user.location.as_deref(), Utc::now().month())?;

    let service = AdvisoryService::new(state.weather.clone(), HistoryService::new(state.db));
    let response = service.generate(user.farmer_id, input).await?;
    Ok(Json(response))
}
