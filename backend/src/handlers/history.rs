//! HTTP handlers for advisory history

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::types::{PaginatedResponse, Pagination};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::AdvisoryHistoryEntry;
use crate::services::HistoryService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// List the current farmer's advisories, newest first
pub async fn list_history(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<PaginatedResponse<AdvisoryHistoryEntry>>> {
    let pagination = Pagination::from_query(query.page, query.per_page);
    let service = HistoryService::new(state.db);
    let history = service
        .list_for_farmer(current_user.0.farmer_id, &pagination)
        .await?;
    Ok(Json(history))
}
