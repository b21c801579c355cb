//! Authentication middleware
//!
//! Validates the bearer token and attaches the calling farmer to the request

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, ErrorDetail, ErrorResponse};
use crate::services::AuthService;
use crate::AppState;

/// Authenticated farmer information
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub farmer_id: Uuid,
    pub name: String,
    pub email: String,
    /// Saved location used when a request omits one
    pub location: Option<String>,
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token.trim(),
        None => return unauthorized_response("Missing or invalid Authorization header"),
    };

    let auth_service = AuthService::new(state.db.clone(), &state.config);

    let farmer_id = match auth_service.validate_token(token) {
        Ok(id) => id,
        Err(e) => return unauthorized_response(&e.to_string()),
    };

    // Token may outlive the account
    let farmer = match auth_service.find_farmer(farmer_id).await {
        Ok(farmer) => farmer,
        Err(AppError::NotFound(_)) => return unauthorized_response("Farmer not found"),
        Err(e) => return e.into_response(),
    };

    request.extensions_mut().insert(AuthUser {
        farmer_id: farmer.id,
        name: farmer.name,
        email: farmer.email,
        location: farmer.location,
    });

    next.run(request).await
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: ErrorDetail::new("UNAUTHORIZED", message),
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for authenticated farmer
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: ErrorDetail::new("UNAUTHORIZED", "Authentication required"),
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}
