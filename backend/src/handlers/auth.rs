//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{AuthenticatedFarmer, RegisterFarmerInput};
use crate::services::AuthService;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[validate(length(max = 100))]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Farmer profile plus bearer token
#[derive(Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub location: Option<String>,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<AuthenticatedFarmer> for AuthResponse {
    fn from(auth: AuthenticatedFarmer) -> Self {
        Self {
            id: auth.farmer.id,
            name: auth.farmer.name,
            email: auth.farmer.email,
            location: auth.farmer.location,
            token: auth.token,
            token_type: auth.token_type,
            expires_in: auth.expires_in,
        }
    }
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub location: Option<String>,
}

/// Register farmer endpoint handler
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    body.validate()?;

    let input = RegisterFarmerInput {
        name: body.name,
        email: body.email,
        password: body.password,
        location: body.location,
    };

    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let result = auth_service.register(input).await?;

    Ok((StatusCode::CREATED, Json(result.into())))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    body.validate()?;

    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let result = auth_service.login(&body.email, &body.password).await?;

    Ok(Json(result.into()))
}

/// Current farmer profile
pub async fn me(current_user: CurrentUser) -> Json<ProfileResponse> {
    let user = current_user.0;
    Json(ProfileResponse {
        id: user.farmer_id,
        name: user.name,
        email: user.email,
        location: user.location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            name: "Asha".to_string(),
            email: "asha@example.in".to_string(),
            password: "secret1".to_string(),
            location: Some("Nagpur,IN".to_string()),
        };
        assert!(valid.validate().is_ok());

        let short_password = RegisterRequest {
            password: "123".to_string(),
            ..valid
        };
        let errors = short_password.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_login_request_rejects_bad_email() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "whatever".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
