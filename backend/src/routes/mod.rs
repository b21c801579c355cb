//! Route definitions for the Crop Advisory Platform

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public, except profile)
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes - advisory generation
        .nest("/advisory", advisory_routes(state.clone()))
        // Protected routes - advisory history
        .nest("/history", history_routes(state.clone()))
        // Protected routes - harsh weather alert subscriptions
        .nest("/alerts", alert_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .merge(protected)
}

/// Advisory routes (protected)
fn advisory_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::generate_advisory))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// History routes (protected)
fn history_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_history))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Alert subscription routes (protected)
fn alert_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/subscriptions",
            post(handlers::subscribe_alerts).get(handlers::list_alert_subscriptions),
        )
        .route("/subscriptions/:id", delete(handlers::unsubscribe_alerts))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
