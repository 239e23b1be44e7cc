//! Route definitions for the Intake HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(appointment_routes())
        .merge(event_routes())
        .merge(availability_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Booking submission and appointment administration.
fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/appointments",
            post(handlers::appointment::create_appointment),
        )
        .route(
            "/appointments/direct",
            post(handlers::appointment::create_direct_appointment),
        )
        .route(
            "/appointments/preview",
            post(handlers::appointment::preview_plan),
        )
        .route(
            "/appointments",
            get(handlers::appointment::list_appointments),
        )
        .route(
            "/appointments/{id}",
            get(handlers::appointment::get_appointment),
        )
        .route(
            "/appointments/{id}/group",
            get(handlers::appointment::get_split_group),
        )
        .route(
            "/appointments/{id}/complete",
            put(handlers::appointment::complete_appointment),
        )
        .route(
            "/appointments/{id}/cancel",
            put(handlers::appointment::cancel_appointment),
        )
        .route(
            "/appointments/{id}",
            delete(handlers::appointment::delete_appointment),
        )
}

/// Calendar event administration.
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(handlers::event::create_event))
        .route("/events", get(handlers::event::list_events))
        .route("/events/{id}", delete(handlers::event::delete_event))
}

/// Availability previews for the booking calendar.
fn availability_routes() -> Router<AppState> {
    Router::new().route(
        "/availability",
        get(handlers::availability::get_availability),
    )
}

/// Health check endpoints (no actor header required).
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::HeaderValue;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    }
}
