//! Calendar event administration handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use intake_core::error::AppError;
use intake_entity::event::{CalendarEvent, CreateCalendarEvent};

use crate::dto::request::{CreateEventRequest, EventRangeQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<ApiResponse<CalendarEvent>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let event = state
        .event_repo
        .create(&CreateCalendarEvent {
            event_date: req.event_date,
            name: req.name,
            description: req.description,
        })
        .await?;

    tracing::info!(event_id = %event.id, date = %event.event_date, "Calendar event created");
    Ok(Json(ApiResponse::ok(event)))
}

/// GET /api/events?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventRangeQuery>,
) -> Result<Json<ApiResponse<Vec<CalendarEvent>>>, AppError> {
    if params.to < params.from {
        return Err(AppError::validation("Range end must not precede its start"));
    }
    let events = state.event_repo.find_between(params.from, params.to).await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    if !state.event_repo.delete(id).await? {
        return Err(AppError::not_found(format!("Event {id} not found")));
    }
    tracing::info!(event_id = %id, "Calendar event deleted");
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Event deleted".to_string(),
    })))
}
