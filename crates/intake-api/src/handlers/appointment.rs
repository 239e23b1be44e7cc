//! Appointment booking and administration handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use intake_core::error::AppError;
use intake_entity::appointment::Appointment;
use intake_service::scheduling::BookingRequest;

use crate::dto::request::{CreateAppointmentRequest, DateQuery, PreviewPlanRequest};
use crate::dto::response::{AllocationView, ApiResponse, BookingResponse, MessageResponse};
use crate::extractors::ActingUser;
use crate::state::AppState;

/// POST /api/appointments
///
/// The self-service booking flow: any positive file count, split across
/// days when it does not fit into the start day's remaining capacity.
pub async fn create_appointment(
    State(state): State<AppState>,
    actor: ActingUser,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let booked = state
        .booking_service
        .book(BookingRequest {
            school_name: req.school_name,
            file_count: req.file_count,
            start_date: req.start_date,
            assigned_by: actor.id(),
        })
        .await?;

    Ok(Json(ApiResponse::ok(BookingResponse::from(&booked))))
}

/// POST /api/appointments/direct
///
/// The direct admin flow: capped at the per-appointment maximum and never
/// split.
pub async fn create_direct_appointment(
    State(state): State<AppState>,
    actor: ActingUser,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<Json<ApiResponse<Appointment>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let appointment = state
        .booking_service
        .book_direct(BookingRequest {
            school_name: req.school_name,
            file_count: req.file_count,
            start_date: req.start_date,
            assigned_by: actor.id(),
        })
        .await?;

    Ok(Json(ApiResponse::ok(appointment)))
}

/// POST /api/appointments/preview
///
/// Validate a submission and return the allocation plan it would produce,
/// without writing anything.
pub async fn preview_plan(
    State(state): State<AppState>,
    Json(req): Json<PreviewPlanRequest>,
) -> Result<Json<ApiResponse<Vec<AllocationView>>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let allocations = state
        .booking_service
        .preview(req.file_count, req.start_date)
        .await?;

    Ok(Json(ApiResponse::ok(
        allocations.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/appointments?date=YYYY-MM-DD
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(params): Query<DateQuery>,
) -> Result<Json<ApiResponse<Vec<Appointment>>>, AppError> {
    let appointments = state.booking_service.list_for_date(params.date).await?;
    Ok(Json(ApiResponse::ok(appointments)))
}

/// GET /api/appointments/{id}
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Appointment>>, AppError> {
    let appointment = state.booking_service.get(id).await?;
    Ok(Json(ApiResponse::ok(appointment)))
}

/// GET /api/appointments/{id}/group
pub async fn get_split_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Appointment>>>, AppError> {
    let group = state.booking_service.split_group(id).await?;
    Ok(Json(ApiResponse::ok(group)))
}

/// PUT /api/appointments/{id}/complete
pub async fn complete_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.booking_service.complete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Appointment completed".to_string(),
    })))
}

/// PUT /api/appointments/{id}/cancel
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.booking_service.cancel(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Appointment cancelled".to_string(),
    })))
}

/// DELETE /api/appointments/{id}
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.booking_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Appointment deleted".to_string(),
    })))
}
