//! Availability preview handlers.

use axum::Json;
use axum::extract::{Query, State};

use intake_core::error::AppError;
use intake_service::scheduling::DayAvailability;

use crate::dto::request::AvailabilityQuery;
use crate::dto::response::ApiResponse;
use crate::state::AppState;

/// GET /api/availability?from=YYYY-MM-DD&days=N
pub async fn get_availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<Vec<DayAvailability>>>, AppError> {
    let days = params.days.unwrap_or(30);
    let range = state.availability_service.range(params.from, days).await?;
    Ok(Json(ApiResponse::ok(range)))
}
