//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Booking submission body.
///
/// Used by both the splitting self-service flow and the direct admin flow;
/// the direct flow additionally caps `file_count` at the per-appointment
/// maximum inside the service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    /// Name of the submitting school.
    #[validate(length(min = 1, max = 255, message = "School name is required"))]
    pub school_name: String,
    /// Total files to process.
    #[validate(range(min = 1, message = "file_count must be positive"))]
    pub file_count: i32,
    /// Desired first processing day.
    pub start_date: NaiveDate,
}

/// Plan preview body: a submission minus the school identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreviewPlanRequest {
    /// Total files to process.
    #[validate(range(min = 1, message = "file_count must be positive"))]
    pub file_count: i32,
    /// Desired first processing day.
    pub start_date: NaiveDate,
}

/// Calendar event registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    /// The day to block.
    pub event_date: NaiveDate,
    /// Event name.
    #[validate(length(min = 1, max = 255, message = "Event name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Date filter for appointment listings.
#[derive(Debug, Clone, Deserialize)]
pub struct DateQuery {
    /// The day to list.
    pub date: NaiveDate,
}

/// Availability preview range.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    /// First day of the preview.
    pub from: NaiveDate,
    /// Number of days; defaults to 30, clamped server-side.
    pub days: Option<u32>,
}

/// Inclusive date range for event listings.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRangeQuery {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range.
    pub to: NaiveDate,
}
