//! Response DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use intake_service::scheduling::{Allocation, BookedAppointment};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// A successful booking, summarizing the persisted split group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    /// ID of the primary appointment row.
    pub appointment_id: Uuid,
    /// Name of the submitting school.
    pub school_name: String,
    /// Total files booked.
    pub file_count: i32,
    /// Whether the booking was split across multiple days.
    pub is_split: bool,
    /// Number of rows in the split group, if split.
    pub total_splits: Option<i32>,
    /// Per-day allocations, date ascending.
    pub allocations: Vec<AllocationView>,
}

/// One day's share of a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationView {
    /// Processing day.
    pub date: NaiveDate,
    /// Files allocated to that day.
    pub file_count: i32,
}

impl From<Allocation> for AllocationView {
    fn from(allocation: Allocation) -> Self {
        Self {
            date: allocation.date,
            file_count: allocation.file_count,
        }
    }
}

impl From<&BookedAppointment> for BookingResponse {
    fn from(booked: &BookedAppointment) -> Self {
        Self {
            appointment_id: booked.primary.id,
            school_name: booked.primary.school_name.clone(),
            file_count: booked.primary.file_count,
            is_split: booked.primary.is_split,
            total_splits: booked.primary.total_splits,
            allocations: booked.allocations().into_iter().map(Into::into).collect(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
}
