//! Scheduling rule violations.
//!
//! Every variant is a business failure: surfaced to the caller verbatim and
//! never retried. Infrastructure failures stay on
//! [`intake_core::error::AppError`] with their own kinds.

use chrono::NaiveDate;
use thiserror::Error;

use intake_core::error::AppError;

/// A booking was rejected by the scheduling rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The start date is today or in the past.
    #[error("appointment date {date} must be after today ({today})")]
    PastOrPresentDate {
        /// The rejected start date.
        date: NaiveDate,
        /// The reference day the rule was evaluated against.
        today: NaiveDate,
    },

    /// The start date falls on a Saturday or Sunday.
    #[error("appointments cannot start on a weekend ({date})")]
    WeekendDate {
        /// The rejected start date.
        date: NaiveDate,
    },

    /// A calendar event blocks the start date.
    #[error("date {date} is blocked by calendar event '{event_name}'")]
    EventConflict {
        /// The rejected start date.
        date: NaiveDate,
        /// Name of the blocking event.
        event_name: String,
    },

    /// The planner ran out of planning horizon before placing the request.
    #[error(
        "insufficient capacity within the planning window: {unplaced_files} of \
         {requested_files} requested files could not be placed"
    )]
    CapacityExhausted {
        /// The original requested total.
        requested_files: i32,
        /// Files still unplaced when the horizon ran out.
        unplaced_files: i32,
    },
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::validation(err.to_string())
    }
}
