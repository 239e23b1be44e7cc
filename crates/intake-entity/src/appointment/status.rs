//! Appointment status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "appointment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Files have not been processed yet.
    Pending,
    /// All files for this day were processed.
    Complete,
    /// The appointment was called off. Cancelled rows still occupy their
    /// day's capacity until an operator deletes them.
    Cancelled,
}

impl AppointmentStatus {
    /// Whether status transitions (complete/cancel) are still allowed.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Complete => "complete",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
