//! Appointment entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::AppointmentStatus;

/// One day's worth of committed file-processing work for a school.
///
/// A submission whose file count does not fit into a single day's remaining
/// capacity is stored as a *split group*: one row per allocated day, all
/// carrying the original `file_count`, each carrying its own
/// `daily_file_count`. The first (earliest) row is the primary; subsequent
/// rows reference it through `parent_appointment_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    /// Unique appointment identifier.
    pub id: Uuid,
    /// Name of the submitting school.
    pub school_name: String,
    /// The calendar day this row's files are processed on.
    pub appointment_date: NaiveDate,
    /// The original total requested in the submission.
    pub file_count: i32,
    /// Files allocated to this row's date. Never exceeds the daily limit.
    pub daily_file_count: i32,
    /// Processing status.
    pub status: AppointmentStatus,
    /// Whether this row belongs to a multi-day split group.
    pub is_split: bool,
    /// 1-based position within the split group, or `None` for non-split rows.
    pub split_sequence: Option<i32>,
    /// Total rows in the split group, or `None` for non-split rows.
    pub total_splits: Option<i32>,
    /// The primary row of the split group. `None` on non-split rows and on
    /// the primary row itself.
    pub parent_appointment_id: Option<Uuid>,
    /// The user who submitted the booking.
    pub assigned_by: Uuid,
    /// Soft-delete marker. Deleted rows release their capacity.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Whether this row is the primary of a split group.
    pub fn is_primary(&self) -> bool {
        self.is_split && self.parent_appointment_id.is_none()
    }
}

/// Data required to insert a new appointment row.
///
/// `status` is not part of the payload: new rows always start as pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointment {
    /// Name of the submitting school.
    pub school_name: String,
    /// The calendar day to process on.
    pub appointment_date: NaiveDate,
    /// The original total requested in the submission.
    pub file_count: i32,
    /// Files allocated to this date.
    pub daily_file_count: i32,
    /// Whether the row belongs to a split group.
    pub is_split: bool,
    /// 1-based position within the split group.
    pub split_sequence: Option<i32>,
    /// Total rows in the split group.
    pub total_splits: Option<i32>,
    /// Primary row reference for split children.
    pub parent_appointment_id: Option<Uuid>,
    /// The submitting user.
    pub assigned_by: Uuid,
}
