//! Calendar event entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A calendar event blocking an entire day.
///
/// Any day with an event is skipped by the scheduler regardless of how much
/// file capacity would otherwise remain. Events are immutable for planning
/// purposes; the scheduler only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CalendarEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// The blocked day.
    pub event_date: NaiveDate,
    /// Event name, surfaced in rejection messages.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// When the event was registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to register a new calendar event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCalendarEvent {
    /// The day to block.
    pub event_date: NaiveDate,
    /// Event name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}
