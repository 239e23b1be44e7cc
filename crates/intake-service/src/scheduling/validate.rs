//! Start-date pre-check.
//!
//! A submission's start date must be valid on its own merits before any
//! capacity math runs; unlike subsequent planning days it is never silently
//! advanced. Rules are evaluated in order and the first failing rule wins:
//! today/past, then weekend, then calendar event.

use std::sync::Arc;

use chrono::NaiveDate;

use intake_core::result::AppResult;
use intake_database::repositories::CalendarEventRepository;

use super::error::ScheduleError;
use super::ledger::is_weekend;

/// Validates submission start dates.
#[derive(Debug, Clone)]
pub struct StartDateValidator {
    /// Event repository for blocked-date lookups.
    events: Arc<CalendarEventRepository>,
}

impl StartDateValidator {
    /// Creates a new start-date validator.
    pub fn new(events: Arc<CalendarEventRepository>) -> Self {
        Self { events }
    }

    /// Rejects the date if it is today/past, a weekend, or blocked by an
    /// event. `today` is injected by the caller.
    pub async fn validate(&self, date: NaiveDate, today: NaiveDate) -> AppResult<()> {
        date_rules(date, today)?;

        if let Some(event) = self.events.find_on(date).await? {
            return Err(ScheduleError::EventConflict {
                date,
                event_name: event.name,
            }
            .into());
        }

        Ok(())
    }
}

/// The clock- and calendar-only rules (everything except event lookups).
fn date_rules(date: NaiveDate, today: NaiveDate) -> Result<(), ScheduleError> {
    if date <= today {
        return Err(ScheduleError::PastOrPresentDate { date, today });
    }
    if is_weekend(date) {
        return Err(ScheduleError::WeekendDate { date });
    }
    Ok(())
}
