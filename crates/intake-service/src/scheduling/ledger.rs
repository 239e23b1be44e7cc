//! Capacity ledger — answers "how many files are already committed to day D?".
//!
//! Two forms of the same answers: [`CapacityLedger`] queries the database
//! per date and backs the availability preview, while [`CapacityWindow`] is
//! a preloaded snapshot of a planning horizon that the planner walks
//! synchronously. The booking service loads its window inside the booking
//! transaction so the snapshot stays consistent until commit.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use sqlx::PgConnection;

use intake_core::config::SchedulingConfig;
use intake_core::result::AppResult;
use intake_database::repositories::{AppointmentRepository, CalendarEventRepository};

/// Whether a date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Read-side capacity queries for single candidate dates.
#[derive(Debug, Clone)]
pub struct CapacityLedger {
    /// Appointment repository for committed file sums.
    appointments: Arc<AppointmentRepository>,
    /// Event repository for blocked dates.
    events: Arc<CalendarEventRepository>,
    /// Injected scheduling limits.
    config: SchedulingConfig,
}

impl CapacityLedger {
    /// Creates a new capacity ledger.
    pub fn new(
        appointments: Arc<AppointmentRepository>,
        events: Arc<CalendarEventRepository>,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            appointments,
            events,
            config,
        }
    }

    /// True when the date is a weekend or a calendar event blocks it.
    pub async fn is_blocked(&self, date: NaiveDate) -> AppResult<bool> {
        if is_weekend(date) {
            return Ok(true);
        }
        self.events.exists_on(date).await
    }

    /// Files already committed to the date. Zero when no appointments exist.
    ///
    /// Excludes soft-deleted rows only; cancelled appointments still hold
    /// their slot.
    pub async fn used_capacity(&self, date: NaiveDate) -> AppResult<i64> {
        self.appointments.daily_file_sum(date).await
    }

    /// Files still available on the date: zero when blocked, otherwise the
    /// daily limit minus committed files, floored at zero.
    pub async fn available_capacity(&self, date: NaiveDate) -> AppResult<i32> {
        if self.is_blocked(date).await? {
            return Ok(0);
        }
        let used = self.used_capacity(date).await?;
        Ok(remaining(self.config.daily_file_limit, used))
    }

    /// Load a [`CapacityWindow`] covering `days` dates starting at `start`,
    /// using the caller's transaction.
    pub async fn load_window_in(
        &self,
        conn: &mut PgConnection,
        start: NaiveDate,
        days: u32,
    ) -> AppResult<CapacityWindow> {
        let end = window_end(start, days);
        let sums = self
            .appointments
            .daily_sums_between_in(conn, start, end)
            .await?;
        let events = self.events.dates_between_in(conn, start, end).await?;
        Ok(CapacityWindow::from_parts(
            self.config.daily_file_limit,
            sums,
            events,
        ))
    }

    /// Load a [`CapacityWindow`] from the shared pool (read-only preview).
    pub async fn load_window(&self, start: NaiveDate, days: u32) -> AppResult<CapacityWindow> {
        let end = window_end(start, days);
        let sums = self.appointments.daily_sums_between(start, end).await?;
        let events = self.events.dates_between(start, end).await?;
        Ok(CapacityWindow::from_parts(
            self.config.daily_file_limit,
            sums,
            events,
        ))
    }

    /// The configured daily file limit.
    pub fn daily_file_limit(&self) -> i32 {
        self.config.daily_file_limit
    }
}

/// Last date inside a window of `days` dates starting at `start`.
fn window_end(start: NaiveDate, days: u32) -> NaiveDate {
    start + chrono::Days::new(u64::from(days.saturating_sub(1)))
}

/// Remaining capacity given the limit and the committed sum.
fn remaining(limit: i32, used: i64) -> i32 {
    let left = i64::from(limit) - used;
    if left <= 0 { 0 } else { left as i32 }
}

/// An in-memory snapshot of committed capacity and blocked dates over a
/// planning horizon. Answers the same questions as [`CapacityLedger`],
/// synchronously and without side effects.
#[derive(Debug, Clone)]
pub struct CapacityWindow {
    /// Daily file limit the snapshot was taken under.
    daily_file_limit: i32,
    /// Committed file sums per date. Absent dates have zero usage.
    used: HashMap<NaiveDate, i64>,
    /// Dates blocked by calendar events.
    event_dates: HashSet<NaiveDate>,
}

impl CapacityWindow {
    /// Creates an empty window with the given daily limit.
    pub fn new(daily_file_limit: i32) -> Self {
        Self {
            daily_file_limit,
            used: HashMap::new(),
            event_dates: HashSet::new(),
        }
    }

    /// Builds a window from query results.
    pub fn from_parts(
        daily_file_limit: i32,
        sums: Vec<(NaiveDate, i64)>,
        event_dates: Vec<NaiveDate>,
    ) -> Self {
        Self {
            daily_file_limit,
            used: sums.into_iter().collect(),
            event_dates: event_dates.into_iter().collect(),
        }
    }

    /// Records committed files on a date (builder style, used by tests and
    /// seeding paths).
    pub fn with_used(mut self, date: NaiveDate, files: i64) -> Self {
        self.used.insert(date, files);
        self
    }

    /// Records an event date (builder style).
    pub fn with_event(mut self, date: NaiveDate) -> Self {
        self.event_dates.insert(date);
        self
    }

    /// True when the date is a weekend or an event blocks it.
    pub fn is_blocked(&self, date: NaiveDate) -> bool {
        is_weekend(date) || self.event_dates.contains(&date)
    }

    /// Files already committed to the date.
    pub fn used_capacity(&self, date: NaiveDate) -> i64 {
        self.used.get(&date).copied().unwrap_or(0)
    }

    /// Files still available on the date.
    pub fn available_capacity(&self, date: NaiveDate) -> i32 {
        if self.is_blocked(date) {
            return 0;
        }
        remaining(self.daily_file_limit, self.used_capacity(date))
    }

    /// The daily file limit this snapshot was taken under.
    pub fn daily_file_limit(&self) -> i32 {
        self.daily_file_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_detection() {
        assert!(is_weekend(date(2026, 2, 7))); // Saturday
        assert!(is_weekend(date(2026, 2, 8))); // Sunday
        assert!(!is_weekend(date(2026, 2, 9))); // Monday
    }

    #[test]
    fn test_empty_day_has_full_capacity() {
        let window = CapacityWindow::new(200);
        assert_eq!(window.used_capacity(date(2026, 2, 3)), 0);
        assert_eq!(window.available_capacity(date(2026, 2, 3)), 200);
    }

    #[test]
    fn test_event_day_has_zero_capacity_regardless_of_usage() {
        let window = CapacityWindow::new(200).with_event(date(2026, 2, 3));
        assert!(window.is_blocked(date(2026, 2, 3)));
        assert_eq!(window.available_capacity(date(2026, 2, 3)), 0);
    }

    #[test]
    fn test_weekend_has_zero_capacity() {
        let window = CapacityWindow::new(200);
        assert_eq!(window.available_capacity(date(2026, 2, 7)), 0);
    }

    #[test]
    fn test_available_capacity_floors_at_zero() {
        // Overcommitted data must not produce negative availability.
        let window = CapacityWindow::new(200).with_used(date(2026, 2, 3), 250);
        assert_eq!(window.available_capacity(date(2026, 2, 3)), 0);
    }

    #[test]
    fn test_partial_usage() {
        let window = CapacityWindow::new(200).with_used(date(2026, 2, 3), 180);
        assert_eq!(window.available_capacity(date(2026, 2, 3)), 20);
    }
}
