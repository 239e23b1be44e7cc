//! Per-day availability preview for the booking calendar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use intake_core::config::SchedulingConfig;
use intake_core::result::AppResult;

use super::ledger::{CapacityLedger, CapacityWindow};

/// One calendar day's capacity as shown in the booking calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// The day.
    pub date: NaiveDate,
    /// Files already committed to the day.
    pub used: i64,
    /// Files still bookable on the day. Zero when blocked.
    pub available: i32,
    /// Whether the day is a weekend or blocked by an event.
    pub blocked: bool,
}

/// Read-only capacity previews over a date range.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    /// Capacity queries.
    ledger: CapacityLedger,
    /// Injected scheduling limits.
    config: SchedulingConfig,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(ledger: CapacityLedger, config: SchedulingConfig) -> Self {
        Self { ledger, config }
    }

    /// Availability for `days` consecutive dates starting at `from`,
    /// clamped to the configured preview maximum.
    pub async fn range(&self, from: NaiveDate, days: u32) -> AppResult<Vec<DayAvailability>> {
        let days = days.clamp(1, self.config.availability_max_days);
        let window = self.ledger.load_window(from, days).await?;
        Ok(day_range(from, days, &window))
    }

    /// Availability for a single date, queried live against the store.
    pub async fn day(&self, date: NaiveDate) -> AppResult<DayAvailability> {
        Ok(DayAvailability {
            date,
            used: self.ledger.used_capacity(date).await?,
            available: self.ledger.available_capacity(date).await?,
            blocked: self.ledger.is_blocked(date).await?,
        })
    }
}

/// Project a loaded window onto per-day availability entries.
fn day_range(from: NaiveDate, days: u32, window: &CapacityWindow) -> Vec<DayAvailability> {
    (0..days)
        .map(|offset| {
            let date = from + chrono::Days::new(u64::from(offset));
            DayAvailability {
                date,
                used: window.used_capacity(date),
                available: window.available_capacity(date),
                blocked: window.is_blocked(date),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_covers_each_day_once() {
        let window = CapacityWindow::new(200);
        let days = day_range(date(2026, 2, 2), 7, &window);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, date(2026, 2, 2));
        assert_eq!(days[6].date, date(2026, 2, 8));
    }

    #[test]
    fn test_weekends_and_events_report_blocked_with_zero_available() {
        let window = CapacityWindow::new(200).with_event(date(2026, 2, 4));
        // Mon 02-02 through Sun 02-08.
        let days = day_range(date(2026, 2, 2), 7, &window);

        let wednesday = &days[2];
        assert!(wednesday.blocked);
        assert_eq!(wednesday.available, 0);

        let saturday = &days[5];
        assert!(saturday.blocked);
        assert_eq!(saturday.available, 0);
    }

    #[test]
    fn test_partial_usage_is_reported() {
        let window = CapacityWindow::new(200).with_used(date(2026, 2, 3), 180);
        let days = day_range(date(2026, 2, 3), 1, &window);
        assert_eq!(days[0].used, 180);
        assert_eq!(days[0].available, 20);
        assert!(!days[0].blocked);
    }
}
