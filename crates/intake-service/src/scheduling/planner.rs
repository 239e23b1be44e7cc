//! Greedy day-walking allocation planner.
//!
//! Pure function over a [`CapacityWindow`] snapshot: no clock access, no
//! I/O. The caller validates the start date first ([`super::validate`]) and
//! persists the resulting allocations; a rejected plan writes nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ScheduleError;
use super::ledger::CapacityWindow;

/// One day's share of a planned submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// The day the files are processed on.
    pub date: NaiveDate,
    /// Files allocated to that day.
    pub file_count: i32,
}

/// Place `requested_files` onto consecutive valid days starting at
/// `start_date`, first-fit greedy in strict calendar order.
///
/// Walks forward one day at a time. Blocked days (weekends, event days) and
/// full days are skipped; every day advanced over counts against
/// `max_planning_days`. Each open day contributes
/// `min(remaining, available)` files. Succeeds once the request is fully
/// placed; fails with [`ScheduleError::CapacityExhausted`] when the horizon
/// runs out first.
///
/// The returned allocations are date-ascending; the first entry becomes the
/// split group's primary row.
pub fn plan(
    requested_files: i32,
    start_date: NaiveDate,
    window: &CapacityWindow,
    max_planning_days: u32,
) -> Result<Vec<Allocation>, ScheduleError> {
    let mut remaining = requested_files;
    let mut current = start_date;
    let mut days_checked = 0u32;
    let mut allocations = Vec::new();

    while remaining > 0 && days_checked < max_planning_days {
        // Skip blocked days, counting each one against the horizon.
        while days_checked < max_planning_days && window.is_blocked(current) {
            current = next_day(current);
            days_checked += 1;
        }
        if days_checked >= max_planning_days {
            break;
        }

        let available = window.available_capacity(current);
        if available == 0 {
            // Day is already full; roll to the next one.
            current = next_day(current);
            days_checked += 1;
            continue;
        }

        let take = remaining.min(available);
        allocations.push(Allocation {
            date: current,
            file_count: take,
        });
        remaining -= take;
        current = next_day(current);
        days_checked += 1;
    }

    if remaining > 0 {
        return Err(ScheduleError::CapacityExhausted {
            requested_files,
            unplaced_files: remaining,
        });
    }

    Ok(allocations)
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2026-02-03 is a Tuesday; 02-07/02-08 are the following weekend.
    const LIMIT: i32 = 200;
    const HORIZON: u32 = 365;

    #[test]
    fn test_single_day_fit() {
        let window = CapacityWindow::new(LIMIT);
        let plan = plan(50, date(2026, 2, 3), &window, HORIZON).unwrap();
        assert_eq!(
            plan,
            vec![Allocation {
                date: date(2026, 2, 3),
                file_count: 50,
            }]
        );
    }

    #[test]
    fn test_exact_fit_is_single_allocation() {
        // Requesting exactly one empty day's capacity does not split.
        let window = CapacityWindow::new(LIMIT);
        let plan = plan(200, date(2026, 2, 3), &window, HORIZON).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].file_count, 200);
    }

    #[test]
    fn test_split_over_partially_used_day() {
        // 180 of 200 used on the start day: 20 fit there, 30 roll over.
        let window = CapacityWindow::new(LIMIT).with_used(date(2026, 2, 3), 180);
        let plan = plan(50, date(2026, 2, 3), &window, HORIZON).unwrap();
        assert_eq!(
            plan,
            vec![
                Allocation {
                    date: date(2026, 2, 3),
                    file_count: 20,
                },
                Allocation {
                    date: date(2026, 2, 4),
                    file_count: 30,
                },
            ]
        );
    }

    #[test]
    fn test_full_day_rolls_to_next_open_day() {
        // A completely full start day receives nothing, not even one file.
        let window = CapacityWindow::new(LIMIT).with_used(date(2026, 2, 3), 200);
        let plan = plan(1, date(2026, 2, 3), &window, HORIZON).unwrap();
        assert_eq!(
            plan,
            vec![Allocation {
                date: date(2026, 2, 4),
                file_count: 1,
            }]
        );
    }

    #[test]
    fn test_event_day_skipped_even_when_empty() {
        // Event on 02-04 blocks it outright; rollover lands on 02-05.
        let window = CapacityWindow::new(LIMIT)
            .with_used(date(2026, 2, 3), 180)
            .with_event(date(2026, 2, 4));
        let plan = plan(50, date(2026, 2, 3), &window, HORIZON).unwrap();
        assert_eq!(plan[1].date, date(2026, 2, 5));
        assert_eq!(plan[1].file_count, 30);
    }

    #[test]
    fn test_weekend_skipped_during_rollover() {
        // Friday 02-06 fills up; the remainder lands on Monday 02-09.
        let window = CapacityWindow::new(LIMIT).with_used(date(2026, 2, 6), 150);
        let plan = plan(100, date(2026, 2, 6), &window, HORIZON).unwrap();
        assert_eq!(
            plan,
            vec![
                Allocation {
                    date: date(2026, 2, 6),
                    file_count: 50,
                },
                Allocation {
                    date: date(2026, 2, 9),
                    file_count: 50,
                },
            ]
        );
    }

    #[test]
    fn test_large_request_spreads_over_many_days() {
        let window = CapacityWindow::new(LIMIT);
        let plan = plan(1000, date(2026, 2, 3), &window, HORIZON).unwrap();
        assert_eq!(plan.len(), 5);
        assert!(plan.iter().all(|a| a.file_count == 200));
        // Tue 03, Wed 04, Thu 05, Fri 06, then Monday 09 after the weekend.
        assert_eq!(plan[4].date, date(2026, 2, 9));
    }

    #[test]
    fn test_conservation() {
        let window = CapacityWindow::new(LIMIT)
            .with_used(date(2026, 2, 3), 123)
            .with_used(date(2026, 2, 4), 57)
            .with_event(date(2026, 2, 5));
        let requested = 777;
        let plan = plan(requested, date(2026, 2, 3), &window, HORIZON).unwrap();
        let total: i32 = plan.iter().map(|a| a.file_count).sum();
        assert_eq!(total, requested);
    }

    #[test]
    fn test_no_allocation_exceeds_remaining_capacity() {
        let window = CapacityWindow::new(LIMIT).with_used(date(2026, 2, 3), 180);
        let plan = plan(500, date(2026, 2, 3), &window, HORIZON).unwrap();
        for allocation in &plan {
            let available =
                LIMIT - i32::try_from(window.used_capacity(allocation.date)).unwrap();
            assert!(allocation.file_count <= available);
        }
    }

    #[test]
    fn test_allocations_are_date_ascending() {
        let window = CapacityWindow::new(LIMIT);
        let plan = plan(950, date(2026, 2, 3), &window, HORIZON).unwrap();
        for pair in plan.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_exhaustion_when_every_day_is_full() {
        let mut window = CapacityWindow::new(LIMIT);
        let start = date(2026, 2, 3);
        for offset in 0..365u64 {
            window = window.with_used(start + chrono::Days::new(offset), 200);
        }
        let err = plan(1000, start, &window, HORIZON).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::CapacityExhausted {
                requested_files: 1000,
                unplaced_files: 1000,
            }
        );
    }

    #[test]
    fn test_exhaustion_reports_shortfall_after_partial_placement() {
        // Only the start day is open; everything after is full.
        let mut window = CapacityWindow::new(LIMIT);
        let start = date(2026, 2, 3);
        for offset in 1..365u64 {
            window = window.with_used(start + chrono::Days::new(offset), 200);
        }
        let err = plan(500, start, &window, HORIZON).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::CapacityExhausted {
                requested_files: 500,
                unplaced_files: 300,
            }
        );
    }

    #[test]
    fn test_horizon_counts_skipped_days() {
        // With a 5-day horizon starting Friday, the weekend eats two of the
        // five days: only Fri + Mon + Tue are open.
        let window = CapacityWindow::new(LIMIT);
        let plan = plan(600, date(2026, 2, 6), &window, 5).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[2].date, date(2026, 2, 10));

        let err = plan(601, date(2026, 2, 6), &window, 5).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::CapacityExhausted {
                requested_files: 601,
                unplaced_files: 1,
            }
        );
    }

    #[test]
    fn test_reduced_limit_is_honored() {
        // Limits are injected, not compiled in.
        let window = CapacityWindow::new(10).with_used(date(2026, 2, 3), 4);
        let plan = plan(20, date(2026, 2, 3), &window, HORIZON).unwrap();
        assert_eq!(
            plan,
            vec![
                Allocation {
                    date: date(2026, 2, 3),
                    file_count: 6,
                },
                Allocation {
                    date: date(2026, 2, 4),
                    file_count: 10,
                },
                Allocation {
                    date: date(2026, 2, 5),
                    file_count: 4,
                },
            ]
        );
    }

    #[test]
    fn test_cancelled_rows_still_hold_capacity() {
        // The ledger sums make no status distinction; a window seeded with a
        // cancelled appointment's files behaves exactly like committed usage.
        // Pins the source system's behavior until product decides otherwise.
        let window = CapacityWindow::new(LIMIT).with_used(date(2026, 2, 3), 200);
        let plan = plan(10, date(2026, 2, 3), &window, HORIZON).unwrap();
        assert_eq!(plan[0].date, date(2026, 2, 4));
    }
}
