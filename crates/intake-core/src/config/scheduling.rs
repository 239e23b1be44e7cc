//! Capacity scheduling configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the daily-capacity allocation engine.
///
/// These are injected into the scheduling services rather than compiled in,
/// so tests and smaller deployments can run with reduced limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Maximum files that may be committed to a single calendar date
    /// across all appointments.
    #[serde(default = "default_daily_file_limit")]
    pub daily_file_limit: i32,
    /// Maximum total files a single direct (non-splitting) submission may
    /// request. The splitting flow is not bounded by this value.
    #[serde(default = "default_max_files_per_appointment")]
    pub max_files_per_appointment: i32,
    /// How many calendar days the planner may walk forward from the start
    /// date before giving up, counting skipped days.
    #[serde(default = "default_max_planning_days")]
    pub max_planning_days: u32,
    /// Upper bound on the range size served by the availability preview.
    #[serde(default = "default_availability_max_days")]
    pub availability_max_days: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            daily_file_limit: default_daily_file_limit(),
            max_files_per_appointment: default_max_files_per_appointment(),
            max_planning_days: default_max_planning_days(),
            availability_max_days: default_availability_max_days(),
        }
    }
}

fn default_daily_file_limit() -> i32 {
    200
}

fn default_max_files_per_appointment() -> i32 {
    200
}

fn default_max_planning_days() -> u32 {
    365
}

fn default_availability_max_days() -> u32 {
    90
}
