//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use intake_core::config::AppConfig;
use intake_database::repositories::{AppointmentRepository, CalendarEventRepository};
use intake_service::scheduling::{AvailabilityService, BookingService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Appointment repository
    pub appointment_repo: Arc<AppointmentRepository>,
    /// Calendar event repository
    pub event_repo: Arc<CalendarEventRepository>,
    /// Booking service
    pub booking_service: Arc<BookingService>,
    /// Availability preview service
    pub availability_service: Arc<AvailabilityService>,
}
