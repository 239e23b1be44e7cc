//! Calendar event repository implementation.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use intake_core::error::{AppError, ErrorKind};
use intake_core::result::AppResult;
use intake_entity::event::{CalendarEvent, CreateCalendarEvent};

/// Repository for calendar event queries and administration.
#[derive(Debug, Clone)]
pub struct CalendarEventRepository {
    pool: PgPool,
}

impl CalendarEventRepository {
    /// Create a new calendar event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether any event blocks the given date.
    pub async fn exists_on(&self, date: NaiveDate) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM calendar_events WHERE event_date = $1)",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check for events", e))?;
        Ok(exists)
    }

    /// Find the first event on a date, if any.
    pub async fn find_on(&self, date: NaiveDate) -> AppResult<Option<CalendarEvent>> {
        sqlx::query_as::<_, CalendarEvent>(
            "SELECT * FROM calendar_events WHERE event_date = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// Distinct event dates within an inclusive range.
    pub async fn dates_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<NaiveDate>> {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            "SELECT DISTINCT event_date FROM calendar_events \
             WHERE event_date BETWEEN $1 AND $2",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list event dates", e))?;
        Ok(rows.into_iter().map(|(d,)| d).collect())
    }

    /// Transactional variant of [`Self::dates_between`].
    pub async fn dates_between_in(
        &self,
        conn: &mut PgConnection,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<NaiveDate>> {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            "SELECT DISTINCT event_date FROM calendar_events \
             WHERE event_date BETWEEN $1 AND $2",
        )
        .bind(from)
        .bind(to)
        .fetch_all(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list event dates", e))?;
        Ok(rows.into_iter().map(|(d,)| d).collect())
    }

    /// List full event rows within an inclusive range, date ascending.
    pub async fn find_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<CalendarEvent>> {
        sqlx::query_as::<_, CalendarEvent>(
            "SELECT * FROM calendar_events WHERE event_date BETWEEN $1 AND $2 \
             ORDER BY event_date, created_at",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))
    }

    /// Register a new calendar event.
    pub async fn create(&self, data: &CreateCalendarEvent) -> AppResult<CalendarEvent> {
        sqlx::query_as::<_, CalendarEvent>(
            "INSERT INTO calendar_events (event_date, name, description) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.event_date)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))
    }

    /// Delete an event by ID. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;
        Ok(result.rows_affected() > 0)
    }
}
