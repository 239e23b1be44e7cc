//! Appointment repository implementation.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use intake_core::error::{AppError, ErrorKind};
use intake_core::result::AppResult;
use intake_entity::appointment::{Appointment, CreateAppointment};

/// Repository for appointment CRUD and capacity query operations.
///
/// Methods suffixed `_in` run against an explicit connection so the booking
/// service can execute them inside its transaction; the rest run against
/// the shared pool.
#[derive(Debug, Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    /// Create a new appointment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an appointment by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find appointment", e))
    }

    /// List all appointments committed to a date, earliest created first.
    pub async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Appointment>> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE appointment_date = $1 AND deleted_at IS NULL \
             ORDER BY created_at",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list appointments", e)
        })
    }

    /// Sum of `daily_file_count` committed to a date.
    ///
    /// Excludes soft-deleted rows only. Cancelled appointments still hold
    /// their capacity until deleted.
    pub async fn daily_file_sum(&self, date: NaiveDate) -> AppResult<i64> {
        let sum: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(daily_file_count), 0) FROM appointments \
             WHERE appointment_date = $1 AND deleted_at IS NULL",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to sum daily file counts", e)
        })?;
        Ok(sum)
    }

    /// Per-date sums of `daily_file_count` over an inclusive date range.
    ///
    /// Dates with no appointments are absent from the result. Same
    /// soft-delete-only filter as [`Self::daily_file_sum`].
    pub async fn daily_sums_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<(NaiveDate, i64)>> {
        sqlx::query_as::<_, (NaiveDate, i64)>(
            "SELECT appointment_date, COALESCE(SUM(daily_file_count), 0) FROM appointments \
             WHERE appointment_date BETWEEN $1 AND $2 AND deleted_at IS NULL \
             GROUP BY appointment_date",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to sum daily file counts", e)
        })
    }

    /// Transactional variant of [`Self::daily_sums_between`].
    pub async fn daily_sums_between_in(
        &self,
        conn: &mut PgConnection,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<(NaiveDate, i64)>> {
        sqlx::query_as::<_, (NaiveDate, i64)>(
            "SELECT appointment_date, COALESCE(SUM(daily_file_count), 0) FROM appointments \
             WHERE appointment_date BETWEEN $1 AND $2 AND deleted_at IS NULL \
             GROUP BY appointment_date",
        )
        .bind(from)
        .bind(to)
        .fetch_all(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to sum daily file counts", e)
        })
    }

    /// Transactional variant of [`Self::daily_file_sum`].
    pub async fn daily_file_sum_in(
        &self,
        conn: &mut PgConnection,
        date: NaiveDate,
    ) -> AppResult<i64> {
        let sum: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(daily_file_count), 0) FROM appointments \
             WHERE appointment_date = $1 AND deleted_at IS NULL",
        )
        .bind(date)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to sum daily file counts", e)
        })?;
        Ok(sum)
    }

    /// Insert a new appointment row inside the caller's transaction.
    ///
    /// New rows always start pending; the status column takes its database
    /// default.
    pub async fn insert_in(
        &self,
        conn: &mut PgConnection,
        data: &CreateAppointment,
    ) -> AppResult<Appointment> {
        sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (school_name, appointment_date, file_count, \
             daily_file_count, is_split, split_sequence, total_splits, \
             parent_appointment_id, assigned_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&data.school_name)
        .bind(data.appointment_date)
        .bind(data.file_count)
        .bind(data.daily_file_count)
        .bind(data.is_split)
        .bind(data.split_sequence)
        .bind(data.total_splits)
        .bind(data.parent_appointment_id)
        .bind(data.assigned_by)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert appointment", e))
    }

    /// Mark a pending appointment complete.
    pub async fn mark_complete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE appointments SET status = 'complete', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to complete appointment", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Pending appointment {id} not found"
            )));
        }
        Ok(())
    }

    /// Cancel a pending appointment.
    ///
    /// The row keeps holding its day's capacity; only deletion releases it.
    pub async fn cancel(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE appointments SET status = 'cancelled', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to cancel appointment", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Pending appointment {id} not found"
            )));
        }
        Ok(())
    }

    /// Soft-delete an appointment, releasing its capacity.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE appointments SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete appointment", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Appointment {id} not found")));
        }
        Ok(())
    }

    /// Fetch all rows of a split group given its primary row's ID, in
    /// split-sequence order. For a non-split row this returns just the row.
    pub async fn find_split_group(&self, primary_id: Uuid) -> AppResult<Vec<Appointment>> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments \
             WHERE (id = $1 OR parent_appointment_id = $1) AND deleted_at IS NULL \
             ORDER BY COALESCE(split_sequence, 1)",
        )
        .bind(primary_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch split group", e))
    }
}
