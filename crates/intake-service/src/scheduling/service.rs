//! Booking service: validation, planning, and transactional persistence.
//!
//! A successful booking is written as one appointment row per allocated
//! day. The whole read-plan-write sequence runs inside a single
//! transaction holding an advisory lock, so two submissions can never both
//! see the same free capacity and overcommit a day.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use intake_core::config::SchedulingConfig;
use intake_core::error::{AppError, ErrorKind};
use intake_core::result::AppResult;
use intake_database::repositories::AppointmentRepository;
use intake_entity::appointment::{Appointment, CreateAppointment};

use super::ledger::CapacityLedger;
use super::planner::{Allocation, plan};
use super::validate::StartDateValidator;

/// Advisory lock key serializing all capacity planning and booking writes.
///
/// Allocations span a set of days only discovered during planning, so
/// per-date locks cannot be ordered up front; one coarse key serializes
/// the whole read-plan-write sequence instead.
const SCHEDULING_LOCK_KEY: i64 = 0x5C4E_D01E;

/// A booking submission.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Name of the submitting school.
    pub school_name: String,
    /// Total files to process.
    pub file_count: i32,
    /// Desired first processing day.
    pub start_date: NaiveDate,
    /// The submitting user.
    pub assigned_by: Uuid,
}

/// The persisted result of a successful booking.
#[derive(Debug, Clone)]
pub struct BookedAppointment {
    /// The first (earliest) row of the group.
    pub primary: Appointment,
    /// Remaining rows of a split group, in split-sequence order. Empty for
    /// single-day bookings.
    pub children: Vec<Appointment>,
}

impl BookedAppointment {
    /// All rows of the group in date order.
    pub fn rows(&self) -> impl Iterator<Item = &Appointment> {
        std::iter::once(&self.primary).chain(self.children.iter())
    }

    /// The allocation plan this booking was persisted from.
    pub fn allocations(&self) -> Vec<Allocation> {
        self.rows()
            .map(|row| Allocation {
                date: row.appointment_date,
                file_count: row.daily_file_count,
            })
            .collect()
    }
}

/// Validates, plans, and persists appointment bookings.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Shared connection pool; booking transactions begin here.
    pool: PgPool,
    /// Appointment repository.
    appointments: Arc<AppointmentRepository>,
    /// Capacity queries.
    ledger: CapacityLedger,
    /// Start-date pre-check.
    validator: StartDateValidator,
    /// Injected scheduling limits.
    config: SchedulingConfig,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        pool: PgPool,
        appointments: Arc<AppointmentRepository>,
        ledger: CapacityLedger,
        validator: StartDateValidator,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            pool,
            appointments,
            ledger,
            validator,
            config,
        }
    }

    /// Book a submission, splitting it across days when it does not fit
    /// into the start day's remaining capacity.
    ///
    /// The start date must pass the pre-check on its own merits; later
    /// days are skipped silently when blocked or full. Either every row of
    /// the plan is committed or none is.
    pub async fn book(&self, request: BookingRequest) -> AppResult<BookedAppointment> {
        require_positive(request.file_count)?;
        let today = Utc::now().date_naive();
        self.validator.validate(request.start_date, today).await?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin booking transaction", e)
        })?;
        acquire_scheduling_lock(&mut tx).await?;

        let window = self
            .ledger
            .load_window_in(&mut tx, request.start_date, self.config.max_planning_days)
            .await?;
        let allocations = plan(
            request.file_count,
            request.start_date,
            &window,
            self.config.max_planning_days,
        )?;

        let booked = self.persist_plan(&mut tx, &request, &allocations).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        tracing::info!(
            appointment_id = %booked.primary.id,
            school = %request.school_name,
            files = request.file_count,
            days = allocations.len(),
            "Booked appointment"
        );
        Ok(booked)
    }

    /// Validate a submission and return its allocation plan without
    /// persisting anything.
    ///
    /// The preview runs outside the booking lock, so a concurrent booking
    /// may consume the previewed capacity before the caller commits.
    pub async fn preview(&self, file_count: i32, start_date: NaiveDate) -> AppResult<Vec<Allocation>> {
        require_positive(file_count)?;
        let today = Utc::now().date_naive();
        self.validator.validate(start_date, today).await?;

        let window = self
            .ledger
            .load_window(start_date, self.config.max_planning_days)
            .await?;
        let allocations = plan(file_count, start_date, &window, self.config.max_planning_days)?;
        Ok(allocations)
    }

    /// Book a submission that must fit entirely on its start date.
    ///
    /// This is the direct admin path: the request total is capped by
    /// `max_files_per_appointment` and never splits. The self-service
    /// calendar flow uses [`Self::book`] instead, which accepts any
    /// positive total and spreads it across days.
    pub async fn book_direct(&self, request: BookingRequest) -> AppResult<Appointment> {
        require_positive(request.file_count)?;
        if request.file_count > self.config.max_files_per_appointment {
            return Err(AppError::validation(format!(
                "A single appointment may request at most {} files, got {}",
                self.config.max_files_per_appointment, request.file_count
            )));
        }
        let today = Utc::now().date_naive();
        self.validator.validate(request.start_date, today).await?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin booking transaction", e)
        })?;
        acquire_scheduling_lock(&mut tx).await?;

        let used = self
            .appointments
            .daily_file_sum_in(&mut tx, request.start_date)
            .await?;
        let available = (i64::from(self.config.daily_file_limit) - used).max(0);
        if i64::from(request.file_count) > available {
            return Err(AppError::validation(format!(
                "Only {} of {} requested files fit on {}",
                available, request.file_count, request.start_date
            )));
        }

        let allocation = Allocation {
            date: request.start_date,
            file_count: request.file_count,
        };
        let row = self
            .appointments
            .insert_in(&mut tx, &row_payload(&request, &allocation, 1, 1, None))
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        tracing::info!(
            appointment_id = %row.id,
            school = %request.school_name,
            files = request.file_count,
            "Booked direct appointment"
        );
        Ok(row)
    }

    /// Fetch an appointment by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<Appointment> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Appointment {id} not found")))
    }

    /// List all appointments committed to a date.
    pub async fn list_for_date(&self, date: NaiveDate) -> AppResult<Vec<Appointment>> {
        self.appointments.find_by_date(date).await
    }

    /// Fetch every row of the split group an appointment belongs to, in
    /// split-sequence order. Non-split appointments yield a single row.
    pub async fn split_group(&self, id: Uuid) -> AppResult<Vec<Appointment>> {
        let row = self.get(id).await?;
        let primary_id = row.parent_appointment_id.unwrap_or(row.id);
        self.appointments.find_split_group(primary_id).await
    }

    /// Mark a pending appointment complete.
    pub async fn complete(&self, id: Uuid) -> AppResult<()> {
        self.appointments.mark_complete(id).await?;
        tracing::info!(appointment_id = %id, "Appointment completed");
        Ok(())
    }

    /// Cancel a pending appointment. The row keeps holding its day's
    /// capacity until deleted.
    pub async fn cancel(&self, id: Uuid) -> AppResult<()> {
        self.appointments.cancel(id).await?;
        tracing::info!(appointment_id = %id, "Appointment cancelled");
        Ok(())
    }

    /// Soft-delete an appointment, releasing its capacity.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.appointments.soft_delete(id).await?;
        tracing::info!(appointment_id = %id, "Appointment deleted");
        Ok(())
    }

    /// Insert one row per allocation: the primary first, then the children
    /// referencing its generated ID.
    async fn persist_plan(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        request: &BookingRequest,
        allocations: &[Allocation],
    ) -> AppResult<BookedAppointment> {
        let total = allocations.len() as i32;
        let (first, rest) = allocations
            .split_first()
            .ok_or_else(|| AppError::internal("Planner returned an empty allocation list"))?;

        let primary = self
            .appointments
            .insert_in(tx, &row_payload(request, first, 1, total, None))
            .await?;

        let mut children = Vec::with_capacity(rest.len());
        for (index, allocation) in rest.iter().enumerate() {
            let sequence = index as i32 + 2;
            let child = self
                .appointments
                .insert_in(
                    tx,
                    &row_payload(request, allocation, sequence, total, Some(primary.id)),
                )
                .await?;
            children.push(child);
        }

        Ok(BookedAppointment { primary, children })
    }
}

fn require_positive(file_count: i32) -> AppResult<()> {
    if file_count <= 0 {
        return Err(AppError::validation(format!(
            "file_count must be positive, got {file_count}"
        )));
    }
    Ok(())
}

async fn acquire_scheduling_lock(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
) -> AppResult<()> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEDULING_LOCK_KEY)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to acquire scheduling lock", e)
        })?;
    Ok(())
}

/// Build the insert payload for one allocation of a group of `total` rows.
///
/// Single-day bookings carry no split metadata; rows of a split group all
/// carry the original request total plus their own daily share, and every
/// row but the primary references the primary.
fn row_payload(
    request: &BookingRequest,
    allocation: &Allocation,
    sequence: i32,
    total: i32,
    parent_appointment_id: Option<Uuid>,
) -> CreateAppointment {
    let is_split = total > 1;
    CreateAppointment {
        school_name: request.school_name.clone(),
        appointment_date: allocation.date,
        file_count: request.file_count,
        daily_file_count: allocation.file_count,
        is_split,
        split_sequence: is_split.then_some(sequence),
        total_splits: is_split.then_some(total),
        parent_appointment_id,
        assigned_by: request.assigned_by,
    }
}
