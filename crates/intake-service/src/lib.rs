//! # intake-service
//!
//! Business logic for Intake: the capacity ledger, the day-walking
//! allocation planner, start-date validation, and the booking service that
//! persists split appointment groups transactionally.

pub mod scheduling;
