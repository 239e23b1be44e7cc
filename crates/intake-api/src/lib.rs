//! # intake-api
//!
//! HTTP API layer for Intake. Exposes booking submission, appointment
//! administration, calendar event management, and availability previews
//! over Axum, translating domain errors into validation-style responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
