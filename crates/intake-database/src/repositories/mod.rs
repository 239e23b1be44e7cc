//! Repository implementations for all Intake entities.

pub mod appointment;
pub mod event;

pub use appointment::AppointmentRepository;
pub use event::CalendarEventRepository;
