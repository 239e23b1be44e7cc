//! Appointment entity: one day's worth of committed file-processing work.

pub mod model;
pub mod status;

pub use model::{Appointment, CreateAppointment};
pub use status::AppointmentStatus;
