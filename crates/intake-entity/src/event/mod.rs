//! Calendar event entity: a date with zero processing capacity.

pub mod model;

pub use model::{CalendarEvent, CreateCalendarEvent};
