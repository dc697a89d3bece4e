pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Appointment, AppointmentStatus, AppointmentType, BookingDraft, BookingError};
pub use services::draft::DraftService;
