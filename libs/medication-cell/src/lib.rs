pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{MedicationSchedule, Reminder, ReminderKind};
pub use services::notifications::NotificationService;
pub use services::schedule::MedicationScheduleService;
pub use services::worker::ReminderWorker;
