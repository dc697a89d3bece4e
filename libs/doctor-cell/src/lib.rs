pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{ConsultationType, Doctor};
pub use services::directory::DoctorDirectory;
