pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Language, PatientProfile, Theme};
pub use services::profile::PatientProfileService;
