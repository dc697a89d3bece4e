pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{CreatePrescriptionRequest, Prescription, PrescriptionItem};
pub use services::prescription::PrescriptionService;
