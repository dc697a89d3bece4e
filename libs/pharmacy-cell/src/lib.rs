pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{CartItem, Medication, Pharmacy};
pub use services::cart::Cart;
pub use services::catalog::PharmacyCatalog;
pub use services::ordering::OrderingService;
