pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Review, ReviewCategory, SubmitReviewRequest};
pub use services::review::ReviewService;
