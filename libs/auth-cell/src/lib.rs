pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{SignInRequest, SignUpRequest, UserType};
pub use services::account::AccountService;
