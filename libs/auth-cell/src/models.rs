use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Doctor,
    Patient,
}

/// Registration payload. Doctors must supply their specialty and license
/// number; patients their birth date.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub phone: String,
    pub full_name: String,
    pub user_type: UserType,
    // Doctor fields
    pub specialty: Option<String>,
    pub license_number: Option<String>,
    // Patient fields
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignUpError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Full name is required")]
    MissingFullName,

    #[error("Doctors must provide a specialty and license number")]
    MissingDoctorFields,

    #[error("Patients must provide a birth date")]
    MissingBirthDate,
}
