use anyhow::Result;
use regex::Regex;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{SignUpError, SignUpRequest, UserType};

const MIN_PASSWORD_LEN: usize = 8;

/// Account lifecycle over the backend auth API. Sign-up also creates the
/// role-specific record (`doctors` or `patients` row) the way the rest of
/// the system expects to find it.
pub struct AccountService {
    supabase: SupabaseClient,
    email_regex: Regex,
}

impl AccountService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            email_regex: Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("email regex is valid"),
        }
    }

    pub fn validate_sign_up(&self, request: &SignUpRequest) -> Result<(), SignUpError> {
        if !self.email_regex.is_match(&request.email) || request.email.len() > 254 {
            return Err(SignUpError::InvalidEmail);
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SignUpError::PasswordTooShort);
        }
        if request.full_name.trim().is_empty() {
            return Err(SignUpError::MissingFullName);
        }
        match request.user_type {
            UserType::Doctor => {
                let has_specialty = request.specialty.as_deref().is_some_and(|s| !s.is_empty());
                let has_license = request
                    .license_number
                    .as_deref()
                    .is_some_and(|s| !s.is_empty());
                if !has_specialty || !has_license {
                    return Err(SignUpError::MissingDoctorFields);
                }
            }
            UserType::Patient => {
                if request.birth_date.is_none() {
                    return Err(SignUpError::MissingBirthDate);
                }
            }
        }
        Ok(())
    }

    /// Create the auth user, then the role-specific record.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<Value> {
        info!("Signing up new {:?} account", request.user_type);

        let signup_body = json!({
            "email": request.email,
            "password": request.password,
            "data": {
                "full_name": request.full_name,
                "user_type": request.user_type,
                "phone": request.phone,
            }
        });

        let session: Value = self
            .supabase
            .request(Method::POST, "/auth/v1/signup", None, Some(signup_body))
            .await?;

        let user_id = session["user"]["id"]
            .as_str()
            .or_else(|| session["id"].as_str())
            .map(|s| s.to_string());

        if let (Some(user_id), Some(token)) =
            (user_id, session["access_token"].as_str())
        {
            match request.user_type {
                UserType::Doctor => {
                    let row = json!({
                        "user_id": user_id,
                        "specialty": request.specialty,
                        "license_number": request.license_number,
                    });
                    self.supabase.insert_returning("doctors", row, token).await?;
                }
                UserType::Patient => {
                    let row = json!({
                        "user_id": user_id,
                        "birth_date": request.birth_date,
                    });
                    self.supabase
                        .insert_returning("patients", row, token)
                        .await?;
                }
            }
        } else {
            // Email confirmation flows return no session; the role record
            // is created on first sign-in instead.
            debug!("Sign-up returned no session, skipping role record");
        }

        Ok(session)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Value> {
        debug!("Signing in {}", email);

        self.supabase
            .request(
                Method::POST,
                "/auth/v1/token?grant_type=password",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await
    }

    pub async fn sign_out(&self, auth_token: &str) -> Result<()> {
        debug!("Signing out");

        self.supabase
            .execute(Method::POST, "/auth/v1/logout", Some(auth_token), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use shared_utils::test_utils::TestConfig;

    fn service() -> AccountService {
        AccountService::new(&TestConfig::default().to_app_config())
    }

    fn patient_request() -> SignUpRequest {
        SignUpRequest {
            email: "patient@example.com".to_string(),
            password: "longenough".to_string(),
            phone: "01234567890".to_string(),
            full_name: "Test Patient".to_string(),
            user_type: UserType::Patient,
            specialty: None,
            license_number: None,
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
        }
    }

    #[test]
    fn valid_patient_sign_up_passes() {
        assert!(service().validate_sign_up(&patient_request()).is_ok());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        let mut request = patient_request();
        request.email = "not-an-email".to_string();
        assert_matches!(
            service().validate_sign_up(&request),
            Err(SignUpError::InvalidEmail)
        );
    }

    #[test]
    fn short_passwords_are_rejected() {
        let mut request = patient_request();
        request.password = "short".to_string();
        assert_matches!(
            service().validate_sign_up(&request),
            Err(SignUpError::PasswordTooShort)
        );
    }

    #[test]
    fn doctors_need_specialty_and_license() {
        let mut request = patient_request();
        request.user_type = UserType::Doctor;
        assert_matches!(
            service().validate_sign_up(&request),
            Err(SignUpError::MissingDoctorFields)
        );

        request.specialty = Some("Cardiology".to_string());
        request.license_number = Some("MD123456".to_string());
        assert!(service().validate_sign_up(&request).is_ok());
    }

    #[test]
    fn patients_need_a_birth_date() {
        let mut request = patient_request();
        request.birth_date = None;
        assert_matches!(
            service().validate_sign_up(&request),
            Err(SignUpError::MissingBirthDate)
        );
    }
}
