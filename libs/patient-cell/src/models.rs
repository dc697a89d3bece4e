use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Interface language preference. Arabic is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Ar => Language::En,
            Language::En => Language::Ar,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub blood_type: Option<String>,
    pub height_cm: Option<f32>,
    pub weight_kg: Option<f32>,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub theme: Theme,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl PatientProfile {
    /// Body mass index from the recorded measurements; `None` unless both
    /// height and weight are present and positive.
    pub fn bmi(&self) -> Option<f32> {
        let height_m = self.height_cm.filter(|h| *h > 0.0)? / 100.0;
        let weight = self.weight_kg.filter(|w| *w > 0.0)?;
        Some(weight / (height_m * height_m))
    }

    pub fn bmi_category(&self) -> Option<BmiCategory> {
        let bmi = self.bmi()?;
        Some(match bmi {
            b if b < 18.5 => BmiCategory::Underweight,
            b if b < 25.0 => BmiCategory::Normal,
            b if b < 30.0 => BmiCategory::Overweight,
            _ => BmiCategory::Obese,
        })
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        let birth = self.birth_date?;
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        Some(age)
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub blood_type: Option<String>,
    pub height_cm: Option<f32>,
    pub weight_kg: Option<f32>,
    pub chronic_conditions: Option<Vec<String>>,
    pub allergies: Option<Vec<String>>,
}

/// The two client-persisted preference flags.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub language: Option<Language>,
    pub theme: Option<Theme>,
}
