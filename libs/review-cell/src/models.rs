use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCategory {
    Doctor,
    Clinic,
    Lab,
    Hospital,
}

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: u32,
    pub patient_name: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
    pub verified: bool,
    pub helpful: u32,
    pub category: ReviewCategory,
    pub target_id: u32,
    pub target_name: String,
}

/// Optional per-aspect sub-ratings. Decorative inputs: collected but not
/// validated and not persisted anywhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRatings {
    pub quality: u8,
    pub waiting: u8,
    pub staff: u8,
    pub cleanliness: u8,
    pub value: u8,
}

#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub rating: u8,
    pub comment: String,
    pub category: ReviewCategory,
    pub target_id: u32,
    #[serde(default)]
    pub categories: Option<CategoryRatings>,
}

/// Displayed aggregate numbers. These are static sample figures, not
/// derived from submitted reviews.
#[derive(Debug, Clone, Serialize)]
pub struct RatingStats {
    pub overall: f32,
    pub total_reviews: u32,
    pub distribution: Vec<(u8, u32)>,
    pub categories: CategoryAverages,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryAverages {
    pub quality: f32,
    pub waiting: f32,
    pub staff: f32,
    pub cleanliness: f32,
    pub value: f32,
}

#[derive(Debug, Deserialize)]
pub struct ReviewFilterQuery {
    pub category: Option<ReviewCategory>,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("A star rating is required")]
    RatingRequired,

    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,

    #[error("Comment must be at least {0} characters")]
    CommentTooShort(usize),
}
