use chrono::NaiveDate;
use tracing::info;

use crate::models::{
    CategoryAverages, RatingStats, Review, ReviewCategory, ReviewError, SubmitReviewRequest,
};

/// Minimum comment length for a submission to count as a real review.
pub const MIN_COMMENT_LEN: usize = 10;

/// Seeded review feed plus submission validation. Submissions are accepted
/// or rejected but not stored: the displayed list and statistics stay the
/// seeded sample data.
pub struct ReviewService {
    reviews: Vec<Review>,
}

impl ReviewService {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }

    pub fn with_seed_reviews() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

        Self::new(vec![
            Review {
                id: 1,
                patient_name: "Ahmed Mohamed".to_string(),
                rating: 5,
                comment: "Excellent and understanding doctor. Explained my condition clearly \
                          and the treatment was very effective. Highly recommend."
                    .to_string(),
                date: date(2024, 1, 10),
                verified: true,
                helpful: 12,
                category: ReviewCategory::Doctor,
                target_id: 1,
                target_name: "Dr. Ahmed Hassan".to_string(),
            },
            Review {
                id: 2,
                patient_name: "Fatima Ali".to_string(),
                rating: 4,
                comment: "Clean clinic with respectful staff. Waiting time was short. The \
                          doctor was good but I wish he had given more time for explanation."
                    .to_string(),
                date: date(2024, 1, 8),
                verified: true,
                helpful: 8,
                category: ReviewCategory::Clinic,
                target_id: 1,
                target_name: "Al-Nour Hospital".to_string(),
            },
            Review {
                id: 3,
                patient_name: "Mohamed Hassan".to_string(),
                rating: 5,
                comment: "Accurate tests with quick results. Prices are reasonable and the \
                          service is excellent."
                    .to_string(),
                date: date(2024, 1, 5),
                verified: true,
                helpful: 15,
                category: ReviewCategory::Lab,
                target_id: 1,
                target_name: "Alpha Lab".to_string(),
            },
        ])
    }

    /// Filter the feed by category and exact star rating, preserving seed
    /// order.
    pub fn filtered(&self, category: Option<ReviewCategory>, rating: Option<u8>) -> Vec<Review> {
        self.reviews
            .iter()
            .filter(|review| category.map_or(true, |c| review.category == c))
            .filter(|review| rating.map_or(true, |r| review.rating == r))
            .cloned()
            .collect()
    }

    /// A submission needs a nonzero star rating and a comment of at least
    /// `MIN_COMMENT_LEN` characters. Category sub-ratings are not checked.
    pub fn validate(&self, request: &SubmitReviewRequest) -> Result<(), ReviewError> {
        if request.rating == 0 {
            return Err(ReviewError::RatingRequired);
        }
        if request.rating > 5 {
            return Err(ReviewError::RatingOutOfRange);
        }
        if request.comment.trim().chars().count() < MIN_COMMENT_LEN {
            return Err(ReviewError::CommentTooShort(MIN_COMMENT_LEN));
        }
        Ok(())
    }

    /// Accept a valid submission. Produces the success outcome only; the
    /// review is not added to the feed and no aggregate is recomputed.
    pub fn submit(&self, request: &SubmitReviewRequest) -> Result<(), ReviewError> {
        self.validate(request)?;
        info!(
            "Review accepted for {:?} {} with rating {}",
            request.category, request.target_id, request.rating
        );
        Ok(())
    }

    /// Static sample aggregates.
    pub fn stats(&self) -> RatingStats {
        RatingStats {
            overall: 4.7,
            total_reviews: 234,
            distribution: vec![(5, 156), (4, 45), (3, 20), (2, 8), (1, 5)],
            categories: CategoryAverages {
                quality: 4.8,
                waiting: 4.2,
                staff: 4.6,
                cleanliness: 4.9,
                value: 4.4,
            },
        }
    }
}

impl Default for ReviewService {
    fn default() -> Self {
        Self::with_seed_reviews()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request(rating: u8, comment: &str) -> SubmitReviewRequest {
        SubmitReviewRequest {
            rating,
            comment: comment.to_string(),
            category: ReviewCategory::Doctor,
            target_id: 1,
            categories: None,
        }
    }

    #[test]
    fn zero_rating_is_rejected() {
        let service = ReviewService::with_seed_reviews();
        assert_matches!(
            service.submit(&request(0, "Great doctor, very helpful.")),
            Err(ReviewError::RatingRequired)
        );
    }

    #[test]
    fn short_comments_are_rejected() {
        let service = ReviewService::with_seed_reviews();
        assert_matches!(
            service.submit(&request(4, "Nice")),
            Err(ReviewError::CommentTooShort(10))
        );
        // Whitespace does not count toward the minimum.
        assert_matches!(
            service.submit(&request(4, "   Nice   ")),
            Err(ReviewError::CommentTooShort(10))
        );
    }

    #[test]
    fn a_five_star_review_with_a_real_comment_is_accepted() {
        let service = ReviewService::with_seed_reviews();
        assert!(service
            .submit(&request(5, "Great doctor, very helpful."))
            .is_ok());
    }

    #[test]
    fn ratings_above_five_stars_are_rejected() {
        let service = ReviewService::with_seed_reviews();
        assert_matches!(
            service.submit(&request(6, "Great doctor, very helpful.")),
            Err(ReviewError::RatingOutOfRange)
        );
    }

    #[test]
    fn filter_by_category_and_rating_preserves_order() {
        let service = ReviewService::with_seed_reviews();

        let doctors = service.filtered(Some(ReviewCategory::Doctor), None);
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].id, 1);

        let five_star = service.filtered(None, Some(5));
        assert_eq!(
            five_star.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 3]
        );

        assert_eq!(service.filtered(None, None).len(), 3);
    }

    #[test]
    fn submissions_do_not_change_the_feed_or_stats() {
        let service = ReviewService::with_seed_reviews();
        let before = service.filtered(None, None).len();
        let stats_before = service.stats().total_reviews;

        service
            .submit(&request(5, "Great doctor, very helpful."))
            .unwrap();

        assert_eq!(service.filtered(None, None).len(), before);
        assert_eq!(service.stats().total_reviews, stats_before);
    }
}
