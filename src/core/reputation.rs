use crate::models::{Project, ProjectStatus, Review};

/// Experience awarded per completed project the user created
pub const POINTS_PER_COMPLETED_PROJECT: u32 = 20;
/// Experience awarded per positive review received
pub const POINTS_PER_POSITIVE_REVIEW: u32 = 5;
/// Ratings at or above this count as positive
pub const POSITIVE_RATING_THRESHOLD: f64 = 4.0;

/// Experience points and rating derived from a user's history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reputation {
    pub experience_points: u32,
    pub average_rating: f64,
    pub review_count: usize,
}

impl Reputation {
    /// Compute reputation for `user_id` from directory snapshots
    pub fn for_user(user_id: u64, projects: &[Project], reviews: &[Review]) -> Self {
        let completed = projects
            .iter()
            .filter(|p| p.creator_id == user_id && p.status == ProjectStatus::Completed)
            .count();

        let ratings: Vec<f64> = reviews
            .iter()
            .filter(|r| r.reviewee_id == user_id)
            .map(|r| r.rating)
            .collect();

        Self {
            experience_points: experience_points(completed, &ratings),
            average_rating: average_rating(&ratings),
            review_count: ratings.len(),
        }
    }
}

/// completed * 20 + positive reviews * 5
pub fn experience_points(completed_projects: usize, ratings: &[f64]) -> u32 {
    let positive = ratings
        .iter()
        .filter(|&&rating| rating >= POSITIVE_RATING_THRESHOLD)
        .count();

    let completed_points = saturating_u32(completed_projects).saturating_mul(POINTS_PER_COMPLETED_PROJECT);
    let review_points = saturating_u32(positive).saturating_mul(POINTS_PER_POSITIVE_REVIEW);

    completed_points.saturating_add(review_points)
}

#[inline]
fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Mean rating, or 0.0 when there are no reviews
pub fn average_rating(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}
