use serde::{Deserialize, Serialize};

use crate::models::domain::{Project, ScoredProject, User};

/// Response for the project listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProjectsResponse {
    pub projects: Vec<ScoredProject>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Match score of one project for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMatchResponse {
    #[serde(rename = "projectId")]
    pub project_id: u64,
    #[serde(rename = "userId")]
    pub user_id: u64,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
}

/// Peers sharing skills with a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerMatchesResponse {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub matches: Vec<User>,
}

/// Recommendation endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub projects: Vec<Project>,
    pub users: Vec<User>,
}

/// Directory search results; a scope left out of the search stays empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
}

/// Derived reputation for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationResponse {
    #[serde(rename = "userId")]
    pub user_id: u64,
    #[serde(rename = "experiencePoints")]
    pub experience_points: u32,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub users: usize,
    pub projects: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
