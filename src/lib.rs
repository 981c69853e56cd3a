//! SkillBridge Match - skill matching and recommendations for student projects
//!
//! This library turns free-text, comma-separated skill lists into normalized
//! skill sets and uses them to score and rank projects and to suggest peers.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{normalize, score_project, Matcher, MatchError, SkillNormalizer, SkillSet};
pub use models::{User, Project, ProjectStatus, Review, ScoredProject, Recommendations};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let skills = normalize(Some("Rust, Go"));
        assert_eq!(score_project(&SkillNormalizer::new(), &skills, Some("rust")), 100);
    }
}
