use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Student account as supplied by the user directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub major: String,
    /// Comma-separated free-text skills
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "experiencePoints", default)]
    pub experience_points: u32,
    #[serde(rename = "averageRating", default)]
    pub average_rating: f64,
}

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Collaborative project as supplied by the project directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Comma-separated free-text required skills
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(rename = "creatorId")]
    pub creator_id: u64,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Comma-separated user ids
    #[serde(default)]
    pub collaborators: Option<String>,
    #[serde(rename = "maxCollaborators", default = "default_max_collaborators")]
    pub max_collaborators: u32,
}

fn default_max_collaborators() -> u32 { 5 }

/// Peer review left on a completed project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "reviewerId")]
    pub reviewer_id: u64,
    #[serde(rename = "revieweeId")]
    pub reviewee_id: u64,
    #[serde(rename = "projectId")]
    pub project_id: u64,
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "feedbackTags", default)]
    pub feedback_tags: Option<String>,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Which directory an entity came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Project,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => f.write_str("user"),
            EntityKind::Project => f.write_str("project"),
        }
    }
}

/// A record the engine can match on: an identity plus a raw skill list
pub trait SkillBearer {
    const KIND: EntityKind;

    fn id(&self) -> Option<u64>;

    fn raw_skills(&self) -> Option<&str>;
}

impl SkillBearer for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn raw_skills(&self) -> Option<&str> {
        self.skills.as_deref()
    }
}

impl SkillBearer for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn raw_skills(&self) -> Option<&str> {
        self.required_skills.as_deref()
    }
}

/// A project paired with its match score for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProject {
    pub project: Project,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
}

/// Top projects and peers suggested for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub projects: Vec<Project>,
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_defaults_from_json() {
        let project: Project = serde_json::from_str(
            r#"{"id": 1, "title": "Campus App", "creatorId": 2}"#,
        )
        .unwrap();

        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.max_collaborators, 5);
        assert!(project.required_skills.is_none());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ProjectStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        assert_eq!(ProjectStatus::Cancelled.to_string(), "cancelled");
    }
}
