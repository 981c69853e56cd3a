use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::{Project, ProjectStatus, Review, User};

/// Errors that can occur when loading or querying a directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Source of user records
pub trait UserDirectory: Send + Sync {
    fn all_users(&self) -> Vec<User>;

    fn user_count(&self) -> usize {
        self.all_users().len()
    }

    /// Every user except the one with `user_id`
    fn all_users_except(&self, user_id: u64) -> Vec<User> {
        self.all_users()
            .into_iter()
            .filter(|u| u.id != Some(user_id))
            .collect()
    }

    fn get_user(&self, user_id: u64) -> Result<User, DirectoryError> {
        self.all_users()
            .into_iter()
            .find(|u| u.id == Some(user_id))
            .ok_or_else(|| DirectoryError::NotFound(format!("user {}", user_id)))
    }
}

/// Source of project records
pub trait ProjectDirectory: Send + Sync {
    fn all_projects(&self) -> Vec<Project>;

    fn project_count(&self) -> usize {
        self.all_projects().len()
    }

    fn projects_with_status(&self, status: ProjectStatus) -> Vec<Project> {
        self.all_projects()
            .into_iter()
            .filter(|p| p.status == status)
            .collect()
    }

    fn get_project(&self, project_id: u64) -> Result<Project, DirectoryError> {
        self.all_projects()
            .into_iter()
            .find(|p| p.id == Some(project_id))
            .ok_or_else(|| DirectoryError::NotFound(format!("project {}", project_id)))
    }
}

/// Source of review records
pub trait ReviewDirectory: Send + Sync {
    fn all_reviews(&self) -> Vec<Review>;
}

/// All three directories behind one handle
pub trait Directory: UserDirectory + ProjectDirectory + ReviewDirectory {}

impl<T: UserDirectory + ProjectDirectory + ReviewDirectory> Directory for T {}

/// Immutable snapshot of every directory, as read from disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// In-memory directory backed by a [`Snapshot`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    snapshot: Snapshot,
}

impl InMemoryDirectory {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load a JSON snapshot file
    pub async fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let snapshot: Snapshot = serde_json::from_str(&contents)?;

        tracing::info!(
            "Loaded snapshot from {}: {} users, {} projects, {} reviews",
            path.display(),
            snapshot.users.len(),
            snapshot.projects.len(),
            snapshot.reviews.len()
        );

        Ok(Self::new(snapshot))
    }
}

impl UserDirectory for InMemoryDirectory {
    fn all_users(&self) -> Vec<User> {
        self.snapshot.users.clone()
    }

    fn user_count(&self) -> usize {
        self.snapshot.users.len()
    }

    fn all_users_except(&self, user_id: u64) -> Vec<User> {
        self.snapshot
            .users
            .iter()
            .filter(|u| u.id != Some(user_id))
            .cloned()
            .collect()
    }

    fn get_user(&self, user_id: u64) -> Result<User, DirectoryError> {
        self.snapshot
            .users
            .iter()
            .find(|u| u.id == Some(user_id))
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(format!("user {}", user_id)))
    }
}

impl ProjectDirectory for InMemoryDirectory {
    fn all_projects(&self) -> Vec<Project> {
        self.snapshot.projects.clone()
    }

    fn project_count(&self) -> usize {
        self.snapshot.projects.len()
    }

    fn projects_with_status(&self, status: ProjectStatus) -> Vec<Project> {
        self.snapshot
            .projects
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }
}

impl ReviewDirectory for InMemoryDirectory {
    fn all_reviews(&self) -> Vec<Review> {
        self.snapshot.reviews.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "users": [
            {"id": 1, "username": "alex", "skills": "Python, React"},
            {"id": 2, "username": "sam", "skills": "Marketing"}
        ],
        "projects": [
            {"id": 10, "title": "Tracker", "creatorId": 1, "requiredSkills": "Python", "status": "active"},
            {"id": 11, "title": "Archive", "creatorId": 2, "status": "completed"}
        ],
        "reviews": [
            {"reviewerId": 2, "revieweeId": 1, "projectId": 11, "rating": 5.0}
        ]
    }"#;

    #[tokio::test]
    async fn test_load_snapshot_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let directory = InMemoryDirectory::from_json_file(file.path()).await.unwrap();
        assert_eq!(directory.user_count(), 2);
        assert_eq!(directory.project_count(), 2);
        assert_eq!(directory.all_reviews().len(), 1);
    }

    #[test]
    fn test_directory_queries() {
        let snapshot: Snapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let directory = InMemoryDirectory::new(snapshot);

        let others = directory.all_users_except(1);
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].id, Some(2));

        let active = directory.projects_with_status(ProjectStatus::Active);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, Some(10));

        assert!(directory.get_user(2).is_ok());
        assert_eq!(directory.user_count(), 2);
        assert!(matches!(directory.get_user(42), Err(DirectoryError::NotFound(_))));
        assert!(matches!(directory.get_project(99), Err(DirectoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = InMemoryDirectory::from_json_file("/nonexistent/snapshot.json").await;
        assert!(matches!(result, Err(DirectoryError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let result = InMemoryDirectory::from_json_file(file.path()).await;
        assert!(matches!(result, Err(DirectoryError::Parse(_))));
    }
}
