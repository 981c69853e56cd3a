use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ProjectStatus;

/// Query for listing projects
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ListProjectsQuery {
    #[validate(range(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Option<u64>,
    #[validate(length(max = 200))]
    pub search: Option<String>,
    #[validate(length(max = 100))]
    pub tag: Option<String>,
    #[validate(length(max = 100))]
    pub skill: Option<String>,
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub sort: ProjectSort,
}

/// Ordering for project listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSort {
    #[default]
    Newest,
    Oldest,
    /// Descending match score for the requesting user
    Match,
    /// Active projects only, newest first
    Active,
    /// Completed projects only, newest first
    Completed,
}

impl ProjectSort {
    /// Status filter carried by the status shortcuts
    pub fn implied_status(self) -> Option<ProjectStatus> {
        match self {
            ProjectSort::Active => Some(ProjectStatus::Active),
            ProjectSort::Completed => Some(ProjectStatus::Completed),
            ProjectSort::Newest | ProjectSort::Oldest | ProjectSort::Match => None,
        }
    }
}

/// Query identifying the requesting user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserQuery {
    #[validate(range(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: u64,
}

/// Query for peer matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PeerMatchesQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

/// Query for the directory search
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(max = 200))]
    pub q: Option<String>,
    #[validate(length(max = 100))]
    pub major: Option<String>,
    #[serde(rename = "type", default)]
    pub scope: SearchScope,
}

/// Which directories a search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    #[default]
    All,
    Users,
    Projects,
}

impl SearchScope {
    pub fn includes_users(self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Users)
    }

    pub fn includes_projects(self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Projects)
    }
}
