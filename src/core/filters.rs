use std::collections::BTreeSet;

use crate::core::skills::SkillSet;
use crate::models::{Project, ProjectSort, ProjectStatus, User};

/// Check whether a candidate shares at least one skill token with the target
///
/// This is the coarse boolean filter used for peer matching and
/// recommendations, not a threshold on the match score.
#[inline]
pub fn shares_skills(target: &SkillSet, candidate: &SkillSet) -> bool {
    target.shares_any(candidate)
}

/// Caller-side project constraints, applied before scoring
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    /// Case-insensitive substring of the raw tag list
    pub tag: Option<String>,
    /// Case-insensitive substring of the raw required skill list
    pub skill: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectQuery {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Check if a project satisfies the listing constraints
#[inline]
pub fn matches_project_query(project: &Project, query: &ProjectQuery) -> bool {
    if let Some(status) = query.status {
        if project.status != status {
            return false;
        }
    }

    if let Some(search) = non_blank(&query.search) {
        if !contains_ignore_case(&project.title, search)
            && !contains_ignore_case(&project.description, search)
        {
            return false;
        }
    }

    if let Some(tag) = non_blank(&query.tag) {
        if !project.tags.as_deref().is_some_and(|tags| contains_ignore_case(tags, tag)) {
            return false;
        }
    }

    if let Some(skill) = non_blank(&query.skill) {
        if !project
            .required_skills
            .as_deref()
            .is_some_and(|skills| contains_ignore_case(skills, skill))
        {
            return false;
        }
    }

    true
}

/// Free-text directory search over users and projects
#[derive(Debug, Clone, Default)]
pub struct DirectorySearch {
    /// Case-insensitive substring of skills, names or descriptions
    pub text: Option<String>,
    /// Exact major; projects match on their creator's major
    pub major: Option<String>,
}

/// Check if a user matches a directory search
///
/// Text is looked up in skills, username and bio.
pub fn matches_user_search(user: &User, search: &DirectorySearch) -> bool {
    if let Some(major) = non_blank(&search.major) {
        if user.major != major {
            return false;
        }
    }

    match non_blank(&search.text) {
        Some(text) => {
            user.skills.as_deref().is_some_and(|skills| contains_ignore_case(skills, text))
                || contains_ignore_case(&user.username, text)
                || user.bio.as_deref().is_some_and(|bio| contains_ignore_case(bio, text))
        }
        None => true,
    }
}

/// Check if a project matches a directory search
///
/// Text is looked up in required skills, title and description. A major
/// constraint needs the creator's major; an unknown creator never matches it.
pub fn matches_project_search(project: &Project, creator_major: Option<&str>, search: &DirectorySearch) -> bool {
    if let Some(major) = non_blank(&search.major) {
        if creator_major != Some(major) {
            return false;
        }
    }

    match non_blank(&search.text) {
        Some(text) => {
            project
                .required_skills
                .as_deref()
                .is_some_and(|skills| contains_ignore_case(skills, text))
                || contains_ignore_case(&project.title, text)
                || contains_ignore_case(&project.description, text)
        }
        None => true,
    }
}

/// Order projects by creation time for the non-score sort modes
///
/// `ProjectSort::Match` is handled by the matcher and leaves the order untouched here.
/// The status shortcuts order newest first.
pub fn sort_by_recency(projects: &mut [Project], sort: ProjectSort) {
    match sort {
        ProjectSort::Newest | ProjectSort::Active | ProjectSort::Completed => {
            projects.sort_by(|a, b| b.created_at.cmp(&a.created_at))
        }
        ProjectSort::Oldest => projects.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        ProjectSort::Match => {}
    }
}

/// Distinct tags and skills across a set of projects, for filter dropdowns
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Facets {
    pub tags: Vec<String>,
    pub skills: Vec<String>,
}

/// Collect sorted, de-duplicated tag and skill facets
///
/// Tokens are trimmed but keep their case; blank tokens are skipped.
pub fn unique_facets<'a, I>(projects: I) -> Facets
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut tags = BTreeSet::new();
    let mut skills = BTreeSet::new();

    for project in projects {
        collect_tokens(project.tags.as_deref(), &mut tags);
        collect_tokens(project.required_skills.as_deref(), &mut skills);
    }

    Facets {
        tags: tags.into_iter().collect(),
        skills: skills.into_iter().collect(),
    }
}

fn collect_tokens(raw: Option<&str>, out: &mut BTreeSet<String>) {
    let Some(raw) = raw else { return };
    out.extend(
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string),
    );
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[inline]
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
