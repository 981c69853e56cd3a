use std::sync::Arc;
use thiserror::Error;

use crate::core::{
    filters::shares_skills,
    scoring::{score_project, score_skill_sets},
    skills::{SkillNormalizer, SkillSet},
};
use crate::models::{EntityKind, Project, Recommendations, ScoredProject, SkillBearer, User};
use crate::services::cache::{SkillCacheKey, SkillSetCache};

/// Default number of projects and peers in a recommendation
pub const DEFAULT_TOP_N: usize = 3;

/// Contract violations by the directories feeding the matcher
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("{kind} record has no identity")]
    MissingIdentity { kind: EntityKind },
}

/// Skill matching orchestrator
///
/// Exposes two distinct matching policies:
/// - percentage ranking ([`Matcher::rank_projects`]), every project scored and sorted
/// - boolean overlap ([`Matcher::matching_projects`], [`Matcher::find_matching_users`]),
///   candidates kept when they share at least one skill token
///
/// All operations are pure over the supplied snapshots. Sorting is stable,
/// so ties keep their input order.
#[derive(Debug, Clone)]
pub struct Matcher {
    normalizer: SkillNormalizer,
    cache: Option<Arc<SkillSetCache>>,
    top_n: usize,
}

impl Matcher {
    pub fn new(normalizer: SkillNormalizer) -> Self {
        Self {
            normalizer,
            cache: None,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_default_normalizer() -> Self {
        Self::new(SkillNormalizer::new())
    }

    /// Memoize normalized skill sets across calls
    pub fn with_cache(mut self, cache: Arc<SkillSetCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn normalizer(&self) -> &SkillNormalizer {
        &self.normalizer
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Normalized skills of a user or project, through the cache when present
    pub fn skills_of<T: SkillBearer>(&self, entity: &T) -> SkillSet {
        match (&self.cache, entity.id()) {
            (Some(cache), Some(id)) => {
                let key = SkillCacheKey::new(T::KIND, id);
                cache.get_or_normalize(key, entity.raw_skills(), &self.normalizer)
            }
            _ => self.normalizer.normalize(entity.raw_skills()),
        }
    }

    /// Match score of one project for a user's skills
    pub fn score_project(&self, user_skills: &SkillSet, project: &Project) -> u8 {
        match (&self.cache, project.id) {
            // Short-circuit before touching the cache when the raw list is empty
            (Some(_), Some(_)) if project.required_skills.as_deref().is_some_and(|s| !s.is_empty()) => {
                score_skill_sets(user_skills, &self.skills_of(project))
            }
            _ => score_project(&self.normalizer, user_skills, project.required_skills.as_deref()),
        }
    }

    /// Score every project and sort by descending match score
    ///
    /// Status filtering belongs to the caller. Equal scores keep input order.
    pub fn rank_projects(&self, user_skills: &SkillSet, projects: Vec<Project>) -> Vec<ScoredProject> {
        let mut scored: Vec<ScoredProject> = projects
            .into_iter()
            .map(|project| ScoredProject {
                match_score: self.score_project(user_skills, &project),
                project,
            })
            .collect();

        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        scored
    }

    /// Projects sharing at least one skill with the user, in input order
    pub fn matching_projects(&self, user_skills: &SkillSet, projects: Vec<Project>) -> Vec<Project> {
        projects
            .into_iter()
            .filter(|project| shares_skills(user_skills, &self.skills_of(project)))
            .collect()
    }

    /// Peers sharing at least one skill with the target, most shared skills first
    ///
    /// Candidates carrying `target_id` are skipped. Ties keep input order.
    /// The full ranked list is returned; truncation is up to the caller.
    pub fn find_matching_users(
        &self,
        target_id: u64,
        target_skills: &SkillSet,
        candidates: Vec<User>,
    ) -> Result<Vec<User>, MatchError> {
        let mut ranked: Vec<(usize, User)> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let candidate_id = candidate.id.ok_or(MatchError::MissingIdentity {
                kind: EntityKind::User,
            })?;
            if candidate_id == target_id {
                continue;
            }

            let shared = target_skills.overlap(&self.skills_of(&candidate));
            if shared > 0 {
                ranked.push((shared, candidate));
            }
        }

        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(ranked.into_iter().map(|(_, user)| user).collect())
    }

    /// Assemble the top projects and peers for a user
    ///
    /// Projects use the boolean overlap filter and keep input order; peers are
    /// ranked by shared skill count. Both lists are cut to `top_n`.
    pub fn recommend(
        &self,
        user: &User,
        active_projects: Vec<Project>,
        other_users: Vec<User>,
    ) -> Result<Recommendations, MatchError> {
        let user_id = user.id.ok_or(MatchError::MissingIdentity {
            kind: EntityKind::User,
        })?;
        let user_skills = self.skills_of(user);

        let mut projects = self.matching_projects(&user_skills, active_projects);
        projects.truncate(self.top_n);

        let mut users = self.find_matching_users(user_id, &user_skills, other_users)?;
        users.truncate(self.top_n);

        tracing::debug!(
            "Recommending {} projects and {} users for user {}",
            projects.len(),
            users.len(),
            user_id
        );

        Ok(Recommendations { projects, users })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_normalizer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skills::normalize;
    use crate::models::ProjectStatus;
    use chrono::Utc;

    fn create_user(id: u64, skills: &str) -> User {
        User {
            id: Some(id),
            username: format!("user{}", id),
            email: format!("user{}@example.edu", id),
            major: "Computer Science".to_string(),
            skills: Some(skills.to_string()),
            interests: None,
            bio: None,
            experience_points: 0,
            average_rating: 0.0,
        }
    }

    fn create_project(id: u64, skills: &str) -> Project {
        Project {
            id: Some(id),
            title: format!("Project {}", id),
            description: String::new(),
            required_skills: Some(skills.to_string()),
            tags: None,
            creator_id: 1,
            created_at: Utc::now(),
            status: ProjectStatus::Active,
            collaborators: None,
            max_collaborators: 5,
        }
    }

    fn ids<T: SkillBearer>(items: &[T]) -> Vec<u64> {
        items.iter().filter_map(SkillBearer::id).collect()
    }

    #[test]
    fn test_rank_projects_by_score() {
        let matcher = Matcher::default();
        let skills = normalize(Some("UI Design, React Native, Python"));

        let ranked = matcher.rank_projects(
            &skills,
            vec![
                create_project(2, "Marketing, Leadership"),
                create_project(1, "UI Design, React Native, Python, Data Analysis"),
            ],
        );

        assert_eq!(ranked[0].project.id, Some(1));
        assert_eq!(ranked[0].match_score, 75);
        assert_eq!(ranked[1].match_score, 0);
    }

    #[test]
    fn test_rank_projects_stable_on_ties() {
        let matcher = Matcher::default();
        let skills = normalize(Some("python"));

        let ranked = matcher.rank_projects(
            &skills,
            vec![
                create_project(1, "Go"),
                create_project(2, "Python, Go"),
                create_project(3, "Rust"),
                create_project(4, "python, rust"),
            ],
        );

        let order: Vec<_> = ranked.iter().filter_map(|s| s.project.id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_matching_projects_keep_input_order() {
        let matcher = Matcher::default();
        let skills = normalize(Some("python, sql"));

        let matched = matcher.matching_projects(
            &skills,
            vec![
                create_project(1, "Python, Go, Rust, C"),
                create_project(2, "Marketing"),
                create_project(3, "SQL, Python"),
            ],
        );

        assert_eq!(ids(&matched), vec![1, 3]);
    }

    #[test]
    fn test_find_matching_users_excludes_self_and_non_overlap() {
        let matcher = Matcher::default();
        let target = create_user(1, "Python, React, SQL");

        let matches = matcher
            .find_matching_users(
                1,
                &normalize(target.skills.as_deref()),
                vec![
                    target.clone(),
                    create_user(2, "Python"),
                    create_user(3, "Marketing"),
                    create_user(4, "python, react"),
                    create_user(5, ""),
                ],
            )
            .unwrap();

        assert_eq!(ids(&matches), vec![4, 2]);
    }

    #[test]
    fn test_find_matching_users_missing_identity() {
        let matcher = Matcher::default();
        let mut anonymous = create_user(2, "Python");
        anonymous.id = None;

        let result = matcher.find_matching_users(1, &normalize(Some("python")), vec![anonymous]);
        assert_eq!(result, Err(MatchError::MissingIdentity { kind: EntityKind::User }));
    }

    #[test]
    fn test_recommend_truncates_to_top_n() {
        let matcher = Matcher::default();
        let user = create_user(1, "Python, UI Design");

        let projects = (1..=5).map(|id| create_project(id, "UI Design")).collect();
        let users = (2..=6)
            .map(|id| create_user(id, if id % 2 == 0 { "Python" } else { "python, ui design" }))
            .collect();

        let recs = matcher.recommend(&user, projects, users).unwrap();

        assert_eq!(ids(&recs.projects), vec![1, 2, 3]);
        assert_eq!(ids(&recs.users), vec![3, 5, 2]);
    }

    #[test]
    fn test_recommend_requires_user_identity() {
        let matcher = Matcher::default();
        let mut user = create_user(1, "Python");
        user.id = None;

        let result = matcher.recommend(&user, vec![create_project(1, "Python")], vec![create_user(2, "Python")]);
        assert!(matches!(result, Err(MatchError::MissingIdentity { kind: EntityKind::User })));
    }

    #[test]
    fn test_cache_does_not_change_results() {
        let plain = Matcher::default();
        let cached = Matcher::default().with_cache(Arc::new(SkillSetCache::new(16)));
        let skills = normalize(Some("python, react"));

        let projects = vec![
            create_project(1, "React"),
            create_project(2, "Python, React"),
            create_project(3, ""),
        ];

        let a: Vec<_> = plain.rank_projects(&skills, projects.clone()).iter().map(|s| (s.project.id, s.match_score)).collect();
        let b: Vec<_> = cached.rank_projects(&skills, projects.clone()).iter().map(|s| (s.project.id, s.match_score)).collect();
        let c: Vec<_> = cached.rank_projects(&skills, projects).iter().map(|s| (s.project.id, s.match_score)).collect();

        assert_eq!(a, b);
        assert_eq!(b, c);
    }
}
