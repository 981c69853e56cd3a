// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod reputation;
pub mod scoring;
pub mod skills;

pub use filters::{
    shares_skills, matches_project_query, matches_project_search, matches_user_search, sort_by_recency,
    unique_facets, DirectorySearch, Facets, ProjectQuery,
};
pub use matcher::{Matcher, MatchError, DEFAULT_TOP_N};
pub use reputation::{experience_points, average_rating, Reputation};
pub use scoring::{score_project, score_skill_sets};
pub use skills::{normalize, Canonicalize, ExactMatch, SkillNormalizer, SkillSet, SynonymTable};
