// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{User, Project, ProjectStatus, Review, EntityKind, SkillBearer, ScoredProject, Recommendations};
pub use requests::{ListProjectsQuery, ProjectSort, UserQuery, PeerMatchesQuery, SearchQuery, SearchScope};
pub use responses::{ListProjectsResponse, ProjectMatchResponse, PeerMatchesResponse, RecommendationsResponse, ReputationResponse, SearchResponse, HealthResponse, ErrorResponse};
