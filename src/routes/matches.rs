use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{
    matches_project_query, matches_project_search, matches_user_search, sort_by_recency,
    unique_facets, DirectorySearch, MatchError, Matcher, ProjectQuery, Reputation, SkillSet,
};
use crate::models::{
    ErrorResponse, HealthResponse, ListProjectsQuery, ListProjectsResponse, PeerMatchesQuery,
    PeerMatchesResponse, Project, ProjectMatchResponse, ProjectSort, ProjectStatus,
    RecommendationsResponse, ReputationResponse, ScoredProject, SearchQuery, SearchResponse,
    UserQuery,
};
use crate::services::{Directory, DirectoryError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn Directory>,
    pub matcher: Matcher,
    pub max_peer_matches: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/facets", web::get().to(get_facets))
        .route("/search", web::get().to(search))
        .route("/projects", web::get().to(list_projects))
        .route("/projects/{project_id}/match", web::get().to(project_match))
        .route("/users/{user_id}/matches", web::get().to(peer_matches))
        .route("/users/{user_id}/recommendations", web::get().to(recommendations))
        .route("/users/{user_id}/reputation", web::get().to(reputation));
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn directory_error(err: DirectoryError) -> HttpResponse {
    match err {
        DirectoryError::NotFound(what) => {
            error_response(StatusCode::NOT_FOUND, "Not found", format!("{} does not exist", what))
        }
        other => {
            tracing::error!("Directory failure: {}", other);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Directory error", other.to_string())
        }
    }
}

fn match_error(err: MatchError) -> HttpResponse {
    tracing::error!("Directory returned an invalid record: {}", err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Invalid directory record", err.to_string())
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        users: state.directory.user_count(),
        projects: state.directory.project_count(),
    })
}

/// Distinct tags and skills across all projects
///
/// GET /api/v1/facets
async fn get_facets(state: web::Data<AppState>) -> impl Responder {
    let projects = state.directory.all_projects();
    HttpResponse::Ok().json(unique_facets(&projects))
}

/// Search users and projects by free text and major
///
/// GET /api/v1/search?q=&major=&type=all|users|projects
async fn search(state: web::Data<AppState>, query: web::Query<SearchQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let filter = DirectorySearch {
        text: query.q.clone(),
        major: query.major.clone(),
    };
    let all_users = state.directory.all_users();

    let users: Vec<_> = if query.scope.includes_users() {
        all_users
            .iter()
            .filter(|u| matches_user_search(u, &filter))
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    let projects: Vec<_> = if query.scope.includes_projects() {
        state
            .directory
            .all_projects()
            .into_iter()
            .filter(|p| {
                let creator_major = all_users
                    .iter()
                    .find(|u| u.id == Some(p.creator_id))
                    .map(|u| u.major.as_str());
                matches_project_search(p, creator_major, &filter)
            })
            .collect()
    } else {
        Vec::new()
    };

    tracing::debug!(
        "Search returned {} users and {} projects (scope: {:?})",
        users.len(),
        projects.len(),
        query.scope
    );

    HttpResponse::Ok().json(SearchResponse { users, projects })
}

/// List projects
///
/// GET /api/v1/projects?userId=&search=&tag=&skill=&status=&sort=newest|oldest|match|active|completed
///
/// With a `userId` every project carries that user's match score;
/// `sort=match` requires one. `sort=active|completed` filter by status
/// unless `status` is given explicitly.
async fn list_projects(
    state: web::Data<AppState>,
    query: web::Query<ListProjectsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let user_skills = match query.user_id {
        Some(user_id) => match state.directory.get_user(user_id) {
            Ok(user) => Some(state.matcher.skills_of(&user)),
            Err(e) => return directory_error(e),
        },
        None if query.sort == ProjectSort::Match => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing userId parameter",
                "sort=match requires a userId".to_string(),
            );
        }
        None => None,
    };

    let filter = ProjectQuery {
        search: query.search.clone(),
        tag: query.tag.clone(),
        skill: query.skill.clone(),
        status: query.status.or(query.sort.implied_status()),
    };

    let mut projects: Vec<_> = state
        .directory
        .all_projects()
        .into_iter()
        .filter(|p| matches_project_query(p, &filter))
        .collect();
    sort_by_recency(&mut projects, query.sort);

    let scored: Vec<ScoredProject> = match (&user_skills, query.sort) {
        (Some(skills), ProjectSort::Match) => state.matcher.rank_projects(skills, projects),
        (Some(skills), _) => score_in_place(&state.matcher, skills, projects),
        (None, _) => projects
            .into_iter()
            .map(|project| ScoredProject { project, match_score: 0 })
            .collect(),
    };

    tracing::debug!("Listing {} projects (sort: {:?})", scored.len(), query.sort);

    HttpResponse::Ok().json(ListProjectsResponse {
        total_results: scored.len(),
        projects: scored,
    })
}

fn score_in_place(matcher: &Matcher, skills: &SkillSet, projects: Vec<Project>) -> Vec<ScoredProject> {
    projects
        .into_iter()
        .map(|project| ScoredProject {
            match_score: matcher.score_project(skills, &project),
            project,
        })
        .collect()
}

/// Match score of one project for a user
///
/// GET /api/v1/projects/{project_id}/match?userId={userId}
async fn project_match(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }
    let project_id = path.into_inner();

    let project = match state.directory.get_project(project_id) {
        Ok(project) => project,
        Err(e) => return directory_error(e),
    };
    let user = match state.directory.get_user(query.user_id) {
        Ok(user) => user,
        Err(e) => return directory_error(e),
    };

    let user_skills = state.matcher.skills_of(&user);
    let match_score = state.matcher.score_project(&user_skills, &project);

    HttpResponse::Ok().json(ProjectMatchResponse {
        project_id,
        user_id: query.user_id,
        match_score,
    })
}

/// Peers sharing skills with a user, most shared skills first
///
/// GET /api/v1/users/{user_id}/matches?limit={limit}
async fn peer_matches(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    query: web::Query<PeerMatchesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }
    let user_id = path.into_inner();
    let limit = query.limit.unwrap_or(state.max_peer_matches).min(state.max_peer_matches);

    let user = match state.directory.get_user(user_id) {
        Ok(user) => user,
        Err(e) => return directory_error(e),
    };

    let user_skills = state.matcher.skills_of(&user);
    let candidates = state.directory.all_users_except(user_id);
    let total_candidates = candidates.len();

    let mut matches = match state.matcher.find_matching_users(user_id, &user_skills, candidates) {
        Ok(matches) => matches,
        Err(e) => return match_error(e),
    };
    matches.truncate(limit);

    tracing::info!(
        "Returning {} peer matches for user {} (from {} candidates)",
        matches.len(),
        user_id,
        total_candidates
    );

    HttpResponse::Ok().json(PeerMatchesResponse { user_id, matches })
}

/// Top projects and peers for a user
///
/// GET /api/v1/users/{user_id}/recommendations
async fn recommendations(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    let user_id = path.into_inner();

    let user = match state.directory.get_user(user_id) {
        Ok(user) => user,
        Err(e) => return directory_error(e),
    };

    let active = state.directory.projects_with_status(ProjectStatus::Active);
    let others = state.directory.all_users_except(user_id);

    match state.matcher.recommend(&user, active, others) {
        Ok(recs) => HttpResponse::Ok().json(RecommendationsResponse {
            projects: recs.projects,
            users: recs.users,
        }),
        Err(e) => match_error(e),
    }
}

/// Experience points and average rating for a user
///
/// GET /api/v1/users/{user_id}/reputation
async fn reputation(state: web::Data<AppState>, path: web::Path<u64>) -> impl Responder {
    let user_id = path.into_inner();

    if let Err(e) = state.directory.get_user(user_id) {
        return directory_error(e);
    }

    let rep = Reputation::for_user(
        user_id,
        &state.directory.all_projects(),
        &state.directory.all_reviews(),
    );

    HttpResponse::Ok().json(ReputationResponse {
        user_id,
        experience_points: rep.experience_points,
        average_rating: rep.average_rating,
        review_count: rep.review_count,
    })
}
