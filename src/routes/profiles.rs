use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    BootstrapRequest, ErrorResponse, HealthResponse, InsightsResponse, ProfileResponse,
    RankCandidatesRequest, RankCandidatesResponse, RecordSwipeRequest, RecordSwipeResponse,
    ScoreRequest, ScoreResponse, SwipeAction,
};
use crate::services::{ProfileSession, ProfileStore, StoreError};
use crate::core::PreferenceEngine;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStore>,
    pub engine: PreferenceEngine,
    pub limits: RankLimits,
}

/// Bounds applied to ranking requests
#[derive(Debug, Clone, Copy)]
pub struct RankLimits {
    pub default_limit: u16,
    pub max_limit: u16,
}

impl Default for RankLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

/// Configure all profile-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/profiles/{user_id}", web::get().to(get_profile))
        .route("/profiles/{user_id}", web::delete().to(delete_profile))
        .route("/profiles/{user_id}/swipes", web::post().to(record_swipe))
        .route("/profiles/{user_id}/bootstrap", web::post().to(bootstrap_profile))
        .route("/profiles/{user_id}/score", web::post().to(score_candidate))
        .route("/profiles/{user_id}/rank", web::post().to(rank_candidates))
        .route("/profiles/{user_id}/insights", web::get().to(get_insights));
}

fn profile_response(user_id: &str, session: ProfileSession) -> ProfileResponse {
    ProfileResponse {
        user_id: user_id.to_string(),
        profile: session.profile,
        swipe_count: session.swipe_count,
        updated_at: session.updated_at,
    }
}

fn not_found(err: StoreError) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Profile not found".to_string(),
        message: err.to_string(),
        status_code: 404,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let stats = state.store.stats().await;

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        active_sessions: stats.active_sessions,
    })
}

/// Get the current profile session
///
/// GET /api/v1/profiles/{userId}
async fn get_profile(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    match state.store.get(&user_id).await {
        Ok(session) => HttpResponse::Ok().json(profile_response(&user_id, session)),
        Err(e) => not_found(e),
    }
}

/// Drop a profile session
///
/// DELETE /api/v1/profiles/{userId}
async fn delete_profile(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    match state.store.remove(&user_id).await {
        Ok(()) => {
            tracing::info!("Discarded profile session for user: {}", user_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => not_found(e),
    }
}

/// Record swipe endpoint
///
/// POST /api/v1/profiles/{userId}/swipes
///
/// Request body:
/// ```json
/// {
///   "candidate": { "cleanliness": 8, "smoking": false, "sleepSchedule": "early bird" },
///   "action": "like|dislike"
/// }
/// ```
async fn record_swipe(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<RecordSwipeRequest>,
) -> impl Responder {
    let user_id = path.into_inner();

    let action = match req.action.parse::<SwipeAction>() {
        Ok(action) => action,
        Err(_) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid swipe action".to_string(),
                message: "Action must be one of: like, dislike".to_string(),
                status_code: 400,
            });
        }
    };

    let outcome = state.store.record_swipe(&user_id, &req.candidate, action).await;

    tracing::debug!(
        "Recorded {:?} for user {} ({} of {} categories accepted)",
        action,
        user_id,
        outcome.accepted_categories,
        req.candidate.len()
    );

    HttpResponse::Ok().json(RecordSwipeResponse {
        swipe_id: uuid::Uuid::new_v4().to_string(),
        accepted_categories: outcome.accepted_categories,
        session: profile_response(&user_id, outcome.session),
    })
}

/// Bootstrap a profile from quiz answers
///
/// POST /api/v1/profiles/{userId}/bootstrap
///
/// Request body:
/// ```json
/// { "answers": { "cleanliness": 8, "pets": true } }
/// ```
async fn bootstrap_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<BootstrapRequest>,
) -> impl Responder {
    let user_id = path.into_inner();

    let profile = state.engine.bootstrap_profile(&req.answers);
    let session = state.store.bootstrap(&user_id, profile).await;

    tracing::info!(
        "Bootstrapped profile for user {} from {} answers",
        user_id,
        req.answers.len()
    );

    HttpResponse::Ok().json(profile_response(&user_id, session))
}

/// Score a single candidate
///
/// POST /api/v1/profiles/{userId}/score
async fn score_candidate(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    let user_id = path.into_inner();

    let profile = state.store.profile_or_default(&user_id).await;
    let result = state.engine.score(&profile, &req.candidate);

    HttpResponse::Ok().json(ScoreResponse {
        score: result.score,
        breakdown: result.breakdown,
    })
}

/// Rank candidates endpoint
///
/// POST /api/v1/profiles/{userId}/rank
///
/// Request body:
/// ```json
/// {
///   "candidates": [{ "userId": "string", "name": "string", "attributes": {} }],
///   "limit": 20
/// }
/// ```
async fn rank_candidates(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<RankCandidatesRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = path.into_inner();
    let limit = req
        .limit
        .unwrap_or(state.limits.default_limit)
        .min(state.limits.max_limit) as usize;

    tracing::info!("Ranking {} candidates for user: {}, limit: {}", req.candidates.len(), user_id, limit);

    let profile = state.store.profile_or_default(&user_id).await;
    let result = state
        .engine
        .rank_candidates(&profile, req.into_inner().candidates, limit);

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        result.matches.len(),
        user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RankCandidatesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}

/// Get insights for a profile
///
/// GET /api/v1/profiles/{userId}/insights
async fn get_insights(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    match state.store.get(&user_id).await {
        Ok(session) => {
            let insights = state.engine.insights(&session.profile);
            HttpResponse::Ok().json(InsightsResponse { user_id, insights })
        }
        Err(e) => not_found(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rank_limits() {
        let limits = RankLimits::default();
        assert_eq!(limits.default_limit, 20);
        assert_eq!(limits.max_limit, 100);
    }

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
            active_sessions: 0,
        };

        assert_eq!(response.status, "healthy");
    }
}
