use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::models::domain::{Category, Insight, PreferenceProfile, ScoredCandidate};

/// Current state of a user's profile session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub profile: PreferenceProfile,
    #[serde(rename = "swipeCount")]
    pub swipe_count: u64,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the record swipe endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSwipeResponse {
    #[serde(rename = "swipeId")]
    pub swipe_id: String,
    #[serde(rename = "acceptedCategories")]
    pub accepted_categories: usize,
    #[serde(flatten)]
    pub session: ProfileResponse,
}

/// Compatibility score response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: u8,
    pub breakdown: BTreeMap<Category, f64>,
}

/// Ranked candidates response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankCandidatesResponse {
    pub matches: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// Insights response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub insights: Vec<Insight>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub active_sessions: u64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
