use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{CandidateAttributes, QuizAnswers, RoommateCandidate};

/// Request to record a swipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSwipeRequest {
    pub candidate: CandidateAttributes,
    pub action: String,
}

/// Request to seed a profile from quiz answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapRequest {
    pub answers: QuizAnswers,
}

/// Request to score a single candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub candidate: CandidateAttributes,
}

/// Request to rank a batch of candidates
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidatesRequest {
    #[validate(length(min = 1))]
    pub candidates: Vec<RoommateCandidate>,
    #[serde(default)]
    pub limit: Option<u16>,
}
