// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AttributeMap, CandidateAttributes, Category, CategoryEstimate, CategoryKind, CategoryWeights,
    CompatibilityScore, Estimate, Insight, Observation, PreferenceProfile, PreferenceValue,
    ProfileSnapshot, QuizAnswers, RoommateCandidate, ScoredCandidate, SwipeAction, NUMERIC_MAX, NUMERIC_MIN,
};
pub use requests::{BootstrapRequest, RankCandidatesRequest, RecordSwipeRequest, ScoreRequest};
pub use responses::{
    ErrorResponse, HealthResponse, InsightsResponse, ProfileResponse, RankCandidatesResponse,
    RecordSwipeResponse, ScoreResponse,
};
