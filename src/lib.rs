//! Roomie Algo - preference learning and compatibility scoring for roommate matching
//!
//! This library learns a per-user preference profile from like/dislike swipes
//! (or an explicit quiz) and scores roommate candidates against it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{PreferenceEngine, RankResult, initialize_profile, record_swipe, bootstrap_profile, get_insights};
pub use models::{AttributeMap, CandidateAttributes, Category, CategoryWeights, CompatibilityScore, Insight, PreferenceProfile, PreferenceValue, RoommateCandidate, SwipeAction};
