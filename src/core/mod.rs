// Core algorithm exports
pub mod engine;
pub mod estimators;
pub mod insights;
pub mod learning;
pub mod scoring;

pub use engine::{PreferenceEngine, RankResult};
pub use estimators::{Estimator, ObservationError};
pub use insights::get_insights;
pub use learning::{
    apply_swipe, bootstrap_profile, initialize_profile, record_swipe, restore_profile, ProfileError,
};
pub use scoring::calculate_compatibility;
