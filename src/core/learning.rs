use crate::core::estimators::ObservationError;
use crate::models::{
    CandidateAttributes, Category, CategoryEstimate, CategoryKind, PreferenceProfile,
    ProfileSnapshot, QuizAnswers, SwipeAction,
};
use std::collections::BTreeMap;
use thiserror::Error;

/// Confidence assigned to explicit quiz answers
pub const BOOTSTRAP_CONFIDENCE: f64 = 0.5;

/// Reasons a stored profile cannot be restored
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("{category} expects a {expected:?} estimate, stored estimate is {found:?}")]
    KindMismatch {
        category: Category,
        expected: CategoryKind,
        found: CategoryKind,
    },

    #[error("Invalid stored observation: {0}")]
    Observation(#[from] ObservationError),
}

/// Create a profile with an empty estimate for every known category
pub fn initialize_profile() -> PreferenceProfile {
    let categories = Category::ALL
        .iter()
        .map(|c| (*c, CategoryEstimate::empty(c.kind())))
        .collect::<BTreeMap<_, _>>();

    PreferenceProfile { categories }
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        initialize_profile()
    }
}

/// Learn from one swipe and return the updated profile.
///
/// The input profile is not modified. Categories missing from the candidate
/// are left untouched; values whose type does not fit the category are
/// skipped.
pub fn record_swipe(
    profile: &PreferenceProfile,
    candidate: &CandidateAttributes,
    action: SwipeAction,
) -> PreferenceProfile {
    let mut updated = profile.clone();
    apply_swipe(&mut updated, candidate, action);
    updated
}

/// In-place variant of [`record_swipe`]. Returns the number of categories
/// that accepted the observation.
pub fn apply_swipe(
    profile: &mut PreferenceProfile,
    candidate: &CandidateAttributes,
    action: SwipeAction,
) -> usize {
    let mut accepted = 0;

    for (category, value) in candidate.iter() {
        let Some(estimate) = profile.get_mut(category) else {
            continue;
        };

        match estimate.record(category, value, action) {
            Ok(()) => accepted += 1,
            Err(e) => tracing::warn!("Skipping swipe observation: {}", e),
        }
    }

    accepted
}

/// Seed a profile from explicit quiz answers instead of swipe history.
///
/// Answered categories start at [`BOOTSTRAP_CONFIDENCE`]. The first swipe
/// touching such a category recomputes its confidence from the synthetic
/// history plus the new observation, so a confirming numeric like moves it
/// to 0.44 rather than above 0.5.
pub fn bootstrap_profile(answers: &QuizAnswers) -> PreferenceProfile {
    let mut profile = initialize_profile();

    for (category, value) in answers.iter() {
        let Some(estimate) = profile.get_mut(category) else {
            continue;
        };

        if let Err(e) = estimate.seed(category, value, BOOTSTRAP_CONFIDENCE) {
            tracing::warn!("Skipping quiz answer: {}", e);
        }
    }

    profile
}

/// Rebuild a profile from stored per-category estimates.
///
/// Missing categories start empty and unknown keys are dropped. An estimate
/// whose kind does not match its category, or whose numeric history leaves
/// the category domain, fails the whole restore. Value and confidence are
/// recomputed from the history, except for untouched quiz seeds which keep
/// their pinned confidence.
pub fn restore_profile(
    stored: BTreeMap<String, CategoryEstimate>,
) -> Result<PreferenceProfile, ProfileError> {
    let mut profile = initialize_profile();

    for (key, mut estimate) in stored {
        let Ok(category) = key.parse::<Category>() else {
            tracing::debug!("Dropping unknown stored category: {}", key);
            continue;
        };

        if estimate.kind() != category.kind() {
            return Err(ProfileError::KindMismatch {
                category,
                expected: category.kind(),
                found: estimate.kind(),
            });
        }

        estimate.validate_observations(category)?;

        if !estimate.is_untouched_seed(BOOTSTRAP_CONFIDENCE) {
            estimate.recompute();
        }

        profile.categories.insert(category, estimate);
    }

    Ok(profile)
}

impl TryFrom<ProfileSnapshot> for PreferenceProfile {
    type Error = ProfileError;

    fn try_from(snapshot: ProfileSnapshot) -> Result<Self, Self::Error> {
        restore_profile(snapshot.categories)
    }
}
