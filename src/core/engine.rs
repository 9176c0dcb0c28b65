use crate::models::{
    CandidateAttributes, CategoryWeights, CompatibilityScore, Insight, PreferenceProfile,
    QuizAnswers, RoommateCandidate, ScoredCandidate, SwipeAction,
};
use crate::core::{
    insights::get_insights,
    learning::{bootstrap_profile, initialize_profile, record_swipe},
    scoring::calculate_compatibility,
};

/// Result of ranking a batch of candidates
#[derive(Debug)]
pub struct RankResult {
    pub matches: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// Preference learning and compatibility engine
///
/// Holds the category weight table, which is fixed for the lifetime of the
/// engine. All operations are pure: profiles go in, new values come out.
#[derive(Debug, Clone)]
pub struct PreferenceEngine {
    weights: CategoryWeights,
    min_score: u8,
}

impl PreferenceEngine {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights, min_score: 0 }
    }

    pub fn with_default_weights() -> Self {
        Self::new(CategoryWeights::default())
    }

    /// Candidates scoring below `min_score` are dropped from rankings
    pub fn with_min_score(mut self, min_score: u8) -> Self {
        self.min_score = min_score.min(100);
        self
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    pub fn initialize_profile(&self) -> PreferenceProfile {
        initialize_profile()
    }

    pub fn record_swipe(
        &self,
        profile: &PreferenceProfile,
        candidate: &CandidateAttributes,
        action: SwipeAction,
    ) -> PreferenceProfile {
        record_swipe(profile, candidate, action)
    }

    pub fn bootstrap_profile(&self, answers: &QuizAnswers) -> PreferenceProfile {
        bootstrap_profile(answers)
    }

    pub fn score(
        &self,
        profile: &PreferenceProfile,
        candidate: &CandidateAttributes,
    ) -> CompatibilityScore {
        calculate_compatibility(profile, candidate, &self.weights)
    }

    pub fn insights(&self, profile: &PreferenceProfile) -> Vec<Insight> {
        get_insights(profile)
    }

    /// Score and rank candidates for a profile
    ///
    /// # Arguments
    /// * `profile` - The swiping user's learned preferences
    /// * `candidates` - Roommate candidates from the listing source
    /// * `limit` - Maximum number of matches to return
    ///
    /// # Returns
    /// RankResult with matches sorted by score, best first
    pub fn rank_candidates(
        &self,
        profile: &PreferenceProfile,
        candidates: Vec<RoommateCandidate>,
        limit: usize,
    ) -> RankResult {
        let total_candidates = candidates.len();

        let mut matches: Vec<ScoredCandidate> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let result = self.score(profile, &candidate.attributes);
                if result.score < self.min_score {
                    return None;
                }

                Some(ScoredCandidate {
                    user_id: candidate.user_id,
                    name: candidate.name,
                    score: result.score,
                    breakdown: result.breakdown,
                })
            })
            .collect();

        // Sort by score (descending) and then by user id for a stable feed
        matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.user_id.cmp(&b.user_id)));

        matches.truncate(limit);

        RankResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for PreferenceEngine {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
