use crate::models::{
    Category, CategoryEstimate, Estimate, Observation, PreferenceValue, SwipeAction, NUMERIC_MAX,
    NUMERIC_MIN,
};
use thiserror::Error;

/// Weight of a like in the numeric weighted average
const LIKE_WEIGHT: f64 = 1.0;
/// Weight of a dislike in the numeric weighted average
const DISLIKE_WEIGHT: f64 = -0.5;
/// Penalty applied per dislike when scoring categorical values
const CATEGORICAL_DISLIKE_PENALTY: f64 = 0.5;
/// Observations needed for volume-based confidence to saturate
const SATURATION_OBSERVATIONS: f64 = 10.0;

/// Reasons an observation is refused by an estimate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObservationError {
    #[error("{category} expects a {expected} value, got {found}")]
    TypeMismatch {
        category: Category,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{category} value {value} is outside the 0..=10 domain")]
    OutOfDomain { category: Category, value: f64 },

    #[error("{category} value is not finite")]
    NonFinite { category: Category },
}

/// A value type that can be estimated from a history of swipes
pub trait Estimator: Clone + PartialEq + Sized {
    /// Derive `(value, confidence)` from the full observation history.
    /// An empty history always yields `(None, 0.0)`.
    fn estimate(observations: &[Observation<Self>]) -> (Option<Self>, f64);
}

impl Estimator for bool {
    fn estimate(observations: &[Observation<Self>]) -> (Option<Self>, f64) {
        if observations.is_empty() {
            return (None, 0.0);
        }

        let (votes_true, votes_false) = observations.iter().fold((0u32, 0u32), |(t, f), obs| {
            match (obs.value, obs.action) {
                (true, SwipeAction::Like) | (false, SwipeAction::Dislike) => (t + 1, f),
                (false, SwipeAction::Like) | (true, SwipeAction::Dislike) => (t, f + 1),
            }
        });

        // Agreement ratio first so unanimous evidence lands exactly on 1.0
        let agreement = (votes_true as f64 - votes_false as f64).abs() / observations.len() as f64;
        let confidence = (0.3 + 0.7 * agreement).min(1.0);

        (Some(votes_true > votes_false), confidence)
    }
}

impl Estimator for f64 {
    fn estimate(observations: &[Observation<Self>]) -> (Option<Self>, f64) {
        if observations.is_empty() {
            return (None, 0.0);
        }

        let (weighted_sum, weight_total) =
            observations.iter().fold((0.0, 0.0), |(sum, total), obs| {
                let w = action_weight(obs.action);
                (sum + obs.value * w, total + w.abs())
            });

        let value = if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            0.0
        };

        (Some(value), volume_confidence(observations.len()))
    }
}

impl Estimator for String {
    fn estimate(observations: &[Observation<Self>]) -> (Option<Self>, f64) {
        if observations.is_empty() {
            return (None, 0.0);
        }

        // First-seen order is kept so ties resolve to the earliest value
        let mut tallies: Vec<(&str, f64)> = Vec::new();
        for obs in observations {
            let delta = match obs.action {
                SwipeAction::Like => 1.0,
                SwipeAction::Dislike => -CATEGORICAL_DISLIKE_PENALTY,
            };
            match tallies.iter().position(|(v, _)| *v == obs.value) {
                Some(i) => tallies[i].1 += delta,
                None => tallies.push((obs.value.as_str(), delta)),
            }
        }

        let mut best: Option<(&str, f64)> = None;
        for (value, score) in tallies {
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((value, score));
            }
        }

        (
            best.map(|(value, _)| value.to_string()),
            volume_confidence(observations.len()),
        )
    }
}

#[inline]
fn action_weight(action: SwipeAction) -> f64 {
    match action {
        SwipeAction::Like => LIKE_WEIGHT,
        SwipeAction::Dislike => DISLIKE_WEIGHT,
    }
}

/// Confidence that grows linearly with evidence and saturates at ten observations
#[inline]
pub fn volume_confidence(count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (0.2 + 0.8 * count as f64 / SATURATION_OBSERVATIONS).min(1.0)
}

impl<T: Estimator> Estimate<T> {
    /// Append an observation and recompute value and confidence
    pub fn record(&mut self, value: T, action: SwipeAction) {
        self.observations.push(Observation::new(value, action));
        self.recompute();
    }

    pub fn recompute(&mut self) {
        let (value, confidence) = T::estimate(&self.observations);
        self.value = value;
        self.confidence = confidence;
    }
}

/// Interpret a raw value as a number in the numeric category domain
pub fn numeric_value(category: Category, value: &PreferenceValue) -> Result<f64, ObservationError> {
    match value {
        PreferenceValue::Number(n) if !n.is_finite() => Err(ObservationError::NonFinite { category }),
        PreferenceValue::Number(n) if !(NUMERIC_MIN..=NUMERIC_MAX).contains(n) => {
            Err(ObservationError::OutOfDomain { category, value: *n })
        }
        PreferenceValue::Number(n) => Ok(*n),
        other => Err(mismatch(category, "number", other)),
    }
}

fn bool_value(category: Category, value: &PreferenceValue) -> Result<bool, ObservationError> {
    match value {
        PreferenceValue::Bool(b) => Ok(*b),
        other => Err(mismatch(category, "boolean", other)),
    }
}

fn text_value<'a>(category: Category, value: &'a PreferenceValue) -> Result<&'a str, ObservationError> {
    match value {
        PreferenceValue::Text(s) => Ok(s.as_str()),
        other => Err(mismatch(category, "string", other)),
    }
}

fn mismatch(category: Category, expected: &'static str, found: &PreferenceValue) -> ObservationError {
    ObservationError::TypeMismatch {
        category,
        expected,
        found: found.type_name(),
    }
}

impl CategoryEstimate {
    /// Record one swipe observation for `category`.
    ///
    /// The value must match the kind of this estimate; otherwise the
    /// estimate is left untouched and an error is returned.
    pub fn record(
        &mut self,
        category: Category,
        value: &PreferenceValue,
        action: SwipeAction,
    ) -> Result<(), ObservationError> {
        match self {
            CategoryEstimate::Boolean(e) => e.record(bool_value(category, value)?, action),
            CategoryEstimate::Numeric(e) => e.record(numeric_value(category, value)?, action),
            CategoryEstimate::Categorical(e) => {
                e.record(text_value(category, value)?.to_string(), action)
            }
        }
        Ok(())
    }

    /// Replace the history with a synthetic one centred on an explicit answer.
    ///
    /// Two likes at the answer are injected; boolean estimates also get one
    /// dislike at the opposite value. The confidence is pinned to
    /// `confidence` rather than derived from the synthetic history, and only
    /// holds until the next observation: recording then recomputes it from
    /// the full history. For numeric and categorical estimates that means a
    /// confirming like lowers a 0.5 seed to the three-observation volume
    /// confidence of 0.44.
    pub fn seed(
        &mut self,
        category: Category,
        value: &PreferenceValue,
        confidence: f64,
    ) -> Result<(), ObservationError> {
        match self {
            CategoryEstimate::Boolean(e) => {
                let v = bool_value(category, value)?;
                *e = Estimate {
                    value: Some(v),
                    confidence,
                    observations: seeded_bool_history(v),
                };
            }
            CategoryEstimate::Numeric(e) => {
                let v = numeric_value(category, value)?;
                *e = Estimate {
                    value: Some(v),
                    confidence,
                    observations: seeded_history(v),
                };
            }
            CategoryEstimate::Categorical(e) => {
                let v = text_value(category, value)?.to_string();
                *e = Estimate {
                    value: Some(v.clone()),
                    confidence,
                    observations: seeded_history(v),
                };
            }
        }
        Ok(())
    }

    /// True when this estimate is exactly what [`seed`](Self::seed) produced
    /// at `confidence`, with no swipe recorded since.
    pub fn is_untouched_seed(&self, confidence: f64) -> bool {
        match self {
            CategoryEstimate::Boolean(e) => {
                e.confidence == confidence
                    && e.value.map_or(false, |v| e.observations == seeded_bool_history(v))
            }
            CategoryEstimate::Numeric(e) => {
                e.confidence == confidence
                    && e.value.map_or(false, |v| e.observations == seeded_history(v))
            }
            CategoryEstimate::Categorical(e) => {
                e.confidence == confidence
                    && e.value.as_ref().map_or(false, |v| e.observations == seeded_history(v.clone()))
            }
        }
    }

    /// Derive value and confidence again from the stored history
    pub fn recompute(&mut self) {
        match self {
            CategoryEstimate::Boolean(e) => e.recompute(),
            CategoryEstimate::Numeric(e) => e.recompute(),
            CategoryEstimate::Categorical(e) => e.recompute(),
        }
    }

    /// Check every stored observation against the category domain
    pub fn validate_observations(&self, category: Category) -> Result<(), ObservationError> {
        if let CategoryEstimate::Numeric(e) = self {
            for obs in &e.observations {
                numeric_value(category, &PreferenceValue::Number(obs.value))?;
            }
        }
        Ok(())
    }
}

fn seeded_history<T: Clone>(value: T) -> Vec<Observation<T>> {
    vec![
        Observation::new(value.clone(), SwipeAction::Like),
        Observation::new(value, SwipeAction::Like),
    ]
}

fn seeded_bool_history(value: bool) -> Vec<Observation<bool>> {
    let mut history = seeded_history(value);
    history.push(Observation::new(!value, SwipeAction::Dislike));
    history
}
