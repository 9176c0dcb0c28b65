use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Lower bound of the numeric category domain
pub const NUMERIC_MIN: f64 = 0.0;
/// Upper bound of the numeric category domain
pub const NUMERIC_MAX: f64 = 10.0;

/// One axis of roommate compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Cleanliness,
    Noise,
    SocialLevel,
    SleepSchedule,
    StudyHabits,
    Guests,
    Smoking,
    Drinking,
    Pets,
    Cooking,
    SharedItems,
    Personality,
}

/// How values of a category are interpreted by the estimators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Boolean,
    Numeric,
    Categorical,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Cleanliness,
        Category::Noise,
        Category::SocialLevel,
        Category::SleepSchedule,
        Category::StudyHabits,
        Category::Guests,
        Category::Smoking,
        Category::Drinking,
        Category::Pets,
        Category::Cooking,
        Category::SharedItems,
        Category::Personality,
    ];

    pub fn kind(self) -> CategoryKind {
        match self {
            Category::Cleanliness | Category::Noise | Category::SocialLevel => CategoryKind::Numeric,
            Category::Smoking | Category::Pets | Category::SharedItems => CategoryKind::Boolean,
            Category::SleepSchedule
            | Category::StudyHabits
            | Category::Guests
            | Category::Drinking
            | Category::Cooking
            | Category::Personality => CategoryKind::Categorical,
        }
    }

    /// Wire name of the category
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cleanliness => "cleanliness",
            Category::Noise => "noise",
            Category::SocialLevel => "socialLevel",
            Category::SleepSchedule => "sleepSchedule",
            Category::StudyHabits => "studyHabits",
            Category::Guests => "guests",
            Category::Smoking => "smoking",
            Category::Drinking => "drinking",
            Category::Pets => "pets",
            Category::Cooking => "cooking",
            Category::SharedItems => "sharedItems",
            Category::Personality => "personality",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// A raw attribute value as it arrives from a candidate or a quiz answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PreferenceValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PreferenceValue::Bool(_) => "boolean",
            PreferenceValue::Number(_) => "number",
            PreferenceValue::Text(_) => "string",
        }
    }
}

impl From<bool> for PreferenceValue {
    fn from(value: bool) -> Self {
        PreferenceValue::Bool(value)
    }
}

impl From<f64> for PreferenceValue {
    fn from(value: f64) -> Self {
        PreferenceValue::Number(value)
    }
}

impl From<&str> for PreferenceValue {
    fn from(value: &str) -> Self {
        PreferenceValue::Text(value.to_string())
    }
}

impl From<String> for PreferenceValue {
    fn from(value: String) -> Self {
        PreferenceValue::Text(value)
    }
}

/// A swipe gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Dislike,
}

impl FromStr for SwipeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "like" => Ok(SwipeAction::Like),
            "dislike" => Ok(SwipeAction::Dislike),
            other => Err(format!("unknown swipe action: {}", other)),
        }
    }
}

/// One recorded data point for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation<T> {
    pub value: T,
    pub action: SwipeAction,
}

impl<T> Observation<T> {
    pub fn new(value: T, action: SwipeAction) -> Self {
        Self { value, action }
    }
}

/// Current best estimate for one category together with its evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate<T> {
    pub value: Option<T>,
    pub confidence: f64,
    pub observations: Vec<Observation<T>>,
}

impl<T> Default for Estimate<T> {
    fn default() -> Self {
        Self {
            value: None,
            confidence: 0.0,
            observations: Vec::new(),
        }
    }
}

/// Per-category estimate, tagged by the category's kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CategoryEstimate {
    Boolean(Estimate<bool>),
    Numeric(Estimate<f64>),
    Categorical(Estimate<String>),
}

impl CategoryEstimate {
    /// An estimate with no evidence for a category of the given kind
    pub fn empty(kind: CategoryKind) -> Self {
        match kind {
            CategoryKind::Boolean => CategoryEstimate::Boolean(Estimate::default()),
            CategoryKind::Numeric => CategoryEstimate::Numeric(Estimate::default()),
            CategoryKind::Categorical => CategoryEstimate::Categorical(Estimate::default()),
        }
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            CategoryEstimate::Boolean(_) => CategoryKind::Boolean,
            CategoryEstimate::Numeric(_) => CategoryKind::Numeric,
            CategoryEstimate::Categorical(_) => CategoryKind::Categorical,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            CategoryEstimate::Boolean(e) => e.confidence,
            CategoryEstimate::Numeric(e) => e.confidence,
            CategoryEstimate::Categorical(e) => e.confidence,
        }
    }

    pub fn observation_count(&self) -> usize {
        match self {
            CategoryEstimate::Boolean(e) => e.observations.len(),
            CategoryEstimate::Numeric(e) => e.observations.len(),
            CategoryEstimate::Categorical(e) => e.observations.len(),
        }
    }

    /// The estimated value, erased back to a wire value
    pub fn value(&self) -> Option<PreferenceValue> {
        match self {
            CategoryEstimate::Boolean(e) => e.value.map(PreferenceValue::Bool),
            CategoryEstimate::Numeric(e) => e.value.map(PreferenceValue::Number),
            CategoryEstimate::Categorical(e) => e.value.clone().map(PreferenceValue::Text),
        }
    }
}

/// Learned preferences of one user, one estimate per known category.
///
/// Deserialization goes through [`ProfileSnapshot`] so a stored profile is
/// checked and completed before use (see `core::learning::restore_profile`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileSnapshot")]
pub struct PreferenceProfile {
    pub categories: BTreeMap<Category, CategoryEstimate>,
}

/// Raw stored form of a profile, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryEstimate>,
}

impl PreferenceProfile {
    pub fn get(&self, category: Category) -> Option<&CategoryEstimate> {
        self.categories.get(&category)
    }

    pub fn get_mut(&mut self, category: Category) -> Option<&mut CategoryEstimate> {
        self.categories.get_mut(&category)
    }

    pub fn confidence(&self, category: Category) -> f64 {
        self.get(category).map(CategoryEstimate::confidence).unwrap_or(0.0)
    }

    pub fn value(&self, category: Category) -> Option<PreferenceValue> {
        self.get(category).and_then(CategoryEstimate::value)
    }

    /// Total number of observations across all categories
    pub fn observation_count(&self) -> usize {
        self.categories.values().map(CategoryEstimate::observation_count).sum()
    }
}

/// Category values keyed by category.
///
/// Used both for candidate roommate attributes and for quiz answers. Keys
/// that do not name a known category are dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, PreferenceValue>")]
pub struct AttributeMap(BTreeMap<Category, PreferenceValue>);

pub type CandidateAttributes = AttributeMap;
pub type QuizAnswers = AttributeMap;

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: Category, value: impl Into<PreferenceValue>) -> Self {
        self.0.insert(category, value.into());
        self
    }

    pub fn insert(&mut self, category: Category, value: impl Into<PreferenceValue>) {
        self.0.insert(category, value.into());
    }

    pub fn get(&self, category: Category) -> Option<&PreferenceValue> {
        self.0.get(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &PreferenceValue)> {
        self.0.iter().map(|(c, v)| (*c, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, PreferenceValue>> for AttributeMap {
    fn from(raw: BTreeMap<String, PreferenceValue>) -> Self {
        let mut attributes = BTreeMap::new();
        for (key, value) in raw {
            match key.parse::<Category>() {
                Ok(category) => {
                    attributes.insert(category, value);
                }
                Err(_) => tracing::debug!("Ignoring unknown category key: {}", key),
            }
        }
        Self(attributes)
    }
}

impl FromIterator<(Category, PreferenceValue)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (Category, PreferenceValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A roommate candidate as supplied by the listing data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoommateCandidate {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attributes: CandidateAttributes,
}

/// Compatibility of one candidate against a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    /// Overall score in 0..=100
    pub score: u8,
    /// Per-category similarity in 0..=100
    pub breakdown: BTreeMap<Category, f64>,
}

/// Scored and ranked candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub score: u8,
    pub breakdown: BTreeMap<Category, f64>,
}

/// Human readable statement about a learned preference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: Category,
    pub text: String,
    pub confidence: f64,
}

/// Per-category importance used by compatibility scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights {
    pub cleanliness: f64,
    pub noise: f64,
    pub social_level: f64,
    pub sleep_schedule: f64,
    pub study_habits: f64,
    pub guests: f64,
    pub smoking: f64,
    pub drinking: f64,
    pub pets: f64,
    pub cooking: f64,
    pub shared_items: f64,
    pub personality: f64,
}

impl CategoryWeights {
    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Cleanliness => self.cleanliness,
            Category::Noise => self.noise,
            Category::SocialLevel => self.social_level,
            Category::SleepSchedule => self.sleep_schedule,
            Category::StudyHabits => self.study_habits,
            Category::Guests => self.guests,
            Category::Smoking => self.smoking,
            Category::Drinking => self.drinking,
            Category::Pets => self.pets,
            Category::Cooking => self.cooking,
            Category::SharedItems => self.shared_items,
            Category::Personality => self.personality,
        }
    }

    /// First category whose weight is not a finite positive number
    pub fn first_invalid(&self) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| {
                let w = self.weight(*c);
                !w.is_finite() || w <= 0.0
            })
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            cleanliness: 1.5,
            noise: 1.2,
            social_level: 1.0,
            sleep_schedule: 1.3,
            study_habits: 1.0,
            guests: 0.8,
            smoking: 1.5,
            drinking: 0.7,
            pets: 1.0,
            cooking: 0.6,
            shared_items: 0.5,
            personality: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("laundry".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_as_camel_case() {
        let json = serde_json::to_string(&Category::SocialLevel).unwrap();
        assert_eq!(json, "\"socialLevel\"");
    }

    #[test]
    fn test_attribute_map_drops_unknown_keys() {
        let attrs: AttributeMap = serde_json::from_str(
            r#"{"cleanliness": 7, "smoking": false, "sleepSchedule": "night owl", "favoriteColor": "blue"}"#,
        )
        .unwrap();

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get(Category::Cleanliness), Some(&PreferenceValue::Number(7.0)));
        assert_eq!(attrs.get(Category::Smoking), Some(&PreferenceValue::Bool(false)));
        assert_eq!(
            attrs.get(Category::SleepSchedule),
            Some(&PreferenceValue::Text("night owl".to_string()))
        );
    }

    #[test]
    fn test_swipe_action_parse() {
        assert_eq!("like".parse::<SwipeAction>(), Ok(SwipeAction::Like));
        assert_eq!("DISLIKE".parse::<SwipeAction>(), Ok(SwipeAction::Dislike));
        assert!("superlike".parse::<SwipeAction>().is_err());
    }

    #[test]
    fn test_default_weights_are_valid() {
        let weights = CategoryWeights::default();
        assert_eq!(weights.first_invalid(), None);
        assert_eq!(weights.weight(Category::Smoking), 1.5);
    }

    #[test]
    fn test_invalid_weight_detected() {
        let weights = CategoryWeights {
            pets: 0.0,
            ..CategoryWeights::default()
        };
        assert_eq!(weights.first_invalid(), Some(Category::Pets));
    }

    #[test]
    fn test_estimate_tagged_by_kind() {
        let estimate = CategoryEstimate::empty(CategoryKind::Numeric);
        let json = serde_json::to_value(&estimate).unwrap();
        assert_eq!(json["kind"], "numeric");
        assert_eq!(json["confidence"], 0.0);
        assert!(json["value"].is_null());
    }
}
