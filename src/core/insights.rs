use crate::models::{Category, Insight, PreferenceProfile, PreferenceValue};

/// Minimum confidence before a preference is surfaced to the user
pub const INSIGHT_CONFIDENCE_THRESHOLD: f64 = 0.4;

/// Coarse band a numeric preference falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    pub fn of(value: f64) -> Self {
        if value < 4.0 {
            Band::Low
        } else if value < 7.0 {
            Band::Medium
        } else {
            Band::High
        }
    }
}

/// Produce readable statements for every sufficiently confident category,
/// most confident first
pub fn get_insights(profile: &PreferenceProfile) -> Vec<Insight> {
    let mut insights: Vec<Insight> = profile
        .categories
        .iter()
        .filter(|(_, estimate)| estimate.confidence() >= INSIGHT_CONFIDENCE_THRESHOLD)
        .filter_map(|(category, estimate)| {
            let value = estimate.value()?;
            let text = describe(*category, &value)?;
            Some(Insight {
                category: *category,
                text,
                confidence: estimate.confidence(),
            })
        })
        .collect();

    // Stable sort keeps category order among equal confidences
    insights.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    insights
}

fn describe(category: Category, value: &PreferenceValue) -> Option<String> {
    let text = match (category, value) {
        (Category::Cleanliness, PreferenceValue::Number(n)) => match Band::of(*n) {
            Band::High => "You prefer a spotless, very tidy home".to_string(),
            Band::Medium => "You like a reasonably clean shared space".to_string(),
            Band::Low => "You're relaxed about tidiness".to_string(),
        },
        (Category::Noise, PreferenceValue::Number(n)) => match Band::of(*n) {
            Band::High => "You're comfortable in a lively, noisy household".to_string(),
            Band::Medium => "You're fine with moderate noise levels".to_string(),
            Band::Low => "You prefer a quiet place to live".to_string(),
        },
        (Category::SocialLevel, PreferenceValue::Number(n)) => match Band::of(*n) {
            Band::High => "You want roommates who love to socialize".to_string(),
            Band::Medium => "You enjoy hanging out with roommates now and then".to_string(),
            Band::Low => "You value privacy and time on your own".to_string(),
        },
        (Category::SleepSchedule, PreferenceValue::Text(s)) => {
            format!("Your sleep schedule fits best with: {}", s)
        }
        (Category::StudyHabits, PreferenceValue::Text(s)) => {
            format!("You study best in a {} setting", s)
        }
        (Category::Guests, PreferenceValue::Text(s)) => {
            format!("You're comfortable having guests over {}", s)
        }
        (Category::Drinking, PreferenceValue::Text(s)) => {
            format!("Your preferred drinking habits: {}", s)
        }
        (Category::Cooking, PreferenceValue::Text(s)) => {
            format!("Your cooking style: {}", s)
        }
        (Category::Personality, PreferenceValue::Text(s)) => {
            format!("You get along best with {} roommates", s)
        }
        (Category::Smoking, PreferenceValue::Bool(true)) => {
            "You're okay living with smokers".to_string()
        }
        (Category::Smoking, PreferenceValue::Bool(false)) => {
            "You prefer a smoke-free home".to_string()
        }
        (Category::Pets, PreferenceValue::Bool(true)) => "You'd like a pet-friendly home".to_string(),
        (Category::Pets, PreferenceValue::Bool(false)) => "You prefer a pet-free home".to_string(),
        (Category::SharedItems, PreferenceValue::Bool(true)) => {
            "You're happy to share groceries and household items".to_string()
        }
        (Category::SharedItems, PreferenceValue::Bool(false)) => {
            "You prefer to keep your belongings separate".to_string()
        }
        _ => return None,
    };

    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::learning::{bootstrap_profile, initialize_profile, record_swipe};
    use crate::models::{AttributeMap, SwipeAction};

    #[test]
    fn test_band_edges() {
        assert_eq!(Band::of(0.0), Band::Low);
        assert_eq!(Band::of(3.9), Band::Low);
        assert_eq!(Band::of(4.0), Band::Medium);
        assert_eq!(Band::of(6.9), Band::Medium);
        assert_eq!(Band::of(7.0), Band::High);
        assert_eq!(Band::of(-3.0), Band::Low);
    }

    #[test]
    fn test_empty_profile_has_no_insights() {
        assert!(get_insights(&initialize_profile()).is_empty());
    }

    #[test]
    fn test_low_confidence_is_hidden() {
        // A single numeric like gives 0.28 confidence
        let profile = record_swipe(
            &initialize_profile(),
            &AttributeMap::new().with(Category::Noise, 2.0),
            SwipeAction::Like,
        );
        assert!(get_insights(&profile).is_empty());
    }

    #[test]
    fn test_insights_ordered_by_confidence() {
        let mut profile = bootstrap_profile(
            &AttributeMap::new()
                .with(Category::Pets, false)
                .with(Category::Cleanliness, 9.0),
        );
        let smoke_free = AttributeMap::new().with(Category::Smoking, false);
        for _ in 0..3 {
            profile = record_swipe(&profile, &smoke_free, SwipeAction::Like);
        }

        let insights = get_insights(&profile);

        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].category, Category::Smoking);
        assert_eq!(insights[0].confidence, 1.0);
        assert_eq!(insights[0].text, "You prefer a smoke-free home");
        // Equal confidences keep category order
        assert_eq!(insights[1].category, Category::Cleanliness);
        assert_eq!(insights[1].text, "You prefer a spotless, very tidy home");
        assert_eq!(insights[2].category, Category::Pets);
    }

    #[test]
    fn test_categorical_insight_mentions_value() {
        let profile =
            bootstrap_profile(&AttributeMap::new().with(Category::SleepSchedule, "night owl"));
        let insights = get_insights(&profile);

        assert_eq!(insights.len(), 1);
        assert!(insights[0].text.contains("night owl"));
    }
}
