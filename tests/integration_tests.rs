// Integration tests for Roomie Algo

use roomie_algo::core::PreferenceEngine;
use roomie_algo::models::{
    AttributeMap, Category, CategoryEstimate, PreferenceProfile, PreferenceValue,
    RoommateCandidate, SwipeAction,
};

fn create_candidate(
    id: &str,
    cleanliness: f64,
    noise: f64,
    smoking: bool,
    sleep_schedule: &str,
) -> RoommateCandidate {
    RoommateCandidate {
        user_id: id.to_string(),
        name: format!("Student {}", id),
        attributes: AttributeMap::new()
            .with(Category::Cleanliness, cleanliness)
            .with(Category::Noise, noise)
            .with(Category::Smoking, smoking)
            .with(Category::SleepSchedule, sleep_schedule),
    }
}

#[test]
fn test_integration_swipe_session_then_rank() {
    let engine = PreferenceEngine::with_default_weights();
    let mut profile = engine.initialize_profile();

    // A quiet, tidy early riser who avoids smokers
    let session = vec![
        (create_candidate("s1", 9.0, 2.0, false, "early bird"), SwipeAction::Like),
        (create_candidate("s2", 3.0, 8.0, true, "night owl"), SwipeAction::Dislike),
        (create_candidate("s3", 8.0, 3.0, false, "early bird"), SwipeAction::Like),
        (create_candidate("s4", 2.0, 9.0, false, "night owl"), SwipeAction::Dislike),
        (create_candidate("s5", 10.0, 1.0, false, "early bird"), SwipeAction::Like),
    ];

    for (candidate, action) in &session {
        profile = engine.record_swipe(&profile, &candidate.attributes, *action);
    }

    assert_eq!(profile.value(Category::Smoking), Some(PreferenceValue::Bool(false)));
    assert_eq!(
        profile.value(Category::SleepSchedule),
        Some(PreferenceValue::Text("early bird".to_string()))
    );

    let candidates = vec![
        create_candidate("party", 2.0, 10.0, true, "night owl"),
        create_candidate("ideal", 9.0, 2.0, false, "early bird"),
        create_candidate("mixed", 6.0, 5.0, false, "night owl"),
    ];

    let result = engine.rank_candidates(&profile, candidates, 10);

    assert_eq!(result.total_candidates, 3);
    let order: Vec<&str> = result.matches.iter().map(|m| m.user_id.as_str()).collect();
    assert_eq!(order, vec!["ideal", "mixed", "party"]);

    for i in 1..result.matches.len() {
        assert!(result.matches[i - 1].score >= result.matches[i].score);
    }
}

#[test]
fn test_bootstrap_then_swipes_override_quiz() {
    let engine = PreferenceEngine::with_default_weights();
    let mut profile = engine.bootstrap_profile(
        &AttributeMap::new().with(Category::Personality, "extrovert"),
    );

    let introvert = AttributeMap::new().with(Category::Personality, "introvert");
    for _ in 0..3 {
        profile = engine.record_swipe(&profile, &introvert, SwipeAction::Like);
    }

    assert_eq!(
        profile.value(Category::Personality),
        Some(PreferenceValue::Text("introvert".to_string()))
    );
    // Recomputed from 5 observations once real swipes arrive
    assert!((profile.confidence(Category::Personality) - 0.6).abs() < 1e-9);
}

#[test]
fn test_insights_follow_learning() {
    let engine = PreferenceEngine::with_default_weights();
    let mut profile = engine.initialize_profile();

    let quiet = AttributeMap::new().with(Category::Noise, 1.0);
    for _ in 0..3 {
        profile = engine.record_swipe(&profile, &quiet, SwipeAction::Like);
    }

    let insights = engine.insights(&profile);
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].category, Category::Noise);
    assert_eq!(insights[0].text, "You prefer a quiet place to live");
}

#[test]
fn test_profile_serialization_round_trip_keeps_estimates() {
    let engine = PreferenceEngine::with_default_weights();
    let profile = engine.bootstrap_profile(
        &AttributeMap::new()
            .with(Category::Cleanliness, 7.0)
            .with(Category::Pets, true)
            .with(Category::Cooking, "daily"),
    );

    let json = serde_json::to_string(&profile).unwrap();
    let restored: PreferenceProfile = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, profile);
    assert!(matches!(
        restored.get(Category::Pets),
        Some(CategoryEstimate::Boolean(_))
    ));

    let candidate = AttributeMap::new().with(Category::Cleanliness, 7.0);
    assert_eq!(engine.score(&restored, &candidate).score, 100);
}
