// Criterion benchmarks for Roomie Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use roomie_algo::core::PreferenceEngine;
use roomie_algo::models::{AttributeMap, Category, PreferenceProfile, RoommateCandidate, SwipeAction};

const SLEEP_SCHEDULES: &[&str] = &["early bird", "night owl", "flexible"];
const PERSONALITIES: &[&str] = &["introvert", "extrovert", "ambivert"];

fn create_attributes(id: usize) -> AttributeMap {
    AttributeMap::new()
        .with(Category::Cleanliness, (id % 11) as f64)
        .with(Category::Noise, ((id * 3) % 11) as f64)
        .with(Category::SocialLevel, ((id * 7) % 11) as f64)
        .with(Category::SleepSchedule, SLEEP_SCHEDULES[id % SLEEP_SCHEDULES.len()])
        .with(Category::Personality, PERSONALITIES[id % PERSONALITIES.len()])
        .with(Category::Smoking, id % 5 == 0)
        .with(Category::Pets, id % 2 == 0)
        .with(Category::SharedItems, id % 3 == 0)
}

fn create_candidate(id: usize) -> RoommateCandidate {
    RoommateCandidate {
        user_id: id.to_string(),
        name: format!("Student {}", id),
        attributes: create_attributes(id),
    }
}

fn trained_profile(engine: &PreferenceEngine, swipes: usize) -> PreferenceProfile {
    (0..swipes).fold(engine.initialize_profile(), |profile, i| {
        let action = if i % 3 == 0 { SwipeAction::Dislike } else { SwipeAction::Like };
        engine.record_swipe(&profile, &create_attributes(i), action)
    })
}

fn bench_record_swipe(c: &mut Criterion) {
    let engine = PreferenceEngine::with_default_weights();
    let mut group = c.benchmark_group("record_swipe");

    for history in [0usize, 10, 100].iter() {
        let profile = trained_profile(&engine, *history);
        let candidate = create_attributes(42);

        group.bench_with_input(BenchmarkId::new("history", history), history, |b, _| {
            b.iter(|| {
                engine.record_swipe(
                    black_box(&profile),
                    black_box(&candidate),
                    black_box(SwipeAction::Like),
                )
            });
        });
    }

    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let engine = PreferenceEngine::with_default_weights();
    let profile = trained_profile(&engine, 30);
    let candidate = create_attributes(7);

    c.bench_function("score", |b| {
        b.iter(|| engine.score(black_box(&profile), black_box(&candidate)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let engine = PreferenceEngine::with_default_weights();
    let profile = trained_profile(&engine, 30);

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 1000].iter() {
        let candidates: Vec<RoommateCandidate> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_candidates", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    engine.rank_candidates(
                        black_box(&profile),
                        black_box(candidates.clone()),
                        black_box(20),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_record_swipe, bench_score, bench_ranking);

criterion_main!(benches);
