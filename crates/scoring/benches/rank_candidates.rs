//! Benchmarks for scoring and ordering
//!
//! Run with: cargo bench --package scoring
//!
//! Uses a synthetic feed page of candidates with varied engagement and age.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use model::Post;
use scoring::{sort_by_score, BoostPipeline, Blacklist, ScoringConfig, score_all};

const NOW: i64 = 1_700_000_000;

fn synthetic_feed(size: u32) -> Vec<Post> {
    (0..size)
        .map(|i| Post {
            upvote_count: (i * 37) % 500,
            comment_count: (i * 11) % 80,
            share_count: (i * 3) % 20,
            favorite_count: (i * 5) % 40,
            watch_seconds: Some(u64::from(i) * 977),
            is_anonymous: i % 4 == 0,
            gender: if i % 3 == 0 { "Female".to_string() } else { "Male".to_string() },
            ..Post::new(format!("post-{}", i), NOW - i64::from(i) * 600)
        })
        .collect()
}

fn bench_score_all(c: &mut Criterion) {
    let config = ScoringConfig::default();
    let feed = synthetic_feed(1_000);

    c.bench_function("score_all_1000", |b| {
        b.iter(|| {
            let scores = score_all(black_box(&feed), black_box(NOW), &config);
            black_box(scores)
        })
    });
}

fn bench_boost_and_sort(c: &mut Criterion) {
    let config = ScoringConfig::default();
    let boosts = BoostPipeline::from_config(&config);
    let blacklist: Blacklist = (0..50).map(|i| format!("post-{}", i * 7)).collect();
    let feed = synthetic_feed(1_000);

    c.bench_function("boost_and_sort_1000", |b| {
        b.iter_batched(
            || feed.clone(),
            |mut candidates| {
                boosts.apply(&mut candidates, &blacklist);
                sort_by_score(&mut candidates, NOW, &config);
                black_box(candidates)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_score_all, bench_boost_and_sort);
criterion_main!(benches);
