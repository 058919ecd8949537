// Benchmarks for the pure rule-evaluation layer
use bigdecimal::BigDecimal;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use token_risk_engine::models::{Signal, SignalSet};
use token_risk_engine::rules::{evaluate_all, fold_score, RuleThresholds};

fn full_signal_set() -> SignalSet {
    let mut signals = SignalSet::new();
    signals.extend(vec![
        Signal::MintAuthorityActive(true),
        Signal::FreezeAuthorityActive(true),
        Signal::CreatorSharePercent(BigDecimal::from(15)),
        Signal::Top10HolderSharePercent(BigDecimal::from(62)),
        Signal::HolderCount(4521),
        Signal::PairCount(3),
        Signal::LiquidityUsd(BigDecimal::from(12_500)),
        Signal::Volume24hUsd(BigDecimal::from(40_000)),
        Signal::LargeDumpCount(4),
        Signal::SampledTransactionCount(50),
        Signal::SocialVolume(150_000),
        Signal::RelativeSentiment(0.25),
        Signal::GalaxyScore(48.0),
        Signal::DuplicatePostRatio(0.7),
    ]);
    signals
}

fn bench_evaluate_all(c: &mut Criterion) {
    let signals = full_signal_set();
    let thresholds = RuleThresholds::default();

    c.bench_function("evaluate_all_full_set", |b| {
        b.iter(|| evaluate_all(black_box(&signals), black_box(&thresholds)))
    });

    let empty = SignalSet::new();
    c.bench_function("evaluate_all_empty_set", |b| {
        b.iter(|| evaluate_all(black_box(&empty), black_box(&thresholds)))
    });

    let hits = evaluate_all(&signals, &thresholds);
    c.bench_function("fold_score", |b| {
        b.iter(|| fold_score(black_box(&hits)))
    });
}

criterion_group!(benches, bench_evaluate_all);
criterion_main!(benches);
