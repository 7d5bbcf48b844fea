//! Performance benchmarks for feature extraction

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voiceprobe::{extract_features, FeatureConfig};

fn bench_extract_features(c: &mut Criterion) {
    // Generate synthetic speech-like audio (5 seconds at 16 kHz)
    let samples: Vec<f32> = (0..16000 * 5)
        .map(|i| {
            let t = i as f32 / 16000.0;
            let tremolo = 1.0 + 0.3 * (2.0 * std::f32::consts::PI * 3.0 * t).sin();
            0.25 * tremolo * (2.0 * std::f32::consts::PI * 180.0 * t).sin()
        })
        .collect();

    let config = FeatureConfig::default();

    c.bench_function("extract_features_5s", |b| {
        b.iter(|| {
            let _ = extract_features(black_box(&samples), black_box(&config));
        });
    });
}

criterion_group!(benches, bench_extract_features);
criterion_main!(benches);
