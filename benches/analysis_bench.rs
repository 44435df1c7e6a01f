//! Benchmarks for the carelog analytics pipeline
//!
//! Run with: cargo bench

use carelog::analysis::{detect_anomalies, lagged_correlation, pearson, Thresholds};
use carelog::extract::{Extractor, InputMode};
use carelog::insights::InsightGenerator;
use carelog::journal::types::{JournalEntry, Metric};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const DAY: i64 = 86_400_000;

/// A dense synthetic history: every metric present, symptoms and
/// medications on alternating days
fn create_history(days: usize) -> Vec<JournalEntry> {
    (0..days)
        .map(|i| {
            let phase = (i as f64 * std::f64::consts::PI / 7.0).sin();
            let mut e = JournalEntry::new(i as i64 * DAY)
                .mood(3.0 + 1.5 * phase)
                .energy(3.0 - 1.5 * phase)
                .pain(4.0 + 3.0 * phase)
                .sleep_hours(7.0 + phase);
            e.id = format!("bench-{:04}", i);
            if i % 2 == 0 {
                e.symptoms.insert("headache".to_string());
                e.medications.insert("ibuprofen".to_string());
            } else {
                e.symptoms.insert("fatigue".to_string());
            }
            e
        })
        .collect()
}

fn bench_pearson(c: &mut Criterion) {
    let mut group = c.benchmark_group("pearson");

    for size in [30, 90, 365] {
        let x: Vec<f64> = (0..size).map(|i| (i as f64 * 0.1).sin()).collect();
        let y: Vec<f64> = (0..size).map(|i| (i as f64 * 0.1).cos()).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("pearson_{}", size), |b| {
            b.iter(|| pearson(black_box(&x), black_box(&y)))
        });
    }

    group.finish();
}

fn bench_analyzers(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzers");
    let th = Thresholds::default();

    for size in [30, 90, 365] {
        let history = create_history(size);

        group.bench_function(format!("lagged_correlation_{}", size), |b| {
            b.iter(|| {
                lagged_correlation(
                    black_box(&history),
                    Metric::Mood,
                    Metric::Pain,
                    &[0, 1, 2],
                    0.3,
                    &th,
                )
            })
        });

        group.bench_function(format!("detect_anomalies_{}", size), |b| {
            b.iter(|| detect_anomalies(black_box(&history), &th))
        });
    }

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let extractor = Extractor::new();

    let note = "She seemed tired today, gave her tylenol around noon for the \
                headache, slept about 7 hours, maybe a little nauseous after dinner";

    group.bench_function("extract_note", |b| {
        b.iter(|| extractor.extract(black_box(note), 0, InputMode::Text))
    });

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);

    for size in [30, 90, 365] {
        let history = create_history(size);
        let generator = InsightGenerator::new();

        group.bench_function(format!("generate_insights_{}", size), |b| {
            b.iter(|| generator.generate(black_box(&history)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_pearson,
    bench_analyzers,
    bench_extraction,
    bench_full_pipeline
);
criterion_main!(benches);
