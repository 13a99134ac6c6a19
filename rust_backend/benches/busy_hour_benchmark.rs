use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;

use bha_rust::algorithms::BusyHourAnalyzer;
use bha_rust::core::MINUTES_PER_DAY;

/// Deterministic synthetic population with a mid-morning peak and slight
/// per-day variation, enough structure to keep the argmax honest.
fn synthetic_matrix(days: usize) -> Array2<f64> {
    let mut matrix = Array2::zeros((MINUTES_PER_DAY, days));
    for day in 0..days {
        let phase = (day % 7) as f64 * 3.0;
        for minute in 0..MINUTES_PER_DAY {
            let x = (minute as f64 - 630.0 - phase) / 180.0;
            matrix[[minute, day]] = 5.0 * (-x * x).exp() + 0.1;
        }
    }
    matrix
}

fn bench_analyze_full_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("busy_hour_analysis");

    for days in [1usize, 31, 365] {
        let matrix = synthetic_matrix(days);
        group.bench_with_input(BenchmarkId::new("full_day", days), &matrix, |b, m| {
            b.iter(|| BusyHourAnalyzer::analyze(black_box(m.view()), 0.0, 24.0));
        });
    }

    group.finish();
}

fn bench_analyze_restricted_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("busy_hour_analysis");

    let matrix = synthetic_matrix(31);
    group.bench_function("business_hours_31_days", |b| {
        b.iter(|| BusyHourAnalyzer::analyze(black_box(matrix.view()), 8.0, 18.0));
    });

    group.finish();
}

criterion_group!(benches, bench_analyze_full_day, bench_analyze_restricted_window);
criterion_main!(benches);
