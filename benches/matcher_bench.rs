//! Matcher benchmarks
//!
//! Scores a noisy candidate against a synthetic corpus of full-size columns.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scroll_locator::{dice_coefficient, ColumnMatcher, Normalizer, ReferenceColumn};

/// Deterministic pseudo-random Hebrew text
fn column_text(seed: u32, len: usize) -> String {
    let letters: Vec<char> = ('\u{05D0}'..='\u{05EA}').collect();
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            letters[state as usize % letters.len()]
        })
        .collect()
}

fn corpus(columns: u32) -> Vec<ReferenceColumn> {
    (1..=columns)
        .map(|n| ReferenceColumn {
            column_number: n,
            text: column_text(n, 1500),
        })
        .collect()
}

fn bench_dice(c: &mut Criterion) {
    let a = column_text(1, 1500);
    let b = column_text(2, 1500);
    c.bench_function("dice_coefficient_1500", |bench| {
        bench.iter(|| dice_coefficient(black_box(&a), black_box(&b)))
    });
}

fn bench_best_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_match");
    for columns in [50u32, 250] {
        let matcher = ColumnMatcher::new(&corpus(columns));
        let candidate = Normalizer::hebrew().normalize(&column_text(columns / 2, 900));
        group.bench_with_input(BenchmarkId::from_parameter(columns), &candidate, |bench, text| {
            bench.iter(|| matcher.best_match(black_box(text)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dice, bench_best_match);
criterion_main!(benches);
