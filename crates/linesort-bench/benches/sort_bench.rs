//! Quicksort benchmarks.
//!
//! Compares the exercise quicksort against the standard library's
//! unstable sort across input shapes and sizes.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use linesort_core::{compare_lexicographic, compare_numeric, quicksort};

fn lcg(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

fn random_lines(count: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = seed;
    (0..count)
        .map(|_| format!("{}", lcg(&mut rng) % 100_000).into_bytes())
        .collect()
}

fn shaped_input(shape: &str, count: usize) -> Vec<Vec<u8>> {
    match shape {
        "random" => random_lines(count, 0xBE57_5EED),
        "sorted" => {
            let mut lines = random_lines(count, 0xBE57_5EED);
            lines.sort_unstable();
            lines
        }
        "reverse" => {
            let mut lines = random_lines(count, 0xBE57_5EED);
            lines.sort_unstable();
            lines.reverse();
            lines
        }
        _ => vec![b"equal".to_vec(); count],
    }
}

fn bench_quicksort_shapes(c: &mut Criterion) {
    let sizes: &[usize] = &[100, 1000, 5000];
    let mut group = c.benchmark_group("quicksort_shapes");

    for shape in ["random", "sorted", "reverse", "equal"] {
        for &size in sizes {
            let input = shaped_input(shape, size);
            group.bench_with_input(
                BenchmarkId::new(shape, size),
                &input,
                |b, input| {
                    b.iter_batched(
                        || input.clone(),
                        |mut lines| quicksort(&mut lines, |a, b| compare_lexicographic(a, b)),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

fn bench_against_std_sort(c: &mut Criterion) {
    let input = random_lines(5000, 0xBE57_5EED);
    let mut group = c.benchmark_group("vs_std_sort");

    group.bench_function("quicksort", |b| {
        b.iter_batched(
            || input.clone(),
            |mut lines| quicksort(&mut lines, |a, b| compare_lexicographic(a, b)),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("sort_unstable_by", |b| {
        b.iter_batched(
            || input.clone(),
            |mut lines| lines.sort_unstable_by(|a, b| compare_lexicographic(a, b)),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_numeric_comparator(c: &mut Criterion) {
    let input = random_lines(1000, 0x0DDC_0FFE);
    let mut group = c.benchmark_group("comparator");

    group.bench_function("lexicographic_1000", |b| {
        b.iter_batched(
            || input.clone(),
            |mut lines| quicksort(&mut lines, |a, b| compare_lexicographic(a, b)),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("numeric_1000", |b| {
        b.iter_batched(
            || input.clone(),
            |mut lines| quicksort(&mut lines, |a, b| compare_numeric(a, b)),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_quicksort_shapes,
    bench_against_std_sort,
    bench_numeric_comparator
);
criterion_main!(benches);
