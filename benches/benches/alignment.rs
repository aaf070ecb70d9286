//! Benchmarks for line matching and replace-block alignment.
//!
//! Performance-critical paths:
//! - `align_replace_block`: exact table for small blocks, positional pairing past the cell guard
//! - `near_cell_limit`: the largest exact table, with and without length pruning
//! - `diff_lines`: matching-blocks and Myers line matchers over whole documents

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use zdiff_engine::{LineAlgorithm, align_replace_block};

fn block(n: usize, edited: bool) -> Vec<String> {
    (0..n)
        .map(|i| {
            if edited && i % 3 == 0 {
                format!("    let value_{i} = compute(input, {i}) + offset;")
            } else {
                format!("    let value_{i} = compute(input, {i});")
            }
        })
        .collect()
}

fn refs(lines: &[String]) -> Vec<&str> {
    lines.iter().map(String::as_str).collect()
}

fn bench_align_replace_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("align/replace_block");

    // 10x10 .. 200x200 stay on the exact path; 300x300 crosses the guard
    for size in [10usize, 50, 100, 200, 300] {
        let old = block(size, false);
        let new = block(size, true);
        let (old_refs, new_refs) = (refs(&old), refs(&new));

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| align_replace_block(black_box(&old_refs), black_box(&new_refs), 0, 0));
        });
    }

    group.finish();
}

fn bench_near_cell_limit(c: &mut Criterion) {
    let mut group = c.benchmark_group("align/near_cell_limit");
    group.sample_size(10);

    // 220x220 = 48,400 cells, the largest square block on the exact path
    let code_line = |i: usize, suffix: &str| {
        format!("        let response_{i} = client.request(Method::POST, &endpoint).json(&payload_{i}){suffix}.await?;")
    };
    let old: Vec<String> = (0..220).map(|i| code_line(i, "")).collect();
    let new: Vec<String> = (0..220).map(|i| code_line(i, ".timeout(limit)")).collect();
    let lopsided: Vec<String> = (0..220).map(|i| format!("x{i}")).collect();

    for (name, new_lines) in [("similar", &new), ("lopsided", &lopsided)] {
        let (old_refs, new_refs) = (refs(&old), refs(new_lines));
        group.throughput(Throughput::Elements(48_400));
        group.bench_function(name, |b| {
            b.iter(|| align_replace_block(black_box(&old_refs), black_box(&new_refs), 0, 0));
        });
    }

    group.finish();
}

fn bench_line_matchers(c: &mut Criterion) {
    let mut group = c.benchmark_group("align/diff_lines");
    let old = block(2_000, false);
    let new = block(2_000, true);
    let (old_refs, new_refs) = (refs(&old), refs(&new));

    for algorithm in [LineAlgorithm::MatchingBlocks, LineAlgorithm::Myers] {
        group.bench_function(format!("{algorithm:?}"), |b| {
            b.iter(|| algorithm.diff_lines(black_box(&old_refs), black_box(&new_refs)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_align_replace_block,
    bench_near_cell_limit,
    bench_line_matchers
);
criterion_main!(benches);
