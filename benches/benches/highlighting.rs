//! Benchmarks for intra-line highlighting and width handling.

#![allow(missing_docs)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use zdiff_engine::{DiffRenderer, Layout, RenderOptions, Theme, clip_to_width, highlight_line_pair, visible_width};

const PAIRS: &[(&str, &str)] = &[
    ("    return a+b", "    return a + b"),
    ("extra something", "extra thing"),
    (
        "let total = items.iter().map(|x| x.price).sum::<u64>();",
        "let subtotal = items.iter().map(|item| item.price * item.qty).sum::<u64>();",
    ),
    (
        "fn render(&self, out: &mut String, width: usize) -> Result<()> {",
        "fn render_into(&self, out: &mut impl Write, width: u16) -> io::Result<()> {",
    ),
];

fn bench_highlight_line_pair(c: &mut Criterion) {
    let theme = Theme::ansi();
    let mut group = c.benchmark_group("highlight/line_pair");
    for (i, (old, new)) in PAIRS.iter().enumerate() {
        group.bench_function(format!("pair_{i}"), |b| {
            b.iter(|| highlight_line_pair(black_box(old), black_box(new), &theme));
        });
    }
    group.finish();
}

fn bench_width(c: &mut Criterion) {
    let theme = Theme::ansi();
    let (_, styled) = highlight_line_pair(PAIRS[3].0, PAIRS[3].1, &theme);

    c.bench_function("width/visible_width", |b| b.iter(|| visible_width(black_box(&styled))));
    c.bench_function("width/clip_to_width", |b| b.iter(|| clip_to_width(black_box(&styled), 40)));
}

fn bench_render(c: &mut Criterion) {
    let old: String = (0..500).map(|i| format!("line {i}: value = {}\n", i * 2)).collect();
    let new: String = (0..500)
        .map(|i| {
            if i % 25 == 0 {
                format!("line {i}: value = {} + delta\n", i * 2)
            } else {
                format!("line {i}: value = {}\n", i * 2)
            }
        })
        .collect();

    let mut group = c.benchmark_group("render/document");
    for layout in [Layout::Unified, Layout::SideBySide] {
        let renderer = DiffRenderer::new(
            Theme::ansi(),
            RenderOptions {
                layout,
                ..RenderOptions::default()
            },
        );
        group.bench_function(format!("{layout:?}"), |b| {
            b.iter(|| renderer.render(black_box(&old), black_box(&new), "old", "new"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_highlight_line_pair, bench_width, bench_render);
criterion_main!(benches);
