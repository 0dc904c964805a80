//! Benchmarks for wrapping and escape decoding.
//!
//! Run with: cargo bench -p tabula-text

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tabula_style::TextStyle;
use tabula_text::{LayoutOptions, Span, TextAlign, Whitespace, layout, parse_ansi};

const PARAGRAPH: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. 媒人 모ㄹ단ㅌ 🙊🙉🙈 Ut enim \
ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo.";

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("text/layout");
    let spans = [Span::raw(PARAGRAPH)];
    for width in [20usize, 80] {
        for (name, options) in [
            ("normal", LayoutOptions::default()),
            ("justify", LayoutOptions::default().align(TextAlign::Justify)),
            ("pre_wrap", LayoutOptions::default().whitespace(Whitespace::PreWrap)),
        ] {
            group.bench_with_input(BenchmarkId::new(name, width), &width, |b, &width| {
                b.iter(|| black_box(layout(black_box(&spans), width, &options)))
            });
        }
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("text/parse_ansi");
    let painted = TextStyle::new().bold().paint(PARAGRAPH);
    group.bench_function("plain", |b| {
        b.iter(|| black_box(parse_ansi(black_box(PARAGRAPH), &TextStyle::new())))
    });
    group.bench_function("styled", |b| {
        b.iter(|| black_box(parse_ansi(black_box(&painted), &TextStyle::new())))
    });
    group.finish();
}

criterion_group!(benches, bench_layout, bench_parse);
criterion_main!(benches);
