//! Criterion benchmarks comparing the fast path with the tokenizing property parser.
//!
//! Each input is parsed once per iteration through a parser with fast paths enabled and
//! through one with them disabled.

use core::hint::black_box;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use css::CssParser;
use css::parser::ParserContext;
use css::values::PropertyId;

const INPUTS: &[(&str, PropertyId, &str)] = &[
    ("length", PropertyId::Width, "128px"),
    ("percent", PropertyId::PaddingLeft, "12.5%"),
    ("hex_color", PropertyId::Color, "#336699"),
    ("rgba_color", PropertyId::BackgroundColor, "rgba(10, 20, 30, 0.5)"),
    ("keyword", PropertyId::Display, "block"),
    ("calc", PropertyId::Width, "calc(100% - 2em)"),
];

fn bench_value_parsing(criterion: &mut Criterion) {
    let fast = CssParser::default();
    let general = CssParser::new(ParserContext::default().without_fast_paths());
    let mut group = criterion.benchmark_group("value_parsing");
    for &(name, property, text) in INPUTS {
        group.bench_with_input(BenchmarkId::new("fast_path", name), &text, |bencher, input| {
            bencher.iter(|| black_box(fast.parse_single_value(property, black_box(input))));
        });
        group.bench_with_input(BenchmarkId::new("general_path", name), &text, |bencher, input| {
            bencher.iter(|| black_box(general.parse_single_value(property, black_box(input))));
        });
    }
    group.finish();
}

fn bench_style_sheet(criterion: &mut Criterion) {
    let parser = CssParser::default();
    let sheet = (0..200)
        .map(|index| format!(".item-{index} {{ width: {index}px; color: #{:06x}; margin: 1px 2px }}", index * 997))
        .collect::<String>();
    criterion.bench_function("style_sheet_200_rules", |bencher| {
        bencher.iter(|| black_box(parser.parse_style_sheet(black_box(&sheet))));
    });
}

criterion_group!(benches, bench_value_parsing, bench_style_sheet);
criterion_main!(benches);
