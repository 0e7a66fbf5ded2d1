//! Benchmarks for tokenizing and rendering.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quill_render::{Overlay, RenderConfig, RenderCoordinator, SearchMatch};
use quill_syntax::{tokenize, GrammarRegistry, LanguageKind};

/// Generates a script of `lines` lines for benchmarking.
fn generate_script(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|i| match i % 4 {
            0 => format!("function handler{i}(event) {{"),
            1 => format!("    const value = event.data[{i}] ?? 'fallback'; // line {i}"),
            2 => "    return render(value, { key: true });".to_string(),
            _ => "}".to_string(),
        })
        .collect()
}

/// Benchmarks tokenizing a single line per language.
fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let registry = GrammarRegistry::global();

    let samples = [
        (LanguageKind::Scripting, "const total = items.reduce((a, b) => a + b, 0); // sum"),
        (LanguageKind::Markup, "<a href=\"/docs\" class=\"link\">Read &amp; learn</a>"),
        (LanguageKind::Stylesheet, ".card:hover { color: #ff0080; margin: 0 auto !important; }"),
        (LanguageKind::Docs, "- See [the guide](https://example.com) for **bold** `code`"),
    ];

    for (language, line) in samples {
        let grammar = registry.resolve(language);
        group.bench_with_input(BenchmarkId::new("line", language), line, |b, line| {
            b.iter(|| black_box(tokenize(black_box(line), grammar)))
        });
    }

    group.finish();
}

/// Benchmarks a full render with a cold and a warm cache.
fn bench_full_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_render");
    let document = generate_script(500);

    group.bench_function("cold_cache", |b| {
        b.iter_with_setup(
            || {
                let coordinator = RenderCoordinator::new(&RenderConfig::default()).unwrap();
                coordinator.attach(&document, LanguageKind::Scripting);
                coordinator
            },
            |coordinator| black_box(coordinator.render(&document, None).unwrap()),
        )
    });

    let coordinator = RenderCoordinator::new(&RenderConfig::default()).unwrap();
    coordinator.attach(&document, LanguageKind::Scripting);
    coordinator.render(&document, None).unwrap();

    group.bench_function("warm_cache", |b| {
        b.iter(|| black_box(coordinator.render(&document, None).unwrap()))
    });

    group.finish();
}

/// Benchmarks windowed rendering of large documents.
fn bench_windowed_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("windowed_render");

    for size in [1_000, 10_000, 100_000].iter() {
        let document = generate_script(*size);
        let coordinator = RenderCoordinator::new(&RenderConfig::default()).unwrap();
        coordinator.attach(&document, LanguageKind::Scripting);
        coordinator.scroll_to_line(size / 2);

        group.bench_with_input(BenchmarkId::new("middle", size), &document, |b, document| {
            b.iter(|| black_box(coordinator.render(document, None).unwrap()))
        });
    }

    group.finish();
}

/// Benchmarks rendering with a search overlay on every visible line.
fn bench_overlay_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay_render");

    let document = generate_script(10_000);
    let matches: Vec<SearchMatch> = (0..document.len())
        .filter(|i| i % 4 == 1)
        .map(|line| SearchMatch { line, column: 10, length: 5 })
        .collect();
    let overlay = Overlay::new(matches, Some(1_250));

    let coordinator = RenderCoordinator::new(&RenderConfig::default()).unwrap();
    coordinator.attach(&document, LanguageKind::Scripting);
    coordinator.scroll_to_line(5_000);

    group.bench_function("dense_matches", |b| {
        b.iter(|| black_box(coordinator.render(&document, Some(&overlay)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_full_render,
    bench_windowed_render,
    bench_overlay_render,
);
criterion_main!(benches);
