use criterion::{Criterion, criterion_group, criterion_main};
use nevula_syntax::{add_text_spans, lexer::lex, parse_markup};

const INITIAL_SAMPLE: &str = "> **Hello world!**

**__inside__ __inside again__**

``code``

** ~~not~~ a complete marker! __complete__";

fn sample() -> String {
    INITIAL_SAMPLE.repeat(7)
}

fn bench_simple_markup(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_markup");
    let content = sample();

    group.bench_function("lex", |b| {
        b.iter(|| std::hint::black_box(lex(std::hint::black_box(&content))));
    });

    group.bench_function("parse_markup", |b| {
        b.iter(|| std::hint::black_box(parse_markup(std::hint::black_box(&content))));
    });

    group.bench_function("parse_markup_with_text_spans", |b| {
        b.iter(|| {
            let tree = parse_markup(std::hint::black_box(&content));
            std::hint::black_box(add_text_spans(tree))
        });
    });

    group.finish();
}

fn bench_unclosed_raw_zones(c: &mut Criterion) {
    let mut group = c.benchmark_group("unclosed_raw_zones");
    group.sample_size(20);

    // Every opener fails its closer search; this stays linear only while
    // failed searches are remembered.
    let content = "[a: text [b: ".repeat(2000);
    group.bench_function("parse_markup", |b| {
        b.iter(|| std::hint::black_box(parse_markup(std::hint::black_box(&content))));
    });

    group.finish();
}

criterion_group!(benches, bench_simple_markup, bench_unclosed_raw_zones);
criterion_main!(benches);
