//! Benchmarks for parsing and resolution performance.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use solder_core::{parse, resolve, resolve_all, Circuit};

/// The eight-statement reference circuit.
const REFERENCE: &str = "\
123 -> x
456 -> y
x AND y -> d
x OR y -> e
x LSHIFT 2 -> f
y RSHIFT 2 -> g
NOT x -> h
NOT y -> i
";

/// Two-letter wire name for an index (aa, ab, ...).
fn wire_name(index: usize) -> String {
    let hi = b'a' + (index / 26) as u8;
    let lo = b'a' + (index % 26) as u8;
    String::from_utf8(vec![hi, lo]).unwrap()
}

/// Source for a single reference chain of the given depth.
fn chain_source(depth: usize) -> String {
    let mut source = format!("12345 -> {}\n", wire_name(0));
    for i in 1..=depth {
        source += &format!("{} AND 65535 -> {}\n", wire_name(i - 1), wire_name(i));
    }
    source
}

/// Source for `width` independent gates over two shared inputs.
fn wide_source(width: usize) -> String {
    let mut source = String::from("123 -> xin\n456 -> yin\n");
    for i in 0..width {
        let gate = if i % 2 == 0 { "AND" } else { "OR" };
        source += &format!("xin {gate} yin -> {}\n", wire_name(i));
    }
    source
}

fn load(source: &str) -> Circuit {
    let (circuit, _) = parse(source).unwrap();
    circuit
}

fn bench_parse(c: &mut Criterion) {
    let chain = chain_source(100);

    c.bench_function("parse_reference", |b| {
        b.iter(|| parse(black_box(REFERENCE)).unwrap())
    });

    c.bench_function("parse_chain_100", |b| {
        b.iter(|| parse(black_box(&chain)).unwrap())
    });
}

fn bench_resolve_chain(c: &mut Criterion) {
    for depth in [10usize, 50, 100] {
        let circuit = load(&chain_source(depth));
        let last = wire_name(depth);

        c.bench_function(&format!("resolve_chain_depth_{depth}"), |b| {
            b.iter_batched(
                || circuit.clone(),
                |mut circuit| resolve(&mut circuit, black_box(&last)).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_resolve_wide(c: &mut Criterion) {
    let circuit = load(&wide_source(100));

    c.bench_function("resolve_all_wide_100", |b| {
        b.iter_batched(
            || circuit.clone(),
            |mut circuit| resolve_all(black_box(&mut circuit)).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_resolve_reference(c: &mut Criterion) {
    let circuit = load(REFERENCE);

    c.bench_function("resolve_all_reference", |b| {
        b.iter_batched(
            || circuit.clone(),
            |mut circuit| resolve_all(black_box(&mut circuit)).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_resolve_memoized(c: &mut Criterion) {
    let mut circuit = load(&chain_source(100));
    let last = wire_name(100);
    resolve(&mut circuit, &last).unwrap();

    c.bench_function("resolve_memoized_depth_100", |b| {
        b.iter(|| resolve(black_box(&mut circuit), &last).unwrap())
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_resolve_chain,
    bench_resolve_wide,
    bench_resolve_reference,
    bench_resolve_memoized,
);

criterion_main!(benches);
