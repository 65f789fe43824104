use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ctc_lexer::{tokenize, OperatorRegistry};
use ctc_parser::parser::{parse_with, validate};

const OPERATORS: [&str; 5] = ["or", "and", "implies", "excludes", "requires"];

/// A left-nested chain of parenthesized groups with `n` features.
fn generate_constraint(n: usize) -> String {
    let mut expr = String::from("F0");
    for i in 1..n {
        let op = OPERATORS[i % OPERATORS.len()];
        if i % 3 == 0 {
            expr = format!("({expr}) {op} not F{i}");
        } else {
            expr = format!("{expr} {op} F{i}");
        }
    }
    expr
}

fn bench_parse(c: &mut Criterion) {
    let registry = OperatorRegistry::default();
    let mut group = c.benchmark_group("parse");

    for size in [8, 64, 256] {
        let input = generate_constraint(size);
        group.throughput(Throughput::Bytes(input.len() as u64));

        group.bench_with_input(BenchmarkId::new("tokenize", size), &input, |b, input| {
            b.iter(|| tokenize(black_box(input)).unwrap())
        });

        let tokens = tokenize(&input).unwrap();
        group.bench_with_input(BenchmarkId::new("validate", size), &tokens, |b, tokens| {
            b.iter(|| validate(black_box(tokens), &registry).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("full", size), &input, |b, input| {
            b.iter(|| parse_with(black_box(input), &registry).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
