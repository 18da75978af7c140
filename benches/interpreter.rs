//! Performance benchmarks for the full pipeline.
//!
//! Run with: cargo bench

use std::fmt::Write as _;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use datalog_eval::Interpreter;
use datalog_syntax::parse_program;

fn run(source: &str) -> Interpreter {
    let program = parse_program(source).unwrap();
    let mut interpreter = Interpreter::new(program);
    interpreter.interpret(&mut std::io::sink()).unwrap();
    interpreter
}

/// Transitive closure over a linear chain 1→2→…→n.
fn closure_source(n: u32) -> String {
    let mut source = String::from("Schemes:\n  e(X,Y)\n  tc(X,Y)\nFacts:\n");
    for i in 1..n {
        writeln!(source, "  e('{}','{}').", i, i + 1).unwrap();
    }
    source.push_str("Rules:\n  tc(X,Y) :- e(X,Y).\n  tc(X,Y) :- e(X,Z),tc(Z,Y).\n");
    source.push_str("Queries:\n  tc('1',W)?\n");
    source
}

fn bench_transitive_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("transitive_closure");

    for &n in &[10, 25, 50] {
        let source = closure_source(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &source, |b, source| {
            b.iter(|| run(source));
        });
    }

    group.finish();
}

/// A wide single-pass join: out(X,Z) from r(X,Y), s(Y,Z).
fn join_source(n: u32) -> String {
    let mut source = String::from("Schemes:\n  r(X,Y)\n  s(Y,Z)\n  out(X,Z)\nFacts:\n");
    for i in 0..n {
        writeln!(source, "  r('a{i}','b{}').", i % 10).unwrap();
        writeln!(source, "  s('b{}','c{i}').", i % 10).unwrap();
    }
    source.push_str("Rules:\n  out(X,Z) :- r(X,Y),s(Y,Z).\nQueries:\n  out(X,Z)?\n");
    source
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");

    for &n in &[50, 100] {
        let source = join_source(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &source, |b, source| {
            b.iter(|| run(source));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transitive_closure, bench_join);
criterion_main!(benches);
