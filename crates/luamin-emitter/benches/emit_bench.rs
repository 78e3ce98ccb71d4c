//! Emitter benchmarks.
//!
//! Trees are built once outside the timed loop; only regeneration is measured.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use luamin_ast::{BinaryOperator, Chunk, Node};
use luamin_emitter::{Options, regenerate_chunk};

/// `local function fN(a, b) if a > b then return {a, b, n = N} end return a + b end`
fn generate_chunk(functions: usize, statements: usize) -> Chunk {
    let mut body = Vec::with_capacity(functions);
    for f in 0..functions {
        let mut fn_body = Vec::with_capacity(statements + 1);
        for s in 0..statements {
            let table = Node::table(vec![
                Node::field(Node::name("a")),
                Node::field(Node::name("b")),
                Node::named_field("n", Node::number(s.to_string())),
            ]);
            fn_body.push(Node::if_then(
                Node::binary(BinaryOperator::Gt, Node::name("a"), Node::name("b")),
                vec![Node::ret(vec![table])],
                None,
            ));
        }
        fn_body.push(Node::ret(vec![Node::binary(
            BinaryOperator::Add,
            Node::name("a"),
            Node::name("b"),
        )]));
        body.push(
            Node::local_function(
                format!("f{f}"),
                vec![Node::name("a"), Node::name("b")],
                fn_body,
            )
            .with_leading_comment(format!("-- function {f}")),
        );
    }
    Chunk::new(body)
}

fn bench_emit_small(c: &mut Criterion) {
    let chunk = generate_chunk(5, 3);
    c.bench_function("emit_small", |b| {
        b.iter(|| black_box(regenerate_chunk(&chunk, Options::default())))
    });
}

/// Benchmark: comment placement overhead
fn bench_emit_with_comments(c: &mut Criterion) {
    let chunk = generate_chunk(50, 5);
    let mut group = c.benchmark_group("emitter_comments");
    for keep_comments in [false, true] {
        let options = Options {
            keep_comments,
            ..Options::default()
        };
        group.bench_with_input(
            BenchmarkId::new("keep_comments", keep_comments),
            &options,
            |b, options| b.iter(|| black_box(regenerate_chunk(&chunk, *options))),
        );
    }
    group.finish();
}

/// Benchmark: emit throughput for various sizes
fn bench_emit_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("emitter_throughput");
    for (functions, statements) in [(10, 5), (50, 5), (100, 10)] {
        let chunk = generate_chunk(functions, statements);
        let bytes = regenerate_chunk(&chunk, Options::default())
            .map(|out| out.text.len() as u64)
            .unwrap_or_default();
        let label = format!("{functions}fn_{statements}stmt");
        group.throughput(Throughput::Bytes(bytes));
        group.bench_with_input(BenchmarkId::new("emit", &label), &chunk, |b, chunk| {
            b.iter(|| black_box(regenerate_chunk(chunk, Options::default())))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_emit_small,
    bench_emit_with_comments,
    bench_emit_throughput
);
criterion_main!(benches);
