//! Echo throughput benchmarks.
//!
//! Measures building and rendering chains of increasing depth, with and
//! without a registered callback. Rendering is silent so the numbers do not
//! include subscriber I/O.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use errata::{Annotated, Fault, Reporter, ReporterConfig, error, warn};
use std::hint::black_box;

fn reporter() -> Reporter {
    Reporter::new(ReporterConfig {
        version: "v1.2.3".to_string(),
        color: false,
        ..Default::default()
    })
}

fn chain(depth: usize) -> Annotated {
    let mut node = error(std::io::Error::other("disk full"), &["save failed"]).kvs(&["volume", "/data"]);
    for i in 1..depth {
        node = warn(node, &[]).kv("layer", i);
    }
    node
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_chain_10", |b| {
        b.iter(|| black_box(chain(black_box(10))));
    });
}

fn bench_render(c: &mut Criterion) {
    let r = reporter();
    let mut group = c.benchmark_group("render_chain");
    for depth in [1usize, 5, 20, 50] {
        let fault = Fault::from(chain(depth));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &fault, |b, fault| {
            b.iter(|| black_box(r.render(fault)));
        });
    }
    group.finish();
}

fn bench_echo_with_callback(c: &mut Criterion) {
    let r = reporter().with_callback_warn(|meta, _| {
        black_box(meta.len());
    });
    c.bench_function("echo_silent_with_callback_10", |b| {
        b.iter(|| black_box(r.echo_silent(chain(10))));
    });
}

criterion_group!(benches, bench_build, bench_render, bench_echo_with_callback);
criterion_main!(benches);
