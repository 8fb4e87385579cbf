//! Highlight benchmarks.

use criterion::{black_box, BenchmarkId, Criterion};

use pattern_graph_core::highlight_component;

use super::generators::layered_graph;

pub fn bench_highlight_component(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight_component");

    for width in [50usize, 500, 2_000] {
        let (nodes, edges) = layered_graph(5, width, 2);
        let selected = nodes[0].id.clone();
        group.bench_with_input(BenchmarkId::from_parameter(edges.len()), &width, |b, _| {
            b.iter(|| highlight_component(black_box(&selected), black_box(&edges)))
        });
    }
    group.finish();
}
