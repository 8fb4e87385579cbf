//! Layout benchmarks.

use criterion::{black_box, BenchmarkId, Criterion};

use pattern_graph_core::{compute_layout, Discipline, LayoutSpec};

use super::generators::layered_graph;

pub fn bench_hierarchical_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchical_layout");
    let spec = LayoutSpec::new(Discipline::HierarchicalBottomUp);

    for width in [10usize, 50, 200] {
        let (nodes, edges) = layered_graph(4, width, 3);
        group.bench_with_input(BenchmarkId::from_parameter(width * 4), &width, |b, _| {
            b.iter(|| compute_layout(black_box(&nodes), black_box(&edges), &spec, None))
        });
    }
    group.finish();
}

pub fn bench_radial_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("radial_layout");
    let spec = LayoutSpec::new(Discipline::RadialOut);

    for width in [10usize, 50, 200] {
        let (nodes, edges) = layered_graph(4, width, 3);
        group.bench_with_input(BenchmarkId::from_parameter(width * 4), &width, |b, _| {
            b.iter(|| compute_layout(black_box(&nodes), black_box(&edges), &spec, None))
        });
    }
    group.finish();
}
