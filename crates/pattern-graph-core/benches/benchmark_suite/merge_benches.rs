//! Accumulator merge benchmarks.

use criterion::{black_box, BatchSize, Criterion};

use pattern_graph_core::GraphState;

use super::generators::trace_result;

pub fn bench_merge(c: &mut Criterion) {
    let result = trace_result(4, 250, 3);

    c.bench_function("merge_into_empty", |b| {
        b.iter_batched(GraphState::new, |mut state| state.merge(black_box(&result)), BatchSize::SmallInput)
    });

    let mut warm = GraphState::new();
    warm.merge(&result);
    c.bench_function("merge_reinforce", |b| {
        b.iter_batched(|| warm.clone(), |mut state| state.merge(black_box(&result)), BatchSize::SmallInput)
    });
}
