//! Benchmark suite for pattern-graph-core.
//!
//! Covers the CPU-bound, synchronous parts of the engine on generated
//! layered graphs:
//! - hierarchical layout (crossing reduction dominates)
//! - radial layout
//! - connected-component highlighting
//! - accumulator merge
//!
//! ```bash
//! cargo bench --package pattern-graph-core
//! cargo bench --package pattern-graph-core -- hierarchical
//! ```

use criterion::{criterion_group, criterion_main, Criterion};
use std::time::Duration;

mod generators;

mod highlight_benches;
mod layout_benches;
mod merge_benches;

criterion_group!(
    name = layout_bench_group;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(5));
    targets = layout_benches::bench_hierarchical_layout, layout_benches::bench_radial_layout
);

criterion_group!(
    name = highlight_bench_group;
    config = Criterion::default()
        .sample_size(100)
        .measurement_time(Duration::from_secs(3));
    targets = highlight_benches::bench_highlight_component
);

criterion_group!(
    name = merge_bench_group;
    config = Criterion::default()
        .sample_size(100)
        .measurement_time(Duration::from_secs(3));
    targets = merge_benches::bench_merge
);

criterion_main!(layout_bench_group, highlight_bench_group, merge_bench_group);
