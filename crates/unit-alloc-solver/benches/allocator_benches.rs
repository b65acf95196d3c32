// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{hint::black_box, num::NonZeroU64};
use unit_alloc_model::prelude::{
    IndexedEdgeTable, Problem, ProblemBuilder, ScanEdgeTable, WeightedEdgeTable,
};
use unit_alloc_solver::prelude::{Allocator, AllocatorConfig};

/// `sources` single-unit sources, each with edges to `choices` random
/// single-slot targets.
fn random_problem<T: WeightedEdgeTable<Weight = OrderedFloat<f64>>>(
    sources: usize,
    targets: usize,
    choices: usize,
    seed: u64,
) -> Problem<T> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = ProblemBuilder::<T>::new();
    for j in 0..targets {
        builder.add_target(format!("t{j}"), 1);
    }
    for i in 0..sources {
        builder.add_source(format!("s{i}"), 1);
        let mut picked = Vec::with_capacity(choices);
        while picked.len() < choices.min(targets) {
            let j = rng.random_range(0..targets);
            if !picked.contains(&j) {
                picked.push(j);
            }
        }
        for j in picked {
            builder.add_edge(
                format!("s{i}"),
                format!("t{j}"),
                OrderedFloat(rng.random_range(0.0..1.0)),
            );
        }
    }
    builder.build().expect("random problem should be valid")
}

fn config() -> AllocatorConfig {
    AllocatorConfig::new().with_rational_precision(NonZeroU64::new(100).expect("non-zero"))
}

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for &(sources, targets) in &[(10, 10), (20, 25), (40, 50)] {
        let label = format!("{sources}x{targets}");

        let scan = random_problem::<ScanEdgeTable<OrderedFloat<f64>>>(sources, targets, 5, 1234);
        group.bench_with_input(BenchmarkId::new("scan", &label), &scan, |b, problem| {
            b.iter(|| {
                let allocator = Allocator::with_config(problem.clone(), config())
                    .expect("allocator should build");
                black_box(allocator.solve().expect("solve should succeed"));
            });
        });

        let indexed =
            random_problem::<IndexedEdgeTable<OrderedFloat<f64>>>(sources, targets, 5, 1234);
        group.bench_with_input(BenchmarkId::new("indexed", &label), &indexed, |b, problem| {
            b.iter(|| {
                let allocator = Allocator::with_config(problem.clone(), config())
                    .expect("allocator should build");
                black_box(allocator.solve().expect("solve should succeed"));
            });
        });
    }
    group.finish();
}

fn bench_cycle_search(c: &mut Criterion) {
    let problem = random_problem::<IndexedEdgeTable<OrderedFloat<f64>>>(40, 50, 5, 99);
    let allocator = Allocator::with_config(problem, config()).expect("allocator should build");
    let allocation = allocator.init_allocation();

    c.bench_function("find_negative_cycle_initial_40x50", |b| {
        b.iter(|| {
            black_box(
                allocator
                    .find_negative_cycle(black_box(&allocation))
                    .expect("search should succeed"),
            );
        });
    });
}

criterion_group!(benches, bench_backends, bench_cycle_search);
criterion_main!(benches);
