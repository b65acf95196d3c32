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

use crate::{
    args::{Opts, TableKind},
    report::Report,
};
use anyhow::{Context, Result};
use num_rational::BigRational;
use ordered_float::OrderedFloat;
use std::path::Path;
use unit_alloc_model::prelude::{IndexedEdgeTable, ProblemLoader, ScanEdgeTable, WeightedEdgeTable};
use unit_alloc_solver::prelude::{Allocator, AllocatorConfig};

/// Loads and solves one file. Rational precision selects exact arithmetic,
/// otherwise weights stay `f64`.
pub fn solve_path(path: &Path, opts: &Opts) -> Result<Report> {
    let config = opts.allocator_config();
    let exact = config.rational_precision.is_some();
    match (exact, opts.table) {
        (true, TableKind::Indexed) => {
            solve_with::<IndexedEdgeTable<BigRational>>(path, opts, config)
        }
        (true, TableKind::Scan) => solve_with::<ScanEdgeTable<BigRational>>(path, opts, config),
        (false, TableKind::Indexed) => {
            solve_with::<IndexedEdgeTable<OrderedFloat<f64>>>(path, opts, config)
        }
        (false, TableKind::Scan) => {
            solve_with::<ScanEdgeTable<OrderedFloat<f64>>>(path, opts, config)
        }
    }
}

fn solve_with<T: WeightedEdgeTable>(
    path: &Path,
    opts: &Opts,
    config: AllocatorConfig,
) -> Result<Report> {
    let problem = ProblemLoader::new()
        .allow_duplicate_edges(opts.allow_duplicate_edges)
        .from_path::<T>(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    tracing::debug!(
        "Loaded {}: {} sources ({} units), {} targets ({} slots), {} edges",
        path.display(),
        problem.sources().len(),
        problem.source_units(),
        problem.targets().len(),
        problem.target_capacity(),
        problem.table().len()
    );

    let allocator = Allocator::with_config(problem, config)
        .with_context(|| format!("failed to prepare {}", path.display()))?;
    let outcome = allocator
        .solve()
        .with_context(|| format!("failed to solve {}", path.display()))?;
    let placement_cost = allocator.placement_cost(outcome.allocation())?;

    let report = Report::new(path, &outcome, &placement_cost);
    report.log_summary();
    Ok(report)
}
