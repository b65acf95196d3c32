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

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};
use unit_alloc_solver::prelude::{AllocationOutcome, SolveStatus};

/// Result of one input file, detached from the weight type it was solved in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    path: PathBuf,
    status: SolveStatus,
    iterations: u64,
    cost: String,
    placement_cost: String,
    placements: Vec<(String, String)>,
}

impl Report {
    pub fn new<W: std::fmt::Display>(
        path: &Path,
        outcome: &AllocationOutcome<W>,
        placement_cost: &W,
    ) -> Self {
        let mut placements: Vec<(String, String)> = outcome
            .allocation()
            .placements()
            .map(|(s, t)| (s.value().clone(), t.value().clone()))
            .collect();
        placements.sort();
        Self {
            path: path.to_path_buf(),
            status: outcome.status(),
            iterations: outcome.iterations(),
            cost: outcome.cost().to_string(),
            placement_cost: placement_cost.to_string(),
            placements,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    #[inline]
    pub fn is_converged(&self) -> bool {
        self.status.is_converged()
    }

    #[inline]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    #[inline]
    pub fn placements(&self) -> &[(String, String)] {
        &self.placements
    }

    /// Writes one `source -> target` line per placement, preceded by a
    /// `# file` header line when `header` is set.
    pub fn write_term<O: Write>(&self, out: &mut O, header: bool) -> io::Result<()> {
        if header {
            writeln!(
                out,
                "# {} ({}, {} placements, weight {})",
                self.path.display(),
                self.status,
                self.placements.len(),
                self.placement_cost
            )?;
        }
        for (source, target) in &self.placements {
            writeln!(out, "{} -> {}", source, target)?;
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        tracing::info!(
            "{}: {} after {} rotations, {} placements, weight {}, augmented cost {}",
            self.path.display(),
            self.status,
            self.iterations,
            self.placements.len(),
            self.placement_cost,
            self.cost
        );
    }
}
