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

pub mod builder;
pub mod loader;

use crate::{
    err::{
        DuplicateEdgeError, EmptyEdgeTableError, OrphanSourceError, ProblemError,
        ReservedSentinelError, UnknownSourceError, UnknownTargetError,
    },
    table::WeightedEdgeTable,
};
use num_traits::Zero;
use std::collections::{BTreeMap, BTreeSet};
use unit_alloc_core::prelude::{SourceId, SourceNode, TargetId, TargetNode};

/// What to do when the same `(from, to)` pair is given more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DuplicateEdgePolicy {
    /// Refuse the input.
    #[default]
    Reject,
    /// Accept the input; lookups use the first edge of the pair.
    KeepFirst,
}

/// A validated, unaugmented allocation problem: source multiplicities,
/// target capacities and the real edges between them.
#[derive(Debug, Clone)]
pub struct Problem<T> {
    sources: BTreeMap<SourceId, usize>,
    table: T,
    targets: BTreeMap<TargetId, usize>,
}

impl<T: WeightedEdgeTable> Problem<T> {
    #[inline]
    pub fn new(
        sources: BTreeMap<SourceId, usize>,
        table: T,
        targets: BTreeMap<TargetId, usize>,
    ) -> Result<Self, ProblemError> {
        Self::with_policy(sources, table, targets, DuplicateEdgePolicy::default())
    }

    pub fn with_policy(
        sources: BTreeMap<SourceId, usize>,
        table: T,
        targets: BTreeMap<TargetId, usize>,
        duplicates: DuplicateEdgePolicy,
    ) -> Result<Self, ProblemError> {
        if table.is_empty() {
            return Err(EmptyEdgeTableError.into());
        }

        let mut seen = BTreeSet::new();
        let mut has_edge = BTreeSet::new();
        let mut negative = 0usize;
        for edge in table.iter() {
            let (from, to) = match (edge.from(), edge.to()) {
                (SourceNode::Real(from), TargetNode::Real(to)) => (from, to),
                (from, to) => {
                    return Err(ReservedSentinelError::new(from.clone(), to.clone()).into());
                }
            };
            if !sources.contains_key(from) {
                return Err(UnknownSourceError::new(from.clone()).into());
            }
            if !targets.contains_key(to) {
                return Err(UnknownTargetError::new(to.clone()).into());
            }
            if !seen.insert((from, to)) && duplicates == DuplicateEdgePolicy::Reject {
                return Err(DuplicateEdgeError::new(edge.from().clone(), edge.to().clone()).into());
            }
            if *edge.weight() < T::Weight::zero() {
                negative += 1;
            }
            has_edge.insert(from);
        }

        if let Some(orphan) = sources.keys().find(|s| !has_edge.contains(s)) {
            return Err(OrphanSourceError::new(SourceNode::Real(orphan.clone())).into());
        }

        if negative > 0 {
            tracing::warn!(
                "{} edge(s) carry a negative weight; the unassigned penalty is derived from the weight sum and may not dominate them",
                negative
            );
        }

        Ok(Self {
            sources,
            table,
            targets,
        })
    }

    #[inline]
    pub fn sources(&self) -> &BTreeMap<SourceId, usize> {
        &self.sources
    }

    #[inline]
    pub fn targets(&self) -> &BTreeMap<TargetId, usize> {
        &self.targets
    }

    #[inline]
    pub fn table(&self) -> &T {
        &self.table
    }

    #[inline]
    pub fn source_units(&self) -> usize {
        self.sources.values().sum()
    }

    #[inline]
    pub fn target_capacity(&self) -> usize {
        self.targets.values().sum()
    }

    /// Consumes the problem. Callers that want to keep it should clone first.
    #[inline]
    pub fn into_parts(
        self,
    ) -> (
        BTreeMap<SourceId, usize>,
        T,
        BTreeMap<TargetId, usize>,
    ) {
        (self.sources, self.table, self.targets)
    }

    /// Returns a copy with the capacity of `target` replaced.
    pub fn with_capacity(&self, target: &TargetId, capacity: usize) -> Option<Self> {
        let mut next = self.clone();
        *next.targets.get_mut(target)? = capacity;
        Some(next)
    }
}
