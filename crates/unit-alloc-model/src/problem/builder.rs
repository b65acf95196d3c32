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
    edge::WeightedEdge,
    err::ProblemError,
    problem::{DuplicateEdgePolicy, Problem},
    table::WeightedEdgeTable,
};
use std::collections::BTreeMap;
use unit_alloc_core::prelude::{SourceId, TargetId};

#[derive(Debug, Clone)]
pub struct ProblemBuilder<T> {
    sources: BTreeMap<SourceId, usize>,
    targets: BTreeMap<TargetId, usize>,
    table: T,
    duplicates: DuplicateEdgePolicy,
}

impl<T: WeightedEdgeTable> Default for ProblemBuilder<T> {
    fn default() -> Self {
        Self {
            sources: BTreeMap::new(),
            targets: BTreeMap::new(),
            table: T::default(),
            duplicates: DuplicateEdgePolicy::default(),
        }
    }
}

impl<T: WeightedEdgeTable> ProblemBuilder<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_sources<I>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = (SourceId, usize)>,
    {
        self.sources.clear();
        self.sources.extend(sources);
        self
    }

    #[inline]
    pub fn with_targets<I>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = (TargetId, usize)>,
    {
        self.targets.clear();
        self.targets.extend(targets);
        self
    }

    #[inline]
    pub fn with_table(mut self, table: T) -> Self {
        self.table = table;
        self
    }

    #[inline]
    pub fn with_duplicate_policy(mut self, policy: DuplicateEdgePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Sets the multiplicity of `id`, replacing any earlier value.
    #[inline]
    pub fn add_source(&mut self, id: impl Into<SourceId>, units: usize) -> &mut Self {
        self.sources.insert(id.into(), units);
        self
    }

    /// Sets the capacity of `id`, replacing any earlier value.
    #[inline]
    pub fn add_target(&mut self, id: impl Into<TargetId>, slots: usize) -> &mut Self {
        self.targets.insert(id.into(), slots);
        self
    }

    #[inline]
    pub fn add_edge(
        &mut self,
        from: impl Into<SourceId>,
        to: impl Into<TargetId>,
        weight: T::Weight,
    ) -> &mut Self {
        self.table
            .add_edge(WeightedEdge::real(from.into(), to.into(), weight));
        self
    }

    #[inline]
    pub fn extend_edges<I>(&mut self, edges: I) -> &mut Self
    where
        I: IntoIterator<Item = WeightedEdge<T::Weight>>,
    {
        for e in edges {
            self.table.add_edge(e);
        }
        self
    }

    #[inline]
    pub fn build(self) -> Result<Problem<T>, ProblemError> {
        Problem::with_policy(self.sources, self.table, self.targets, self.duplicates)
    }
}
