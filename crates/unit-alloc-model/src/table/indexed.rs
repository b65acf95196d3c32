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

use crate::{edge::WeightedEdge, table::WeightedEdgeTable};
use fxhash::FxHashMap;
use unit_alloc_core::prelude::{SourceNode, TargetNode, Weight};

/// Edge table with hash indexes on `from` and, per source, on `to`.
///
/// Edges live in one vector; the indexes hold positions into it. The target
/// index records the first position seen for a pair, so lookups agree with
/// [`ScanEdgeTable`](crate::table::scan::ScanEdgeTable) when duplicates exist.
#[derive(Debug, Clone)]
pub struct IndexedEdgeTable<W> {
    edges: Vec<WeightedEdge<W>>,
    by_source: FxHashMap<SourceNode, SourceIndex>,
}

#[derive(Debug, Clone, Default)]
struct SourceIndex {
    positions: Vec<usize>,
    by_target: FxHashMap<TargetNode, usize>,
}

impl<W> Default for IndexedEdgeTable<W> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            by_source: FxHashMap::default(),
        }
    }
}

impl<W> IndexedEdgeTable<W> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
            by_source: FxHashMap::default(),
        }
    }

    fn push(&mut self, edge: WeightedEdge<W>) {
        let idx = self.edges.len();
        let index = self.by_source.entry(edge.from().clone()).or_default();
        index.positions.push(idx);
        index.by_target.entry(edge.to().clone()).or_insert(idx);
        self.edges.push(edge);
    }
}

impl<W: Weight> WeightedEdgeTable for IndexedEdgeTable<W> {
    type Weight = W;

    #[inline]
    fn add_edge(&mut self, edge: WeightedEdge<W>) {
        self.push(edge);
    }

    #[inline]
    fn edges_from<'a>(
        &'a self,
        from: &'a SourceNode,
    ) -> impl Iterator<Item = &'a WeightedEdge<W>> + 'a {
        self.by_source
            .get(from)
            .into_iter()
            .flat_map(|index| index.positions.iter())
            .map(move |&i| &self.edges[i])
    }

    #[inline]
    fn weight_of(&self, from: &SourceNode, to: &TargetNode) -> Option<&W> {
        let i = *self.by_source.get(from)?.by_target.get(to)?;
        Some(self.edges[i].weight())
    }

    #[inline]
    fn iter(&self) -> impl Iterator<Item = &WeightedEdge<W>> {
        self.edges.iter()
    }

    #[inline]
    fn len(&self) -> usize {
        self.edges.len()
    }

    fn transform_weights<F>(&mut self, mut f: F)
    where
        F: FnMut(&W) -> W,
    {
        for e in self.edges.iter_mut() {
            let w = f(e.weight());
            e.set_weight(w);
        }
    }
}

impl<W> FromIterator<WeightedEdge<W>> for IndexedEdgeTable<W> {
    fn from_iter<I: IntoIterator<Item = WeightedEdge<W>>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<W> Extend<WeightedEdge<W>> for IndexedEdgeTable<W> {
    fn extend<I: IntoIterator<Item = WeightedEdge<W>>>(&mut self, iter: I) {
        for edge in iter {
            self.push(edge);
        }
    }
}
