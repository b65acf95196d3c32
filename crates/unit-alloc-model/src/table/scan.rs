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
use unit_alloc_core::prelude::{SourceNode, TargetNode, Weight};

/// Edge table without auxiliary index. Every lookup scans all edges, which is
/// fine for small instances and keeps the structure trivially consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEdgeTable<W> {
    edges: Vec<WeightedEdge<W>>,
}

impl<W> Default for ScanEdgeTable<W> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<W> ScanEdgeTable<W> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[WeightedEdge<W>] {
        &self.edges
    }
}

impl<W: Weight> WeightedEdgeTable for ScanEdgeTable<W> {
    type Weight = W;

    #[inline]
    fn add_edge(&mut self, edge: WeightedEdge<W>) {
        self.edges.push(edge);
    }

    #[inline]
    fn edges_from<'a>(
        &'a self,
        from: &'a SourceNode,
    ) -> impl Iterator<Item = &'a WeightedEdge<W>> + 'a {
        self.edges.iter().filter(move |e| e.from() == from)
    }

    #[inline]
    fn weight_of(&self, from: &SourceNode, to: &TargetNode) -> Option<&W> {
        self.edges
            .iter()
            .find(|e| e.from() == from && e.to() == to)
            .map(|e| e.weight())
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

impl<W> FromIterator<WeightedEdge<W>> for ScanEdgeTable<W> {
    fn from_iter<I: IntoIterator<Item = WeightedEdge<W>>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<W> Extend<WeightedEdge<W>> for ScanEdgeTable<W> {
    fn extend<I: IntoIterator<Item = WeightedEdge<W>>>(&mut self, iter: I) {
        self.edges.extend(iter);
    }
}
