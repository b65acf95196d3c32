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

use unit_alloc_core::prelude::{SourceId, SourceNode, TargetId, TargetNode};

/// A weighted `(from, to)` pair. Either endpoint may be the unassigned pool;
/// such edges only appear after the allocator augments a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeightedEdge<W> {
    from: SourceNode,
    to: TargetNode,
    weight: W,
}

impl<W> WeightedEdge<W> {
    #[inline]
    pub fn new(from: SourceNode, to: TargetNode, weight: W) -> Self {
        Self { from, to, weight }
    }

    #[inline]
    pub fn real(from: SourceId, to: TargetId, weight: W) -> Self {
        Self::new(SourceNode::Real(from), TargetNode::Real(to), weight)
    }

    #[inline]
    pub fn from(&self) -> &SourceNode {
        &self.from
    }

    #[inline]
    pub fn to(&self) -> &TargetNode {
        &self.to
    }

    #[inline]
    pub fn weight(&self) -> &W {
        &self.weight
    }

    #[inline]
    pub fn set_weight(&mut self, weight: W) {
        self.weight = weight;
    }

    #[inline]
    pub fn is_real(&self) -> bool {
        self.from.is_real() && self.to.is_real()
    }

    #[inline]
    pub fn into_parts(self) -> (SourceNode, TargetNode, W) {
        (self.from, self.to, self.weight)
    }
}

impl<W: std::fmt::Display> std::fmt::Display for WeightedEdge<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.weight)
    }
}
