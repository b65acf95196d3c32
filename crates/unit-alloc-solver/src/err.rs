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

use unit_alloc_core::prelude::{SourceNode, TargetNode};
use unit_alloc_model::prelude::{MissingEdgeError, OrphanSourceError};

/// The queried object never appears on its side of the allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotPresentError<N>(N);

impl<N> NotPresentError<N> {
    pub fn new(object: N) -> Self {
        Self(object)
    }

    pub fn object(&self) -> &N {
        &self.0
    }
}

impl<N: std::fmt::Display> std::fmt::Display for NotPresentError<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not part of the allocation", self.0)
    }
}

impl<N: std::fmt::Display + std::fmt::Debug> std::error::Error for NotPresentError<N> {}

/// A reassignment referred to a `(source, target)` pair the allocation does
/// not hold, which means a rotation was computed against a stale allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingPairError {
    object: SourceNode,
    paired: TargetNode,
}

impl MissingPairError {
    pub fn new(object: SourceNode, paired: TargetNode) -> Self {
        Self { object, paired }
    }

    pub fn object(&self) -> &SourceNode {
        &self.object
    }

    pub fn paired(&self) -> &TargetNode {
        &self.paired
    }
}

impl std::fmt::Display for MissingPairError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The allocation holds no pair ({}, {})",
            self.object, self.paired
        )
    }
}

impl std::error::Error for MissingPairError {}

/// The weight table is too large for its weight type once the unassigned
/// penalty is added, so cost sums could overflow during the search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeightOverflowError {
    edges: usize,
}

impl WeightOverflowError {
    pub fn new(edges: usize) -> Self {
        Self { edges }
    }

    /// Real edges in the offending table.
    pub fn edges(&self) -> usize {
        self.edges
    }
}

impl std::fmt::Display for WeightOverflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The weights of {} edges leave the range of the weight type once augmented",
            self.edges
        )
    }
}

impl std::error::Error for WeightOverflowError {}

/// Failures of an allocator run. Apart from `WeightOverflow`, none of them
/// is caused by the caller once a `Problem` validated; they signal broken
/// internal invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AllocatorError {
    OrphanSource(OrphanSourceError),
    MissingEdge(MissingEdgeError),
    MissingPair(MissingPairError),
    WeightOverflow(WeightOverflowError),
}

impl std::fmt::Display for AllocatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrphanSource(e) => write!(f, "{}", e),
            Self::MissingEdge(e) => write!(f, "{}", e),
            Self::MissingPair(e) => write!(f, "{}", e),
            Self::WeightOverflow(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AllocatorError {}

impl From<OrphanSourceError> for AllocatorError {
    fn from(err: OrphanSourceError) -> Self {
        AllocatorError::OrphanSource(err)
    }
}

impl From<MissingEdgeError> for AllocatorError {
    fn from(err: MissingEdgeError) -> Self {
        AllocatorError::MissingEdge(err)
    }
}

impl From<MissingPairError> for AllocatorError {
    fn from(err: MissingPairError) -> Self {
        AllocatorError::MissingPair(err)
    }
}

impl From<WeightOverflowError> for AllocatorError {
    fn from(err: WeightOverflowError) -> Self {
        AllocatorError::WeightOverflow(err)
    }
}
