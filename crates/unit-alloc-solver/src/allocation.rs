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
    cycle::Switch,
    err::{MissingPairError, NotPresentError},
};
use std::collections::BTreeSet;
use unit_alloc_core::prelude::{SourceId, SourceNode, TargetId, TargetNode};

/// A multiset of `(source, target)` pairs, one per placed unit.
///
/// Pairs may involve the unassigned sentinel on either side. Order carries
/// no meaning, but [`AllocationState::reassign`] always rewrites the first
/// matching pair so runs are reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationState {
    pairs: Vec<(SourceNode, TargetNode)>,
}

impl AllocationState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, source: SourceNode, target: TargetNode) {
        self.pairs.push((source, target));
    }

    /// Distinct targets holding a unit of `source`.
    pub fn units_for(
        &self,
        source: &SourceNode,
    ) -> Result<BTreeSet<&TargetNode>, NotPresentError<SourceNode>> {
        let found: BTreeSet<_> = self
            .pairs
            .iter()
            .filter(|(s, _)| s == source)
            .map(|(_, t)| t)
            .collect();
        if found.is_empty() {
            return Err(NotPresentError::new(source.clone()));
        }
        Ok(found)
    }

    /// Distinct sources with a unit on `target`.
    pub fn sources_for(
        &self,
        target: &TargetNode,
    ) -> Result<BTreeSet<&SourceNode>, NotPresentError<TargetNode>> {
        let found: BTreeSet<_> = self
            .pairs
            .iter()
            .filter(|(_, t)| t == target)
            .map(|(s, _)| s)
            .collect();
        if found.is_empty() {
            return Err(NotPresentError::new(target.clone()));
        }
        Ok(found)
    }

    /// Number of real placements: pairs where neither side is the sentinel.
    #[inline]
    pub fn len(&self) -> usize {
        self.placements().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of pairs including the ones that involve the sentinel.
    #[inline]
    pub fn total_len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn count_source(&self, source: &SourceNode) -> usize {
        self.pairs.iter().filter(|(s, _)| s == source).count()
    }

    #[inline]
    pub fn count_target(&self, target: &TargetNode) -> usize {
        self.pairs.iter().filter(|(_, t)| t == target).count()
    }

    #[inline]
    pub fn contains(&self, source: &SourceNode, target: &TargetNode) -> bool {
        self.pairs.iter().any(|(s, t)| s == source && t == target)
    }

    /// Every pair, sentinel pairs included.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&SourceNode, &TargetNode)> {
        self.pairs.iter().map(|(s, t)| (s, t))
    }

    /// Real placements only.
    #[inline]
    pub fn placements(&self) -> impl Iterator<Item = (&SourceId, &TargetId)> {
        self.pairs
            .iter()
            .filter_map(|(s, t)| Some((s.as_real()?, t.as_real()?)))
    }

    /// Moves one unit of `object` from `from` to `to`.
    pub fn reassign(
        &mut self,
        object: &SourceNode,
        from: &TargetNode,
        to: TargetNode,
    ) -> Result<(), MissingPairError> {
        let i = self.position(object, from)?;
        self.pairs[i].1 = to;
        Ok(())
    }

    /// Applies a cycle of switches. Each switch moves its object away from
    /// the target the previous switch moved into, wrapping around so the
    /// first switch vacates the target of the last one.
    ///
    /// Either every switch applies or none does: on a missing pair the moves
    /// made so far are undone before the error is returned.
    pub fn rotate(&mut self, path: &[Switch]) -> Result<(), MissingPairError> {
        let Some(last) = path.last() else {
            return Ok(());
        };
        let mut moved: Vec<(usize, TargetNode)> = Vec::with_capacity(path.len());
        let mut vacated = last.to().clone();
        for switch in path {
            let i = match self.position(switch.object(), &vacated) {
                Ok(i) => i,
                Err(err) => {
                    for (i, previous) in moved.into_iter().rev() {
                        self.pairs[i].1 = previous;
                    }
                    return Err(err);
                }
            };
            tracing::trace!("Moving {} from {} to {}", switch.object(), vacated, switch.to());
            moved.push((i, std::mem::replace(&mut self.pairs[i].1, switch.to().clone())));
            vacated = switch.to().clone();
        }
        Ok(())
    }

    fn position(
        &self,
        object: &SourceNode,
        paired: &TargetNode,
    ) -> Result<usize, MissingPairError> {
        self.pairs
            .iter()
            .position(|(s, t)| s == object && t == paired)
            .ok_or_else(|| MissingPairError::new(object.clone(), paired.clone()))
    }
}

impl FromIterator<(SourceNode, TargetNode)> for AllocationState {
    fn from_iter<I: IntoIterator<Item = (SourceNode, TargetNode)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl Extend<(SourceNode, TargetNode)> for AllocationState {
    fn extend<I: IntoIterator<Item = (SourceNode, TargetNode)>>(&mut self, iter: I) {
        self.pairs.extend(iter);
    }
}
