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
    err::{MissingEdgeError, OrphanSourceError},
    table::WeightedEdgeTable,
};
use num_traits::Zero;
use std::collections::BTreeMap;
use unit_alloc_core::prelude::{SourceNode, TargetNode};

/// An edge table together with the number of units of every source object.
#[derive(Debug, Clone)]
pub struct SourceRegistry<T> {
    table: T,
    instances: BTreeMap<SourceNode, usize>,
}

impl<T: WeightedEdgeTable> SourceRegistry<T> {
    /// Fails if a real source has units but no outgoing edge.
    pub fn new(
        table: T,
        instances: BTreeMap<SourceNode, usize>,
    ) -> Result<Self, OrphanSourceError> {
        if let Some(orphan) = instances
            .keys()
            .filter(|s| s.is_real())
            .find(|s| table.edges_from(s).next().is_none())
        {
            return Err(OrphanSourceError::new(orphan.clone()));
        }
        Ok(Self { table, instances })
    }

    #[inline]
    pub fn table(&self) -> &T {
        &self.table
    }

    #[inline]
    pub fn instances(&self, source: &SourceNode) -> Option<usize> {
        self.instances.get(source).copied()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&SourceNode, usize)> {
        self.instances.iter().map(|(s, &n)| (s, n))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Units over real sources only.
    #[inline]
    pub fn real_units(&self) -> usize {
        self.iter()
            .filter(|(s, _)| s.is_real())
            .map(|(_, n)| n)
            .sum()
    }

    #[inline]
    pub fn weight_of(&self, source: &SourceNode, target: &TargetNode) -> Option<&T::Weight> {
        self.table.weight_of(source, target)
    }

    /// Sums the weight of every `(source, target)` pair. A pair without an
    /// edge means the caller built pairs the table never allowed.
    pub fn total_weight<'a, I>(&self, pairs: I) -> Result<T::Weight, MissingEdgeError>
    where
        I: IntoIterator<Item = (&'a SourceNode, &'a TargetNode)>,
    {
        pairs
            .into_iter()
            .try_fold(T::Weight::zero(), |acc, (s, t)| {
                self.table
                    .weight_of(s, t)
                    .map(|w| acc + w.clone())
                    .ok_or_else(|| MissingEdgeError::new(s.clone(), t.clone()))
            })
    }
}

/// Slot count of every target object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetRegistry {
    capacities: BTreeMap<TargetNode, usize>,
}

impl TargetRegistry {
    #[inline]
    pub fn new(capacities: BTreeMap<TargetNode, usize>) -> Self {
        Self { capacities }
    }

    #[inline]
    pub fn capacity(&self, target: &TargetNode) -> Option<usize> {
        self.capacities.get(target).copied()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&TargetNode, usize)> {
        self.capacities.iter().map(|(t, &n)| (t, n))
    }

    #[inline]
    pub fn targets(&self) -> impl Iterator<Item = &TargetNode> {
        self.capacities.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.capacities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacities.is_empty()
    }

    /// Slots over real targets only.
    #[inline]
    pub fn real_capacity(&self) -> usize {
        self.iter()
            .filter(|(t, _)| t.is_real())
            .map(|(_, n)| n)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{edge::WeightedEdge, table::scan::ScanEdgeTable};
    use unit_alloc_core::prelude::{SourceId, TargetId};

    #[inline]
    fn s(id: &str) -> SourceNode {
        SourceNode::Real(SourceId::from(id))
    }
    #[inline]
    fn t(id: &str) -> TargetNode {
        TargetNode::Real(TargetId::from(id))
    }

    fn small_table() -> ScanEdgeTable<i64> {
        [
            WeightedEdge::new(s("a"), t("0"), 1),
            WeightedEdge::new(s("a"), t("1"), 0),
            WeightedEdge::new(s("b"), t("0"), 2),
        ]
        .into_iter()
        .collect()
    }

    fn small_registry() -> SourceRegistry<ScanEdgeTable<i64>> {
        let instances = BTreeMap::from([(s("a"), 2), (s("b"), 1)]);
        SourceRegistry::new(small_table(), instances).unwrap()
    }

    #[test]
    fn test_source_lookup() {
        let reg = small_registry();
        assert_eq!(reg.instances(&s("a")), Some(2));
        assert_eq!(reg.instances(&s("b")), Some(1));
        assert_eq!(reg.instances(&s("c")), None);
        assert_eq!(reg.weight_of(&s("a"), &t("0")), Some(&1));
        assert_eq!(reg.weight_of(&s("a"), &t("2")), None);
        assert_eq!(reg.real_units(), 3);
    }

    #[test]
    fn test_orphan_source_is_rejected() {
        let instances = BTreeMap::from([(s("a"), 2), (s("c"), 1)]);
        let err = SourceRegistry::new(small_table(), instances).unwrap_err();
        assert_eq!(err.node(), &s("c"));
    }

    #[test]
    fn test_unassigned_pool_needs_no_edges() {
        let instances = BTreeMap::from([(s("a"), 2), (SourceNode::Unassigned, 4)]);
        let reg = SourceRegistry::new(small_table(), instances).unwrap();
        assert_eq!(reg.instances(&SourceNode::Unassigned), Some(4));
        assert_eq!(reg.real_units(), 2);
    }

    #[test]
    fn test_total_weight() {
        let reg = small_registry();
        let pairs = [(s("a"), t("0")), (s("a"), t("1")), (s("b"), t("0"))];
        let total = reg.total_weight(pairs.iter().map(|(a, b)| (a, b))).unwrap();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_total_weight_fails_on_missing_edge() {
        let reg = small_registry();
        let pairs = [(s("a"), t("0")), (s("b"), t("1"))];
        let err = reg
            .total_weight(pairs.iter().map(|(a, b)| (a, b)))
            .unwrap_err();
        assert_eq!(err.from(), &s("b"));
        assert_eq!(err.to(), &t("1"));
    }

    #[test]
    fn test_target_registry() {
        let reg = TargetRegistry::new(BTreeMap::from([
            (t("0"), 3),
            (t("1"), 1),
            (TargetNode::Unassigned, 3),
        ]));
        assert_eq!(reg.capacity(&t("0")), Some(3));
        assert_eq!(reg.capacity(&t("1")), Some(1));
        assert_eq!(reg.capacity(&t("2")), None);
        assert_eq!(reg.real_capacity(), 4);
        assert_eq!(reg.len(), 3);
    }
}
