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

pub mod indexed;
pub mod scan;

use crate::edge::WeightedEdge;
use num_traits::Zero;
use std::collections::{BTreeMap, BTreeSet};
use unit_alloc_core::prelude::{CheckedWeight, SourceNode, TargetNode, Weight};

/// Storage contract for weighted edges.
///
/// The allocator only talks to this trait, so every backend must give the
/// same answers: `weight_of` returns the first edge inserted for a pair when
/// duplicates exist, and `edges_from` yields edges in insertion order.
pub trait WeightedEdgeTable: Default + Clone + std::fmt::Debug {
    type Weight: Weight;

    /// Inserts an edge. Duplicates are kept.
    fn add_edge(&mut self, edge: WeightedEdge<Self::Weight>);

    fn edges_from<'a>(
        &'a self,
        from: &'a SourceNode,
    ) -> impl Iterator<Item = &'a WeightedEdge<Self::Weight>> + 'a;

    fn weight_of(&self, from: &SourceNode, to: &TargetNode) -> Option<&Self::Weight>;

    fn iter(&self) -> impl Iterator<Item = &WeightedEdge<Self::Weight>>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces every stored weight with `f(weight)`.
    fn transform_weights<F>(&mut self, f: F)
    where
        F: FnMut(&Self::Weight) -> Self::Weight;

    fn sources(&self) -> BTreeSet<SourceNode> {
        self.iter().map(|e| e.from().clone()).collect()
    }

    fn targets(&self) -> BTreeSet<TargetNode> {
        self.iter().map(|e| e.to().clone()).collect()
    }

    /// Sum of every edge weight, or `None` once the sum leaves the range of
    /// the weight type.
    fn total_weight(&self) -> Option<Self::Weight> {
        self.iter()
            .try_fold(Self::Weight::zero(), |acc, e| acc.checked_add_weight(e.weight()))
    }

    /// Number of edges pointing at each target.
    fn target_frequency(&self) -> BTreeMap<TargetNode, usize> {
        let mut freq = BTreeMap::new();
        for e in self.iter() {
            *freq.entry(e.to().clone()).or_insert(0) += 1;
        }
        freq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{indexed::IndexedEdgeTable, scan::ScanEdgeTable};
    use unit_alloc_core::prelude::{SourceId, TargetId};

    #[inline]
    fn s(id: &str) -> SourceNode {
        SourceNode::Real(SourceId::from(id))
    }
    #[inline]
    fn t(id: &str) -> TargetNode {
        TargetNode::Real(TargetId::from(id))
    }

    fn small<T: WeightedEdgeTable<Weight = i64>>() -> T {
        let mut table = T::default();
        table.add_edge(WeightedEdge::new(s("a"), t("0"), 1));
        table.add_edge(WeightedEdge::new(s("a"), t("1"), 0));
        table.add_edge(WeightedEdge::new(s("b"), t("0"), 2));
        table
    }

    fn check_lookups<T: WeightedEdgeTable<Weight = i64>>() {
        let table: T = small();
        assert_eq!(table.len(), 3);
        assert_eq!(table.weight_of(&s("a"), &t("0")), Some(&1));
        assert_eq!(table.weight_of(&s("a"), &t("1")), Some(&0));
        assert_eq!(table.weight_of(&s("b"), &t("0")), Some(&2));
        assert_eq!(table.weight_of(&s("a"), &t("2")), None);
        assert_eq!(table.weight_of(&s("c"), &t("0")), None);

        let from_a: Vec<_> = table.edges_from(&s("a")).map(|e| e.to().clone()).collect();
        assert_eq!(from_a, vec![t("0"), t("1")]);
        assert_eq!(table.edges_from(&s("b")).count(), 1);
        assert_eq!(table.edges_from(&s("c")).count(), 0);
        assert_eq!(table.edges_from(&SourceNode::Unassigned).count(), 0);
    }

    fn check_aggregates<T: WeightedEdgeTable<Weight = i64>>() {
        let table: T = small();
        assert_eq!(table.total_weight(), Some(3));
        assert_eq!(
            table.sources().into_iter().collect::<Vec<_>>(),
            vec![s("a"), s("b")]
        );
        assert_eq!(table.targets().len(), 2);
        let freq = table.target_frequency();
        assert_eq!(freq.get(&t("0")), Some(&2));
        assert_eq!(freq.get(&t("1")), Some(&1));
    }

    fn check_virtual_edges<T: WeightedEdgeTable<Weight = i64>>() {
        let mut table: T = small();
        table.add_edge(WeightedEdge::new(SourceNode::Unassigned, t("0"), 4));
        table.add_edge(WeightedEdge::new(s("a"), TargetNode::Unassigned, 4));
        table.add_edge(WeightedEdge::new(
            SourceNode::Unassigned,
            TargetNode::Unassigned,
            -1,
        ));
        assert_eq!(
            table.weight_of(&SourceNode::Unassigned, &TargetNode::Unassigned),
            Some(&-1)
        );
        assert_eq!(table.edges_from(&SourceNode::Unassigned).count(), 2);
        assert_eq!(table.edges_from(&s("a")).count(), 3);
    }

    fn check_duplicates_keep_first<T: WeightedEdgeTable<Weight = i64>>() {
        let mut table: T = small();
        table.add_edge(WeightedEdge::new(s("a"), t("0"), 9));
        assert_eq!(table.len(), 4);
        assert_eq!(table.weight_of(&s("a"), &t("0")), Some(&1));
        assert_eq!(table.edges_from(&s("a")).count(), 3);
    }

    fn check_transform<T: WeightedEdgeTable<Weight = i64>>() {
        let mut table: T = small();
        table.transform_weights(|w| w * 10 + 1);
        assert_eq!(table.weight_of(&s("a"), &t("0")), Some(&11));
        assert_eq!(table.weight_of(&s("b"), &t("0")), Some(&21));
        assert_eq!(table.total_weight(), Some(33));
    }

    #[test]
    fn test_scan_table_contract() {
        check_lookups::<ScanEdgeTable<i64>>();
        check_aggregates::<ScanEdgeTable<i64>>();
        check_virtual_edges::<ScanEdgeTable<i64>>();
        check_duplicates_keep_first::<ScanEdgeTable<i64>>();
        check_transform::<ScanEdgeTable<i64>>();
    }

    #[test]
    fn test_indexed_table_contract() {
        check_lookups::<IndexedEdgeTable<i64>>();
        check_aggregates::<IndexedEdgeTable<i64>>();
        check_virtual_edges::<IndexedEdgeTable<i64>>();
        check_duplicates_keep_first::<IndexedEdgeTable<i64>>();
        check_transform::<IndexedEdgeTable<i64>>();
    }

    fn check_total_weight_overflow<T: WeightedEdgeTable<Weight = i64>>() {
        let mut table: T = small();
        table.add_edge(WeightedEdge::new(s("b"), t("1"), i64::MAX / 2));
        assert_eq!(table.total_weight(), Some(i64::MAX / 2 + 3));
        table.add_edge(WeightedEdge::new(s("c"), t("1"), i64::MAX / 2));
        assert_eq!(table.total_weight(), None);
    }

    #[test]
    fn test_total_weight_reports_overflow() {
        check_total_weight_overflow::<ScanEdgeTable<i64>>();
        check_total_weight_overflow::<IndexedEdgeTable<i64>>();
    }

    #[test]
    fn test_empty_tables() {
        let scan = ScanEdgeTable::<i64>::default();
        let indexed = IndexedEdgeTable::<i64>::default();
        assert!(scan.is_empty());
        assert!(indexed.is_empty());
        assert_eq!(scan.total_weight(), Some(0));
        assert_eq!(indexed.total_weight(), Some(0));
    }
}
