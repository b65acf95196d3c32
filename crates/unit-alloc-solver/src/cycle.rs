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

use crate::allocation::AllocationState;
use fxhash::{FxHashMap, FxHashSet};
use num_traits::Zero;
use std::{cmp::Reverse, collections::BTreeSet, fmt, rc::Rc};
use unit_alloc_core::prelude::{SourceNode, TargetNode, Weight};
use unit_alloc_model::prelude::{
    MissingEdgeError, SourceRegistry, TargetRegistry, WeightedEdgeTable,
};

/// A single-unit move: one unit of `object` goes to `to`. The target it
/// leaves is implied by its position inside a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Switch {
    object: SourceNode,
    to: TargetNode,
}

impl Switch {
    #[inline]
    pub fn new(object: SourceNode, to: TargetNode) -> Self {
        Self { object, to }
    }

    #[inline]
    pub fn object(&self) -> &SourceNode {
        &self.object
    }

    #[inline]
    pub fn to(&self) -> &TargetNode {
        &self.to
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.object, self.to)
    }
}

/// A closed sequence of switches and the cost change of applying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPath<W> {
    diff: W,
    path: Vec<Switch>,
}

impl<W> DiffPath<W> {
    #[inline]
    pub fn new(diff: W, path: Vec<Switch>) -> Self {
        Self { diff, path }
    }

    #[inline]
    pub fn diff(&self) -> &W {
        &self.diff
    }

    #[inline]
    pub fn path(&self) -> &[Switch] {
        &self.path
    }

    #[inline]
    pub fn into_path(self) -> Vec<Switch> {
        self.path
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Path of a matrix cell. Joins share their halves, so relaxing a cell
/// costs one allocation no matter how long the path is.
#[derive(Debug)]
enum Trail {
    Hop(usize),
    Join(Rc<Trail>, Rc<Trail>),
}

impl Trail {
    fn flatten(root: &Rc<Trail>) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match node.as_ref() {
                Trail::Hop(i) => out.push(*i),
                Trail::Join(head, tail) => {
                    stack.push(tail);
                    stack.push(head);
                }
            }
        }
        out
    }
}

#[derive(Debug)]
struct Hop<W> {
    from: usize,
    to: usize,
    switch: Switch,
    diff: W,
}

type Cell<W> = Option<(W, Rc<Trail>)>;

/// Searches the target graph of an allocation for a cycle of moves with
/// negative total cost.
///
/// Vertices are target nodes, the sentinel included. An arc `t0 -> t`
/// stands for the cheapest move of some unit currently on `t0` over to `t`.
#[derive(Debug, Clone)]
pub struct NegativeCycleFinder {
    targets: Vec<TargetNode>,
    index: FxHashMap<TargetNode, usize>,
    order: Vec<usize>,
}

impl NegativeCycleFinder {
    /// Middle vertices are visited by descending number of incoming edges,
    /// ties in target order.
    pub fn new<T: WeightedEdgeTable>(table: &T, targets: &TargetRegistry) -> Self {
        let mut nodes: BTreeSet<TargetNode> = targets.targets().cloned().collect();
        nodes.extend(table.targets());
        let targets: Vec<TargetNode> = nodes.into_iter().collect();
        let index = targets
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        let frequency = table.target_frequency();
        let mut order: Vec<usize> = (0..targets.len()).collect();
        order.sort_by_key(|&i| Reverse(frequency.get(&targets[i]).copied().unwrap_or(0)));

        Self {
            targets,
            index,
            order,
        }
    }

    #[inline]
    pub fn targets(&self) -> &[TargetNode] {
        &self.targets
    }

    /// Targets in the order they are used as middle vertices.
    #[inline]
    pub fn order(&self) -> impl Iterator<Item = &TargetNode> {
        self.order.iter().map(|&i| &self.targets[i])
    }

    /// Returns a simple negative cycle, or `None` when the allocation
    /// admits no improving rotation.
    pub fn find<T: WeightedEdgeTable>(
        &self,
        registry: &SourceRegistry<T>,
        allocation: &AllocationState,
    ) -> Result<Option<DiffPath<T::Weight>>, MissingEdgeError> {
        let n = self.targets.len();
        let mut hops: Vec<Hop<T::Weight>> = Vec::new();
        let mut dist: Vec<Cell<T::Weight>> = vec![None; n * n];

        let mut held: FxHashMap<&SourceNode, FxHashSet<&TargetNode>> = FxHashMap::default();
        for (s, t) in allocation.iter() {
            if s.is_real() && t.is_real() {
                held.entry(s).or_default().insert(t);
            }
        }

        let mut seen: FxHashSet<(&SourceNode, &TargetNode)> = FxHashSet::default();
        for (source, current) in allocation.iter() {
            if !seen.insert((source, current)) {
                continue;
            }
            let Some(&i) = self.index.get(current) else {
                continue;
            };
            let current_weight = registry
                .weight_of(source, current)
                .ok_or_else(|| MissingEdgeError::new(source.clone(), current.clone()))?;
            let holds = held.get(source);

            for edge in registry.table().edges_from(source) {
                let to = edge.to();
                if to == current {
                    continue;
                }
                // A real source never takes a second slot on the same real target.
                if to.is_real() && holds.is_some_and(|h| h.contains(to)) {
                    continue;
                }
                let Some(&j) = self.index.get(to) else {
                    continue;
                };
                // Moves are priced like the cost, at the first edge found for
                // the pair. Later duplicates then seed the same diff and lose
                // the strict comparison below.
                let Some(target_weight) = registry.weight_of(source, to) else {
                    continue;
                };
                let diff = target_weight.clone() - current_weight.clone();
                let cell = &mut dist[i * n + j];
                if cell.as_ref().is_none_or(|(best, _)| diff < *best) {
                    hops.push(Hop {
                        from: i,
                        to: j,
                        switch: Switch::new(source.clone(), to.clone()),
                        diff: diff.clone(),
                    });
                    *cell = Some((diff, Rc::new(Trail::Hop(hops.len() - 1))));
                }
            }
        }
        tracing::trace!("Seeded {} one-hop moves over {} targets", hops.len(), n);

        let zero = T::Weight::zero();
        for &k in &self.order {
            for i in 0..n {
                let Some((dik, pik)) = dist[i * n + k].clone() else {
                    continue;
                };
                for j in 0..n {
                    let relaxed = match (&dist[k * n + j], &dist[i * n + j]) {
                        (Some((dkj, pkj)), current) => {
                            let candidate = dik.clone() + dkj.clone();
                            if current.as_ref().is_none_or(|(dij, _)| candidate < *dij) {
                                let trail = Trail::Join(Rc::clone(&pik), Rc::clone(pkj));
                                Some((candidate, Rc::new(trail)))
                            } else {
                                None
                            }
                        }
                        (None, _) => None,
                    };
                    if let Some(cell) = relaxed {
                        dist[i * n + j] = Some(cell);
                    }
                }
            }

            let negative = (0..n).find_map(|t| match &dist[t * n + t] {
                Some((d, trail)) if *d < zero => Some(trail),
                _ => None,
            });
            if let Some(trail) = negative {
                let walk = Trail::flatten(trail);
                return Ok(Some(simple_cycle(&walk, &hops)));
            }
        }
        Ok(None)
    }
}

/// Splits a closed walk into simple cycles and returns the first one with
/// negative cost. A simple cycle leaves every target once, so every move in
/// it acts on a pair the allocation still holds.
fn simple_cycle<W: Weight>(walk: &[usize], hops: &[Hop<W>]) -> DiffPath<W> {
    let total = |segment: &[usize]| {
        segment
            .iter()
            .fold(W::zero(), |acc, &h| acc + hops[h].diff.clone())
    };
    let switches = |segment: &[usize]| -> Vec<Switch> {
        segment.iter().map(|&h| hops[h].switch.clone()).collect()
    };

    let mut stack: Vec<usize> = Vec::with_capacity(walk.len());
    let mut reached: FxHashMap<usize, usize> = FxHashMap::default();
    let mut cheapest: Option<(W, Vec<usize>)> = None;
    if let Some(&first) = walk.first() {
        reached.insert(hops[first].from, 0);
    }
    for &h in walk {
        stack.push(h);
        let vertex = hops[h].to;
        match reached.get(&vertex).copied() {
            Some(at) => {
                let segment = stack.split_off(at);
                let diff = total(&segment);
                if diff < W::zero() {
                    return DiffPath::new(diff, switches(&segment));
                }
                for &m in &segment[..segment.len() - 1] {
                    reached.remove(&hops[m].to);
                }
                if cheapest.as_ref().is_none_or(|(best, _)| diff < *best) {
                    cheapest = Some((diff, segment));
                }
            }
            None => {
                reached.insert(vertex, stack.len());
            }
        }
    }

    // Only reachable when rounding hides the negative part of the walk.
    match cheapest {
        Some((diff, segment)) => DiffPath::new(diff, switches(&segment)),
        None => DiffPath::new(W::zero(), Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use unit_alloc_core::prelude::{SourceId, TargetId};
    use unit_alloc_model::prelude::{ScanEdgeTable, WeightedEdge};

    #[inline]
    fn s(id: &str) -> SourceNode {
        SourceNode::Real(SourceId::from(id))
    }
    #[inline]
    fn t(id: &str) -> TargetNode {
        TargetNode::Real(TargetId::from(id))
    }

    fn setup(
        edges: &[(&str, &str, i64)],
        units: &[(&str, usize)],
        slots: &[(&str, usize)],
    ) -> (SourceRegistry<ScanEdgeTable<i64>>, TargetRegistry) {
        let table: ScanEdgeTable<i64> = edges
            .iter()
            .map(|&(a, b, w)| WeightedEdge::new(s(a), t(b), w))
            .collect();
        let instances = units.iter().map(|&(a, n)| (s(a), n)).collect();
        let capacities = slots.iter().map(|&(b, n)| (t(b), n)).collect::<BTreeMap<_, _>>();
        (
            SourceRegistry::new(table, instances).unwrap(),
            TargetRegistry::new(capacities),
        )
    }

    fn alloc(pairs: &[(&str, &str)]) -> AllocationState {
        pairs.iter().map(|&(a, b)| (s(a), t(b))).collect()
    }

    #[test]
    fn test_finds_profitable_swap() {
        let (reg, targets) = setup(
            &[("a", "0", 5), ("a", "1", 1), ("b", "0", 1), ("b", "1", 5)],
            &[("a", 1), ("b", 1)],
            &[("0", 1), ("1", 1)],
        );
        let finder = NegativeCycleFinder::new(reg.table(), &targets);
        let mut state = alloc(&[("a", "0"), ("b", "1")]);

        let cycle = finder.find(&reg, &state).unwrap().expect("cycle");
        assert_eq!(*cycle.diff(), -8);
        assert_eq!(cycle.len(), 2);

        let before = reg.total_weight(state.iter()).unwrap();
        state.rotate(cycle.path()).unwrap();
        let after = reg.total_weight(state.iter()).unwrap();
        assert_eq!(after - before, -8);
        assert!(state.contains(&s("a"), &t("1")));
        assert!(state.contains(&s("b"), &t("0")));

        assert_eq!(finder.find(&reg, &state).unwrap(), None);
    }

    #[test]
    fn test_finds_three_cycle() {
        let (reg, targets) = setup(
            &[
                ("a", "0", 3),
                ("a", "1", 1),
                ("b", "1", 3),
                ("b", "2", 1),
                ("c", "2", 3),
                ("c", "0", 1),
            ],
            &[("a", 1), ("b", 1), ("c", 1)],
            &[("0", 1), ("1", 1), ("2", 1)],
        );
        let finder = NegativeCycleFinder::new(reg.table(), &targets);
        let mut state = alloc(&[("a", "0"), ("b", "1"), ("c", "2")]);

        let cycle = finder.find(&reg, &state).unwrap().expect("cycle");
        assert_eq!(*cycle.diff(), -6);
        assert_eq!(cycle.len(), 3);

        state.rotate(cycle.path()).unwrap();
        assert!(state.contains(&s("a"), &t("1")));
        assert!(state.contains(&s("b"), &t("2")));
        assert!(state.contains(&s("c"), &t("0")));
    }

    #[test]
    fn test_no_move_onto_a_target_the_source_already_holds() {
        // Moving a from 0 onto 1 would look cheap, but a is already on 1.
        let (reg, targets) = setup(
            &[("a", "0", 10), ("a", "1", 1), ("c", "0", 1), ("c", "1", 5)],
            &[("a", 2), ("c", 1)],
            &[("0", 1), ("1", 2)],
        );
        let finder = NegativeCycleFinder::new(reg.table(), &targets);
        let state = alloc(&[("a", "0"), ("a", "1"), ("c", "1")]);
        assert_eq!(finder.find(&reg, &state).unwrap(), None);
    }

    #[test]
    fn test_zero_cost_cycle_is_not_reported() {
        let (reg, targets) = setup(
            &[("a", "0", 2), ("a", "1", 2), ("b", "0", 3), ("b", "1", 3)],
            &[("a", 1), ("b", 1)],
            &[("0", 1), ("1", 1)],
        );
        let finder = NegativeCycleFinder::new(reg.table(), &targets);
        let state = alloc(&[("a", "0"), ("b", "1")]);
        assert_eq!(finder.find(&reg, &state).unwrap(), None);
    }

    #[test]
    fn test_duplicate_edge_is_priced_at_the_first_weight() {
        // The later a -> 0 edge at 1 would make the swap look profitable,
        // but the pair costs 5 wherever the allocation is priced.
        let (reg, targets) = setup(
            &[
                ("a", "0", 5),
                ("a", "1", 3),
                ("a", "0", 1),
                ("b", "0", 0),
                ("b", "1", 0),
            ],
            &[("a", 1), ("b", 1)],
            &[("0", 1), ("1", 1)],
        );
        let finder = NegativeCycleFinder::new(reg.table(), &targets);
        let state = alloc(&[("a", "1"), ("b", "0")]);
        assert_eq!(finder.find(&reg, &state).unwrap(), None);
    }

    #[test]
    fn test_missing_edge_for_held_pair_is_an_error() {
        let (reg, targets) = setup(&[("a", "0", 1)], &[("a", 1)], &[("0", 1), ("1", 1)]);
        let finder = NegativeCycleFinder::new(reg.table(), &targets);
        let state = alloc(&[("a", "1")]);
        let err = finder.find(&reg, &state).unwrap_err();
        assert_eq!(err.from(), &s("a"));
        assert_eq!(err.to(), &t("1"));
    }

    #[test]
    fn test_middle_vertex_order_follows_frequency() {
        let (reg, targets) = setup(
            &[
                ("a", "0", 1),
                ("a", "1", 1),
                ("b", "1", 1),
                ("a", "2", 1),
                ("b", "2", 1),
            ],
            &[("a", 1), ("b", 1)],
            &[("0", 1), ("1", 1), ("2", 1), ("3", 1)],
        );
        let finder = NegativeCycleFinder::new(reg.table(), &targets);
        let order: Vec<_> = finder.order().cloned().collect();
        assert_eq!(order, vec![t("1"), t("2"), t("0"), t("3")]);
        assert_eq!(finder.targets().len(), 4);
    }

    #[test]
    fn test_simple_cycle_drops_non_negative_loops() {
        let hop = |from, to, diff| Hop {
            from,
            to,
            switch: Switch::new(s(&from.to_string()), t(&to.to_string())),
            diff,
        };
        // Walk 0 -> 1 -> 2 -> 1 -> 0: the loop 1 -> 2 -> 1 costs +2, the
        // remaining 0 -> 1 -> 0 costs -5.
        let hops = vec![hop(0, 1, -3), hop(1, 2, 1), hop(2, 1, 1), hop(1, 0, -2)];
        let cycle = simple_cycle(&[0, 1, 2, 3], &hops);
        assert_eq!(*cycle.diff(), -5);
        assert_eq!(
            cycle.path(),
            &[Switch::new(s("0"), t("1")), Switch::new(s("1"), t("0"))]
        );
    }
}
