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
    allocation::AllocationState,
    config::AllocatorConfig,
    cycle::{DiffPath, NegativeCycleFinder, Switch},
    err::{AllocatorError, WeightOverflowError},
    termination::{SolveStatus, StopToken, Termination},
};
use num_traits::{One, Zero};
use std::collections::{BTreeMap, BTreeSet};
use unit_alloc_core::prelude::{
    CheckedWeight, LimitDenominator, SourceId, SourceNode, TargetId, TargetNode,
};
use unit_alloc_model::prelude::{
    Problem, SourceRegistry, TargetRegistry, UnknownSourceError, WeightedEdge, WeightedEdgeTable,
};

/// Result of [`Allocator::solve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome<W> {
    allocation: AllocationState,
    status: SolveStatus,
    iterations: u64,
    cost: W,
}

impl<W> AllocationOutcome<W> {
    #[inline]
    pub fn allocation(&self) -> &AllocationState {
        &self.allocation
    }

    #[inline]
    pub fn into_allocation(self) -> AllocationState {
        self.allocation
    }

    #[inline]
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    #[inline]
    pub fn is_converged(&self) -> bool {
        self.status.is_converged()
    }

    /// Rotations applied.
    #[inline]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Augmented cost of the final allocation.
    #[inline]
    pub fn cost(&self) -> &W {
        &self.cost
    }
}

/// Drives an allocation to minimum cost by canceling negative cycles.
///
/// Construction augments the problem with the unassigned sentinel on both
/// sides: every real source and target gets a virtual edge priced above the
/// whole weight table, and the sentinel pair itself costs `-1`. The sentinel
/// source owns one unit per real target slot and the sentinel target one
/// slot per real source unit, so every unit always has somewhere to be.
#[derive(Debug, Clone)]
pub struct Allocator<T: WeightedEdgeTable> {
    sources: SourceRegistry<T>,
    targets: TargetRegistry,
    finder: NegativeCycleFinder,
    config: AllocatorConfig,
}

impl<T: WeightedEdgeTable> Allocator<T> {
    #[inline]
    pub fn new(problem: Problem<T>) -> Result<Self, AllocatorError> {
        Self::with_config(problem, AllocatorConfig::default())
    }

    pub fn with_config(problem: Problem<T>, config: AllocatorConfig) -> Result<Self, AllocatorError> {
        let (sources, mut table, targets) = problem.into_parts();

        if let Some(precision) = config.rational_precision {
            table.transform_weights(|w| w.limit_denominator(precision.get()));
        }

        let units: usize = sources.values().sum();
        let slots: usize = targets.values().sum();

        // Cost sums and search paths stay within a small multiple of the
        // penalty, so that multiple has to fit the weight type as well.
        let headroom = 2 * (units + slots + 2 * (targets.len() + 1));
        let penalty = table
            .total_weight()
            .and_then(|total| total.checked_add_weight(&T::Weight::one()))
            .filter(|p| {
                u64::try_from(headroom)
                    .ok()
                    .and_then(|n| p.checked_mul_count(n))
                    .is_some()
            })
            .ok_or_else(|| WeightOverflowError::new(table.len()))?;
        for target in targets.keys() {
            table.add_edge(WeightedEdge::new(
                SourceNode::Unassigned,
                TargetNode::Real(target.clone()),
                penalty.clone(),
            ));
        }
        for source in sources.keys() {
            table.add_edge(WeightedEdge::new(
                SourceNode::Real(source.clone()),
                TargetNode::Unassigned,
                penalty.clone(),
            ));
        }
        table.add_edge(WeightedEdge::new(
            SourceNode::Unassigned,
            TargetNode::Unassigned,
            T::Weight::zero() - T::Weight::one(),
        ));

        tracing::debug!(
            "Augmenting {} sources ({} units) and {} targets ({} slots), unassigned penalty {}",
            sources.len(),
            units,
            targets.len(),
            slots,
            penalty
        );

        let mut instances: BTreeMap<SourceNode, usize> = sources
            .into_iter()
            .map(|(s, n)| (SourceNode::Real(s), n))
            .collect();
        instances.insert(SourceNode::Unassigned, slots);
        let mut capacities: BTreeMap<TargetNode, usize> = targets
            .into_iter()
            .map(|(t, n)| (TargetNode::Real(t), n))
            .collect();
        capacities.insert(TargetNode::Unassigned, units);

        let sources = SourceRegistry::new(table, instances)?;
        let targets = TargetRegistry::new(capacities);
        let finder = NegativeCycleFinder::new(sources.table(), &targets);

        Ok(Self {
            sources,
            targets,
            finder,
            config,
        })
    }

    /// Augmented source side.
    #[inline]
    pub fn sources(&self) -> &SourceRegistry<T> {
        &self.sources
    }

    /// Augmented target side.
    #[inline]
    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    #[inline]
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Every source unit unassigned and every target slot empty.
    pub fn init_allocation(&self) -> AllocationState {
        let mut allocation =
            AllocationState::with_capacity(self.sources.real_units() + self.targets.real_capacity());
        for (source, units) in self.sources.iter().filter(|(s, _)| s.is_real()) {
            allocation.extend(std::iter::repeat_n(
                (source.clone(), TargetNode::Unassigned),
                units,
            ));
        }
        for (target, slots) in self.targets.iter().filter(|(t, _)| t.is_real()) {
            allocation.extend(std::iter::repeat_n(
                (SourceNode::Unassigned, target.clone()),
                slots,
            ));
        }
        allocation
    }

    #[inline]
    pub fn find_negative_cycle(
        &self,
        allocation: &AllocationState,
    ) -> Result<Option<DiffPath<T::Weight>>, AllocatorError> {
        Ok(self.finder.find(&self.sources, allocation)?)
    }

    #[inline]
    pub fn rotate(
        &self,
        allocation: &mut AllocationState,
        path: &[Switch],
    ) -> Result<(), AllocatorError> {
        Ok(allocation.rotate(path)?)
    }

    /// Total over every pair, virtual edges included. This is the quantity
    /// each rotation decreases.
    #[inline]
    pub fn cost(&self, allocation: &AllocationState) -> Result<T::Weight, AllocatorError> {
        Ok(self.sources.total_weight(allocation.iter())?)
    }

    /// Total over real placements only.
    #[inline]
    pub fn placement_cost(&self, allocation: &AllocationState) -> Result<T::Weight, AllocatorError> {
        let real = allocation
            .iter()
            .filter(|(s, t)| s.is_real() && t.is_real());
        Ok(self.sources.total_weight(real)?)
    }

    /// Real targets holding a unit of `source`. A declared source without
    /// placements yields an empty set; an undeclared one is an error.
    pub fn targets_of<'a>(
        &self,
        allocation: &'a AllocationState,
        source: &SourceId,
    ) -> Result<BTreeSet<&'a TargetId>, UnknownSourceError> {
        if self
            .sources
            .instances(&SourceNode::Real(source.clone()))
            .is_none()
        {
            return Err(UnknownSourceError::new(source.clone()));
        }
        Ok(allocation
            .placements()
            .filter(|(s, _)| *s == source)
            .map(|(_, t)| t)
            .collect())
    }

    #[inline]
    pub fn solve(&self) -> Result<AllocationOutcome<T::Weight>, AllocatorError> {
        self.solve_with(StopToken::new())
    }

    /// Runs the rotation loop until no negative cycle is left or a limit of
    /// the configuration (or `stop`) ends it early.
    pub fn solve_with(
        &self,
        stop: StopToken,
    ) -> Result<AllocationOutcome<T::Weight>, AllocatorError> {
        let mut termination = Termination::from_config(&self.config, stop);
        let mut allocation = self.init_allocation();

        let status = loop {
            let Some(cycle) = self.find_negative_cycle(&allocation)? else {
                break SolveStatus::Converged;
            };
            if let Some(reason) = termination.tick_iteration() {
                break reason;
            }
            tracing::debug!(
                "Rotation {}: {} moves, diff {}",
                termination.iterations(),
                cycle.len(),
                cycle.diff()
            );
            self.rotate(&mut allocation, cycle.path())?;
        };

        let cost = self.cost(&allocation)?;
        if status.is_converged() {
            tracing::info!(
                "Converged after {} rotations in {:?}: {} placements, cost {}",
                termination.iterations(),
                termination.elapsed(),
                allocation.len(),
                cost
            );
        } else {
            tracing::warn!(
                "Did not converge ({}) after {} rotations in {:?}: {} placements, cost {}",
                status,
                termination.iterations(),
                termination.elapsed(),
                allocation.len(),
                cost
            );
        }

        Ok(AllocationOutcome {
            allocation,
            status,
            iterations: termination.iterations(),
            cost,
        })
    }
}
