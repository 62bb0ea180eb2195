// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The strategy selector: pick one winner from fitness scores.
//!
//! Selection runs fresh on every dispatched frame:
//!
//! 1. Drop strategies whose `is_applicable` is false.
//! 2. Score the rest; a strategy is a candidate iff its fitness is `> 0`.
//! 3. Stable-sort candidates by descending fitness. On equal fitness the
//!    earlier-registered strategy ranks first — registration order is a
//!    documented tie-break, not an accident.
//! 4. If the session pins a strategy and it is among the candidates, it
//!    overrides the fitness winner. A pinned strategy that is no longer a
//!    candidate (fitness dropped to zero or below) is ignored and ranking
//!    falls back to plain fitness order.
//! 5. The winner is the first of the resulting list, or absent when no
//!    strategy qualifies — a valid idle state, not an error.
//! 6. The prior frame's winner is re-resolved by id among this frame's
//!    candidates so callers can detect switches.
//!
//! [`select_strategy`] is a pure function: identical inputs always produce
//! identical output. Hard-reset replay depends on this.

use smallvec::SmallVec;

use crate::state::StrategyState;
use crate::{CanvasStrategy, StrategySession};

/// A candidate strategy paired with the fitness it scored this frame.
#[derive(Debug)]
pub struct RankedStrategy<'s, S> {
    /// The candidate.
    pub strategy: &'s S,
    /// Its fitness this frame; always `> 0` for a ranked candidate.
    pub fitness: f64,
}

// Manual impls: `S` itself need not be `Copy` for the reference to be.
impl<S> Copy for RankedStrategy<'_, S> {}
impl<S> Clone for RankedStrategy<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

/// Outcome of one selection pass.
#[derive(Debug)]
pub struct StrategySelection<'s, S: CanvasStrategy> {
    /// The winning strategy, or `None` when nothing qualifies.
    pub strategy: Option<RankedStrategy<'s, S>>,
    /// The prior frame's winner re-resolved among this frame's candidates,
    /// used to detect mid-gesture switches. `None` if it no longer
    /// qualifies.
    pub previous_strategy: Option<RankedStrategy<'s, S>>,
    /// Candidate ids in final rank order (pinned override applied).
    pub sorted_applicable_strategies: SmallVec<[S::Id; 4]>,
}

/// Choose the winning strategy (and ranked alternatives) for this frame.
///
/// `previous` is the strategy id that won the prior frame, if any. The
/// registered `strategies` slice is the configuration: its order is the
/// tie-break for equal fitness.
pub fn select_strategy<'s, S: CanvasStrategy>(
    strategies: &'s [S],
    canvas: &S::Canvas,
    session: &StrategySession<S>,
    state: &StrategyState<S::Id, S::Command, S::Metadata>,
    previous: Option<S::Id>,
) -> StrategySelection<'s, S> {
    let mut candidates: SmallVec<[RankedStrategy<'s, S>; 4]> = strategies
        .iter()
        .filter(|strategy| strategy.is_applicable(canvas, Some(session), &state.starting_metadata))
        .filter_map(|strategy| {
            let fitness = strategy.fitness(canvas, session, state);
            (fitness > 0.0).then_some(RankedStrategy { strategy, fitness })
        })
        .collect();

    // Stable sort keeps registration order among equal scores.
    candidates.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

    if let Some(pinned) = session.pinned_strategy {
        if let Some(index) = candidates
            .iter()
            .position(|candidate| candidate.strategy.id() == pinned)
        {
            let pinned_candidate = candidates.remove(index);
            candidates.insert(0, pinned_candidate);
        }
    }

    let previous_strategy = previous.and_then(|id| {
        candidates
            .iter()
            .find(|candidate| candidate.strategy.id() == id)
            .copied()
    });

    StrategySelection {
        strategy: candidates.first().copied(),
        previous_strategy,
        sorted_applicable_strategies: candidates
            .iter()
            .map(|candidate| candidate.strategy.id())
            .collect(),
    }
}
