// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-session accumulator: active strategy, commands, and switch trail.
//!
//! [`StrategyState`] follows one interaction session from start to finish.
//! Within a session, `accumulated_commands` is append-only: when the winning
//! strategy changes mid-gesture, the outgoing strategy's latest commands are
//! frozen into the trail (tagged with its id) followed by a switch record
//! (tagged with no id). The trail is reset to empty at exactly four points:
//! session start, finish, cancel, and hard reset.
//!
//! `starting_metadata` is the metadata snapshot every strategy decision is
//! evaluated against. It is fixed for the session's lifetime, except that a
//! hard reset re-derives it from the pre-dispatch committed state.
//!
//! The trail never feeds back into selection — re-selection runs fresh every
//! frame. It exists for replay, diagnostics, and command descriptions.

use alloc::vec::Vec;
use smallvec::SmallVec;

use switchyard_command::CommandDescription;

/// Commands owned by one contiguous stretch of the gesture.
///
/// `strategy` is `None` for bookkeeping entries such as switch records.
#[derive(Clone, Debug, PartialEq)]
pub struct AccumulatedCommands<I, C> {
    /// The strategy that produced `commands`, if any.
    pub strategy: Option<I>,
    /// The commands frozen from that stretch, in emission order.
    pub commands: Vec<C>,
}

/// Accumulator state for one interaction session.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyState<I, C, M> {
    /// The currently winning strategy, if any.
    pub current_strategy: Option<I>,
    /// The winning strategy's fitness as of the latest frame.
    pub current_fitness: f64,
    /// The winning strategy's commands from the latest frame.
    pub current_commands: Vec<C>,
    /// Frozen cross-switch history; append-only within a session.
    pub accumulated_commands: Vec<AccumulatedCommands<I, C>>,
    /// Descriptions of the commands applied in the latest fold.
    pub command_descriptions: Vec<CommandDescription>,
    /// Candidate strategy ids, ranked by descending fitness.
    pub sorted_applicable_strategies: SmallVec<[I; 4]>,
    /// Metadata snapshot the session's decisions are evaluated against.
    pub starting_metadata: M,
}

impl<I, C, M> StrategyState<I, C, M> {
    /// Empty state seeded with a metadata snapshot.
    ///
    /// Used at session start, after a finish or cancel, and (with freshly
    /// re-derived metadata) after a hard reset.
    pub fn empty(starting_metadata: M) -> Self {
        Self {
            current_strategy: None,
            current_fitness: 0.0,
            current_commands: Vec::new(),
            accumulated_commands: Vec::new(),
            command_descriptions: Vec::new(),
            sorted_applicable_strategies: SmallVec::new(),
            starting_metadata,
        }
    }

    /// All frozen commands in trail order, flattened.
    ///
    /// This is the prefix every fold replays before the current strategy's
    /// own commands.
    pub fn all_accumulated_commands(&self) -> impl Iterator<Item = &C> {
        self.accumulated_commands
            .iter()
            .flat_map(|entry| entry.commands.iter())
    }
}
