// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switchyard Strategy: fitness-ranked editing strategies for canvas gestures.
//!
//! A [`CanvasStrategy`] is a pluggable policy that translates a live gesture
//! into an ordered list of commands. Several strategies compete for every
//! frame of a gesture; the [`select_strategy`](select::select_strategy)
//! selector picks exactly one winner from fitness scores.
//!
//! ## Contract
//!
//! A strategy exposes four operations, all pure functions of their inputs:
//!
//! - `is_applicable`: may this strategy's overlay controls show at all?
//! - `fitness`: numeric suitability for the current gesture; a strategy is a
//!   candidate iff its fitness is greater than zero.
//! - `apply`: the commands realizing this strategy for the current frame.
//! - `controls`: declared overlay controls with a visibility policy, which
//!   the core passes through without interpreting (see [`controls`]).
//!
//! Strategies are stateless; everything they need arrives at call time. The
//! registered strategy list is an explicit, immutable slice whose order is a
//! deliberate tie-break signal: on equal fitness, the earlier-registered
//! strategy wins.
//!
//! ## Session accumulator
//!
//! [`StrategyState`](state::StrategyState) is the per-session accumulator:
//! the active strategy, its latest commands, and — across mid-gesture
//! strategy switches — the frozen command history of every strategy that
//! owned an earlier portion of the gesture. See [`state`] for the
//! reset/append rules.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use switchyard_session::{InteractionSession, Modifiers};
//! use switchyard_strategy::select::select_strategy;
//! use switchyard_strategy::state::StrategyState;
//! use switchyard_strategy::{CanvasStrategy, ControlDescriptor};
//!
//! // A closed, two-variant strategy set over a unit canvas model.
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! enum Id {
//!     Move,
//!     Reparent,
//! }
//!
//! struct Fixed(Id, f64);
//!
//! impl CanvasStrategy for Fixed {
//!     type Canvas = ();
//!     type Metadata = ();
//!     type Id = Id;
//!     type Target = ();
//!     type Command = ();
//!
//!     fn id(&self) -> Id {
//!         self.0
//!     }
//!     fn name(&self) -> &str {
//!         "Fixed"
//!     }
//!     fn controls(&self) -> &[ControlDescriptor] {
//!         &[]
//!     }
//!     fn is_applicable(
//!         &self,
//!         _: &(),
//!         _: Option<&InteractionSession<Id, (), ()>>,
//!         _: &(),
//!     ) -> bool {
//!         true
//!     }
//!     fn fitness(
//!         &self,
//!         _: &(),
//!         _: &InteractionSession<Id, (), ()>,
//!         _: &StrategyState<Id, (), ()>,
//!     ) -> f64 {
//!         self.1
//!     }
//!     fn apply(
//!         &self,
//!         _: &(),
//!         _: &InteractionSession<Id, (), ()>,
//!         _: &StrategyState<Id, (), ()>,
//!     ) -> Vec<()> {
//!         Vec::new()
//!     }
//! }
//!
//! let strategies = [Fixed(Id::Move, 10.0), Fixed(Id::Reparent, 2.0)];
//! let session = InteractionSession::begin(Point::ZERO, Modifiers::empty(), (), ());
//! let state = StrategyState::empty(());
//!
//! let selection = select_strategy(&strategies, &(), &session, &state, None);
//! assert_eq!(selection.strategy.unwrap().strategy.id(), Id::Move);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod controls;
pub mod select;
pub mod state;

pub use controls::{ControlDescriptor, ControlVisibility};

use alloc::vec::Vec;
use core::fmt;

use switchyard_session::InteractionSession;

/// The interaction session type a strategy observes, spelled from its
/// associated types.
pub type StrategySession<S> = InteractionSession<
    <S as CanvasStrategy>::Id,
    <S as CanvasStrategy>::Target,
    <S as CanvasStrategy>::Metadata,
>;

/// The strategy-state type accumulating a session for strategy `S`.
pub type StrategyStateFor<S> = state::StrategyState<
    <S as CanvasStrategy>::Id,
    <S as CanvasStrategy>::Command,
    <S as CanvasStrategy>::Metadata,
>;

/// A pluggable editing strategy competing to interpret the current gesture.
///
/// Implementations must be pure: every operation is a function of the inputs
/// given at call time, with no hidden state. This is what makes hard-reset
/// replay correct — the dispatch layer re-runs selection and application from
/// stored inputs and must get identical answers.
///
/// A closed strategy set is typically one enum implementing this trait, with
/// the registration list an ordered slice of its variants.
pub trait CanvasStrategy {
    /// Reduced canvas view handed to every strategy operation.
    type Canvas;
    /// Metadata snapshot type carried by sessions and strategy state.
    type Metadata: Clone;
    /// Stable strategy identifier.
    type Id: Copy + Eq + fmt::Debug;
    /// Drag-target descriptor carried by sessions.
    type Target;
    /// Command type this strategy emits.
    type Command;

    /// Stable identifier for this strategy.
    fn id(&self) -> Self::Id;

    /// Human-readable name, used in switch records and UI.
    fn name(&self) -> &str;

    /// Overlay controls this strategy declares, with visibility policy.
    fn controls(&self) -> &[ControlDescriptor];

    /// Whether this strategy is applicable at all in the given context.
    ///
    /// Consulted both during an interaction (with a session) and outside one
    /// (without), since applicability also gates overlay controls.
    fn is_applicable(
        &self,
        canvas: &Self::Canvas,
        session: Option<&StrategySession<Self>>,
        metadata: &Self::Metadata,
    ) -> bool;

    /// Suitability score for the current gesture; candidate iff `> 0`.
    fn fitness(
        &self,
        canvas: &Self::Canvas,
        session: &StrategySession<Self>,
        state: &StrategyStateFor<Self>,
    ) -> f64;

    /// The ordered commands realizing this strategy for the current frame.
    fn apply(
        &self,
        canvas: &Self::Canvas,
        session: &StrategySession<Self>,
        state: &StrategyStateFor<Self>,
    ) -> Vec<Self::Command>;
}
