// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Store frames crossing the dispatch boundary.

use core::fmt;

use switchyard_command::{CanvasCommand, StrategySwitched};
use switchyard_strategy::{CanvasStrategy, StrategySession, StrategyStateFor};

/// The host editor state as the dispatch layer sees it.
///
/// The editor is an immutable value: every transition yields a new one, and
/// the dispatch layer never mutates a frame in place. The three associated
/// projections mirror what the interaction core needs from the host:
///
/// - `Canvas`: the reduced view handed to strategy decision functions.
/// - `Metadata`: the snapshot type stored in sessions and strategy state.
/// - `Derived`: view state recomputed from the preview value after each
///   batch, handed back to the host untouched.
pub trait InteractionEditor: Clone {
    /// Reduced canvas view for strategy decisions.
    type Canvas;
    /// Metadata snapshot type.
    type Metadata: Clone;
    /// Derived/view state computed from the preview value.
    type Derived;

    /// Project the reduced canvas view out of this editor value.
    fn canvas_state(&self) -> Self::Canvas;

    /// Derive a fresh metadata snapshot from this editor value.
    fn metadata(&self) -> Self::Metadata;

    /// Compute derived/view state from this editor value.
    fn derive(&self) -> Self::Derived;
}

/// A strategy usable at the dispatch boundary for editor `E`.
///
/// This ties a [`CanvasStrategy`]'s associated types to the host editor: its
/// canvas and metadata projections must match, its commands must apply to `E`
/// and be able to carry a [`StrategySwitched`] record, and commands and
/// targets must be cloneable so the accumulator can freeze them.
///
/// Implemented automatically; never implement it by hand.
pub trait DispatchStrategy<E>: CanvasStrategy<Canvas = E::Canvas, Metadata = E::Metadata>
where
    E: InteractionEditor,
    Self::Target: Clone,
    Self::Command: CanvasCommand<E> + From<StrategySwitched> + Clone,
{
}

impl<E, S> DispatchStrategy<E> for S
where
    E: InteractionEditor,
    S: CanvasStrategy<Canvas = E::Canvas, Metadata = E::Metadata>,
    S::Target: Clone,
    S::Command: CanvasCommand<E> + From<StrategySwitched> + Clone,
{
}

/// The prior full store frame: everything the last dispatch returned.
pub struct EditorStore<E, S: CanvasStrategy> {
    /// Committed-track editor value, untouched by preview folds.
    pub committed: E,
    /// Preview editor value, recomputed from `committed` every frame.
    pub preview: E,
    /// The live interaction session, if a gesture is in flight.
    pub session: Option<StrategySession<S>>,
    /// The session's accumulator.
    pub strategy_state: StrategyStateFor<S>,
}

impl<E, S: CanvasStrategy> fmt::Debug for EditorStore<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorStore")
            .field("session_active", &self.session.is_some())
            .field("current_strategy", &self.strategy_state.current_strategy)
            .finish_non_exhaustive()
    }
}

/// The result of the non-canvas reducers over the latest action batch.
///
/// Reducers produce the new committed-track editor value and create, replace
/// wholesale, or clear the interaction session before the dispatch layer
/// runs.
pub struct ReducedFrame<E, S: CanvasStrategy> {
    /// New committed-track editor value.
    pub editor: E,
    /// The session as the reducers left it.
    pub session: Option<StrategySession<S>>,
}

impl<E, S: CanvasStrategy> fmt::Debug for ReducedFrame<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducedFrame")
            .field("session_active", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

/// What one dispatched batch produced: the next store frame plus derived
/// view state.
pub struct DispatchOutcome<E: InteractionEditor, S: CanvasStrategy> {
    /// Committed-track editor value.
    pub committed: E,
    /// Preview editor value; equals `committed` when nothing applied.
    pub preview: E,
    /// Derived/view state computed from `preview`.
    pub derived: E::Derived,
    /// The surviving session; absent after finish or cancel.
    pub session: Option<StrategySession<S>>,
    /// The updated accumulator.
    pub strategy_state: StrategyStateFor<S>,
}

impl<E: InteractionEditor, S: CanvasStrategy> DispatchOutcome<E, S> {
    /// Assemble an outcome, deriving view state from the preview value.
    pub(crate) fn assemble(
        committed: E,
        preview: E,
        session: Option<StrategySession<S>>,
        strategy_state: StrategyStateFor<S>,
    ) -> Self {
        let derived = preview.derive();
        Self {
            committed,
            preview,
            derived,
            session,
            strategy_state,
        }
    }
}

impl<E: InteractionEditor, S: CanvasStrategy> fmt::Debug for DispatchOutcome<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchOutcome")
            .field("session_active", &self.session.is_some())
            .field("current_strategy", &self.strategy_state.current_strategy)
            .finish_non_exhaustive()
    }
}
