// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-transition handlers and the dispatch entry point.
//!
//! [`dispatch_interaction`] mirrors the decision table in
//! [`classify_transition`](crate::classify_transition) as a structural match,
//! so every handler that needs a live session receives one as a non-optional
//! parameter. The handlers are public for hosts that classify themselves;
//! calling one out of order is then a type error, not a runtime surprise.

use alloc::vec;
use alloc::vec::Vec;

use log::{debug, trace};
use smallvec::SmallVec;

use switchyard_command::{ApplyMode, CanvasCommand, StrategySwitched, SwitchTrigger, fold_and_apply};
use switchyard_session::modifiers_changed;
use switchyard_strategy::select::{RankedStrategy, select_strategy};
use switchyard_strategy::state::{AccumulatedCommands, StrategyState};
use switchyard_strategy::StrategySession;

use crate::store::{
    DispatchOutcome, DispatchStrategy, EditorStore, InteractionEditor, ReducedFrame,
};
use crate::transition::{BatchSignals, DispatchError, SessionSignal};

/// Process one action batch: classify the transition and run its handler.
///
/// This is the sole call-in point per batch. `stored` is the full store
/// frame the previous dispatch returned, `frame` the result of the
/// non-canvas reducers over this batch, and `signals` the end-of-session
/// signals collected from the batch's actions.
pub fn dispatch_interaction<E, S>(
    strategies: &[S],
    stored: &EditorStore<E, S>,
    frame: ReducedFrame<E, S>,
    signals: BatchSignals,
) -> Result<DispatchOutcome<E, S>, DispatchError>
where
    E: InteractionEditor,
    S: DispatchStrategy<E>,
    S::Target: Clone,
    S::Command: CanvasCommand<E> + From<StrategySwitched> + Clone,
{
    match (stored.session.as_ref(), frame.session) {
        // No session on either side: valid idle, stray end signals included.
        (None, None) => {
            debug!("interaction dispatch: passthrough");
            Ok(DispatchOutcome::assemble(
                frame.editor.clone(),
                frame.editor,
                None,
                stored.strategy_state.clone(),
            ))
        }
        (None, Some(session)) => Ok(interaction_start(strategies, stored, frame.editor, session)),
        (Some(_), _) if signals.resolve() == Some(SessionSignal::CancelSession) => {
            Ok(interaction_cancel(frame.editor))
        }
        (Some(session), _) if signals.resolve() == Some(SessionSignal::CommitSession) => {
            Ok(interaction_finished(strategies, stored, session, frame.editor))
        }
        (Some(_), None) => Err(DispatchError::SessionDroppedWithoutSignal),
        (Some(old_session), Some(session)) => {
            if modifiers_changed(Some(old_session), Some(&session))
                || stored.strategy_state.current_strategy.is_none()
            {
                Ok(interaction_hard_reset(
                    strategies, stored, frame.editor, session,
                ))
            } else {
                Ok(interaction_update(strategies, stored, frame.editor, session))
            }
        }
    }
}

/// Handle the start of a gesture: seed a fresh accumulator from the
/// session's metadata snapshot, select, and apply the winner transiently.
pub fn interaction_start<E, S>(
    strategies: &[S],
    stored: &EditorStore<E, S>,
    editor: E,
    session: StrategySession<S>,
) -> DispatchOutcome<E, S>
where
    E: InteractionEditor,
    S: DispatchStrategy<E>,
    S::Target: Clone,
    S::Command: CanvasCommand<E> + From<StrategySwitched> + Clone,
{
    let canvas = editor.canvas_state();
    let cleared = StrategyState::empty(session.metadata.clone());
    let selection = select_strategy(
        strategies,
        &canvas,
        &session,
        &cleared,
        stored.strategy_state.current_strategy,
    );
    match selection.strategy {
        Some(winner) => {
            debug!("interaction start: {} wins", winner.strategy.name());
            let commands = winner.strategy.apply(&canvas, &session, &cleared);
            let fold = fold_and_apply(&editor, &editor, commands.iter(), ApplyMode::Transient);
            let strategy_state = StrategyState {
                current_strategy: Some(winner.strategy.id()),
                current_fitness: winner.fitness,
                current_commands: commands,
                accumulated_commands: Vec::new(),
                command_descriptions: fold.descriptions,
                sorted_applicable_strategies: selection.sorted_applicable_strategies,
                starting_metadata: cleared.starting_metadata,
            };
            DispatchOutcome::assemble(editor, fold.state, Some(session), strategy_state)
        }
        None => {
            debug!("interaction start: no applicable strategy");
            DispatchOutcome::assemble(editor.clone(), editor, Some(session), cleared)
        }
    }
}

/// Handle a mid-gesture frame with unchanged modifiers: re-select, and
/// either re-fold the current strategy's commands or perform switch
/// accounting when the winner changed.
pub fn interaction_update<E, S>(
    strategies: &[S],
    stored: &EditorStore<E, S>,
    editor: E,
    session: StrategySession<S>,
) -> DispatchOutcome<E, S>
where
    E: InteractionEditor,
    S: DispatchStrategy<E>,
    S::Target: Clone,
    S::Command: CanvasCommand<E> + From<StrategySwitched> + Clone,
{
    let canvas = editor.canvas_state();
    let state = &stored.strategy_state;
    let selection = select_strategy(strategies, &canvas, &session, state, state.current_strategy);
    let Some(winner) = selection.strategy else {
        // The winner evaporated mid-gesture: keep the accumulator and show
        // the committed state until something qualifies again.
        debug!("interaction update: no applicable strategy");
        return DispatchOutcome::assemble(editor.clone(), editor, Some(session), state.clone());
    };

    let pinned_changed = session.pinned_strategy.is_some()
        && session.pinned_strategy != stored.session.as_ref().and_then(|s| s.pinned_strategy);
    if pinned_changed {
        return apply_with_switch(
            SwitchTrigger::UserInput,
            stored,
            editor,
            session,
            &canvas,
            winner,
            selection.sorted_applicable_strategies,
        );
    }

    let previous_id = selection.previous_strategy.map(|p| p.strategy.id());
    if Some(winner.strategy.id()) != previous_id {
        return apply_with_switch(
            SwitchTrigger::FitnessChange,
            stored,
            editor,
            session,
            &canvas,
            winner,
            selection.sorted_applicable_strategies,
        );
    }

    let commands = winner.strategy.apply(&canvas, &session, state);
    let fold = fold_and_apply(
        &editor,
        &editor,
        state.all_accumulated_commands().chain(commands.iter()),
        ApplyMode::Transient,
    );
    let strategy_state = StrategyState {
        current_strategy: Some(winner.strategy.id()),
        current_fitness: winner.fitness,
        current_commands: commands,
        accumulated_commands: state.accumulated_commands.clone(),
        command_descriptions: fold.descriptions,
        sorted_applicable_strategies: selection.sorted_applicable_strategies,
        starting_metadata: state.starting_metadata.clone(),
    };
    DispatchOutcome::assemble(editor, fold.state, Some(session), strategy_state)
}

/// Switch accounting: freeze the outgoing strategy's latest commands into
/// the trail, append a switch record, and start the incoming strategy's
/// accumulation from its fresh commands.
fn apply_with_switch<E, S>(
    trigger: SwitchTrigger,
    stored: &EditorStore<E, S>,
    editor: E,
    session: StrategySession<S>,
    canvas: &E::Canvas,
    winner: RankedStrategy<'_, S>,
    sorted_applicable_strategies: SmallVec<[S::Id; 4]>,
) -> DispatchOutcome<E, S>
where
    E: InteractionEditor,
    S: DispatchStrategy<E>,
    S::Target: Clone,
    S::Command: CanvasCommand<E> + From<StrategySwitched> + Clone,
{
    let state = &stored.strategy_state;
    let mut accumulated = state.accumulated_commands.clone();
    if let Some(outgoing) = state.current_strategy {
        if outgoing != winner.strategy.id() {
            accumulated.push(AccumulatedCommands {
                strategy: Some(outgoing),
                commands: state.current_commands.clone(),
            });
        }
    }

    let fitness_before = state.current_strategy.map(|_| state.current_fitness);
    let record = StrategySwitched::new(
        trigger,
        winner.strategy.name(),
        fitness_before,
        winner.fitness,
    );
    trace!("strategy switch: {record}");
    accumulated.push(AccumulatedCommands {
        strategy: None,
        commands: vec![S::Command::from(record)],
    });

    let commands = winner.strategy.apply(canvas, &session, state);
    let fold = fold_and_apply(
        &editor,
        &editor,
        accumulated
            .iter()
            .flat_map(|entry| entry.commands.iter())
            .chain(commands.iter()),
        ApplyMode::Transient,
    );
    let strategy_state = StrategyState {
        current_strategy: Some(winner.strategy.id()),
        current_fitness: winner.fitness,
        current_commands: commands,
        accumulated_commands: accumulated,
        command_descriptions: fold.descriptions,
        sorted_applicable_strategies,
        starting_metadata: state.starting_metadata.clone(),
    };
    DispatchOutcome::assemble(editor, fold.state, Some(session), strategy_state)
}

/// Handle a modifier change (or a frame with no active strategy yet):
/// re-derive the metadata snapshot from the pre-dispatch committed state,
/// discard all accumulation, and replay selection and application.
pub fn interaction_hard_reset<E, S>(
    strategies: &[S],
    stored: &EditorStore<E, S>,
    editor: E,
    session: StrategySession<S>,
) -> DispatchOutcome<E, S>
where
    E: InteractionEditor,
    S: DispatchStrategy<E>,
    S::Target: Clone,
    S::Command: CanvasCommand<E> + From<StrategySwitched> + Clone,
{
    let metadata = stored.committed.metadata();
    let session = session.refresh_metadata(metadata.clone());
    let canvas = editor.canvas_state();
    let reset = StrategyState::empty(metadata);
    let selection = select_strategy(
        strategies,
        &canvas,
        &session,
        &reset,
        stored.strategy_state.current_strategy,
    );
    match selection.strategy {
        Some(winner) => {
            debug!("interaction hard reset: {} wins", winner.strategy.name());
            let commands = winner.strategy.apply(&canvas, &session, &reset);
            let fold = fold_and_apply(&editor, &editor, commands.iter(), ApplyMode::Transient);
            let strategy_state = StrategyState {
                current_strategy: Some(winner.strategy.id()),
                current_fitness: winner.fitness,
                current_commands: commands,
                accumulated_commands: Vec::new(),
                command_descriptions: fold.descriptions,
                sorted_applicable_strategies: selection.sorted_applicable_strategies,
                starting_metadata: reset.starting_metadata,
            };
            DispatchOutcome::assemble(editor, fold.state, Some(session), strategy_state)
        }
        None => {
            debug!("interaction hard reset: no applicable strategy");
            DispatchOutcome::assemble(editor.clone(), editor, Some(session), reset)
        }
    }
}

/// Handle a commit: fold the whole accumulated trail plus the final
/// strategy's commands permanently over the reduced baseline, and reset the
/// accumulator. The session does not survive the outcome.
pub fn interaction_finished<E, S>(
    strategies: &[S],
    stored: &EditorStore<E, S>,
    session: &StrategySession<S>,
    editor: E,
) -> DispatchOutcome<E, S>
where
    E: InteractionEditor,
    S: DispatchStrategy<E>,
    S::Target: Clone,
    S::Command: CanvasCommand<E> + From<StrategySwitched> + Clone,
{
    let canvas = editor.canvas_state();
    let state = &stored.strategy_state;
    let selection = select_strategy(strategies, &canvas, session, state, state.current_strategy);
    let mut cleared = StrategyState::empty(editor.metadata());
    cleared.sorted_applicable_strategies = selection.sorted_applicable_strategies;
    match selection.strategy {
        Some(winner) => {
            debug!("interaction finished: committing via {}", winner.strategy.name());
            let commands = winner.strategy.apply(&canvas, session, state);
            let fold = fold_and_apply(
                &editor,
                &stored.preview,
                state.all_accumulated_commands().chain(commands.iter()),
                ApplyMode::Permanent,
            );
            DispatchOutcome::assemble(fold.state.clone(), fold.state, None, cleared)
        }
        None => {
            debug!("interaction finished: nothing to commit");
            DispatchOutcome::assemble(editor.clone(), editor, None, cleared)
        }
    }
}

/// Handle an explicit cancellation: discard the session and every preview
/// edit without folding anything. Cancellation is synchronous and total.
pub fn interaction_cancel<E, S>(editor: E) -> DispatchOutcome<E, S>
where
    E: InteractionEditor,
    S: DispatchStrategy<E>,
    S::Target: Clone,
    S::Command: CanvasCommand<E> + From<StrategySwitched> + Clone,
{
    debug!("interaction cancel: discarding session");
    let cleared = StrategyState::empty(editor.metadata());
    DispatchOutcome::assemble(editor.clone(), editor, None, cleared)
}
