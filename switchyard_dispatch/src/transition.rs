// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch signals and the transition decision table.

use thiserror::Error;

/// An end-of-session signal carried by an action in the batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionSignal {
    /// End the session and make its accumulated edits permanent.
    CommitSession,
    /// End the session and discard all preview work.
    CancelSession,
}

/// The end-of-session signals observed across one action batch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSignals {
    /// Some action in the batch requested a commit.
    pub commit: bool,
    /// Some action in the batch requested a cancel.
    pub cancel: bool,
}

impl BatchSignals {
    /// A batch carrying no end-of-session signal.
    pub const NONE: Self = Self {
        commit: false,
        cancel: false,
    };

    /// Collect the signals present anywhere in a batch.
    pub fn from_signals(signals: impl IntoIterator<Item = SessionSignal>) -> Self {
        let mut out = Self::NONE;
        for signal in signals {
            match signal {
                SessionSignal::CommitSession => out.commit = true,
                SessionSignal::CancelSession => out.cancel = true,
            }
        }
        out
    }

    /// The effective end-of-session signal, if any.
    ///
    /// Cancel beats commit when one batch carries both.
    pub fn resolve(self) -> Option<SessionSignal> {
        if self.cancel {
            Some(SessionSignal::CancelSession)
        } else if self.commit {
            Some(SessionSignal::CommitSession)
        } else {
            None
        }
    }
}

/// The transition one dispatched batch performs.
///
/// [`classify_transition`] exposes the decision table as data;
/// [`dispatch_interaction`](crate::dispatch_interaction) implements the same
/// table structurally so that handlers requiring a session receive one by
/// construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// No session on either side: valid idle, nothing happens.
    Passthrough,
    /// A gesture began this batch.
    Start,
    /// The gesture continued with no modifier change.
    Update,
    /// A modifier changed (or no strategy is active yet): replay from the
    /// pre-dispatch state.
    HardReset,
    /// The gesture committed.
    Finished,
    /// The gesture was cancelled without committing.
    Cancel,
}

/// Fatal dispatch contract failures.
///
/// These signal host bugs — transitions dispatched out of order — and have
/// no in-product recovery; see the crate docs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The prior frame had a live session, the reducers produced none, and
    /// the batch signalled neither commit nor cancel.
    #[error("interaction session dropped without a commit or cancel signal")]
    SessionDroppedWithoutSignal,
}

/// Classify the transition for one batch.
///
/// `had_session`/`has_session` are the old/new session presence,
/// `modifiers_changed` compares the two sessions' modifier sets (see
/// [`switchyard_session::modifiers_changed`]), and `has_current_strategy`
/// reflects the prior accumulator.
pub fn classify_transition(
    had_session: bool,
    has_session: bool,
    signals: BatchSignals,
    modifiers_changed: bool,
    has_current_strategy: bool,
) -> Result<Transition, DispatchError> {
    if !had_session {
        // Stray end signals with no active session are no-ops.
        return Ok(if has_session {
            Transition::Start
        } else {
            Transition::Passthrough
        });
    }
    match signals.resolve() {
        Some(SessionSignal::CancelSession) => Ok(Transition::Cancel),
        Some(SessionSignal::CommitSession) => Ok(Transition::Finished),
        None if !has_session => Err(DispatchError::SessionDroppedWithoutSignal),
        None if modifiers_changed || !has_current_strategy => Ok(Transition::HardReset),
        None => Ok(Transition::Update),
    }
}
