// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switchyard Dispatch: the per-batch interaction state machine.
//!
//! This crate is the single call-in point per action batch for canvas gesture
//! editing. [`dispatch_interaction`] looks at the prior store frame, the
//! freshly reduced frame, and the batch's end-of-session signals, classifies
//! exactly one transition, and routes to the matching handler:
//!
//! | Transition | Precondition | Effect |
//! |---|---|---|
//! | start | no prior session, new session present | fresh accumulator seeded from the session's metadata snapshot; select; apply the winner transiently |
//! | update | session persists, modifiers unchanged, a strategy is active | re-select; re-fold, freezing the outgoing strategy's commands on a winner change |
//! | hard reset | a modifier changed, or no strategy is active yet | re-derive the metadata snapshot from the pre-dispatch state; discard accumulation; re-select and re-apply |
//! | finished | batch signals commit | permanent fold of the whole accumulated trail plus the final commands; accumulator reset |
//! | cancel | batch signals cancellation | session discarded, nothing folded, accumulator reset |
//!
//! Cancel beats commit when one batch carries both signals. A batch with no
//! session on either side is a valid idle pass-through, stray end signals
//! included.
//!
//! ## Two-tier state
//!
//! Every outcome carries a *committed* and a *preview* editor value. Preview
//! folds are transient: they always recompute from the committed state, so
//! preview churn — including mid-gesture strategy switches — can never
//! corrupt the committed state. The committed value changes only in the
//! permanent fold of a finish transition.
//!
//! ## Purity and ordering
//!
//! Everything here is single-threaded and synchronous: one batch is fully
//! processed before the next, in dispatch order, and no step suspends or
//! performs I/O. Strategy functions and command folds must be pure; the
//! hard-reset transition relies on replaying them from stored inputs.
//!
//! The one contract failure a host can express — dropping a live session
//! from the reduced frame without signalling commit or cancel — surfaces as
//! [`DispatchError::SessionDroppedWithoutSignal`]. Transitions that would
//! need a session cannot be invoked without one: each handler takes it as a
//! non-optional parameter.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod handlers;
mod store;
mod transition;

pub use handlers::{
    dispatch_interaction, interaction_cancel, interaction_finished, interaction_hard_reset,
    interaction_start, interaction_update,
};
pub use store::{DispatchOutcome, DispatchStrategy, EditorStore, InteractionEditor, ReducedFrame};
pub use transition::{BatchSignals, DispatchError, SessionSignal, Transition, classify_transition};
