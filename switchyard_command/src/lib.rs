// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switchyard Command: order-sensitive commands and the fold/apply pipeline.
//!
//! A [`CanvasCommand`] is an atomic, replay-stable edit: given the same input
//! state it always produces the same output state. Commands are folded
//! strictly left to right over a baseline by [`fold_and_apply`], in one of two
//! modes:
//!
//! - [`ApplyMode::Transient`]: a preview fold. It always starts from the last
//!   *committed* state, never from a prior preview, so every preview frame is
//!   a from-scratch recomputation. This is what makes mid-gesture strategy
//!   switches safe: each switch is a fresh fold, not a diff-patch, and preview
//!   churn can never corrupt the committed state.
//! - [`ApplyMode::Permanent`]: the commit fold. It starts from the supplied
//!   baseline and its result becomes the new committed state.
//!
//! A command that cannot resolve its target reports
//! [`CommandOutcome::TargetMissing`] and is skipped; the remaining commands
//! still apply. Partial success is preferred over aborting a live preview.
//!
//! ## Minimal example
//!
//! ```rust
//! use switchyard_command::{
//!     ApplyMode, CanvasCommand, CommandDescription, CommandOutcome, fold_and_apply,
//! };
//!
//! // A toy editor state: one element with an x coordinate, or none.
//! #[derive(Clone, PartialEq, Debug)]
//! struct Editor {
//!     x: Option<f64>,
//! }
//!
//! struct MoveBy(f64);
//!
//! impl CanvasCommand<Editor> for MoveBy {
//!     fn apply(&self, editor: &Editor) -> CommandOutcome<Editor> {
//!         match editor.x {
//!             Some(x) => CommandOutcome::Applied(Editor { x: Some(x + self.0) }),
//!             // Element is gone: skip, don't abort the fold.
//!             None => CommandOutcome::TargetMissing,
//!         }
//!     }
//!
//!     fn description(&self) -> CommandDescription {
//!         CommandDescription::new(format!("Move by {}", self.0))
//!     }
//! }
//!
//! let committed = Editor { x: Some(10.0) };
//! let commands = [MoveBy(5.0), MoveBy(2.0)];
//! let result = fold_and_apply(&committed, &committed, &commands, ApplyMode::Transient);
//! assert_eq!(result.state.x, Some(17.0));
//! assert_eq!(result.descriptions.len(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// UI-facing description of one applied command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandDescription {
    /// Human-readable summary, e.g. `"Move element by (50, 0)"`.
    pub text: String,
}

impl CommandDescription {
    /// Create a description from any string-like value.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl fmt::Display for CommandDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Result of applying a single command to an editor state.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome<E> {
    /// The command applied and produced a new state.
    Applied(E),
    /// The command's target could not be resolved (stale or deleted);
    /// the fold skips it and continues.
    TargetMissing,
}

/// An atomic, order-sensitive, replay-stable edit to an editor state.
///
/// Implementations must be pure: the same input state must always yield the
/// same outcome. Commands are not required to be commutative; the pipeline
/// applies them strictly in list order.
pub trait CanvasCommand<E> {
    /// Apply this command to `editor`, returning the new state or reporting
    /// that the target no longer resolves.
    fn apply(&self, editor: &E) -> CommandOutcome<E>;

    /// UI-facing description of this command.
    fn description(&self) -> CommandDescription;
}

/// Whether a fold produces a preview or the new committed state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ApplyMode {
    /// Preview fold: starts from the committed state, result is discardable.
    Transient,
    /// Commit fold: starts from the baseline, result becomes the new
    /// committed state.
    Permanent,
}

/// Output of [`fold_and_apply`]: the folded state plus descriptions of the
/// commands that actually applied.
#[derive(Clone, Debug, PartialEq)]
pub struct FoldResult<E> {
    /// The state after folding every resolvable command.
    pub state: E,
    /// Descriptions of the commands that applied, in application order.
    /// Skipped commands contribute nothing.
    pub descriptions: Vec<CommandDescription>,
}

/// Fold `commands` left to right over the mode-appropriate starting state.
///
/// [`ApplyMode::Transient`] folds from `committed`; [`ApplyMode::Permanent`]
/// folds from `base`. Commands reporting [`CommandOutcome::TargetMissing`]
/// are skipped as no-ops and the fold continues.
pub fn fold_and_apply<'c, E, C, I>(
    base: &E,
    committed: &E,
    commands: I,
    mode: ApplyMode,
) -> FoldResult<E>
where
    E: Clone,
    C: CanvasCommand<E> + 'c,
    I: IntoIterator<Item = &'c C>,
{
    let mut state = match mode {
        ApplyMode::Transient => committed.clone(),
        ApplyMode::Permanent => base.clone(),
    };
    let mut descriptions = Vec::new();
    for command in commands {
        match command.apply(&state) {
            CommandOutcome::Applied(next) => {
                descriptions.push(command.description());
                state = next;
            }
            CommandOutcome::TargetMissing => {}
        }
    }
    FoldResult {
        state,
        descriptions,
    }
}

/// What caused a mid-session strategy switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwitchTrigger {
    /// The user explicitly pinned a different strategy.
    UserInput,
    /// The fitness ranking changed and a different strategy won.
    FitnessChange,
}

impl fmt::Display for SwitchTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserInput => f.write_str("user input"),
            Self::FitnessChange => f.write_str("fitness change"),
        }
    }
}

/// Pseudo-command recording a mid-session strategy switch.
///
/// This never edits the canvas; it exists so the accumulated command trail
/// carries a linear, replayable record of which strategy owned which portion
/// of the gesture. Host command types implement `From<StrategySwitched>` and
/// apply it as a described no-op.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategySwitched {
    /// What caused the switch.
    pub trigger: SwitchTrigger,
    /// Display name of the strategy that took over.
    pub new_strategy_name: String,
    /// The outgoing strategy's fitness, if a strategy was active.
    pub fitness_before: Option<f64>,
    /// The incoming strategy's fitness.
    pub fitness_after: f64,
}

impl StrategySwitched {
    /// Record a switch to `new_strategy_name`.
    pub fn new(
        trigger: SwitchTrigger,
        new_strategy_name: impl Into<String>,
        fitness_before: Option<f64>,
        fitness_after: f64,
    ) -> Self {
        Self {
            trigger,
            new_strategy_name: new_strategy_name.into(),
            fitness_before,
            fitness_after,
        }
    }

    /// UI-facing rendering, suitable for a host command's description.
    pub fn description(&self) -> CommandDescription {
        CommandDescription::new(alloc::format!("{self}"))
    }
}

impl fmt::Display for StrategySwitched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fitness_before {
            Some(before) => write!(
                f,
                "Switched to {} ({}, fitness {} \u{2192} {})",
                self.new_strategy_name, self.trigger, before, self.fitness_after
            ),
            None => write!(
                f,
                "Switched to {} ({}, fitness {})",
                self.new_strategy_name, self.trigger, self.fitness_after
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    /// Element positions keyed by a tiny fixed id space.
    #[derive(Clone, Debug, PartialEq)]
    struct Editor {
        x: [Option<f64>; 2],
    }

    enum Cmd {
        MoveBy { id: usize, dx: f64 },
        Delete { id: usize },
    }

    impl CanvasCommand<Editor> for Cmd {
        fn apply(&self, editor: &Editor) -> CommandOutcome<Editor> {
            match *self {
                Self::MoveBy { id, dx } => match editor.x[id] {
                    Some(x) => {
                        let mut next = editor.clone();
                        next.x[id] = Some(x + dx);
                        CommandOutcome::Applied(next)
                    }
                    None => CommandOutcome::TargetMissing,
                },
                Self::Delete { id } => match editor.x[id] {
                    Some(_) => {
                        let mut next = editor.clone();
                        next.x[id] = None;
                        CommandOutcome::Applied(next)
                    }
                    None => CommandOutcome::TargetMissing,
                },
            }
        }

        fn description(&self) -> CommandDescription {
            match *self {
                Self::MoveBy { id, dx } => CommandDescription::new(format!("Move {id} by {dx}")),
                Self::Delete { id } => CommandDescription::new(format!("Delete {id}")),
            }
        }
    }

    fn editor() -> Editor {
        Editor {
            x: [Some(0.0), Some(100.0)],
        }
    }

    #[test]
    fn commands_apply_left_to_right() {
        let committed = editor();
        let commands = vec![
            Cmd::MoveBy { id: 0, dx: 10.0 },
            Cmd::Delete { id: 0 },
            // Applies to id 1; id 0 is already gone.
            Cmd::MoveBy { id: 1, dx: -1.0 },
        ];
        let result = fold_and_apply(&committed, &committed, &commands, ApplyMode::Transient);
        assert_eq!(result.state.x, [None, Some(99.0)]);
        assert_eq!(result.descriptions.len(), 3);
    }

    #[test]
    fn transient_folds_from_committed_not_base() {
        let base = editor();
        let committed = Editor {
            x: [Some(50.0), Some(100.0)],
        };
        let commands = vec![Cmd::MoveBy { id: 0, dx: 1.0 }];
        let result = fold_and_apply(&base, &committed, &commands, ApplyMode::Transient);
        assert_eq!(result.state.x[0], Some(51.0));
    }

    #[test]
    fn permanent_folds_from_base_not_committed() {
        let base = editor();
        let committed = Editor {
            x: [Some(50.0), Some(100.0)],
        };
        let commands = vec![Cmd::MoveBy { id: 0, dx: 1.0 }];
        let result = fold_and_apply(&base, &committed, &commands, ApplyMode::Permanent);
        assert_eq!(result.state.x[0], Some(1.0));
    }

    #[test]
    fn transient_fold_is_idempotent() {
        let committed = editor();
        let commands = vec![
            Cmd::MoveBy { id: 0, dx: 5.0 },
            Cmd::MoveBy { id: 0, dx: 5.0 },
        ];
        let first = fold_and_apply(&committed, &committed, &commands, ApplyMode::Transient);
        let second = fold_and_apply(&committed, &committed, &commands, ApplyMode::Transient);
        assert_eq!(first, second);
    }

    #[test]
    fn unresolved_target_is_skipped_and_undescribed() {
        let committed = Editor {
            x: [None, Some(100.0)],
        };
        let commands = vec![
            Cmd::MoveBy { id: 0, dx: 5.0 },
            Cmd::MoveBy { id: 1, dx: 5.0 },
        ];
        let result = fold_and_apply(&committed, &committed, &commands, ApplyMode::Transient);
        assert_eq!(result.state.x, [None, Some(105.0)]);
        assert_eq!(result.descriptions, vec![CommandDescription::new("Move 1 by 5")]);
    }

    #[test]
    fn empty_command_list_is_identity() {
        let committed = editor();
        let result =
            fold_and_apply::<_, Cmd, _>(&committed, &committed, &[], ApplyMode::Transient);
        assert_eq!(result.state, committed);
        assert!(result.descriptions.is_empty());
    }

    #[test]
    fn switch_record_renders_trigger_and_fitness() {
        let switched = StrategySwitched::new(SwitchTrigger::FitnessChange, "Reparent", Some(2.0), 10.0);
        assert_eq!(
            switched.description().text,
            "Switched to Reparent (fitness change, fitness 2 \u{2192} 10)"
        );

        let first = StrategySwitched::new(SwitchTrigger::UserInput, "Move", None, 3.0);
        assert_eq!(
            first.description().text,
            "Switched to Move (user input, fitness 3)"
        );
    }
}
