// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Switchyard Session: interaction-session value types for canvas gesture editing.
//!
//! An [`InteractionSession`] describes one continuous pointer gesture on a
//! canvas: where it started, the current drag offset, which modifier keys are
//! held, what was grabbed, an optional user-pinned strategy, and an immutable
//! metadata snapshot taken when the gesture began.
//!
//! Sessions are plain values. Upstream input handling creates one at gesture
//! start and replaces it wholesale on every pointer move; the dispatch layer
//! never mutates a live session in place. The only sanctioned rewrite is
//! [`InteractionSession::refresh_metadata`], which a hard reset uses to
//! re-derive the snapshot after a modifier change.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use switchyard_session::{InteractionSession, Modifiers};
//!
//! // Gesture starts at (10, 20) on element 7, no modifiers held.
//! // Id and metadata types are application-specific; here `u32` and `()`.
//! let session: InteractionSession<&str, u32, ()> =
//!     InteractionSession::begin(Point::new(10.0, 20.0), Modifiers::empty(), 7, ());
//! assert!(session.input.drag.is_none());
//!
//! // Pointer moved 50 units right: upstream replaces the session wholesale.
//! let session = session.with_drag(Vec2::new(50.0, 0.0));
//! assert_eq!(session.input.drag, Some(Vec2::new(50.0, 0.0)));
//! ```
//!
//! ## Hard-reset detection
//!
//! A modifier change mid-gesture invalidates everything derived so far, so the
//! dispatch layer compares the stored and freshly reduced sessions with
//! [`modifiers_changed`] to decide between a plain update and a hard reset:
//!
//! ```rust
//! use kurbo::Point;
//! use switchyard_session::{InteractionSession, Modifiers, modifiers_changed};
//!
//! let old: InteractionSession<&str, u32, ()> =
//!     InteractionSession::begin(Point::ZERO, Modifiers::empty(), 1, ());
//! let new = old.clone().with_modifiers(Modifiers::SHIFT);
//! assert!(modifiers_changed(Some(&old), Some(&new)));
//! assert!(!modifiers_changed(Some(&old), Some(&old)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::{Point, Vec2};

bitflags::bitflags! {
    /// Modifier keys held during a gesture.
    ///
    /// A change in this set mid-gesture triggers a hard reset of the
    /// interaction (see [`modifiers_changed`]).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// The alt/option key.
        const ALT = 1 << 0;
        /// The platform command key.
        const CMD = 1 << 1;
        /// The control key.
        const CTRL = 1 << 2;
        /// The shift key.
        const SHIFT = 1 << 3;
    }
}

/// Pointer gesture data: where the gesture started and where it is now.
///
/// The `drag` offset is `None` until the pointer has actually moved; a
/// mouse-down with no movement yet is a live session with no drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Canvas-space position where the gesture started.
    pub start: Point,
    /// Offset of the current pointer position from `start`, if it has moved.
    pub drag: Option<Vec2>,
    /// Modifier keys currently held.
    pub modifiers: Modifiers,
}

impl PointerInput {
    /// Pointer input for a gesture that just started at `start`.
    pub fn begin(start: Point, modifiers: Modifiers) -> Self {
        Self {
            start,
            drag: None,
            modifiers,
        }
    }

    /// Current pointer position, derived from start and drag offset.
    #[inline]
    pub fn current(&self) -> Point {
        self.start + self.drag.unwrap_or(Vec2::ZERO)
    }
}

/// One live gesture on the canvas.
///
/// Generic over the application's strategy id type `I`, drag-target
/// descriptor `T` (what was grabbed: an element, a resize handle, empty
/// canvas), and metadata snapshot `M`.
///
/// The metadata snapshot is taken at session start and stays fixed for the
/// session's lifetime; only a hard reset re-derives it via
/// [`refresh_metadata`](Self::refresh_metadata).
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionSession<I, T, M> {
    /// Pointer gesture data for the current frame.
    pub input: PointerInput,
    /// What the gesture grabbed, classified upstream.
    pub target: T,
    /// Strategy the user explicitly pinned mid-gesture, if any.
    pub pinned_strategy: Option<I>,
    /// Metadata snapshot taken at session start.
    pub metadata: M,
}

impl<I, T, M> InteractionSession<I, T, M> {
    /// Create a session for a gesture starting at `start` on `target`.
    pub fn begin(start: Point, modifiers: Modifiers, target: T, metadata: M) -> Self {
        Self {
            input: PointerInput::begin(start, modifiers),
            target,
            pinned_strategy: None,
            metadata,
        }
    }

    /// This session with the drag offset replaced.
    #[must_use]
    pub fn with_drag(mut self, drag: Vec2) -> Self {
        self.input.drag = Some(drag);
        self
    }

    /// This session with the modifier set replaced.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.input.modifiers = modifiers;
        self
    }

    /// This session with a user-pinned strategy.
    #[must_use]
    pub fn with_pinned_strategy(mut self, strategy: I) -> Self {
        self.pinned_strategy = Some(strategy);
        self
    }

    /// This session with a freshly derived metadata snapshot.
    ///
    /// Used by the hard-reset transition, which re-derives the snapshot from
    /// the pre-dispatch committed state after a modifier change.
    #[must_use]
    pub fn refresh_metadata(mut self, metadata: M) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Returns `true` when the held modifier set differs between two frames.
///
/// Either side may be absent (no session that frame); two absent sessions
/// compare equal. A `true` result is the trigger for the hard-reset
/// transition.
pub fn modifiers_changed<I, T, M>(
    old: Option<&InteractionSession<I, T, M>>,
    new: Option<&InteractionSession<I, T, M>>,
) -> bool {
    match (old, new) {
        (None, None) => false,
        (Some(old), Some(new)) => old.input.modifiers != new.input.modifiers,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(modifiers: Modifiers) -> InteractionSession<&'static str, u32, ()> {
        InteractionSession::begin(Point::new(1.0, 2.0), modifiers, 9, ())
    }

    #[test]
    fn begin_has_no_drag() {
        let s = session(Modifiers::empty());
        assert!(s.input.drag.is_none());
        assert_eq!(s.input.current(), Point::new(1.0, 2.0));
    }

    #[test]
    fn with_drag_updates_current_position() {
        let s = session(Modifiers::empty()).with_drag(Vec2::new(50.0, 0.0));
        assert_eq!(s.input.current(), Point::new(51.0, 2.0));
    }

    #[test]
    fn modifiers_changed_detects_toggles() {
        let plain = session(Modifiers::empty());
        let shifted = session(Modifiers::SHIFT);

        assert!(!modifiers_changed::<&str, u32, ()>(None, None));
        assert!(!modifiers_changed(Some(&plain), Some(&plain)));
        assert!(modifiers_changed(Some(&plain), Some(&shifted)));
        assert!(modifiers_changed(Some(&plain), None));
        assert!(modifiers_changed(None, Some(&shifted)));
    }

    #[test]
    fn refresh_metadata_replaces_snapshot() {
        let s: InteractionSession<&str, u32, u64> =
            InteractionSession::begin(Point::ZERO, Modifiers::empty(), 1, 10);
        let s = s.refresh_metadata(20);
        assert_eq!(s.metadata, 20);
    }
}
