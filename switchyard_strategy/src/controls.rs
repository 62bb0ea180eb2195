// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay-control declarations and the visibility pass-through.
//!
//! Strategies declare which overlay controls (resize handles, reparent bars,
//! guides) should render while they are applicable. The core never interprets
//! a control; it only answers the one question rendering cannot: *which
//! strategy is currently active*. [`visible_controls`] applies each control's
//! declared policy against that answer and hands the survivors to the
//! renderer.

use alloc::vec::Vec;

use crate::CanvasStrategy;

/// When a declared overlay control should render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlVisibility {
    /// Render whenever the owning strategy is applicable.
    AlwaysVisible,
    /// Render only while the owning strategy is the active one.
    VisibleOnlyWhileActive,
    /// Render unless a *different* strategy is currently active.
    VisibleExceptWhenOtherStrategyIsActive,
}

/// One overlay control declared by a strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControlDescriptor {
    /// Stable key identifying the control to the renderer.
    pub key: &'static str,
    /// Declared visibility policy.
    pub visibility: ControlVisibility,
}

impl ControlDescriptor {
    /// Declare a control.
    pub const fn new(key: &'static str, visibility: ControlVisibility) -> Self {
        Self { key, visibility }
    }
}

/// Evaluate one control's policy given the activity picture.
///
/// `owner_is_active`: the declaring strategy is the active one.
/// `other_is_active`: some different strategy is active.
#[inline]
pub fn control_is_visible(
    visibility: ControlVisibility,
    owner_is_active: bool,
    other_is_active: bool,
) -> bool {
    match visibility {
        ControlVisibility::AlwaysVisible => true,
        ControlVisibility::VisibleOnlyWhileActive => owner_is_active,
        ControlVisibility::VisibleExceptWhenOtherStrategyIsActive => !other_is_active,
    }
}

/// The controls to render this frame, in registration order.
///
/// `applicable` is the ranked id list from the current strategy state and
/// `active` the currently winning strategy, if any. Each surviving control is
/// paired with its owning strategy's id so the renderer can key overlays.
pub fn visible_controls<'s, S: CanvasStrategy>(
    strategies: &'s [S],
    applicable: &[S::Id],
    active: Option<S::Id>,
) -> Vec<(S::Id, &'s ControlDescriptor)> {
    let mut out = Vec::new();
    for strategy in strategies {
        let id = strategy.id();
        if !applicable.contains(&id) {
            continue;
        }
        let owner_is_active = active == Some(id);
        let other_is_active = active.is_some() && !owner_is_active;
        for control in strategy.controls() {
            if control_is_visible(control.visibility, owner_is_active, other_is_active) {
                out.push((id, control));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_visible_ignores_activity() {
        for (owner, other) in [(false, false), (true, false), (false, true)] {
            assert!(
                control_is_visible(ControlVisibility::AlwaysVisible, owner, other),
                "always-visible must render regardless of activity"
            );
        }
    }

    #[test]
    fn while_active_requires_ownership() {
        assert!(control_is_visible(
            ControlVisibility::VisibleOnlyWhileActive,
            true,
            false
        ));
        assert!(!control_is_visible(
            ControlVisibility::VisibleOnlyWhileActive,
            false,
            false
        ));
        assert!(!control_is_visible(
            ControlVisibility::VisibleOnlyWhileActive,
            false,
            true
        ));
    }

    #[test]
    fn except_other_hides_only_under_competition() {
        assert!(control_is_visible(
            ControlVisibility::VisibleExceptWhenOtherStrategyIsActive,
            false,
            false
        ));
        assert!(control_is_visible(
            ControlVisibility::VisibleExceptWhenOtherStrategyIsActive,
            true,
            false
        ));
        assert!(!control_is_visible(
            ControlVisibility::VisibleExceptWhenOtherStrategyIsActive,
            false,
            true
        ));
    }
}
