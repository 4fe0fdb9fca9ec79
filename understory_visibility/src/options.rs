// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use crate::geometry::{PartialVisibility, VisibilityPercent};
use crate::host::Trigger;
use crate::rect::{EdgeOffsets, VisibilityRect};
use crate::throttle::{DEFAULT_THROTTLE_LIMIT_MS, Throttle};

/// Callback invoked after every recompute with `(is_visible, percent_visible)`.
pub type VisibilityCallback = Box<dyn FnMut(bool, VisibilityPercent)>;

/// Configuration for a [`VisibilityTracker`](crate::VisibilityTracker).
///
/// Defaults: full visibility, scroll checks on with a 250ms window, resize
/// checks off with a 250ms window, trailing runs on, zero edge offsets, and
/// the host viewport as containment.
///
/// With trailing runs off, a burst of events that ends inside a throttle
/// window leaves the state describing the first event of the burst until the
/// next event arrives.
pub struct VisibilityOptions {
    /// Called after every recompute, whether or not visibility changed.
    pub on_visibility_change: Option<VisibilityCallback>,
    /// What counts as visible.
    pub partially_visible: PartialVisibility,
    /// Recompute on [`Trigger::Scroll`].
    pub scroll_check: bool,
    /// Scroll throttle window in milliseconds.
    pub scroll_throttle_limit: u64,
    /// Recompute on [`Trigger::Resize`].
    pub resize_check: bool,
    /// Resize throttle window in milliseconds.
    pub resize_throttle_limit: u64,
    /// Run once more when a window closes if events were suppressed inside it.
    pub trailing: bool,
    /// Per-edge tolerance for the boolean check.
    pub min_element_offset: EdgeOffsets,
    /// Fixed containment rectangle; `None` uses the host viewport.
    pub containment: Option<VisibilityRect>,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            on_visibility_change: None,
            partially_visible: PartialVisibility::Full,
            scroll_check: true,
            scroll_throttle_limit: DEFAULT_THROTTLE_LIMIT_MS,
            resize_check: false,
            resize_throttle_limit: DEFAULT_THROTTLE_LIMIT_MS,
            trailing: true,
            min_element_offset: EdgeOffsets::ZERO,
            containment: None,
        }
    }
}

impl fmt::Debug for VisibilityOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityOptions")
            .field(
                "on_visibility_change",
                &self.on_visibility_change.as_ref().map(|_| "FnMut"),
            )
            .field("partially_visible", &self.partially_visible)
            .field("scroll_check", &self.scroll_check)
            .field("scroll_throttle_limit", &self.scroll_throttle_limit)
            .field("resize_check", &self.resize_check)
            .field("resize_throttle_limit", &self.resize_throttle_limit)
            .field("trailing", &self.trailing)
            .field("min_element_offset", &self.min_element_offset)
            .field("containment", &self.containment)
            .finish()
    }
}

impl VisibilityOptions {
    /// Options with every default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the visibility-change callback.
    #[must_use]
    pub fn on_visibility_change(
        mut self,
        callback: impl FnMut(bool, VisibilityPercent) + 'static,
    ) -> Self {
        self.on_visibility_change = Some(Box::new(callback));
        self
    }

    /// Sets the partial-visibility mode; accepts a `bool`, an [`Edge`](crate::Edge),
    /// or a [`PartialVisibility`].
    #[must_use]
    pub fn with_partially_visible(mut self, mode: impl Into<PartialVisibility>) -> Self {
        self.partially_visible = mode.into();
        self
    }

    /// Enables or disables scroll-triggered recomputes.
    #[must_use]
    pub fn with_scroll_check(mut self, enabled: bool) -> Self {
        self.scroll_check = enabled;
        self
    }

    /// Sets the scroll throttle window; negative values mean no throttling.
    #[must_use]
    pub fn with_scroll_throttle_limit(mut self, limit_ms: i64) -> Self {
        self.scroll_throttle_limit = non_negative_ms(limit_ms);
        self
    }

    /// Enables or disables resize-triggered recomputes.
    #[must_use]
    pub fn with_resize_check(mut self, enabled: bool) -> Self {
        self.resize_check = enabled;
        self
    }

    /// Sets the resize throttle window; negative values mean no throttling.
    #[must_use]
    pub fn with_resize_throttle_limit(mut self, limit_ms: i64) -> Self {
        self.resize_throttle_limit = non_negative_ms(limit_ms);
        self
    }

    /// Enables or disables the trailing run when a throttle window closes.
    #[must_use]
    pub fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    /// Sets per-edge offsets for the boolean check.
    #[must_use]
    pub fn with_min_element_offset(mut self, offsets: EdgeOffsets) -> Self {
        self.min_element_offset = offsets;
        self
    }

    /// Measures against a fixed rectangle instead of the host viewport.
    #[must_use]
    pub fn with_containment(mut self, containment: VisibilityRect) -> Self {
        self.containment = Some(containment);
        self
    }

    /// Whether `trigger` is enabled.
    #[must_use]
    pub fn checks(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Scroll => self.scroll_check,
            Trigger::Resize => self.resize_check,
        }
    }

    pub(crate) fn throttle_for(&self, trigger: Trigger) -> Throttle {
        let limit = match trigger {
            Trigger::Scroll => self.scroll_throttle_limit,
            Trigger::Resize => self.resize_throttle_limit,
        };
        Throttle::new(limit, self.trailing)
    }
}

fn non_negative_ms(limit_ms: i64) -> u64 {
    u64::try_from(limit_ms).unwrap_or(0)
}
