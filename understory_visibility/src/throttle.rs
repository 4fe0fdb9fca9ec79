// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leading-edge throttle windows driven by host timers.
//!
//! ## Policy
//!
//! - The first event while no window is open runs immediately and opens a
//!   window by scheduling a timer for `limit_ms`.
//! - Events while the window is open are suppressed.
//! - When the window's timer elapses the window closes. With `trailing`
//!   enabled and at least one suppressed event, one more run happens right
//!   away and a fresh window opens.
//! - A limit of zero never opens a window: every event runs.
//!
//! ## Minimal example
//!
//! ```
//! use understory_visibility::{Throttle, ThrottleDecision};
//! # use understory_visibility::{SubscriptionId, TimerId, TrackerHost, Trigger};
//! # use kurbo::Size;
//! # #[derive(Default)]
//! # struct Timers { next: u64 }
//! # impl TrackerHost for Timers {
//! #     fn viewport_size(&self) -> Size { Size::ZERO }
//! #     fn subscribe(&mut self, _: Trigger) -> SubscriptionId { SubscriptionId(0) }
//! #     fn unsubscribe(&mut self, _: SubscriptionId) {}
//! #     fn schedule(&mut self, _: u64) -> TimerId { self.next += 1; TimerId(self.next) }
//! #     fn cancel(&mut self, _: TimerId) {}
//! # }
//! let mut host = Timers::default();
//! let mut throttle = Throttle::new(250, false);
//!
//! assert_eq!(throttle.on_event(&mut host), ThrottleDecision::Run);
//! assert_eq!(throttle.on_event(&mut host), ThrottleDecision::Suppress);
//!
//! let window = throttle.window().unwrap();
//! assert_eq!(throttle.on_timer(window, &mut host), Some(ThrottleDecision::Suppress));
//! assert_eq!(throttle.on_event(&mut host), ThrottleDecision::Run);
//! ```

use crate::host::{TimerId, TrackerHost};

/// Default throttle window in milliseconds.
pub const DEFAULT_THROTTLE_LIMIT_MS: u64 = 250;

/// Whether a throttled event (or elapsed window) should recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThrottleDecision {
    /// Recompute now.
    Run,
    /// Do nothing.
    Suppress,
}

/// Throttle state for one trigger type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Throttle {
    limit_ms: u64,
    trailing: bool,
    window: Option<TimerId>,
    pending: bool,
}

impl Throttle {
    /// Creates a throttle with the given window length.
    #[must_use]
    pub const fn new(limit_ms: u64, trailing: bool) -> Self {
        Self {
            limit_ms,
            trailing,
            window: None,
            pending: false,
        }
    }

    /// Window length in milliseconds.
    #[must_use]
    pub const fn limit_ms(&self) -> u64 {
        self.limit_ms
    }

    /// Timer of the currently open window, if any.
    #[must_use]
    pub const fn window(&self) -> Option<TimerId> {
        self.window
    }

    /// Returns `true` if a suppressed event is waiting for the trailing run.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending
    }

    /// Feeds one event through the throttle.
    pub fn on_event(&mut self, host: &mut impl TrackerHost) -> ThrottleDecision {
        if self.window.is_some() {
            self.pending |= self.trailing;
            return ThrottleDecision::Suppress;
        }
        self.open(host);
        ThrottleDecision::Run
    }

    /// Feeds an elapsed timer through the throttle.
    ///
    /// Returns `None` if `timer` is not this throttle's window.
    pub fn on_timer(
        &mut self,
        timer: TimerId,
        host: &mut impl TrackerHost,
    ) -> Option<ThrottleDecision> {
        if self.window != Some(timer) {
            return None;
        }
        self.window = None;
        if !self.pending {
            return Some(ThrottleDecision::Suppress);
        }
        self.pending = false;
        self.open(host);
        Some(ThrottleDecision::Run)
    }

    /// Closes any open window without running, cancelling its timer.
    pub fn cancel(&mut self, host: &mut impl TrackerHost) {
        if let Some(timer) = self.window.take() {
            host.cancel(timer);
        }
        self.pending = false;
    }

    fn open(&mut self, host: &mut impl TrackerHost) {
        if self.limit_ms > 0 {
            self.window = Some(host.schedule(self.limit_ms));
        }
    }
}
