// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams between a [`VisibilityTracker`](crate::VisibilityTracker) and its host.
//!
//! The tracker never touches a window system directly. A host supplies:
//!
//! - element bounds through [`TrackedNode`],
//! - the viewport size, trigger subscriptions, and one-shot timers through
//!   [`TrackerHost`].
//!
//! In return the host forwards delivered triggers and elapsed timers to
//! [`VisibilityTracker::handle_trigger`](crate::VisibilityTracker::handle_trigger)
//! and [`VisibilityTracker::handle_timer`](crate::VisibilityTracker::handle_timer).

use core::fmt;

use kurbo::Size;

use crate::rect::RawRect;

/// Signals that can cause a visibility recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The viewport (or an ancestor scroller) scrolled.
    Scroll,
    /// The viewport changed size.
    Resize,
}

impl Trigger {
    /// Event name as used by DOM-like hosts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-issued handle for one trigger subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Host-issued handle for one scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// A live handle to the element being tracked.
pub trait TrackedNode {
    /// Current bounding rectangle in viewport coordinates.
    ///
    /// Returns `None` when the element cannot be measured, for example after
    /// it has been unmounted. The tracker then skips the recompute.
    fn bounding_rect(&self) -> Option<RawRect>;
}

impl<N: TrackedNode + ?Sized> TrackedNode for &N {
    fn bounding_rect(&self) -> Option<RawRect> {
        (**self).bounding_rect()
    }
}

/// Viewport, subscription, and timer services a tracker needs from its host.
///
/// All calls happen synchronously on the host's event thread. Ids returned by
/// [`subscribe`](Self::subscribe) and [`schedule`](Self::schedule) must be
/// unique among the host's live subscriptions and timers respectively.
pub trait TrackerHost {
    /// Current viewport size; the default containment is `0,0 .. width,height`.
    fn viewport_size(&self) -> Size;

    /// Starts delivering `trigger` to the tracker.
    fn subscribe(&mut self, trigger: Trigger) -> SubscriptionId;

    /// Stops a subscription. Unknown ids are ignored.
    fn unsubscribe(&mut self, subscription: SubscriptionId);

    /// Schedules a one-shot timer that elapses after `delay_ms` milliseconds.
    fn schedule(&mut self, delay_ms: u64) -> TimerId;

    /// Cancels a timer that has not elapsed yet. Unknown ids are ignored.
    fn cancel(&mut self, timer: TimerId);
}

impl<H: TrackerHost + ?Sized> TrackerHost for &mut H {
    fn viewport_size(&self) -> Size {
        (**self).viewport_size()
    }

    fn subscribe(&mut self, trigger: Trigger) -> SubscriptionId {
        (**self).subscribe(trigger)
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        (**self).unsubscribe(subscription);
    }

    fn schedule(&mut self, delay_ms: u64) -> TimerId {
        (**self).schedule(delay_ms)
    }

    fn cancel(&mut self, timer: TimerId) {
        (**self).cancel(timer);
    }
}
