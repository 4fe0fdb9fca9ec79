// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_visibility --heading-base-level=0

//! Understory Visibility: viewport visibility tracking for UI elements.
//!
//! This crate answers "is this element on screen, and how much of it?" without
//! assuming any particular window system. It has two layers:
//!
//! - **Geometry**: pure functions over integer pixel rectangles.
//!   [`normalize_rect`] accepts either `{x, y, width, height}` or
//!   `{top, left, bottom, right}` bounds, [`is_visible`] performs the edge
//!   checks, and [`compute_percent_visible`] measures the overlap.
//! - **Tracking**: [`VisibilityTracker`] owns scroll/resize subscriptions for
//!   one element, throttles them, recomputes, and reports through a callback.
//!
//! The host supplies element bounds ([`TrackedNode`]) and viewport size,
//! subscriptions, and timers ([`TrackerHost`]), then forwards delivered
//! triggers and elapsed timers back into the tracker.
//!
//! ## Geometry
//!
//! ```rust
//! use understory_visibility::{
//!     EdgeOffsets, PartialVisibility, RawRect, VisibilityRect, compute_percent_visible,
//!     is_visible, normalize_rect,
//! };
//!
//! let node = normalize_rect(RawRect::Origin { x: 10.0, y: 80.5, width: 40.0, height: 40.0 });
//! let viewport = VisibilityRect::new(0, 0, 100, 100);
//!
//! // The node hangs 20px off the bottom of the viewport.
//! assert!(!is_visible(node, viewport, EdgeOffsets::ZERO, PartialVisibility::Full));
//! assert!(is_visible(node, viewport, EdgeOffsets::ZERO, PartialVisibility::Any));
//!
//! let percent = compute_percent_visible(node, viewport);
//! assert_eq!(percent.vertical, 0.5);
//! ```
//!
//! ## Tracking
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_visibility::{
//!     RawRect, SubscriptionId, TimerId, TrackedNode, TrackerHost, Trigger, VisibilityOptions,
//!     VisibilityTracker,
//! };
//!
//! struct Window {
//!     next_id: u64,
//! }
//!
//! impl TrackerHost for Window {
//!     fn viewport_size(&self) -> Size {
//!         Size::new(800.0, 600.0)
//!     }
//!     fn subscribe(&mut self, _trigger: Trigger) -> SubscriptionId {
//!         self.next_id += 1;
//!         SubscriptionId(self.next_id)
//!     }
//!     fn unsubscribe(&mut self, _subscription: SubscriptionId) {}
//!     fn schedule(&mut self, _delay_ms: u64) -> TimerId {
//!         self.next_id += 1;
//!         TimerId(self.next_id)
//!     }
//!     fn cancel(&mut self, _timer: TimerId) {}
//! }
//!
//! struct Banner(Rect);
//!
//! impl TrackedNode for Banner {
//!     fn bounding_rect(&self) -> Option<RawRect> {
//!         Some(self.0.into())
//!     }
//! }
//!
//! let options = VisibilityOptions::new().on_visibility_change(|visible, percent| {
//!     println!("visible: {visible}, {:.0}% on screen", percent.overall * 100.0);
//! });
//! let mut tracker = VisibilityTracker::new(Window { next_id: 0 }, options);
//!
//! let state = tracker.attach(Banner(Rect::new(0.0, 0.0, 800.0, 120.0))).unwrap();
//! assert!(state.is_visible);
//!
//! // The first scroll recomputes immediately; the next one inside the window is throttled.
//! assert!(tracker.handle_trigger(Trigger::Scroll).is_some());
//! assert!(tracker.handle_trigger(Trigger::Scroll).is_none());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo`, `thiserror`, and `tracing`.
//! - `libm`: float math for `no_std` builds through `kurbo`.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod error;
mod geometry;
mod host;
mod options;
mod rect;
mod throttle;
mod tracker;

pub use error::ParseEdgeError;
pub use geometry::{
    Edge, EdgeChecks, PartialVisibility, VisibilityPercent, compute_percent_visible, is_visible,
};
pub use host::{SubscriptionId, TimerId, TrackedNode, TrackerHost, Trigger};
pub use options::{VisibilityCallback, VisibilityOptions};
pub use rect::{EdgeOffsets, RawRect, VisibilityRect, normalize_rect};
pub use throttle::{DEFAULT_THROTTLE_LIMIT_MS, Throttle, ThrottleDecision};
pub use tracker::{VisibilityState, VisibilityTracker};
