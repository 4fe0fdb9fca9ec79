// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility tracker: owns trigger subscriptions and recomputes on demand.
//!
//! ## Lifecycle
//!
//! 1) Create a tracker with [`VisibilityTracker::new`], handing it the host
//!    and the [`VisibilityOptions`].
//! 2) Call [`VisibilityTracker::attach`] once the element exists. This
//!    subscribes to every enabled [`Trigger`] and measures once.
//! 3) Forward host deliveries to [`VisibilityTracker::handle_trigger`] and
//!    [`VisibilityTracker::handle_timer`].
//! 4) Call [`VisibilityTracker::detach`] when the element goes away. Dropping
//!    the tracker detaches as well.
//!
//! Every recompute replaces [`VisibilityState`] wholesale and invokes the
//! `on_visibility_change` callback, whether or not visibility changed.

use tracing::{debug, trace};

use crate::geometry::{VisibilityPercent, compute_percent_visible, is_visible};
use crate::host::{SubscriptionId, TimerId, TrackedNode, TrackerHost, Trigger};
use crate::options::VisibilityOptions;
use crate::rect::{VisibilityRect, normalize_rect};
use crate::throttle::{Throttle, ThrottleDecision};

/// Result of the most recent recompute.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisibilityState {
    /// Outcome of the boolean check.
    pub is_visible: bool,
    /// Visible fractions of the node.
    pub percent_visible: VisibilityPercent,
    /// Normalized node rectangle that was measured; `None` before the first measurement.
    pub rect: Option<VisibilityRect>,
}

#[derive(Clone, Copy, Debug)]
struct Listener {
    subscription: SubscriptionId,
    throttle: Throttle,
}

/// Tracks the visibility of one element inside its host viewport.
///
/// `N` is the host's element handle and `H` the host services. The host may be
/// owned, or borrowed as `&mut H`.
#[derive(Debug)]
pub struct VisibilityTracker<N: TrackedNode, H: TrackerHost> {
    host: H,
    options: VisibilityOptions,
    node: Option<N>,
    state: VisibilityState,
    scroll: Option<Listener>,
    resize: Option<Listener>,
}

impl<N: TrackedNode, H: TrackerHost> VisibilityTracker<N, H> {
    /// Creates a detached tracker.
    pub fn new(host: H, options: VisibilityOptions) -> Self {
        Self {
            host,
            options,
            node: None,
            state: VisibilityState::default(),
            scroll: None,
            resize: None,
        }
    }

    /// Most recent visibility state.
    pub fn state(&self) -> &VisibilityState {
        &self.state
    }

    /// Returns `true` while an element is attached.
    pub fn is_attached(&self) -> bool {
        self.node.is_some()
    }

    /// The attached element, if any.
    pub fn node(&self) -> Option<&N> {
        self.node.as_ref()
    }

    /// The tracker's configuration.
    pub fn options(&self) -> &VisibilityOptions {
        &self.options
    }

    /// Host services.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host services.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns `true` if the tracker currently holds a subscription for `trigger`.
    pub fn is_subscribed(&self, trigger: Trigger) -> bool {
        self.listener(trigger).is_some()
    }

    /// Attaches to `node`, subscribes to enabled triggers, and measures once.
    ///
    /// An already attached element is detached first. The state is reset
    /// before the initial measurement, so it reads as not visible if the
    /// element cannot be measured yet.
    pub fn attach(&mut self, node: N) -> Option<VisibilityState> {
        if self.is_attached() {
            self.detach();
        }
        self.node = Some(node);
        self.state = VisibilityState::default();

        for trigger in [Trigger::Scroll, Trigger::Resize] {
            if !self.options.checks(trigger) {
                continue;
            }
            let listener = Listener {
                subscription: self.host.subscribe(trigger),
                throttle: self.options.throttle_for(trigger),
            };
            debug!(
                %trigger,
                subscription = listener.subscription.0,
                throttle_ms = listener.throttle.limit_ms(),
                "subscribed"
            );
            *self.listener_slot(trigger) = Some(listener);
        }

        self.check()
    }

    /// Attaches on `Some`, detaches on `None`.
    pub fn set_node(&mut self, node: Option<N>) -> Option<VisibilityState> {
        match node {
            Some(node) => self.attach(node),
            None => {
                self.detach();
                None
            }
        }
    }

    /// Cancels open throttle windows and releases every subscription.
    ///
    /// Safe to call when nothing is attached. The last state stays readable.
    pub fn detach(&mut self) {
        let was_attached = self.node.take().is_some();
        for trigger in [Trigger::Scroll, Trigger::Resize] {
            if let Some(mut listener) = self.listener_slot(trigger).take() {
                listener.throttle.cancel(&mut self.host);
                self.host.unsubscribe(listener.subscription);
                debug!(
                    %trigger,
                    subscription = listener.subscription.0,
                    "unsubscribed"
                );
            }
        }
        if was_attached {
            debug!("detached");
        }
    }

    /// Measures the element now and replaces the state.
    ///
    /// Returns `None` without touching the state or calling the callback when
    /// nothing is attached or the element has no measurable rectangle.
    pub fn check(&mut self) -> Option<VisibilityState> {
        let Some(raw) = self.node.as_ref().and_then(|node| node.bounding_rect()) else {
            trace!("no measurable rect; skipping recompute");
            return None;
        };
        let node_rect = normalize_rect(raw);
        let containment = self
            .options
            .containment
            .unwrap_or_else(|| VisibilityRect::from_viewport(self.host.viewport_size()));

        let visible = is_visible(
            node_rect,
            containment,
            self.options.min_element_offset,
            self.options.partially_visible,
        );
        let percent = compute_percent_visible(node_rect, containment);
        self.state = VisibilityState {
            is_visible: visible,
            percent_visible: percent,
            rect: Some(node_rect),
        };
        trace!(
            is_visible = visible,
            overall = percent.overall,
            "recomputed visibility"
        );

        if let Some(callback) = self.options.on_visibility_change.as_mut() {
            callback(visible, percent);
        }
        Some(self.state)
    }

    /// Handles a trigger delivered by the host.
    ///
    /// Triggers the tracker is not subscribed to are ignored.
    pub fn handle_trigger(&mut self, trigger: Trigger) -> Option<VisibilityState> {
        let slot = match trigger {
            Trigger::Scroll => &mut self.scroll,
            Trigger::Resize => &mut self.resize,
        };
        let listener = slot.as_mut()?;
        let decision = listener.throttle.on_event(&mut self.host);
        match decision {
            ThrottleDecision::Run => self.check(),
            ThrottleDecision::Suppress => {
                trace!(%trigger, "throttled");
                None
            }
        }
    }

    /// Handles an elapsed timer delivered by the host.
    ///
    /// Timers the tracker did not schedule, or already cancelled, are ignored.
    pub fn handle_timer(&mut self, timer: TimerId) -> Option<VisibilityState> {
        let host = &mut self.host;
        let decision = [self.scroll.as_mut(), self.resize.as_mut()]
            .into_iter()
            .flatten()
            .find_map(|listener| listener.throttle.on_timer(timer, &mut *host))?;
        match decision {
            ThrottleDecision::Run => self.check(),
            ThrottleDecision::Suppress => {
                trace!(timer = timer.0, "throttle window closed");
                None
            }
        }
    }

    fn listener(&self, trigger: Trigger) -> Option<&Listener> {
        match trigger {
            Trigger::Scroll => self.scroll.as_ref(),
            Trigger::Resize => self.resize.as_ref(),
        }
    }

    fn listener_slot(&mut self, trigger: Trigger) -> &mut Option<Listener> {
        match trigger {
            Trigger::Scroll => &mut self.scroll,
            Trigger::Resize => &mut self.resize,
        }
    }
}

impl<N: TrackedNode, H: TrackerHost> Drop for VisibilityTracker<N, H> {
    fn drop(&mut self) {
        if self.scroll.is_some() || self.resize.is_some() {
            debug!("tearing down");
        }
        self.detach();
    }
}
