// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host with a manual clock for tracker integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Rect, Size};
use understory_visibility::{
    RawRect, SubscriptionId, TimerId, TrackedNode, TrackerHost, Trigger,
};

#[derive(Debug)]
pub(crate) struct ManualHost {
    pub(crate) viewport: Size,
    pub(crate) now_ms: u64,
    next_id: u64,
    pub(crate) subscriptions: Vec<(SubscriptionId, Trigger)>,
    pub(crate) timers: Vec<(TimerId, u64)>,
}

impl ManualHost {
    pub(crate) fn new(viewport: Size) -> Self {
        Self {
            viewport,
            now_ms: 0,
            next_id: 0,
            subscriptions: Vec::new(),
            timers: Vec::new(),
        }
    }

    /// Advances the clock and returns the timers that elapsed, in due order.
    pub(crate) fn advance_to(&mut self, now_ms: u64) -> Vec<TimerId> {
        assert!(now_ms >= self.now_ms, "clock must not run backwards");
        self.now_ms = now_ms;
        let mut due: Vec<(TimerId, u64)> = self
            .timers
            .iter()
            .copied()
            .filter(|(_, at)| *at <= now_ms)
            .collect();
        due.sort_by_key(|(id, at)| (*at, *id));
        self.timers.retain(|(_, at)| *at > now_ms);
        due.into_iter().map(|(id, _)| id).collect()
    }

    pub(crate) fn is_subscribed(&self, trigger: Trigger) -> bool {
        self.subscriptions.iter().any(|(_, t)| *t == trigger)
    }
}

impl TrackerHost for ManualHost {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn subscribe(&mut self, trigger: Trigger) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push((id, trigger));
        id
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.subscriptions.retain(|(id, _)| *id != subscription);
    }

    fn schedule(&mut self, delay_ms: u64) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push((id, self.now_ms + delay_ms));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.retain(|(id, _)| *id != timer);
    }
}

/// Element whose bounds the test moves around, shared with the tracker.
#[derive(Clone, Debug)]
pub(crate) struct Element(Rc<Cell<Option<Rect>>>);

impl Element {
    pub(crate) fn at(rect: Rect) -> Self {
        Self(Rc::new(Cell::new(Some(rect))))
    }

    pub(crate) fn move_to(&self, rect: Rect) {
        self.0.set(Some(rect));
    }

    pub(crate) fn unmount(&self) {
        self.0.set(None);
    }
}

impl TrackedNode for Element {
    fn bounding_rect(&self) -> Option<RawRect> {
        self.0.get().map(RawRect::from)
    }
}
