// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `VisibilityTracker` driven by an in-memory host.
//!
//! These exercise subscription lifecycle, throttle windows against a manual
//! clock, and the state/callback contract of recomputes.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Rect, Size};
use understory_visibility::{
    DEFAULT_THROTTLE_LIMIT_MS, Edge, EdgeOffsets, Throttle, ThrottleDecision, TrackerHost,
    Trigger, VisibilityOptions, VisibilityTracker,
};

use common::{Element, ManualHost};

fn viewport() -> ManualHost {
    ManualHost::new(Size::new(800.0, 600.0))
}

fn counting(options: VisibilityOptions) -> (VisibilityOptions, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let options = options.on_visibility_change(move |_, _| seen.set(seen.get() + 1));
    (options, calls)
}

/// Moves the clock to `now_ms` and delivers every elapsed timer.
fn advance(tracker: &mut VisibilityTracker<Element, ManualHost>, now_ms: u64) {
    let elapsed = tracker.host_mut().advance_to(now_ms);
    for timer in elapsed {
        tracker.handle_timer(timer);
    }
}

fn scroll_at(tracker: &mut VisibilityTracker<Element, ManualHost>, now_ms: u64) -> bool {
    advance(tracker, now_ms);
    tracker.handle_trigger(Trigger::Scroll).is_some()
}

#[test]
fn leading_edge_throttle_limits_scroll_recomputes() {
    let (options, calls) = counting(VisibilityOptions::new().with_trailing(false));
    let mut tracker = VisibilityTracker::new(viewport(), options);
    tracker.attach(Element::at(Rect::new(0.0, 0.0, 100.0, 100.0)));
    assert_eq!(calls.get(), 1, "attach measures once");

    assert!(scroll_at(&mut tracker, 0));
    assert!(!scroll_at(&mut tracker, 50));
    assert!(!scroll_at(&mut tracker, 200));
    advance(&mut tracker, 250);
    assert_eq!(calls.get(), 2, "closing a window without trailing does not recompute");

    assert!(scroll_at(&mut tracker, 260));
    assert_eq!(calls.get(), 3);
}

#[test]
fn trailing_run_catches_final_position() {
    let (options, calls) = counting(VisibilityOptions::new());
    let element = Element::at(Rect::new(0.0, 0.0, 100.0, 100.0));
    let mut tracker = VisibilityTracker::new(viewport(), options);
    tracker.attach(element.clone());

    assert!(scroll_at(&mut tracker, 0));
    assert!(tracker.state().is_visible);

    element.move_to(Rect::new(0.0, 700.0, 100.0, 800.0));
    assert!(!scroll_at(&mut tracker, 100));
    assert!(tracker.state().is_visible, "suppressed event leaves state alone");

    advance(&mut tracker, 250);
    assert_eq!(calls.get(), 3);
    assert!(!tracker.state().is_visible);
    assert!(tracker.state().percent_visible.is_zero());

    // The trailing run opened another window, which closes quietly.
    advance(&mut tracker, 500);
    assert_eq!(calls.get(), 3);
    assert!(tracker.host().timers.is_empty());
}

#[test]
fn detach_cancels_pending_window() {
    let (options, calls) = counting(VisibilityOptions::new());
    let mut tracker = VisibilityTracker::new(viewport(), options);
    tracker.attach(Element::at(Rect::new(0.0, 0.0, 100.0, 100.0)));

    assert!(scroll_at(&mut tracker, 0));
    assert!(!scroll_at(&mut tracker, 10));
    let (window, _) = tracker.host().timers[0];
    let before = calls.get();

    tracker.detach();
    assert!(tracker.host().timers.is_empty());
    assert!(tracker.host().subscriptions.is_empty());
    assert!(!tracker.is_attached());

    // Stale deliveries after detach are ignored.
    assert_eq!(tracker.handle_timer(window), None);
    assert_eq!(tracker.handle_trigger(Trigger::Scroll), None);
    advance(&mut tracker, 1_000);
    assert_eq!(calls.get(), before);
}

#[test]
fn scroll_and_resize_windows_are_independent() {
    let (options, calls) = counting(
        VisibilityOptions::new()
            .with_resize_check(true)
            .with_trailing(false)
            .with_scroll_throttle_limit(300)
            .with_resize_throttle_limit(100),
    );
    let mut tracker = VisibilityTracker::new(viewport(), options);
    tracker.attach(Element::at(Rect::new(0.0, 0.0, 100.0, 100.0)));
    assert!(tracker.host().is_subscribed(Trigger::Scroll));
    assert!(tracker.host().is_subscribed(Trigger::Resize));

    assert!(tracker.handle_trigger(Trigger::Scroll).is_some());
    assert!(tracker.handle_trigger(Trigger::Resize).is_some());

    advance(&mut tracker, 50);
    assert!(tracker.handle_trigger(Trigger::Scroll).is_none());
    assert!(tracker.handle_trigger(Trigger::Resize).is_none());

    advance(&mut tracker, 120);
    assert!(tracker.handle_trigger(Trigger::Resize).is_some());
    assert!(tracker.handle_trigger(Trigger::Scroll).is_none());

    assert_eq!(calls.get(), 4);
}

#[test]
fn without_trailing_a_finished_burst_leaves_state_stale() {
    let element = Element::at(Rect::new(0.0, 0.0, 100.0, 100.0));
    let mut tracker =
        VisibilityTracker::new(viewport(), VisibilityOptions::new().with_trailing(false));
    tracker.attach(element.clone());

    assert!(scroll_at(&mut tracker, 0));
    element.move_to(Rect::new(0.0, 700.0, 100.0, 800.0));
    assert!(!scroll_at(&mut tracker, 100));
    advance(&mut tracker, 10_000);
    assert!(tracker.state().is_visible);

    // The next event after the window brings the state up to date.
    assert!(scroll_at(&mut tracker, 10_001));
    assert!(!tracker.state().is_visible);
}

#[test]
fn default_window_uses_exported_limit() {
    let mut tracker = VisibilityTracker::new(viewport(), VisibilityOptions::new());
    tracker.attach(Element::at(Rect::new(0.0, 0.0, 100.0, 100.0)));
    tracker.handle_trigger(Trigger::Scroll);
    assert_eq!(tracker.host().timers.len(), 1);
    assert_eq!(tracker.host().timers[0].1, DEFAULT_THROTTLE_LIMIT_MS);

    // A standalone throttle against the same host follows the same windows.
    let mut host = viewport();
    let mut throttle = Throttle::new(DEFAULT_THROTTLE_LIMIT_MS, true);
    assert_eq!(throttle.on_event(&mut host), ThrottleDecision::Run);
    assert_eq!(throttle.on_event(&mut host), ThrottleDecision::Suppress);
    let elapsed = host.advance_to(DEFAULT_THROTTLE_LIMIT_MS);
    assert_eq!(
        throttle.on_timer(elapsed[0], &mut host),
        Some(ThrottleDecision::Run)
    );
}

#[test]
fn negative_limit_disables_throttling() {
    let (options, calls) = counting(VisibilityOptions::new().with_scroll_throttle_limit(-5));
    let mut tracker = VisibilityTracker::new(viewport(), options);
    tracker.attach(Element::at(Rect::new(0.0, 0.0, 100.0, 100.0)));

    for _ in 0..3 {
        assert!(tracker.handle_trigger(Trigger::Scroll).is_some());
    }
    assert!(tracker.host().timers.is_empty());
    assert_eq!(calls.get(), 4);
}

#[test]
fn unmounted_element_skips_recompute() {
    let (options, calls) = counting(VisibilityOptions::new());
    let element = Element::at(Rect::new(0.0, 0.0, 100.0, 100.0));
    let mut tracker = VisibilityTracker::new(viewport(), options);
    let initial = tracker.attach(element.clone()).unwrap();

    element.unmount();
    assert_eq!(tracker.handle_trigger(Trigger::Scroll), None);
    assert_eq!(*tracker.state(), initial);
    assert_eq!(calls.get(), 1);
}

#[test]
fn half_scrolled_element_reports_percentages() {
    let mut tracker = VisibilityTracker::new(viewport(), VisibilityOptions::new());
    let state = tracker
        .attach(Element::at(Rect::new(0.0, -50.0, 100.0, 50.0)))
        .unwrap();

    assert!(!state.is_visible);
    assert_eq!(state.percent_visible.horizontal, 1.0);
    assert_eq!(state.percent_visible.vertical, 0.5);
    assert_eq!(state.percent_visible.overall, 0.5);
}

#[test]
fn edge_mode_honours_offsets() {
    let rect = Rect::new(0.0, -10.0, 100.0, 50.0);

    let mut strict = VisibilityTracker::new(
        viewport(),
        VisibilityOptions::new().with_partially_visible(Edge::Top),
    );
    assert!(!strict.attach(Element::at(rect)).unwrap().is_visible);

    let mut tolerant = VisibilityTracker::new(
        viewport(),
        VisibilityOptions::new()
            .with_partially_visible(Edge::Top)
            .with_min_element_offset(EdgeOffsets::new(10, 0, 0, 0)),
    );
    assert!(tolerant.attach(Element::at(rect)).unwrap().is_visible);
}

#[test]
fn dropping_tracker_tears_down_subscriptions() {
    let mut host = viewport();
    {
        let options = VisibilityOptions::new().with_resize_check(true);
        let mut tracker = VisibilityTracker::new(&mut host, options);
        tracker.attach(Element::at(Rect::new(0.0, 0.0, 100.0, 100.0)));
        tracker.handle_trigger(Trigger::Scroll);
        tracker.handle_trigger(Trigger::Resize);
        assert_eq!(tracker.host().subscriptions.len(), 2);
        assert_eq!(tracker.host().timers.len(), 2);
    }
    assert!(host.subscriptions.is_empty());
    assert!(host.timers.is_empty());
    assert_eq!(host.viewport_size(), Size::new(800.0, 600.0));
}
