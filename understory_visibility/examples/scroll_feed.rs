// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrolls a simulated feed past one tracked card and prints each recompute.
//!
//! Tracker `tracing` events are printed at `TRACE` level alongside the callback output.

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Size};
use understory_visibility::{
    EdgeOffsets, RawRect, SubscriptionId, TimerId, TrackedNode, TrackerHost, Trigger,
    VisibilityOptions, VisibilityTracker,
};

const CARD_TOP: f64 = 900.0;
const CARD_SIZE: Size = Size::new(320.0, 240.0);

struct Window {
    size: Size,
    now_ms: u64,
    next_id: u64,
    timers: Vec<(TimerId, u64)>,
}

impl Window {
    fn tick(&mut self, now_ms: u64) -> Vec<TimerId> {
        self.now_ms = now_ms;
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|(_, at)| *at <= now_ms);
        self.timers = pending;
        due.into_iter().map(|(id, _)| id).collect()
    }
}

impl TrackerHost for Window {
    fn viewport_size(&self) -> Size {
        self.size
    }

    fn subscribe(&mut self, trigger: Trigger) -> SubscriptionId {
        self.next_id += 1;
        println!("subscribe {trigger} -> #{}", self.next_id);
        SubscriptionId(self.next_id)
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        println!("unsubscribe #{}", subscription.0);
    }

    fn schedule(&mut self, delay_ms: u64) -> TimerId {
        self.next_id += 1;
        self.timers.push((TimerId(self.next_id), self.now_ms + delay_ms));
        TimerId(self.next_id)
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.retain(|(id, _)| *id != timer);
    }
}

/// A card laid out at a fixed document position; its viewport rect depends on scroll.
struct Card {
    scroll_y: Rc<Cell<f64>>,
}

impl TrackedNode for Card {
    fn bounding_rect(&self) -> Option<RawRect> {
        let origin = Point::new(40.0, CARD_TOP - self.scroll_y.get());
        Some(RawRect::from_origin_size(origin, CARD_SIZE))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let window = Window {
        size: Size::new(400.0, 800.0),
        now_ms: 0,
        next_id: 0,
        timers: Vec::new(),
    };
    let options = VisibilityOptions::new()
        .with_trailing(true)
        .with_scroll_throttle_limit(100)
        .with_min_element_offset(EdgeOffsets::uniform(8))
        .on_visibility_change(|visible, percent| {
            println!(
                "  visible={visible:<5} horizontal={:.2} vertical={:.2} overall={:.2}",
                percent.horizontal, percent.vertical, percent.overall
            );
        });

    let scroll_y = Rc::new(Cell::new(0.0));
    let mut tracker = VisibilityTracker::new(window, options);
    tracker.attach(Card {
        scroll_y: Rc::clone(&scroll_y),
    });

    // A scroll event every 16ms, 10px per frame.
    for frame in 1..=60_u32 {
        let now_ms = u64::from(frame) * 16;
        let elapsed = tracker.host_mut().tick(now_ms);
        for timer in elapsed {
            tracker.handle_timer(timer);
        }
        scroll_y.set(f64::from(frame) * 10.0);
        tracker.handle_trigger(Trigger::Scroll);
    }

    // Let the last window, and the one a trailing run may open, close.
    for now_ms in [2_000, 3_000] {
        let elapsed = tracker.host_mut().tick(now_ms);
        for timer in elapsed {
            tracker.handle_timer(timer);
        }
    }
    println!("final state: {:?}", tracker.state());
}
