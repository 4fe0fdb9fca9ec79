// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle inputs and their integer-pixel normalization.
//!
//! Hosts report element bounds in one of two conventions: an origin plus a
//! size, or four absolute edges. [`RawRect`] names both explicitly and
//! [`normalize_rect`] turns either into a [`VisibilityRect`] with floored
//! integer edges, which is what the visibility checks operate on.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size};

/// A bounding rectangle as reported by a host, before normalization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawRect {
    /// Origin plus size, as in `{x, y, width, height}`.
    Origin {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Horizontal extent.
        width: f64,
        /// Vertical extent.
        height: f64,
    },
    /// Absolute edges, as in `{top, left, bottom, right}`.
    Edges {
        /// Top edge.
        top: f64,
        /// Left edge.
        left: f64,
        /// Bottom edge.
        bottom: f64,
        /// Right edge.
        right: f64,
    },
}

impl RawRect {
    /// Builds an origin-form rectangle from a point and a size.
    #[must_use]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::Origin {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }
}

impl From<Rect> for RawRect {
    fn from(rect: Rect) -> Self {
        Self::Edges {
            top: rect.y0,
            left: rect.x0,
            bottom: rect.y1,
            right: rect.x1,
        }
    }
}

impl From<(Point, Size)> for RawRect {
    fn from((origin, size): (Point, Size)) -> Self {
        Self::from_origin_size(origin, size)
    }
}

/// Integer pixel edges used by the visibility checks.
///
/// `bottom >= top` and `right >= left` are not enforced. Empty and inverted
/// rectangles are valid and simply yield zero visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VisibilityRect {
    /// Top edge.
    pub top: i64,
    /// Left edge.
    pub left: i64,
    /// Bottom edge.
    pub bottom: i64,
    /// Right edge.
    pub right: i64,
}

impl VisibilityRect {
    /// Creates a rectangle from its four edges.
    #[must_use]
    pub const fn new(top: i64, left: i64, bottom: i64, right: i64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Containment rectangle for a viewport of the given size, anchored at the origin.
    #[must_use]
    pub fn from_viewport(size: Size) -> Self {
        Self::new(0, 0, floor_px(size.height), floor_px(size.width))
    }

    /// Horizontal extent; negative for inverted rectangles. Saturates at the `i64` range.
    #[must_use]
    pub const fn width(&self) -> i64 {
        self.right.saturating_sub(self.left)
    }

    /// Vertical extent; negative for inverted rectangles. Saturates at the `i64` range.
    #[must_use]
    pub const fn height(&self) -> i64 {
        self.bottom.saturating_sub(self.top)
    }

    /// Returns `true` if both extents are strictly positive.
    #[must_use]
    pub const fn has_size(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }

    /// Moves each edge inward by the matching offset, saturating at the `i64` range.
    #[must_use]
    pub const fn shrink(self, offsets: EdgeOffsets) -> Self {
        Self {
            top: self.top.saturating_add(offsets.top),
            left: self.left.saturating_add(offsets.left),
            bottom: self.bottom.saturating_sub(offsets.bottom),
            right: self.right.saturating_sub(offsets.right),
        }
    }
}

/// Per-edge pixel tolerance applied to the node rectangle before the boolean check.
///
/// Positive values shrink the node inward, so a node may overhang the
/// containment by up to that many pixels and still count as visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EdgeOffsets {
    /// Added to the node's top edge.
    pub top: i64,
    /// Added to the node's left edge.
    pub left: i64,
    /// Subtracted from the node's bottom edge.
    pub bottom: i64,
    /// Subtracted from the node's right edge.
    pub right: i64,
}

impl EdgeOffsets {
    /// No tolerance on any edge.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates offsets for each edge.
    #[must_use]
    pub const fn new(top: i64, left: i64, bottom: i64, right: i64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same tolerance on every edge.
    #[must_use]
    pub const fn uniform(px: i64) -> Self {
        Self::new(px, px, px, px)
    }
}

/// Normalizes a host rectangle to floored integer edges.
///
/// Each output edge is floored on its own. For the origin form the far edges
/// are computed in floating point (`y + height`, `x + width`) and floored
/// afterwards, so `{x: 0.5, width: 1.0}` spans `0..1`.
#[must_use]
pub fn normalize_rect(raw: RawRect) -> VisibilityRect {
    match raw {
        RawRect::Origin {
            x,
            y,
            width,
            height,
        } => VisibilityRect::new(
            floor_px(y),
            floor_px(x),
            floor_px(y + height),
            floor_px(x + width),
        ),
        RawRect::Edges {
            top,
            left,
            bottom,
            right,
        } => VisibilityRect::new(
            floor_px(top),
            floor_px(left),
            floor_px(bottom),
            floor_px(right),
        ),
    }
}

fn floor_px(value: f64) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Float-to-int casts saturate at the i64 bounds and map NaN to zero"
    )]
    {
        value.floor() as i64
    }
}
