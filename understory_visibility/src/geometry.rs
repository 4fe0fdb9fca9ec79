// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure visibility computations over normalized rectangles.
//!
//! Two questions are answered here:
//!
//! - [`is_visible`]: a boolean "is the node inside the containment?", with a
//!   configurable notion of inside ([`PartialVisibility`]) and per-edge
//!   tolerances ([`EdgeOffsets`]).
//! - [`compute_percent_visible`]: the fraction of the node that overlaps the
//!   containment along each axis and by area.
//!
//! ```
//! use understory_visibility::{VisibilityRect, compute_percent_visible};
//!
//! let node = VisibilityRect::new(0, 0, 100, 100);
//! let viewport = VisibilityRect::new(0, 0, 50, 50);
//!
//! let percent = compute_percent_visible(node, viewport);
//! assert_eq!(percent.horizontal, 0.5);
//! assert_eq!(percent.vertical, 0.5);
//! assert_eq!(percent.overall, 0.25);
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::ParseEdgeError;
use crate::rect::{EdgeOffsets, VisibilityRect};

/// One side of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The top edge.
    Top,
    /// The left edge.
    Left,
    /// The bottom edge.
    Bottom,
    /// The right edge.
    Right,
}

impl Edge {
    /// All edges, in `top, left, bottom, right` order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Left, Self::Bottom, Self::Right];

    /// Lowercase name of the edge.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Bottom => "bottom",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edge {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "left" => Ok(Self::Left),
            "bottom" => Ok(Self::Bottom),
            "right" => Ok(Self::Right),
            _ => Err(ParseEdgeError::new(s)),
        }
    }
}

/// What counts as "visible" for [`is_visible`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PartialVisibility {
    /// The node must have a positive size and lie entirely inside the containment.
    #[default]
    Full,
    /// At least one node edge must lie inside the containment.
    Any,
    /// Only the given edge is checked.
    Edge(Edge),
}

impl From<bool> for PartialVisibility {
    fn from(partial: bool) -> Self {
        if partial { Self::Any } else { Self::Full }
    }
}

impl From<Edge> for PartialVisibility {
    fn from(edge: Edge) -> Self {
        Self::Edge(edge)
    }
}

impl FromStr for PartialVisibility {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "false" => Ok(Self::Full),
            "true" => Ok(Self::Any),
            _ => s.parse().map(Self::Edge),
        }
    }
}

/// Per-edge containment results for a (possibly shrunk) node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EdgeChecks {
    /// `node.top >= containment.top`.
    pub top: bool,
    /// `node.left >= containment.left`.
    pub left: bool,
    /// `node.bottom <= containment.bottom`.
    pub bottom: bool,
    /// `node.right <= containment.right`.
    pub right: bool,
}

impl EdgeChecks {
    /// Compares each node edge against the matching containment edge, inclusively.
    #[must_use]
    pub fn new(node: VisibilityRect, containment: VisibilityRect) -> Self {
        Self {
            top: node.top >= containment.top,
            left: node.left >= containment.left,
            bottom: node.bottom <= containment.bottom,
            right: node.right <= containment.right,
        }
    }

    /// Result for a single edge.
    #[must_use]
    pub const fn get(&self, edge: Edge) -> bool {
        match edge {
            Edge::Top => self.top,
            Edge::Left => self.left,
            Edge::Bottom => self.bottom,
            Edge::Right => self.right,
        }
    }

    /// Returns `true` if every edge is inside.
    #[must_use]
    pub const fn all(&self) -> bool {
        self.top && self.left && self.bottom && self.right
    }

    /// Returns `true` if at least one edge is inside.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.top || self.left || self.bottom || self.right
    }
}

/// Visible fraction of a node, per axis and by area.
///
/// Values are ratios in `[0, 1]` for well-formed inputs. No clamping is
/// applied beyond the zero short-circuits in [`compute_percent_visible`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisibilityPercent {
    /// Fraction of the node's width inside the containment.
    pub horizontal: f64,
    /// Fraction of the node's height inside the containment.
    pub vertical: f64,
    /// Fraction of the node's area inside the containment.
    pub overall: f64,
}

impl VisibilityPercent {
    /// Nothing visible.
    pub const ZERO: Self = Self {
        horizontal: 0.0,
        vertical: 0.0,
        overall: 0.0,
    };

    /// Returns `true` if every component is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.horizontal == 0.0 && self.vertical == 0.0 && self.overall == 0.0
    }
}

/// Decides whether `node` is visible inside `containment`.
///
/// `offsets` shrink the node before the edge comparisons. The size check in
/// [`PartialVisibility::Full`] mode uses the unshrunk node. All comparisons are
/// inclusive, so a node touching the containment boundary is inside.
#[must_use]
pub fn is_visible(
    node: VisibilityRect,
    containment: VisibilityRect,
    offsets: EdgeOffsets,
    mode: PartialVisibility,
) -> bool {
    let checks = EdgeChecks::new(node.shrink(offsets), containment);
    match mode {
        PartialVisibility::Full => node.has_size() && checks.all(),
        PartialVisibility::Any => checks.any(),
        PartialVisibility::Edge(edge) => checks.get(edge),
    }
}

/// Computes how much of `node` overlaps `containment`.
///
/// Returns [`VisibilityPercent::ZERO`] when the rectangles are disjoint or
/// when either has a non-positive width or height. Touching rectangles are
/// not disjoint but have a zero-length overlap, which also yields zero.
#[must_use]
pub fn compute_percent_visible(
    node: VisibilityRect,
    containment: VisibilityRect,
) -> VisibilityPercent {
    let disjoint = node.left > containment.right
        || node.right < containment.left
        || node.top > containment.bottom
        || node.bottom < containment.top;
    if disjoint || !node.has_size() || !containment.has_size() {
        return VisibilityPercent::ZERO;
    }

    let node_width = node.width();
    let node_height = node.height();
    let horizontal_intersect = containment
        .width()
        .min(containment.right.saturating_sub(node.left))
        .min(node.right.saturating_sub(containment.left))
        .min(node_width);
    let vertical_intersect = containment
        .height()
        .min(containment.bottom.saturating_sub(node.top))
        .min(node.bottom.saturating_sub(containment.top))
        .min(node_height);

    let (hi, vi) = (horizontal_intersect as f64, vertical_intersect as f64);
    let (w, h) = (node_width as f64, node_height as f64);
    VisibilityPercent {
        horizontal: hi / w,
        vertical: vi / h,
        overall: (hi * vi) / (w * h),
    }
}
