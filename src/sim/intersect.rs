//! Line segment intersection for continuous collision detection
//!
//! A moving ball is reduced to the segment it sweeps in one step; hitting a
//! rectangle means crossing one of its (radius-expanded) edges.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Which edge of a rectangle was crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Left/right crossings reverse horizontal travel, top/bottom vertical
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// A closed line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(DVec2::new(x1, y1), DVec2::new(x2, y2))
    }
}

/// Axis-aligned rectangle edges (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Point where a path crossed a rectangle edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intercept {
    pub point: DVec2,
    pub side: Side,
}

/// Crossing point of two segments, tagged with `side`.
///
/// Parallel segments never intersect here, including collinear overlapping
/// ones: a zero determinant always yields `None`.
pub fn intersect(a: Segment, b: Segment, side: Side) -> Option<Intercept> {
    let (x1, y1, x2, y2) = (a.start.x, a.start.y, a.end.x, a.end.y);
    let (x3, y3, x4, y4) = (b.start.x, b.start.y, b.end.x, b.end.y);

    let denom = (y4 - y3) * (x2 - x1) - (x4 - x3) * (y2 - y1);
    if denom == 0.0 {
        return None;
    }

    let ua = ((x4 - x3) * (y1 - y3) - (y4 - y3) * (x1 - x3)) / denom;
    if !(0.0..=1.0).contains(&ua) {
        return None;
    }
    let ub = ((x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3)) / denom;
    if !(0.0..=1.0).contains(&ub) {
        return None;
    }

    Some(Intercept {
        point: DVec2::new(x1 + ua * (x2 - x1), y1 + ua * (y2 - y1)),
        side,
    })
}
