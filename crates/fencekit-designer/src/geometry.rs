//! Geometry kernel: pure functions over model-space coordinates.
//!
//! Model space is measured in pixels at the configured scale (pixels per
//! foot); callers divide by the scale to get feet.

use serde::{Deserialize, Serialize};

use crate::model::{Gate, PostKind};

/// A plain 2D coordinate, in screen or model space depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    /// Creates a new canvas point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &CanvasPoint) -> f64 {
        distance(*self, *other)
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &CanvasPoint, t: f64) -> CanvasPoint {
        CanvasPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn midpoint(&self, other: &CanvasPoint) -> CanvasPoint {
        self.lerp(other, 0.5)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> CanvasPoint {
        CanvasPoint::new(self.x + dx, self.y + dy)
    }
}

/// Euclidean distance in model units.
pub fn distance(a: CanvasPoint, b: CanvasPoint) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Length of a segment in feet.
pub fn segment_length_feet(a: CanvasPoint, b: CanvasPoint, scale: f64) -> f64 {
    distance(a, b) / scale
}

/// Number of posts for a segment: `ceil(length / spacing) + 1`.
pub fn post_count(length_ft: f64, spacing_ft: f64) -> usize {
    (length_ft / spacing_ft).ceil() as usize + 1
}

/// A post position produced by the spacing algorithm, before ids are assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostPlacement {
    pub position: CanvasPoint,
    pub kind: PostKind,
}

/// Evenly distributes posts along one segment.
///
/// The first and last posts are corners, everything between is a line post.
/// A zero-length segment yields a single corner post at `start`.
pub fn posts_for_segment(
    start: CanvasPoint,
    end: CanvasPoint,
    spacing_ft: f64,
    scale: f64,
) -> Vec<PostPlacement> {
    let n = post_count(segment_length_feet(start, end, scale), spacing_ft);
    if n <= 1 {
        return vec![PostPlacement {
            position: start,
            kind: PostKind::Corner,
        }];
    }

    (0..n)
        .map(|i| PostPlacement {
            position: start.lerp(&end, i as f64 / (n - 1) as f64),
            kind: if i == 0 || i == n - 1 {
                PostKind::Corner
            } else {
                PostKind::Line
            },
        })
        .collect()
}

/// Runs the spacing algorithm for each consecutive pair of an ordered
/// point sequence. Returns one post list per segment.
pub fn compute_posts(points: &[CanvasPoint], spacing_ft: f64, scale: f64) -> Vec<Vec<PostPlacement>> {
    points
        .windows(2)
        .map(|pair| posts_for_segment(pair[0], pair[1], spacing_ft, scale))
        .collect()
}

/// Gates whose x-coordinate lies within the section's x-range.
///
/// This is an x-range containment test; it does not look at y at all, so a
/// vertical segment only picks up gates with exactly its x-coordinate and
/// overlapping sections can both claim the same gate.
pub fn gates_on_section(gates: &[Gate], start_x: f64, end_x: f64) -> Vec<Gate> {
    let min_x = start_x.min(end_x);
    let max_x = start_x.max(end_x);
    gates
        .iter()
        .filter(|gate| gate.x >= min_x && gate.x <= max_x)
        .cloned()
        .collect()
}

/// Rotates `p` around `center` by `degrees` (clockwise on screen, since
/// screen y grows downward).
pub fn rotate_about(p: CanvasPoint, center: CanvasPoint, degrees: f64) -> CanvasPoint {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    CanvasPoint::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}
