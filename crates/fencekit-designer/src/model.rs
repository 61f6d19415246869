//! Measurement model: points, sections, posts, gates and finalized
//! measurements.
//!
//! Sections and posts are derived data. They are rebuilt from the ordered
//! point sequence every time a measurement is finalized or live-edited and
//! never mutated on their own.

use serde::{Deserialize, Serialize};

use fencekit_core::{normalize_degrees, FenceConfig, GateKind};

use crate::geometry::{self, CanvasPoint};
use crate::materials::{self, MaterialsList};

/// A vertex of the polyline being drawn or edited, in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> CanvasPoint {
        CanvasPoint::new(self.x, self.y)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}

/// Post role along a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// Section endpoint
    Corner,
    /// Evenly spaced interior post
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub kind: PostKind,
}

/// A gate. Gates are shared by every measurement on the canvas and are only
/// associated with a section by position at finalize time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    /// Opening width in feet
    pub width: f64,
    pub kind: GateKind,
    /// Degrees, `[0, 360)`
    pub rotation: f64,
    #[serde(default)]
    pub selected: bool,
}

impl Gate {
    pub fn new(id: u64, at: CanvasPoint, width: f64, kind: GateKind, rotation: f64) -> Self {
        Self {
            id,
            x: at.x,
            y: at.y,
            width,
            kind,
            rotation: normalize_degrees(rotation),
            selected: false,
        }
    }

    pub fn position(&self) -> CanvasPoint {
        CanvasPoint::new(self.x, self.y)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = normalize_degrees(degrees);
    }
}

/// One straight edge of a fence run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub start: Point,
    pub end: Point,
    /// Length in feet
    pub length: f64,
    pub posts: Vec<Post>,
    pub gates: Vec<Gate>,
}

/// Splits an ordered point sequence into connected sections, placing posts
/// and attaching the gates that fall inside each section's x-range.
///
/// Post ids are assigned sequentially across the whole run, starting at 1.
pub fn decompose_sections(points: &[Point], gates: &[Gate], config: &FenceConfig) -> Vec<Section> {
    let mut next_post_id = 1;
    points
        .windows(2)
        .map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            let posts = geometry::posts_for_segment(
                start.position(),
                end.position(),
                config.post_spacing(),
                config.scale(),
            )
            .into_iter()
            .map(|placement| {
                let post = Post {
                    id: next_post_id,
                    x: placement.position.x,
                    y: placement.position.y,
                    kind: placement.kind,
                };
                next_post_id += 1;
                post
            })
            .collect();

            Section {
                start,
                end,
                length: geometry::segment_length_feet(start.position(), end.position(), config.scale()),
                posts,
                gates: geometry::gates_on_section(gates, start.x, end.x),
            }
        })
        .collect()
}

/// Rebuilds the ordered point sequence from connected sections, dropping
/// the shared endpoint between neighbours.
pub fn points_from_sections(sections: &[Section]) -> Vec<Point> {
    let mut points: Vec<Point> = Vec::with_capacity(sections.len() + 1);
    for section in sections {
        for p in [section.start, section.end] {
            if points.last().map(|last| last.id) != Some(p.id) {
                points.push(p);
            }
        }
    }
    points
}

/// A finalized fence run with its derived totals and bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: u64,
    pub label: String,
    pub sections: Vec<Section>,
    /// Sum of section lengths in feet
    pub total_length: f64,
    pub total_posts: usize,
    pub total_gates: usize,
    /// Fence height in feet at the time of finalizing
    pub fence_height: f64,
    pub materials_list: MaterialsList,
}

impl Measurement {
    /// Builds a measurement from an ordered point sequence.
    ///
    /// A single point is allowed and yields no sections and zero length.
    pub fn build(
        id: u64,
        label: impl Into<String>,
        points: &[Point],
        gates: &[Gate],
        config: &FenceConfig,
    ) -> Self {
        let sections = decompose_sections(points, gates, config);
        let mut measurement = Self {
            id,
            label: label.into(),
            total_length: sections.iter().map(|s| s.length).sum(),
            total_posts: sections.iter().map(|s| s.posts.len()).sum(),
            total_gates: sections.iter().map(|s| s.gates.len()).sum(),
            sections,
            fence_height: config.fence_height(),
            materials_list: MaterialsList::default(),
        };
        measurement.materials_list = materials::compute(&measurement);
        measurement
    }

    /// Ordered vertices of this run.
    pub fn points(&self) -> Vec<Point> {
        points_from_sections(&self.sections)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}
