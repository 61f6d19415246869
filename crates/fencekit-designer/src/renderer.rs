//! Canvas renderer for the fence layout.
//!
//! `render_scene` is a pure function of the model and the viewport: it
//! produces a display list in screen coordinates and never touches model
//! state. `rasterize` turns a display list into pixels with tiny-skia, which
//! is what the screenshot export writes out.
//!
//! Layers, bottom to top:
//! - 5 ft grid
//! - finalized sections, posts and labels
//! - live posts of the measurement being edited
//! - active polyline and its vertices
//! - dashed preview segment to the pointer with a live length label
//! - gates, then the selection highlight

use std::path::Path;

use image::{Rgb, RgbImage};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use fencekit_core::constants::{GATE_HIT_RADIUS, GRID_CELL_FT};
use fencekit_core::{format_feet, FenceConfig, FenceError, GateKind, Result};

use crate::geometry::{rotate_about, segment_length_feet, CanvasPoint};
use crate::model::{Gate, Measurement, Point, PostKind, Section};
use crate::viewport::Viewport;

const MAX_GRID_LINES: usize = 2000;

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    fn to_skia(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

pub const BACKGROUND: Rgba = Rgba::rgb(250, 250, 247);
pub const GRID: Rgba = Rgba::rgb(225, 228, 232);
pub const FENCE: Rgba = Rgba::rgb(52, 73, 94);
pub const ACTIVE: Rgba = Rgba::rgb(52, 152, 219);
pub const CORNER_POST: Rgba = Rgba::rgb(192, 57, 43);
pub const LINE_POST: Rgba = Rgba::rgb(127, 140, 141);
pub const GATE: Rgba = Rgba::rgb(39, 174, 96);
pub const SELECTION: Rgba = Rgba::rgb(241, 196, 15);
pub const LABEL: Rgba = Rgba::rgb(44, 62, 80);

/// One drawing primitive in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: CanvasPoint,
        to: CanvasPoint,
        color: Rgba,
        width: f32,
        dashed: bool,
    },
    Polyline {
        points: Vec<CanvasPoint>,
        color: Rgba,
        width: f32,
    },
    Circle {
        center: CanvasPoint,
        radius: f32,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
    },
    Text {
        at: CanvasPoint,
        text: String,
        color: Rgba,
        size: f32,
    },
}

/// Ordered display list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text labels in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of circles filled with `color`.
    pub fn filled_circles(&self, color: Rgba) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { fill: Some(f), .. } if *f == color))
            .count()
    }

    /// Dashed lines (the pointer preview).
    pub fn dashed_lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { dashed: true, .. }))
    }
}

/// Everything the renderer reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub active_points: &'a [Point],
    pub measurements: &'a [Measurement],
    pub editing_preview: Option<&'a Measurement>,
    pub gates: &'a [Gate],
    /// Pointer in model space
    pub pointer: Option<CanvasPoint>,
    /// Whether the pointer preview segment should be drawn
    pub drawing: bool,
    pub show_grid: bool,
    pub viewport: &'a Viewport,
    pub config: &'a FenceConfig,
}

/// Builds the display list for one frame.
pub fn render_scene(input: &RenderInput<'_>) -> Scene {
    let mut scene = Scene::default();
    let vp = input.viewport;

    if input.show_grid {
        draw_grid(&mut scene, vp, input.config);
    }

    for m in input.measurements {
        draw_sections(&mut scene, vp, &m.sections, FENCE);
        if let Some(first) = m.sections.first() {
            scene.push(DrawCommand::Text {
                at: vp.model_to_screen(first.start.position()).offset(6.0, -12.0),
                text: m.label.clone(),
                color: LABEL,
                size: 13.0,
            });
        }
    }

    if let Some(preview) = input.editing_preview {
        draw_posts(&mut scene, vp, &preview.sections);
    }

    draw_active(&mut scene, vp, input.active_points, input.editing_preview.is_none(), input.config);

    if input.drawing {
        if let (Some(last), Some(pointer)) = (input.active_points.last(), input.pointer) {
            let from = vp.model_to_screen(last.position());
            let to = vp.model_to_screen(pointer);
            scene.push(DrawCommand::Line {
                from,
                to,
                color: ACTIVE,
                width: 2.0,
                dashed: true,
            });
            let length = segment_length_feet(last.position(), pointer, input.config.scale());
            scene.push(DrawCommand::Text {
                at: from.midpoint(&to).offset(8.0, -8.0),
                text: format_feet(length),
                color: ACTIVE,
                size: 12.0,
            });
        }
    }

    for gate in input.gates {
        draw_gate(&mut scene, vp, gate, input.config);
    }

    scene
}

fn draw_grid(scene: &mut Scene, vp: &Viewport, config: &FenceConfig) {
    let cell = config.to_model(GRID_CELL_FT);
    if cell * vp.zoom() < 4.0 {
        return;
    }
    let (min, max) = vp.visible_model_bounds();

    let mut x = (min.x / cell).floor() * cell;
    let mut lines = 0;
    while x <= max.x && lines < MAX_GRID_LINES {
        scene.push(DrawCommand::Line {
            from: vp.model_to_screen(CanvasPoint::new(x, min.y)),
            to: vp.model_to_screen(CanvasPoint::new(x, max.y)),
            color: GRID,
            width: 1.0,
            dashed: false,
        });
        x += cell;
        lines += 1;
    }

    let mut y = (min.y / cell).floor() * cell;
    while y <= max.y && lines < MAX_GRID_LINES {
        scene.push(DrawCommand::Line {
            from: vp.model_to_screen(CanvasPoint::new(min.x, y)),
            to: vp.model_to_screen(CanvasPoint::new(max.x, y)),
            color: GRID,
            width: 1.0,
            dashed: false,
        });
        y += cell;
        lines += 1;
    }
}

fn draw_sections(scene: &mut Scene, vp: &Viewport, sections: &[Section], color: Rgba) {
    for section in sections {
        let from = vp.model_to_screen(section.start.position());
        let to = vp.model_to_screen(section.end.position());
        scene.push(DrawCommand::Line {
            from,
            to,
            color,
            width: 3.0,
            dashed: false,
        });
        scene.push(DrawCommand::Text {
            at: from.midpoint(&to).offset(4.0, -6.0),
            text: format_feet(section.length),
            color: LABEL,
            size: 11.0,
        });
    }
    draw_posts(scene, vp, sections);
}

fn draw_posts(scene: &mut Scene, vp: &Viewport, sections: &[Section]) {
    for post in sections.iter().flat_map(|s| s.posts.iter()) {
        let (radius, fill) = match post.kind {
            PostKind::Corner => (5.0, CORNER_POST),
            PostKind::Line => (3.0, LINE_POST),
        };
        scene.push(DrawCommand::Circle {
            center: vp.model_to_screen(CanvasPoint::new(post.x, post.y)),
            radius,
            fill: Some(fill),
            stroke: None,
        });
    }
}

fn draw_active(
    scene: &mut Scene,
    vp: &Viewport,
    points: &[Point],
    label_segments: bool,
    config: &FenceConfig,
) {
    if points.is_empty() {
        return;
    }
    let screen: Vec<CanvasPoint> = points.iter().map(|p| vp.model_to_screen(p.position())).collect();
    if screen.len() > 1 {
        scene.push(DrawCommand::Polyline {
            points: screen.clone(),
            color: ACTIVE,
            width: 3.0,
        });
    }
    if label_segments {
        for (pair, spair) in points.windows(2).zip(screen.windows(2)) {
            let length = segment_length_feet(pair[0].position(), pair[1].position(), config.scale());
            scene.push(DrawCommand::Text {
                at: spair[0].midpoint(&spair[1]).offset(4.0, -6.0),
                text: format_feet(length),
                color: ACTIVE,
                size: 11.0,
            });
        }
    }
    for center in screen {
        scene.push(DrawCommand::Circle {
            center,
            radius: 6.0,
            fill: Some(ACTIVE),
            stroke: Some(FENCE),
        });
    }
}

fn draw_gate(scene: &mut Scene, vp: &Viewport, gate: &Gate, config: &FenceConfig) {
    let center = gate.position();
    let half = config.to_model(gate.width) / 2.0;
    let left = rotate_about(center.offset(-half, 0.0), center, gate.rotation);
    let right = rotate_about(center.offset(half, 0.0), center, gate.rotation);
    let to_screen = |p: CanvasPoint| vp.model_to_screen(p);

    // Leaves swing open by 30 degrees from their hinge.
    let leaves: Vec<(CanvasPoint, CanvasPoint)> = match gate.kind {
        GateKind::Single => vec![(left, rotate_about(right, left, -30.0))],
        GateKind::Double => vec![
            (left, rotate_about(center, left, -30.0)),
            (right, rotate_about(center, right, 30.0)),
        ],
    };

    // Opening
    scene.push(DrawCommand::Line {
        from: to_screen(left),
        to: to_screen(right),
        color: GATE,
        width: 1.0,
        dashed: false,
    });
    for (hinge, tip) in leaves {
        scene.push(DrawCommand::Line {
            from: to_screen(hinge),
            to: to_screen(tip),
            color: GATE,
            width: 3.0,
            dashed: false,
        });
        scene.push(DrawCommand::Circle {
            center: to_screen(hinge),
            radius: 3.0,
            fill: Some(GATE),
            stroke: None,
        });
    }

    if gate.selected {
        scene.push(DrawCommand::Circle {
            center: to_screen(center),
            radius: GATE_HIT_RADIUS as f32,
            fill: None,
            stroke: Some(SELECTION),
        });
    }
}

/// Rasterizes a display list. Text commands are skipped.
pub fn rasterize(scene: &Scene, width: u32, height: u32) -> Result<RgbImage> {
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| FenceError::Render(format!("invalid canvas size {}x{}", width, height)))?;
    pixmap.fill(BACKGROUND.to_skia());

    for command in &scene.commands {
        match command {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
                dashed,
            } => {
                let mut pb = PathBuilder::new();
                pb.move_to(from.x as f32, from.y as f32);
                pb.line_to(to.x as f32, to.y as f32);
                let stroke = Stroke {
                    width: *width,
                    dash: if *dashed {
                        StrokeDash::new(vec![6.0, 4.0], 0.0)
                    } else {
                        None
                    },
                    ..Default::default()
                };
                if let Some(path) = pb.finish() {
                    pixmap.stroke_path(&path, &paint(*color), &stroke, Transform::identity(), None);
                }
            }
            DrawCommand::Polyline {
                points,
                color,
                width,
            } => {
                let mut pb = PathBuilder::new();
                for (i, p) in points.iter().enumerate() {
                    if i == 0 {
                        pb.move_to(p.x as f32, p.y as f32);
                    } else {
                        pb.line_to(p.x as f32, p.y as f32);
                    }
                }
                let stroke = Stroke {
                    width: *width,
                    ..Default::default()
                };
                if let Some(path) = pb.finish() {
                    pixmap.stroke_path(&path, &paint(*color), &stroke, Transform::identity(), None);
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, *radius)
                else {
                    continue;
                };
                if let Some(fill) = fill {
                    pixmap.fill_path(&path, &paint(*fill), FillRule::Winding, Transform::identity(), None);
                }
                if let Some(color) = stroke {
                    let stroke = Stroke {
                        width: 2.0,
                        ..Default::default()
                    };
                    pixmap.stroke_path(&path, &paint(*color), &stroke, Transform::identity(), None);
                }
            }
            DrawCommand::Text { text, .. } => {
                tracing::trace!("Skipping text label '{}' in raster output", text);
            }
        }
    }

    let data = pixmap.data();
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    }))
}

fn paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

/// Writes a screenshot of the scene. The format follows the file extension.
pub fn export_png(scene: &Scene, width: u32, height: u32, path: impl AsRef<Path>) -> Result<()> {
    let image = rasterize(scene, width, height)?;
    image
        .save(path.as_ref())
        .map_err(|e| FenceError::Image(e.to_string()))?;
    tracing::info!("Saved screenshot to {}", path.as_ref().display());
    Ok(())
}
