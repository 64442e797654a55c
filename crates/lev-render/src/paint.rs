//! Render plan → Vello drawing commands.
//!
//! Executes a [`RenderPlan`] against a Vello scene: dashed grid lines,
//! sprite images, elevator polylines and markers. The scene is rebuilt every
//! frame, so `ClearCell` instructions need no work here.

use crate::plan::{DrawOp, Emphasis, RenderPlan};
use kurbo::{Affine, BezPath, Circle, Line, Point, Stroke};
use lev_core::BlockId;
use peniko::{Color, Fill, Image};
use vello::Scene;

/// Looks up decoded sprite images by block and frame.
pub trait SpriteSource {
    fn sprite(&self, block: BlockId, frame: usize) -> Option<&Image>;
}

/// Colors for the elevator overlay and grid.
#[derive(Debug, Clone, Copy)]
pub struct PaintTheme {
    pub grid: Color,
    pub path: Color,
    pub path_hovered: Color,
    pub path_active: Color,
    pub marker: Color,
    pub first_marker: Color,
    pub preview: Color,
}

impl PaintTheme {
    pub fn light() -> Self {
        Self {
            grid: Color::from_rgba8(0, 0, 0, 64),
            path: Color::from_rgba8(40, 90, 200, 200),
            path_hovered: Color::from_rgba8(40, 90, 200, 255),
            path_active: Color::from_rgba8(220, 60, 40, 255),
            marker: Color::from_rgba8(40, 90, 200, 255),
            first_marker: Color::from_rgba8(30, 160, 80, 255),
            preview: Color::from_rgba8(220, 60, 40, 160),
        }
    }

    pub fn dark() -> Self {
        Self {
            grid: Color::from_rgba8(255, 255, 255, 48),
            path: Color::from_rgba8(110, 160, 255, 200),
            path_hovered: Color::from_rgba8(140, 185, 255, 255),
            path_active: Color::from_rgba8(255, 110, 90, 255),
            marker: Color::from_rgba8(140, 185, 255, 255),
            first_marker: Color::from_rgba8(90, 220, 130, 255),
            preview: Color::from_rgba8(255, 110, 90, 160),
        }
    }

    fn path_color(&self, emphasis: Emphasis) -> Color {
        match emphasis {
            Emphasis::Default => self.path,
            Emphasis::Hovered => self.path_hovered,
            Emphasis::Active => self.path_active,
        }
    }
}

impl Default for PaintTheme {
    fn default() -> Self {
        Self::light()
    }
}

/// Paint every instruction of `plan` into `scene`.
///
/// Call once per frame with a freshly-cleared `Scene`.
pub fn paint_plan(scene: &mut Scene, plan: &RenderPlan, sprites: &dyn SpriteSource, theme: &PaintTheme) {
    let view = Affine::translate((plan.transform.origin_x, plan.transform.origin_y))
        * Affine::scale(plan.transform.zoom);
    for op in plan.ops() {
        paint_op(scene, view, plan.cell_size, op, sprites, theme);
    }
}

fn paint_op(
    scene: &mut Scene,
    view: Affine,
    cell: f64,
    op: &DrawOp,
    sprites: &dyn SpriteSource,
    theme: &PaintTheme,
) {
    match op {
        DrawOp::GridLine { from, to } => {
            let dashed = Stroke::new(1.0).with_dashes(0.0, [2.0, 2.0]);
            scene.stroke(&dashed, view, theme.grid, None, &Line::new(*from, *to));
        }

        DrawOp::ClearCell { .. } => {}

        DrawOp::Sprite { x, y, block, frame } => {
            let Some(image) = sprites.sprite(*block, *frame) else {
                log::trace!("sprite {block}/{frame} not loaded");
                return;
            };
            let scale_x = cell / f64::from(image.width.max(1));
            let scale_y = cell / f64::from(image.height.max(1));
            let at = view
                * Affine::translate((f64::from(*x) * cell, f64::from(*y) * cell))
                * Affine::scale_non_uniform(scale_x, scale_y);
            scene.draw_image(image, at);
        }

        DrawOp::Polyline {
            points,
            closed,
            emphasis,
        } => {
            let Some(path) = polyline(points, *closed) else {
                return;
            };
            let width = if *emphasis == Emphasis::Default { 2.0 } else { 3.0 };
            scene.stroke(&Stroke::new(width), view, theme.path_color(*emphasis), None, &path);
        }

        DrawOp::Marker {
            center,
            radius,
            first,
            emphasis,
        } => {
            let color = if *first {
                theme.first_marker
            } else if *emphasis == Emphasis::Default {
                theme.marker
            } else {
                theme.path_color(*emphasis)
            };
            scene.fill(Fill::NonZero, view, color, None, &Circle::new(*center, *radius));
        }

        DrawOp::Preview { from, to } => {
            let dashed = Stroke::new(2.0).with_dashes(0.0, [4.0, 4.0]);
            scene.stroke(&dashed, view, theme.preview, None, &Line::new(*from, *to));
        }

        DrawOp::Label { at, text } => {
            log::trace!("LABEL {text:?} at ({}, {})", at.x, at.y);
            // Text shaping needs a font context; the canvas executor draws labels.
        }
    }
}

fn polyline(points: &[Point], closed: bool) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    let mut path = BezPath::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    if closed {
        path.close_path();
    }
    Some(path)
}
