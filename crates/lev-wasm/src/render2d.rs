//! Canvas2D executor for render plans.
//!
//! The editor draws on three stacked `<canvas>` layers (grid, blocks,
//! elevators) so that a cell paint or a hover change only touches the
//! layer it affects. Plans are in grid pixels; each layer gets the view
//! transform applied before drawing.

use crate::assets::SpriteAtlas;
use lev_core::ViewTransform;
use lev_render::{DrawOp, Emphasis, Point, RenderPlan};
use web_sys::CanvasRenderingContext2d;

/// Theme-dependent colors for the canvas renderer.
pub struct CanvasTheme {
    pub grid: &'static str,
    pub path: &'static str,
    pub path_hovered: &'static str,
    pub path_active: &'static str,
    pub marker: &'static str,
    pub first_marker: &'static str,
    pub preview: &'static str,
    pub label: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            grid: "#333333",
            path: "rgba(255, 0, 0, 0.75)",
            path_hovered: "#FF0000",
            path_active: "#FF6A00",
            marker: "#FF0000",
            first_marker: "#1E9E50",
            preview: "rgba(255, 106, 0, 0.6)",
            label: "#1C1C1E",
        }
    }

    pub fn dark() -> Self {
        Self {
            grid: "#9A9A9F",
            path: "rgba(255, 90, 90, 0.75)",
            path_hovered: "#FF5A5A",
            path_active: "#FFA040",
            marker: "#FF5A5A",
            first_marker: "#5ADC82",
            preview: "rgba(255, 160, 64, 0.6)",
            label: "#F5F5F7",
        }
    }

    fn path_color(&self, emphasis: Emphasis) -> &'static str {
        match emphasis {
            Emphasis::Default => self.path,
            Emphasis::Hovered => self.path_hovered,
            Emphasis::Active => self.path_active,
        }
    }
}

/// The three stacked canvases, bottom to top.
pub struct CanvasLayers {
    pub grid: CanvasRenderingContext2d,
    pub blocks: CanvasRenderingContext2d,
    pub elevators: CanvasRenderingContext2d,
}

impl CanvasLayers {
    /// Redraw every layer from scratch.
    pub fn render_full(&self, plan: &RenderPlan, atlas: &SpriteAtlas, theme: &CanvasTheme) {
        for ctx in [&self.grid, &self.blocks, &self.elevators] {
            clear(ctx);
        }
        self.draw_grid(plan, theme);
        self.draw_blocks(plan, atlas);
        self.draw_elevators(plan, theme);
    }

    /// Draw block ops on top of what is there; `ClearCell` ops erase first.
    pub fn render_blocks(&self, plan: &RenderPlan, atlas: &SpriteAtlas) {
        self.draw_blocks(plan, atlas);
    }

    /// Replace the elevator layer.
    pub fn render_elevators(&self, plan: &RenderPlan, theme: &CanvasTheme) {
        clear(&self.elevators);
        self.draw_elevators(plan, theme);
    }

    fn draw_grid(&self, plan: &RenderPlan, theme: &CanvasTheme) {
        let ctx = &self.grid;
        ctx.save();
        apply_transform(ctx, plan.transform);
        ctx.set_stroke_style_str(theme.grid);
        ctx.set_line_width(1.0 / plan.transform.zoom);
        let _ = ctx.set_line_dash(&js_sys::Array::of1(&2.0.into()));
        ctx.begin_path();
        for op in &plan.grid {
            if let DrawOp::GridLine { from, to } = op {
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
            }
        }
        ctx.stroke();
        ctx.restore();
    }

    fn draw_blocks(&self, plan: &RenderPlan, atlas: &SpriteAtlas) {
        let ctx = &self.blocks;
        let cell = plan.cell_size;
        ctx.save();
        apply_transform(ctx, plan.transform);
        for op in &plan.blocks {
            match op {
                DrawOp::ClearCell { x, y } => {
                    ctx.clear_rect(f64::from(*x) * cell, f64::from(*y) * cell, cell, cell);
                }
                DrawOp::Sprite { x, y, block, frame } => {
                    let Some(img) = atlas.get(*block, *frame) else {
                        log::trace!("sprite {block}/{frame} missing from atlas");
                        continue;
                    };
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        f64::from(*x) * cell,
                        f64::from(*y) * cell,
                        cell,
                        cell,
                    );
                }
                _ => {}
            }
        }
        ctx.restore();
    }

    fn draw_elevators(&self, plan: &RenderPlan, theme: &CanvasTheme) {
        let ctx = &self.elevators;
        ctx.save();
        apply_transform(ctx, plan.transform);
        for op in &plan.elevators {
            match op {
                DrawOp::Polyline {
                    points,
                    closed,
                    emphasis,
                } => draw_polyline(ctx, points, *closed, theme.path_color(*emphasis), *emphasis),
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
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    let _ = ctx.arc(center.x, center.y, *radius, 0.0, std::f64::consts::TAU);
                    ctx.fill();
                }
                DrawOp::Preview { from, to } => {
                    ctx.save();
                    ctx.set_stroke_style_str(theme.preview);
                    ctx.set_line_width(2.0);
                    let _ = ctx.set_line_dash(&js_sys::Array::of2(&4.0.into(), &4.0.into()));
                    ctx.begin_path();
                    ctx.move_to(from.x, from.y);
                    ctx.line_to(to.x, to.y);
                    ctx.stroke();
                    ctx.restore();
                }
                DrawOp::Label { at, text } => {
                    ctx.save();
                    ctx.set_fill_style_str(theme.label);
                    ctx.set_font("bold 11px Inter, system-ui, sans-serif");
                    ctx.set_text_baseline("bottom");
                    let _ = ctx.fill_text(text, at.x, at.y);
                    ctx.restore();
                }
                _ => {}
            }
        }
        ctx.restore();
    }
}

fn draw_polyline(ctx: &CanvasRenderingContext2d, points: &[Point], closed: bool, color: &str, emphasis: Emphasis) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(if emphasis == Emphasis::Default { 2.0 } else { 3.0 });
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    if closed {
        ctx.close_path();
    }
    ctx.stroke();
}

fn apply_transform(ctx: &CanvasRenderingContext2d, t: ViewTransform) {
    let _ = ctx.set_transform(t.zoom, 0.0, 0.0, t.zoom, t.origin_x, t.origin_y);
}

/// Clear the whole canvas regardless of the current transform.
fn clear(ctx: &CanvasRenderingContext2d) {
    let Some(canvas) = ctx.canvas() else {
        return;
    };
    ctx.save();
    let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    ctx.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
    ctx.restore();
}
