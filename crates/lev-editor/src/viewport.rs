//! Zoom and pan.
//!
//! Zooming keeps the grid point under the zoom center fixed on screen.
//! Neither zoom nor pan is bounded.

use lev_core::{CoordinateMapper, ViewTransform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    transform: ViewTransform,
    cell_size: f64,
    zoom_step: f64,
}

impl ViewportController {
    pub fn new(cell_size: f64, zoom_step: f64) -> Self {
        Self {
            transform: ViewTransform::default(),
            cell_size,
            zoom_step,
        }
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    /// Mapper for the current view.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.cell_size, self.transform)
    }

    /// Back to zoom 1 at the origin, as after opening a level.
    pub fn reset(&mut self) {
        self.transform = ViewTransform::default();
    }

    /// Multiply zoom by `factor`, keeping viewport pixel `(cx, cy)` fixed.
    /// Non-positive or non-finite factors are ignored.
    pub fn zoom_at(&mut self, factor: f64, cx: f64, cy: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            log::debug!("ignoring zoom factor {factor}");
            return;
        }
        let t = &mut self.transform;
        let old = t.zoom;
        let new = old * factor;
        let grid_x = (cx - t.origin_x) / old / self.cell_size;
        let grid_y = (cy - t.origin_y) / old / self.cell_size;
        t.origin_x -= grid_x * self.cell_size * (new - old);
        t.origin_y -= grid_y * self.cell_size * (new - old);
        t.zoom = new;
        log::trace!("zoom {old} -> {new} about ({cx}, {cy})");
    }

    pub fn zoom_in(&mut self, cx: f64, cy: f64) {
        self.zoom_at(self.zoom_step, cx, cy);
    }

    pub fn zoom_out(&mut self, cx: f64, cy: f64) {
        self.zoom_at(1.0 / self.zoom_step, cx, cy);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.transform.origin_x += dx;
        self.transform.origin_y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_keeps_center_fixed() {
        let mut vp = ViewportController::new(32.0, 1.2);
        vp.pan(15.0, -7.0);
        let before = vp.mapper().fractional(200.0, 120.0);
        vp.zoom_in(200.0, 120.0);
        let after = vp.mapper().fractional(200.0, 120.0);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
        assert!((vp.zoom() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn zoom_at_origin_leaves_origin() {
        let mut vp = ViewportController::new(32.0, 1.2);
        vp.zoom_out(0.0, 0.0);
        assert_eq!(vp.transform().origin_x, 0.0);
        assert_eq!(vp.transform().origin_y, 0.0);
    }

    #[test]
    fn invalid_factor_ignored() {
        let mut vp = ViewportController::new(32.0, 1.2);
        vp.zoom_at(0.0, 10.0, 10.0);
        vp.zoom_at(f64::NAN, 10.0, 10.0);
        vp.zoom_at(-2.0, 10.0, 10.0);
        assert_eq!(vp.transform(), ViewTransform::default());
    }

    #[test]
    fn pan_accumulates() {
        let mut vp = ViewportController::new(32.0, 1.2);
        vp.pan(3.0, 4.0);
        vp.pan(-1.0, 1.0);
        assert_eq!((vp.transform().origin_x, vp.transform().origin_y), (2.0, 5.0));
        vp.reset();
        assert_eq!(vp.transform(), ViewTransform::default());
    }
}
