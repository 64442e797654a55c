//! View transform and pointer → grid coordinate mapping.
//!
//! Screen pixels relate to grid pixels through a zoom factor and a pan
//! offset (`origin`, the screen position of the grid's top-left corner).
//! Grid pixels relate to cells through the fixed cell size.
//!
//! Elevator control points snap to a half-cell grid. Markers are drawn at
//! `(coord + 0.5) * cell_size`, so the snap is biased by a quarter cell:
//! every pointer position maps to the nearest drawn marker slot.

/// Zoom and pan state of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Multiplier on the cell pixel size. Always > 0.
    pub zoom: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Screen pixel → unzoomed grid pixel.
    pub fn to_grid_px(&self, px: f64, py: f64) -> (f64, f64) {
        ((px - self.origin_x) / self.zoom, (py - self.origin_y) / self.zoom)
    }

    /// Unzoomed grid pixel → screen pixel.
    pub fn to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
        (self.origin_x + gx * self.zoom, self.origin_y + gy * self.zoom)
    }
}

/// Maps pointer positions to cells and elevator coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    cell_size: f64,
    transform: ViewTransform,
}

impl CoordinateMapper {
    pub fn new(cell_size: f64, transform: ViewTransform) -> Self {
        Self {
            cell_size,
            transform,
        }
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Fractional cell position under a screen pixel.
    pub fn fractional(&self, px: f64, py: f64) -> (f64, f64) {
        let t = &self.transform;
        (
            (px - t.origin_x) / t.zoom / self.cell_size,
            (py - t.origin_y) / t.zoom / self.cell_size,
        )
    }

    /// The whole cell under a screen pixel. May lie outside the grid.
    pub fn to_cell(&self, px: f64, py: f64) -> (i32, i32) {
        let (fx, fy) = self.fractional(px, py);
        (fx.floor() as i32, fy.floor() as i32)
    }

    /// Snapped elevator coordinate under a screen pixel.
    pub fn to_elevator_coord(&self, px: f64, py: f64) -> (f64, f64) {
        let (fx, fy) = self.fractional(px, py);
        (snap_half(fx), snap_half(fy))
    }

    /// Screen pixel at which the marker for an elevator coordinate is drawn.
    pub fn elevator_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let half = self.cell_size / 2.0;
        self.transform
            .to_screen(x * self.cell_size + half, y * self.cell_size + half)
    }

    /// Screen pixel of a cell's top-left corner.
    pub fn cell_to_pixel(&self, x: i32, y: i32) -> (f64, f64) {
        self.transform
            .to_screen(x as f64 * self.cell_size, y as f64 * self.cell_size)
    }
}

/// Snap a fractional cell position onto the half-cell grid.
///
/// `base + floor((f - base - 0.25) * 2) / 2` with `base = floor(f)`. The
/// remainder bands `[0, .25)`, `[.25, .75)`, `[.75, 1)` map to
/// `base - .5`, `base`, `base + .5`.
pub fn snap_half(f: f64) -> f64 {
    let base = f.floor();
    base + ((f - base - 0.25) * 2.0).floor() / 2.0
}
