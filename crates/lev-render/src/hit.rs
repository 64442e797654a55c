//! Hit testing: elevator coordinate → control point lookup.
//!
//! Works in fractional cell units, on coordinates already snapped by
//! [`lev_core::CoordinateMapper::to_elevator_coord`], so a click on a drawn
//! marker lands exactly on its stored position.

use lev_core::ElevatorPath;

/// The control point found by [`hit_control_point`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointHit {
    /// Index of the path in the level's elevator list.
    pub elevator: usize,
    /// Index of the point within the path.
    pub point: usize,
    pub distance: f64,
}

impl PointHit {
    /// The first point of a path doubles as its loop-closing handle.
    pub fn is_first(&self) -> bool {
        self.point == 0
    }
}

/// Find the nearest control point within `radius` of `(x, y)`.
///
/// Ties go to the earlier path, then the earlier point.
/// Returns `None` if nothing is close enough.
pub fn hit_control_point(elevators: &[ElevatorPath], x: f64, y: f64, radius: f64) -> Option<PointHit> {
    let mut best: Option<PointHit> = None;
    for (elevator, path) in elevators.iter().enumerate() {
        for (point, cp) in path.points().iter().enumerate() {
            let distance = cp.distance_to(x, y);
            if distance > radius {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(PointHit {
                    elevator,
                    point,
                    distance,
                });
            }
        }
    }
    best
}

/// Index of the path owning the nearest control point within `radius`.
/// Used for hover emphasis.
pub fn hit_elevator(elevators: &[ElevatorPath], x: f64, y: f64, radius: f64) -> Option<usize> {
    hit_control_point(elevators, x, y, radius).map(|hit| hit.elevator)
}
