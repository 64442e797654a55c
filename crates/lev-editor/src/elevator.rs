//! Elevator path editing state machine.
//!
//! Two states: idle (`active == None`) and editing one path. Clicks arrive
//! as snapped elevator coordinates (see
//! [`lev_core::CoordinateMapper::to_elevator_coord`]) and are resolved
//! against the nearest control point within the hit radius:
//!
//! | State | Hit | Result |
//! |-------|-----|--------|
//! | editing `p` | first point of `p` | close `p`, idle |
//! | editing `p` | other point of `p` | nothing |
//! | editing `p` | point of `q != p` | editing `q` |
//! | editing `p` | none | append to `p` |
//! | idle | first point of `q` | new path |
//! | idle | other point of `q` | editing `q` |
//! | idle | none | new path |
//!
//! Closing a path through its first point always marks it circular.

use lev_core::{ControlPoint, ElevatorPath, GridMap};
use lev_render::hit_control_point;

/// What a click did to the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorChange {
    /// A new path was started; holds its index.
    Created(usize),
    /// A point was appended to the active path.
    Appended,
    /// The active path was finished; `circular` holds the new flag.
    Closed { circular: bool },
    /// Another path became active.
    Switched(usize),
    Ignored,
}

impl ElevatorChange {
    /// Whether the level data changed (as opposed to editor state only).
    pub fn is_edit(self) -> bool {
        matches!(self, Self::Created(_) | Self::Appended | Self::Closed { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElevatorEditor {
    active: Option<usize>,
    hovered: Option<usize>,
}

impl ElevatorEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    /// Forget all state, e.g. after the level was replaced.
    pub fn reset(&mut self) {
        self.active = None;
        self.hovered = None;
    }

    /// Handle a click at snapped elevator coordinate `(x, y)`.
    pub fn click(&mut self, map: &mut GridMap, x: f64, y: f64, radius: f64) -> ElevatorChange {
        let hit = hit_control_point(map.elevators(), x, y, radius);

        let change = match (self.active, hit) {
            (Some(active), Some(hit)) if hit.elevator == active => {
                if !hit.is_first() {
                    return ElevatorChange::Ignored;
                }
                let Some(path) = map.elevator_mut(active) else {
                    return self.drop_stale(active);
                };
                path.circular = hit.is_first();
                let circular = path.circular;
                self.active = None;
                ElevatorChange::Closed { circular }
            }
            (Some(_), Some(hit)) => {
                self.active = Some(hit.elevator);
                ElevatorChange::Switched(hit.elevator)
            }
            (None, Some(hit)) if !hit.is_first() => {
                self.active = Some(hit.elevator);
                ElevatorChange::Switched(hit.elevator)
            }
            (Some(active), None) => {
                let Some(path) = map.elevator_mut(active) else {
                    return self.drop_stale(active);
                };
                path.push(ControlPoint::new(x, y));
                ElevatorChange::Appended
            }
            (None, _) => {
                let elevators = map.elevators_mut();
                elevators.push(ElevatorPath::starting_at(ControlPoint::new(x, y)));
                let index = elevators.len() - 1;
                self.active = Some(index);
                ElevatorChange::Created(index)
            }
        };
        log::trace!("elevator click at ({x}, {y}): {change:?}");
        change
    }

    /// Delete the active path. No-op when idle.
    pub fn remove_active_path(&mut self, map: &mut GridMap) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        self.hovered = None;
        let elevators = map.elevators_mut();
        if active >= elevators.len() {
            return false;
        }
        elevators.remove(active);
        true
    }

    /// Remove the last point of the active path. A single-point path is
    /// removed entirely. No-op when idle.
    pub fn pop_active_point(&mut self, map: &mut GridMap) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match map.elevator_mut(active) {
            Some(path) if path.len() > 1 => path.pop().is_some(),
            Some(_) => self.remove_active_path(map),
            None => {
                self.drop_stale(active);
                false
            }
        }
    }

    /// Leave editing without closing the path.
    pub fn finish_active_path(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Recompute the hovered path. Returns whether it changed.
    pub fn update_hover(&mut self, map: &GridMap, x: f64, y: f64, radius: f64) -> bool {
        let hovered = lev_render::hit_elevator(map.elevators(), x, y, radius);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    /// Clear hover, e.g. when the pointer leaves elevator mode.
    pub fn clear_hover(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    fn drop_stale(&mut self, index: usize) -> ElevatorChange {
        log::warn!("active elevator {index} no longer exists");
        self.reset();
        ElevatorChange::Ignored
    }
}
