//! Core level data model.
//!
//! A level is a fixed-size, row-major grid of block indices plus an ordered
//! list of elevator paths. Block index `0` is reserved for "empty". Elevator
//! control points live on a half-cell grid of fractional cell coordinates
//! (see [`crate::transform`]).
//!
//! `GridMap` does not know about the block catalog: storing an index the
//! catalog cannot resolve is the caller's problem (see [`crate::lint`]).

use crate::error::{LevelError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index into the external block catalog.
pub type BlockId = u32;

/// The reserved "no block" index.
pub const EMPTY_BLOCK: BlockId = 0;

// ─── Elevators ───────────────────────────────────────────────────────────

/// A single stop on an elevator path, in fractional cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    /// Dwell time at this stop. Non-negative.
    #[serde(default)]
    pub wait: f64,
}

impl ControlPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, wait: 0.0 }
    }

    /// Euclidean distance from this point to `(x, y)`.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }

    pub fn same_position(&self, other: &ControlPoint) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Control points are stored inline; most paths have only a handful.
pub type ControlPoints = SmallVec<[ControlPoint; 8]>;

/// A polyline an elevator travels along.
///
/// Insertion order is traversal order. A `circular` path additionally
/// connects the last point back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorPath {
    pub control_points: ControlPoints,
    #[serde(default)]
    pub circular: bool,
}

impl ElevatorPath {
    /// A new, open path with a single control point.
    pub fn starting_at(point: ControlPoint) -> Self {
        let mut control_points = ControlPoints::new();
        control_points.push(point);
        Self {
            control_points,
            circular: false,
        }
    }

    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    pub fn first(&self) -> Option<&ControlPoint> {
        self.control_points.first()
    }

    pub fn last(&self) -> Option<&ControlPoint> {
        self.control_points.last()
    }

    pub fn push(&mut self, point: ControlPoint) {
        self.control_points.push(point);
    }

    pub fn pop(&mut self) -> Option<ControlPoint> {
        self.control_points.pop()
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.control_points
    }
}

// ─── Grid map ────────────────────────────────────────────────────────────

/// The rectangular tile buffer and its elevator paths.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    width: u32,
    height: u32,
    cells: Vec<BlockId>,
    elevators: Vec<ElevatorPath>,
}

impl GridMap {
    /// Create an empty level: every cell is [`EMPTY_BLOCK`], no elevators.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = cell_count(width, height).ok_or(LevelError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![EMPTY_BLOCK; len],
            elevators: Vec::new(),
        })
    }

    /// Assemble a level from raw parts, checking the buffer length.
    pub fn from_parts(
        width: u32,
        height: u32,
        cells: Vec<BlockId>,
        elevators: Vec<ElevatorPath>,
    ) -> Result<Self> {
        let expected = cell_count(width, height).ok_or(LevelError::InvalidDimensions { width, height })?;
        if cells.len() != expected {
            return Err(LevelError::MalformedLevel(format!(
                "expected {expected} blocks for a {width}x{height} level, found {}",
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
            elevators,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` addresses a cell of this grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.offset(x, y).is_some()
    }

    /// The block at `(x, y)`, or `None` outside the grid.
    pub fn get_block(&self, x: i32, y: i32) -> Option<BlockId> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    /// Overwrite the block at `(x, y)`.
    pub fn set_block(&mut self, x: i32, y: i32, block: BlockId) -> Result<()> {
        let i = self.offset(x, y).ok_or(LevelError::OutOfBounds { x, y })?;
        self.cells[i] = block;
        Ok(())
    }

    /// Row-major cell buffer.
    pub fn cells(&self) -> &[BlockId] {
        &self.cells
    }

    /// Iterate `(x, y, block)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, BlockId)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &block)| (i as u32 % width, i as u32 / width, block))
    }

    pub fn elevators(&self) -> &[ElevatorPath] {
        &self.elevators
    }

    /// Mutable access for the elevator editor. Callers must not leave an
    /// empty path behind.
    pub fn elevators_mut(&mut self) -> &mut Vec<ElevatorPath> {
        &mut self.elevators
    }

    pub fn elevator(&self, index: usize) -> Option<&ElevatorPath> {
        self.elevators.get(index)
    }

    pub fn elevator_mut(&mut self, index: usize) -> Option<&mut ElevatorPath> {
        self.elevators.get_mut(index)
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

fn cell_count(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    (width as usize).checked_mul(height as usize)
}

// ─── File form ───────────────────────────────────────────────────────────

/// The persisted JSON shape of a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub width: u32,
    pub height: u32,
    pub blocks: Vec<BlockId>,
    pub elevators: Vec<ElevatorPath>,
}

impl From<&GridMap> for LevelFile {
    fn from(map: &GridMap) -> Self {
        Self {
            width: map.width,
            height: map.height,
            blocks: map.cells.clone(),
            elevators: map.elevators.clone(),
        }
    }
}

impl TryFrom<LevelFile> for GridMap {
    type Error = LevelError;

    fn try_from(file: LevelFile) -> Result<Self> {
        if file.width == 0 || file.height == 0 {
            return Err(LevelError::MalformedLevel(format!(
                "level dimensions must be positive, found {}x{}",
                file.width, file.height
            )));
        }

        let mut elevators = Vec::with_capacity(file.elevators.len());
        for (i, path) in file.elevators.into_iter().enumerate() {
            if path.is_empty() {
                log::warn!("dropping elevator {i}: it has no control points");
                continue;
            }
            for (j, cp) in path.control_points.iter().enumerate() {
                if !cp.x.is_finite() || !cp.y.is_finite() {
                    return Err(LevelError::MalformedLevel(format!(
                        "elevator {i} point {j} has a non-finite position"
                    )));
                }
                if !cp.wait.is_finite() || cp.wait < 0.0 {
                    return Err(LevelError::MalformedLevel(format!(
                        "elevator {i} point {j} has invalid wait {}",
                        cp.wait
                    )));
                }
            }
            elevators.push(path);
        }

        GridMap::from_parts(file.width, file.height, file.blocks, elevators)
    }
}
