//! Render planning: level + view + editor state → ordered draw instructions.
//!
//! The planner decides *what* to draw; executors (the Vello painter in
//! [`crate::paint`], the Canvas2D renderer in the WASM bridge) decide *how*.
//! All coordinates are unzoomed grid pixels. Executors apply
//! [`RenderPlan::transform`] themselves.
//!
//! Layers, in order:
//! 1. dashed grid lines at every interior cell boundary
//! 2. block sprites for non-empty cells
//! 3. elevator overlay (paths, markers, preview segment, finish label)

use kurbo::Point;
use lev_core::{BlockCatalog, BlockId, EMPTY_BLOCK, EditorConfig, ElevatorPath, GridMap, ViewTransform};
use smallvec::SmallVec;

/// Label shown at the closing point of a two-point path.
pub const FINISH_LABEL: &str = "FINISH";
/// Label shown at the closing point once the path can form a loop.
pub const FINISH_CIRCULAR_LABEL: &str = "FINISH - CIRCULAR";

/// Visual weight of an elevator path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Default,
    Hovered,
    Active,
}

/// A single draw instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Dashed grid line between two cell boundaries.
    GridLine { from: Point, to: Point },
    /// Erase a cell before redrawing it.
    ClearCell { x: u32, y: u32 },
    /// Draw frame `frame` of `block` into cell `(x, y)`.
    Sprite {
        x: u32,
        y: u32,
        block: BlockId,
        frame: usize,
    },
    /// Connecting line of an elevator path.
    Polyline {
        points: SmallVec<[Point; 8]>,
        closed: bool,
        emphasis: Emphasis,
    },
    /// Control point marker.
    Marker {
        center: Point,
        radius: f64,
        first: bool,
        emphasis: Emphasis,
    },
    /// Dashed segment from the active path's last point to the cursor.
    Preview { from: Point, to: Point },
    Label { at: Point, text: &'static str },
}

/// Draw instructions for one frame, grouped by canvas layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub transform: ViewTransform,
    pub cell_size: f64,
    /// Unzoomed pixel size of the whole grid.
    pub width_px: f64,
    pub height_px: f64,
    pub grid: Vec<DrawOp>,
    pub blocks: Vec<DrawOp>,
    pub elevators: Vec<DrawOp>,
}

impl RenderPlan {
    fn empty(map: &GridMap, cell_size: f64, transform: ViewTransform) -> Self {
        Self {
            transform,
            cell_size,
            width_px: map.width() as f64 * cell_size,
            height_px: map.height() as f64 * cell_size,
            grid: Vec::new(),
            blocks: Vec::new(),
            elevators: Vec::new(),
        }
    }

    /// All instructions in paint order.
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.grid.iter().chain(&self.blocks).chain(&self.elevators)
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty() && self.blocks.is_empty() && self.elevators.is_empty()
    }
}

/// Transient editor state the overlay depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayState {
    /// Path being extended, if any.
    pub active: Option<usize>,
    pub hovered: Option<usize>,
    /// Snapped elevator coordinate under the pointer.
    pub cursor: Option<(f64, f64)>,
}

/// Builds [`RenderPlan`]s.
pub struct RenderPlanner<'a> {
    config: &'a EditorConfig,
}

impl<'a> RenderPlanner<'a> {
    pub fn new(config: &'a EditorConfig) -> Self {
        Self { config }
    }

    /// Full redraw of every layer.
    pub fn plan(
        &self,
        map: &GridMap,
        catalog: &BlockCatalog,
        transform: ViewTransform,
        overlay: &OverlayState,
    ) -> RenderPlan {
        let mut plan = RenderPlan::empty(map, self.config.cell_size, transform);
        plan.grid = self.grid_lines(map);
        plan.blocks = self.blocks(map, catalog, false);
        plan.elevators = self.elevator_overlay(map, overlay);
        plan
    }

    /// Animation tick: only cells whose block has more than one frame.
    pub fn plan_refresh(
        &self,
        map: &GridMap,
        catalog: &BlockCatalog,
        transform: ViewTransform,
    ) -> RenderPlan {
        let mut plan = RenderPlan::empty(map, self.config.cell_size, transform);
        plan.blocks = self.blocks(map, catalog, true);
        plan
    }

    /// Elevator layer only, for hover and edit feedback.
    pub fn plan_overlay(&self, map: &GridMap, transform: ViewTransform, overlay: &OverlayState) -> RenderPlan {
        let mut plan = RenderPlan::empty(map, self.config.cell_size, transform);
        plan.elevators = self.elevator_overlay(map, overlay);
        plan
    }

    /// Redraw of a single cell after a paint. Empty cells only clear.
    pub fn plan_cell(
        &self,
        map: &GridMap,
        catalog: &BlockCatalog,
        transform: ViewTransform,
        x: u32,
        y: u32,
    ) -> RenderPlan {
        let mut plan = RenderPlan::empty(map, self.config.cell_size, transform);
        if let Some(block) = map.get_block(x as i32, y as i32) {
            plan.blocks.push(DrawOp::ClearCell { x, y });
            if let Some(op) = sprite(catalog, x, y, block) {
                plan.blocks.push(op);
            }
        }
        plan
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    /// Lines at every interior cell boundary, verticals first.
    pub fn grid_lines(&self, map: &GridMap) -> Vec<DrawOp> {
        let cell = self.config.cell_size;
        let w = map.width() as f64 * cell;
        let h = map.height() as f64 * cell;
        let mut ops = Vec::with_capacity((map.width() + map.height()) as usize);
        for x in 1..map.width() {
            let px = x as f64 * cell;
            ops.push(DrawOp::GridLine {
                from: Point::new(px, 0.0),
                to: Point::new(px, h),
            });
        }
        for y in 1..map.height() {
            let py = y as f64 * cell;
            ops.push(DrawOp::GridLine {
                from: Point::new(0.0, py),
                to: Point::new(w, py),
            });
        }
        ops
    }

    /// Sprites for non-empty cells.
    ///
    /// With `refresh_only`, single-frame blocks are skipped and every drawn
    /// cell is cleared first so the new frame does not blend with the old.
    pub fn blocks(&self, map: &GridMap, catalog: &BlockCatalog, refresh_only: bool) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        for (x, y, block) in map.iter_cells() {
            if block == EMPTY_BLOCK {
                continue;
            }
            if refresh_only {
                if !catalog.is_animated(block) {
                    continue;
                }
                ops.push(DrawOp::ClearCell { x, y });
            }
            match sprite(catalog, x, y, block) {
                Some(op) => ops.push(op),
                None => log::trace!("no sprite for block {block} at ({x}, {y})"),
            }
        }
        ops
    }

    /// Paths, markers, and the in-progress preview.
    pub fn elevator_overlay(&self, map: &GridMap, overlay: &OverlayState) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        let elevators = map.elevators();

        for (i, path) in elevators.iter().enumerate() {
            let emphasis = if overlay.active == Some(i) {
                Emphasis::Active
            } else if overlay.hovered == Some(i) {
                Emphasis::Hovered
            } else {
                Emphasis::Default
            };

            if path.len() >= 2 {
                ops.push(DrawOp::Polyline {
                    points: path
                        .points()
                        .iter()
                        .map(|cp| self.marker_center(cp.x, cp.y))
                        .collect(),
                    closed: path.circular,
                    emphasis,
                });
            }

            for (j, cp) in path.points().iter().enumerate() {
                let first = j == 0;
                ops.push(DrawOp::Marker {
                    center: self.marker_center(cp.x, cp.y),
                    radius: if first {
                        self.config.first_marker_radius
                    } else {
                        self.config.marker_radius
                    },
                    first,
                    emphasis,
                });
            }
        }

        if let Some(path) = overlay.active.and_then(|i| elevators.get(i)) {
            self.editing_overlay(path, overlay.cursor, &mut ops);
        }
        ops
    }

    fn editing_overlay(&self, path: &ElevatorPath, cursor: Option<(f64, f64)>, ops: &mut Vec<DrawOp>) {
        if let (Some(last), Some((cx, cy))) = (path.last(), cursor) {
            ops.push(DrawOp::Preview {
                from: self.marker_center(last.x, last.y),
                to: self.marker_center(cx, cy),
            });
        }

        if path.len() < 2 {
            return;
        }
        if let Some(first) = path.first() {
            let center = self.marker_center(first.x, first.y);
            let offset = self.config.first_marker_radius + 2.0;
            ops.push(DrawOp::Label {
                at: Point::new(center.x + offset, center.y - offset),
                text: if path.len() == 2 {
                    FINISH_LABEL
                } else {
                    FINISH_CIRCULAR_LABEL
                },
            });
        }
    }

    /// Grid-pixel center of an elevator coordinate.
    fn marker_center(&self, x: f64, y: f64) -> Point {
        let cell = self.config.cell_size;
        Point::new(x * cell + cell / 2.0, y * cell + cell / 2.0)
    }
}

fn sprite(catalog: &BlockCatalog, x: u32, y: u32, block: BlockId) -> Option<DrawOp> {
    if block == EMPTY_BLOCK {
        return None;
    }
    let frame = catalog.current_frame_index(block)?;
    Some(DrawOp::Sprite { x, y, block, frame })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lev_core::ControlPoint;
    use pretty_assertions::assert_eq;

    const CATALOG: &str = r#"[
        { "animationFrames": ["empty"] },
        { "animationFrames": ["brick"] },
        { "animationFrames": ["water-1", "water-2"] }
    ]"#;

    fn fixture() -> (GridMap, BlockCatalog, EditorConfig) {
        let mut map = GridMap::new(3, 2).unwrap();
        map.set_block(0, 0, 1).unwrap();
        map.set_block(2, 1, 2).unwrap();
        (map, BlockCatalog::from_json(CATALOG).unwrap(), EditorConfig::default())
    }

    fn add_path(map: &mut GridMap, points: &[(f64, f64)], circular: bool) {
        let mut path = ElevatorPath::starting_at(ControlPoint::new(points[0].0, points[0].1));
        for &(x, y) in &points[1..] {
            path.push(ControlPoint::new(x, y));
        }
        path.circular = circular;
        map.elevators_mut().push(path);
    }

    #[test]
    fn grid_lines_cover_interior_boundaries() {
        let (map, _, config) = fixture();
        let ops = RenderPlanner::new(&config).grid_lines(&map);
        assert_eq!(
            ops,
            vec![
                DrawOp::GridLine {
                    from: Point::new(32.0, 0.0),
                    to: Point::new(32.0, 64.0)
                },
                DrawOp::GridLine {
                    from: Point::new(64.0, 0.0),
                    to: Point::new(64.0, 64.0)
                },
                DrawOp::GridLine {
                    from: Point::new(0.0, 32.0),
                    to: Point::new(96.0, 32.0)
                },
            ]
        );
    }

    #[test]
    fn full_plan_draws_every_non_empty_cell() {
        let (map, catalog, config) = fixture();
        let plan = RenderPlanner::new(&config).plan(
            &map,
            &catalog,
            ViewTransform::default(),
            &OverlayState::default(),
        );
        assert_eq!(
            plan.blocks,
            vec![
                DrawOp::Sprite {
                    x: 0,
                    y: 0,
                    block: 1,
                    frame: 0
                },
                DrawOp::Sprite {
                    x: 2,
                    y: 1,
                    block: 2,
                    frame: 0
                },
            ]
        );
        assert_eq!((plan.width_px, plan.height_px), (96.0, 64.0));
        assert!(plan.elevators.is_empty());
    }

    #[test]
    fn refresh_plan_skips_static_blocks() {
        let (map, mut catalog, config) = fixture();
        catalog.advance_animation();
        let plan = RenderPlanner::new(&config).plan_refresh(&map, &catalog, ViewTransform::default());
        assert!(plan.grid.is_empty());
        assert_eq!(
            plan.blocks,
            vec![
                DrawOp::ClearCell { x: 2, y: 1 },
                DrawOp::Sprite {
                    x: 2,
                    y: 1,
                    block: 2,
                    frame: 1
                },
            ]
        );
    }

    #[test]
    fn cell_plan_clears_erased_cell() {
        let (map, catalog, config) = fixture();
        let planner = RenderPlanner::new(&config);
        let plan = planner.plan_cell(&map, &catalog, ViewTransform::default(), 1, 0);
        assert_eq!(plan.blocks, vec![DrawOp::ClearCell { x: 1, y: 0 }]);

        let plan = planner.plan_cell(&map, &catalog, ViewTransform::default(), 0, 0);
        assert_eq!(plan.blocks.len(), 2);

        let plan = planner.plan_cell(&map, &catalog, ViewTransform::default(), 9, 9);
        assert!(plan.is_empty());
    }

    #[test]
    fn overlay_polyline_and_markers() {
        let (mut map, _, config) = fixture();
        add_path(&mut map, &[(0.0, 0.0), (1.0, 0.5)], true);
        add_path(&mut map, &[(2.0, 1.0)], false);

        let overlay = OverlayState {
            active: None,
            hovered: Some(1),
            cursor: None,
        };
        let ops = RenderPlanner::new(&config).elevator_overlay(&map, &overlay);
        assert_eq!(
            ops,
            vec![
                DrawOp::Polyline {
                    points: SmallVec::from_slice(&[Point::new(16.0, 16.0), Point::new(48.0, 32.0)]),
                    closed: true,
                    emphasis: Emphasis::Default,
                },
                DrawOp::Marker {
                    center: Point::new(16.0, 16.0),
                    radius: 6.0,
                    first: true,
                    emphasis: Emphasis::Default,
                },
                DrawOp::Marker {
                    center: Point::new(48.0, 32.0),
                    radius: 4.0,
                    first: false,
                    emphasis: Emphasis::Default,
                },
                DrawOp::Marker {
                    center: Point::new(80.0, 48.0),
                    radius: 6.0,
                    first: true,
                    emphasis: Emphasis::Hovered,
                },
            ]
        );
    }

    #[test]
    fn editing_overlay_adds_preview_and_label() {
        let (mut map, _, config) = fixture();
        add_path(&mut map, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)], false);
        let overlay = OverlayState {
            active: Some(0),
            hovered: Some(0),
            cursor: Some((2.0, 1.0)),
        };
        let ops = RenderPlanner::new(&config).elevator_overlay(&map, &overlay);

        assert!(matches!(
            ops[0],
            DrawOp::Polyline {
                emphasis: Emphasis::Active,
                closed: false,
                ..
            }
        ));
        assert!(ops.contains(&DrawOp::Preview {
            from: Point::new(48.0, 48.0),
            to: Point::new(80.0, 48.0),
        }));
        assert_eq!(
            ops.last(),
            Some(&DrawOp::Label {
                at: Point::new(24.0, 8.0),
                text: FINISH_CIRCULAR_LABEL,
            })
        );
    }

    #[test]
    fn single_point_active_path_has_no_label() {
        let (mut map, _, config) = fixture();
        add_path(&mut map, &[(0.0, 0.0)], false);
        let overlay = OverlayState {
            active: Some(0),
            hovered: None,
            cursor: Some((0.5, 0.0)),
        };
        let ops = RenderPlanner::new(&config).elevator_overlay(&map, &overlay);
        assert!(ops.iter().any(|op| matches!(op, DrawOp::Preview { .. })));
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Label { .. })));
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Polyline { .. })));
    }

    #[test]
    fn two_point_path_shows_plain_finish() {
        let (mut map, _, config) = fixture();
        add_path(&mut map, &[(0.0, 0.0), (1.0, 0.0)], false);
        let overlay = OverlayState {
            active: Some(0),
            ..OverlayState::default()
        };
        let ops = RenderPlanner::new(&config).elevator_overlay(&map, &overlay);
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Label {
                text: FINISH_LABEL,
                ..
            }
        )));
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Preview { .. })));
    }
}
