//! Editor session: the single owner of the level and all transient state.
//!
//! Every host event goes through [`EditorSession::handle_event`], which
//! derives the [`InputIntent`] once and dispatches to the block painter,
//! elevator editor, or viewport. Commands from the control panel
//! (new/open/save, zoom buttons, block selection, elevator removal) are
//! plain methods. Each call reports what needs redrawing as an
//! [`EventOutcome`]; the session never draws anything itself.

use crate::elevator::{ElevatorChange, ElevatorEditor};
use crate::input::{BlockSlot, EditorMode, InputEvent, InputIntent, Modifiers, PointerButton};
use crate::painter::BlockPainter;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::viewport::ViewportController;
use lev_core::error::Result;
use lev_core::{
    BlockCatalog, BlockId, EditorConfig, GridMap, LevelError, LintDiagnostic, ViewTransform, emit_level,
    lint_level, parse_level_bytes,
};
use lev_render::{OverlayState, RenderPlan, RenderPlanner};

/// File name offered for levels that were never opened from disk.
pub const NEW_LEVEL_NAME: &str = "new-level.json";

/// What the host should redraw after an event or command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Nothing,
    /// One cell changed; `plan_cell` covers it.
    Cell { x: u32, y: u32 },
    /// Only the elevator layer changed.
    Overlay,
    /// The view or the whole level changed.
    Full,
    /// The active block slots changed; UI highlighting should update.
    ActiveBlocks,
    /// A shortcut the host has to carry out (file access).
    Host(ShortcutAction),
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    intent: InputIntent,
    button: PointerButton,
    last: (f64, f64),
}

pub struct EditorSession {
    config: EditorConfig,
    catalog: BlockCatalog,
    level: Option<GridMap>,
    level_name: String,
    painter: BlockPainter,
    elevators: ElevatorEditor,
    viewport: ViewportController,
    mode: EditorMode,
    /// Snapped elevator coordinate under the pointer, in elevator mode.
    cursor: Option<(f64, f64)>,
    /// Last pointer position in viewport pixels.
    pointer: Option<(f64, f64)>,
    drag: Option<Drag>,
}

impl EditorSession {
    pub fn new(config: EditorConfig, catalog: BlockCatalog) -> Self {
        let viewport = ViewportController::new(config.cell_size, config.zoom_step);
        let primary = if catalog.len() > 1 { 1 } else { 0 };
        Self {
            config,
            catalog,
            level: None,
            level_name: NEW_LEVEL_NAME.to_string(),
            painter: BlockPainter::new(primary, 0),
            elevators: ElevatorEditor::new(),
            viewport,
            mode: EditorMode::Block,
            cursor: None,
            pointer: None,
            drag: None,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    pub fn level(&self) -> Option<&GridMap> {
        self.level.as_ref()
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// `(primary, secondary)` active blocks.
    pub fn active_blocks(&self) -> (BlockId, BlockId) {
        self.painter.active_blocks()
    }

    pub fn active_elevator(&self) -> Option<usize> {
        self.elevators.active()
    }

    pub fn hovered_elevator(&self) -> Option<usize> {
        self.elevators.hovered()
    }

    pub fn transform(&self) -> ViewTransform {
        self.viewport.transform()
    }

    // ─── Level commands ──────────────────────────────────────────────────

    /// Replace the level with an empty `width`×`height` one.
    pub fn new_level(&mut self, width: u32, height: u32) -> Result<()> {
        let map = GridMap::new(width, height)?;
        self.replace_level(map, NEW_LEVEL_NAME.to_string());
        Ok(())
    }

    /// Parse `bytes` and replace the level. On error the current level stays.
    pub fn open_level(&mut self, bytes: &[u8], name: &str) -> Result<()> {
        let map = parse_level_bytes(bytes)?;
        self.replace_level(map, name.to_string());
        Ok(())
    }

    /// Serialize the current level.
    pub fn save_level(&self) -> Result<Vec<u8>> {
        let map = self.level.as_ref().ok_or(LevelError::NoActiveLevel)?;
        emit_level(map).map(String::into_bytes)
    }

    fn replace_level(&mut self, map: GridMap, name: String) {
        log::info!("opened {name} ({}x{})", map.width(), map.height());
        self.level = Some(map);
        self.level_name = name;
        self.elevators.reset();
        self.viewport.reset();
        self.cursor = None;
        self.drag = None;
    }

    /// Lint the current level against the catalog.
    pub fn lint(&self) -> Vec<LintDiagnostic> {
        self.level
            .as_ref()
            .map(|map| lint_level(map, &self.catalog))
            .unwrap_or_default()
    }

    // ─── View commands ───────────────────────────────────────────────────

    /// Zoom in about the last pointer position.
    pub fn zoom_in(&mut self) {
        let (cx, cy) = self.pointer.unwrap_or_default();
        self.viewport.zoom_in(cx, cy);
    }

    pub fn zoom_out(&mut self) {
        let (cx, cy) = self.pointer.unwrap_or_default();
        self.viewport.zoom_out(cx, cy);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy);
    }

    // ─── Block commands ──────────────────────────────────────────────────

    /// Put `block` in `slot`. Blocks outside the catalog are rejected.
    pub fn set_active_block(&mut self, block: BlockId, slot: BlockSlot) -> bool {
        if !self.catalog.contains(block) {
            log::warn!("block {block} is not in the catalog");
            return false;
        }
        self.painter.set_active(slot, block);
        true
    }

    /// Move the primary block `delta` steps through the catalog, clamped.
    pub fn step_active_block(&mut self, delta: i64) -> bool {
        let current = i64::from(self.painter.active(BlockSlot::Primary));
        let last = self.catalog.len() as i64 - 1;
        let next = (current + delta).clamp(0, last);
        if next == current {
            return false;
        }
        self.painter.set_active(BlockSlot::Primary, next as BlockId);
        true
    }

    // ─── Elevator commands ───────────────────────────────────────────────

    pub fn remove_active_elevator(&mut self) -> bool {
        let Some(map) = require_level(&mut self.level, "remove elevator") else {
            return false;
        };
        self.elevators.remove_active_path(map)
    }

    pub fn remove_active_elevator_point(&mut self) -> bool {
        let Some(map) = require_level(&mut self.level, "remove elevator point") else {
            return false;
        };
        self.elevators.pop_active_point(map)
    }

    /// Stop extending the active path without closing it.
    pub fn finish_active_elevator(&mut self) -> bool {
        self.elevators.finish_active_path()
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: &InputEvent) -> EventOutcome {
        if let Some(pos) = event.position() {
            self.pointer = Some(pos);
        }
        match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
            } => self.pointer_down(*x, *y, *button, *modifiers),
            InputEvent::PointerMove { x, y, modifiers } => self.pointer_move(*x, *y, *modifiers),
            InputEvent::PointerUp { button, .. } => {
                if self.drag.is_some_and(|d| d.button == *button) {
                    self.drag = None;
                }
                EventOutcome::Nothing
            }
            InputEvent::PointerLeave => {
                self.drag = None;
                let had_cursor = self.cursor.take().is_some();
                if self.elevators.clear_hover() || had_cursor {
                    EventOutcome::Overlay
                } else {
                    EventOutcome::Nothing
                }
            }
            InputEvent::Wheel { x, y, delta_y } => {
                if *delta_y < 0.0 {
                    self.viewport.zoom_in(*x, *y);
                } else if *delta_y > 0.0 {
                    self.viewport.zoom_out(*x, *y);
                } else {
                    return EventOutcome::Nothing;
                }
                EventOutcome::Full
            }
            InputEvent::Key { key, modifiers } => self.key(key, *modifiers),
        }
    }

    fn pointer_down(&mut self, x: f64, y: f64, button: PointerButton, modifiers: Modifiers) -> EventOutcome {
        let intent = InputIntent::resolve(button, modifiers);
        self.mode = EditorMode::from_modifiers(modifiers);
        log::trace!("pointer down at ({x}, {y}): {intent:?}");

        if intent.drags() {
            self.drag = Some(Drag {
                intent,
                button,
                last: (x, y),
            });
        }

        match intent {
            InputIntent::Pan => EventOutcome::Nothing,
            InputIntent::Paint(_) | InputIntent::Erase => self.apply_paint(intent, x, y),
            InputIntent::Pick(slot) => {
                let Some(map) = require_level(&mut self.level, "pick") else {
                    return EventOutcome::Nothing;
                };
                let (cx, cy) = self.viewport.mapper().to_cell(x, y);
                match self.painter.pick(map, &self.catalog, cx, cy, slot) {
                    Some(_) => EventOutcome::ActiveBlocks,
                    None => EventOutcome::Nothing,
                }
            }
            InputIntent::ElevatorEdit => {
                let Some(map) = require_level(&mut self.level, "elevator edit") else {
                    return EventOutcome::Nothing;
                };
                let (ex, ey) = self.viewport.mapper().to_elevator_coord(x, y);
                let radius = self.config.hit_radius;
                let change = self.elevators.click(map, ex, ey, radius);
                self.cursor = Some((ex, ey));
                self.elevators.update_hover(map, ex, ey, radius);
                if change == ElevatorChange::Ignored {
                    EventOutcome::Nothing
                } else {
                    EventOutcome::Overlay
                }
            }
        }
    }

    fn pointer_move(&mut self, x: f64, y: f64, modifiers: Modifiers) -> EventOutcome {
        if let Some(drag) = self.drag.as_mut() {
            let intent = drag.intent;
            let (lx, ly) = drag.last;
            drag.last = (x, y);
            if intent == InputIntent::Pan {
                self.viewport.pan(x - lx, y - ly);
                return EventOutcome::Full;
            }
            return self.apply_paint(intent, x, y);
        }

        self.mode = EditorMode::from_modifiers(modifiers);
        if self.mode == EditorMode::Block {
            let had_cursor = self.cursor.take().is_some();
            return if self.elevators.clear_hover() || had_cursor {
                EventOutcome::Overlay
            } else {
                EventOutcome::Nothing
            };
        }

        let Some(map) = self.level.as_ref() else {
            return EventOutcome::Nothing;
        };
        let coord = self.viewport.mapper().to_elevator_coord(x, y);
        let moved = self.cursor != Some(coord);
        self.cursor = Some(coord);
        let hover_changed = self.elevators.update_hover(map, coord.0, coord.1, self.config.hit_radius);
        if hover_changed || (moved && self.elevators.is_editing()) {
            EventOutcome::Overlay
        } else {
            EventOutcome::Nothing
        }
    }

    fn apply_paint(&mut self, intent: InputIntent, x: f64, y: f64) -> EventOutcome {
        let Some(map) = require_level(&mut self.level, "paint") else {
            return EventOutcome::Nothing;
        };
        let (cx, cy) = self.viewport.mapper().to_cell(x, y);
        let changed = match intent {
            InputIntent::Paint(slot) => self.painter.paint_slot(map, cx, cy, slot),
            InputIntent::Erase => BlockPainter::erase(map, cx, cy),
            _ => false,
        };
        if changed {
            // `paint` only succeeds inside the grid, so the cast is lossless.
            EventOutcome::Cell {
                x: cx as u32,
                y: cy as u32,
            }
        } else {
            EventOutcome::Nothing
        }
    }

    fn key(&mut self, key: &str, m: Modifiers) -> EventOutcome {
        let Some(action) = ShortcutMap::resolve(key, m.ctrl, m.shift, m.alt, m.meta) else {
            return EventOutcome::Nothing;
        };
        log::debug!("shortcut {key:?} -> {}", action.name());
        self.run_action(action)
    }

    /// Carry out a shortcut action that needs no host involvement.
    pub fn run_action(&mut self, action: ShortcutAction) -> EventOutcome {
        let changed = match action {
            ShortcutAction::NewLevel | ShortcutAction::OpenLevel | ShortcutAction::SaveLevel => {
                return EventOutcome::Host(action);
            }
            ShortcutAction::ZoomIn => {
                self.zoom_in();
                return EventOutcome::Full;
            }
            ShortcutAction::ZoomOut => {
                self.zoom_out();
                return EventOutcome::Full;
            }
            ShortcutAction::PreviousBlock | ShortcutAction::NextBlock => {
                let delta = if action == ShortcutAction::NextBlock { 1 } else { -1 };
                return if self.step_active_block(delta) {
                    EventOutcome::ActiveBlocks
                } else {
                    EventOutcome::Nothing
                };
            }
            ShortcutAction::RemoveElevator => self.remove_active_elevator(),
            ShortcutAction::RemoveElevatorPoint => self.remove_active_elevator_point(),
            ShortcutAction::FinishElevator => self.finish_active_elevator(),
        };
        if changed {
            EventOutcome::Overlay
        } else {
            EventOutcome::Nothing
        }
    }

    // ─── Animation & planning ────────────────────────────────────────────

    /// Advance sprite animation. Returns whether animated cells need a redraw.
    pub fn tick(&mut self) -> bool {
        let animated = self.catalog.advance_animation();
        animated && self.level.is_some()
    }

    fn overlay_state(&self) -> OverlayState {
        OverlayState {
            active: self.elevators.active(),
            hovered: self.elevators.hovered(),
            cursor: if self.mode == EditorMode::Elevator {
                self.cursor
            } else {
                None
            },
        }
    }

    /// Full draw plan, or `None` without a level.
    pub fn plan(&self) -> Option<RenderPlan> {
        let map = self.level.as_ref()?;
        let planner = RenderPlanner::new(&self.config);
        Some(planner.plan(map, &self.catalog, self.transform(), &self.overlay_state()))
    }

    /// Plan for animated cells only, after [`Self::tick`].
    pub fn plan_refresh(&self) -> Option<RenderPlan> {
        let map = self.level.as_ref()?;
        Some(RenderPlanner::new(&self.config).plan_refresh(map, &self.catalog, self.transform()))
    }

    /// Plan for one cell, after an [`EventOutcome::Cell`].
    pub fn plan_cell(&self, x: u32, y: u32) -> Option<RenderPlan> {
        let map = self.level.as_ref()?;
        Some(RenderPlanner::new(&self.config).plan_cell(map, &self.catalog, self.transform(), x, y))
    }

    /// Plan for the elevator layer only.
    pub fn plan_overlay(&self) -> Option<RenderPlan> {
        let map = self.level.as_ref()?;
        Some(RenderPlanner::new(&self.config).plan_overlay(map, self.transform(), &self.overlay_state()))
    }
}

fn require_level<'a>(level: &'a mut Option<GridMap>, op: &str) -> Option<&'a mut GridMap> {
    if level.is_none() {
        log::debug!("{op} ignored: {}", LevelError::NoActiveLevel);
    }
    level.as_mut()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditorSession {
        let catalog = BlockCatalog::from_json(
            r#"[{"animationFrames":["empty"]},{"animationFrames":["brick"]},{"animationFrames":["a","b"]}]"#,
        )
        .unwrap();
        EditorSession::new(EditorConfig::default(), catalog)
    }

    #[test]
    fn edits_without_level_are_noops() {
        let mut s = session();
        let down = InputEvent::PointerDown {
            x: 5.0,
            y: 5.0,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(s.handle_event(&down), EventOutcome::Nothing);
        assert!(!s.remove_active_elevator());
        assert_eq!(s.save_level(), Err(LevelError::NoActiveLevel));
        assert!(s.plan().is_none());
        assert!(!s.tick());
    }

    #[test]
    fn unknown_block_rejected() {
        let mut s = session();
        assert!(!s.set_active_block(9, BlockSlot::Primary));
        assert!(s.set_active_block(2, BlockSlot::Secondary));
        assert_eq!(s.active_blocks(), (1, 2));
    }

    #[test]
    fn block_stepping_clamps() {
        let mut s = session();
        assert!(s.step_active_block(1));
        assert!(!s.step_active_block(1));
        assert_eq!(s.active_blocks().0, 2);
        assert!(s.step_active_block(-5));
        assert_eq!(s.active_blocks().0, 0);
    }

    #[test]
    fn host_shortcuts_are_forwarded() {
        let mut s = session();
        let key = InputEvent::Key {
            key: "s".to_string(),
            modifiers: Modifiers::CTRL,
        };
        assert_eq!(s.handle_event(&key), EventOutcome::Host(ShortcutAction::SaveLevel));
    }

    #[test]
    fn failed_open_keeps_level() {
        let mut s = session();
        s.new_level(3, 2).unwrap();
        assert!(s.open_level(b"{not json", "bad.json").is_err());
        assert_eq!(s.level().map(GridMap::width), Some(3));
        assert_eq!(s.level_name(), NEW_LEVEL_NAME);
    }
}
