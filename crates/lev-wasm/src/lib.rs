//! WASM bridge for the level editor: exposes the Rust editor session to
//! JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host page owns the DOM
//! (control panel, file input, download link) and forwards pointer, wheel
//! and key events; this crate owns the level, the editing state, and the
//! three canvas layers.

mod assets;
mod console_log;
mod render2d;

use assets::{SpriteAtlas, load_sprite_atlas};
use lev_core::{BlockCatalog, EditorConfig, LintDiagnostic, LintLocation, LintSeverity, parse_level};
use lev_editor::{BlockSlot, EditorSession, EventOutcome, InputEvent, Modifiers, PointerButton};
use render2d::{CanvasLayers, CanvasTheme};
use serde_json::json;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// Load the block catalog and every sprite, then build an editor.
///
/// `config_json` may override any [`EditorConfig`] field. Rejects when the
/// catalog is malformed or a sprite fails to load.
#[wasm_bindgen]
pub async fn create_editor(
    catalog_json: String,
    sprite_base: String,
    config_json: Option<String>,
) -> Result<LevelEditor, JsValue> {
    console_error_panic_hook_setup();

    let config = match config_json.as_deref() {
        Some(text) => EditorConfig::from_json(text).map_err(|e| JsValue::from_str(&format!("bad config: {e}")))?,
        None => EditorConfig::default(),
    };
    let catalog = BlockCatalog::from_json(&catalog_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let atlas = load_sprite_atlas(&catalog, &sprite_base).await?;

    Ok(LevelEditor {
        session: EditorSession::new(config, catalog),
        atlas,
        layers: None,
        dark_mode: false,
    })
}

/// The main WASM-facing editor controller.
///
/// All interaction from the page goes through this struct. Event handlers
/// return a JSON outcome: `{"redraw":"none|cell|overlay|full","activeBlocks":bool,"action":"..."}`.
#[wasm_bindgen]
pub struct LevelEditor {
    session: EditorSession,
    atlas: SpriteAtlas,
    layers: Option<CanvasLayers>,
    dark_mode: bool,
}

#[wasm_bindgen]
impl LevelEditor {
    /// Attach the grid, block, and elevator canvases (bottom to top).
    pub fn attach_canvases(
        &mut self,
        grid: CanvasRenderingContext2d,
        blocks: CanvasRenderingContext2d,
        elevators: CanvasRenderingContext2d,
    ) {
        self.layers = Some(CanvasLayers {
            grid,
            blocks,
            elevators,
        });
        self.render();
    }

    /// Redraw every layer.
    pub fn render(&self) {
        self.redraw(EventOutcome::Full);
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
        self.render();
    }

    // ─── Level commands ──────────────────────────────────────────────────

    /// Start an empty level. Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn new_level(&mut self, width: u32, height: u32) -> String {
        let result = self.session.new_level(width, height);
        self.after_level_change(result)
    }

    /// Start an empty level of the configured default size.
    pub fn new_default_level(&mut self) -> String {
        let config = self.session.config();
        let (width, height) = (config.default_width, config.default_height);
        self.new_level(width, height)
    }

    /// Replace the level with the contents of a file. On error the current
    /// level is kept.
    pub fn open_level(&mut self, bytes: &[u8], name: &str) -> String {
        let result = self.session.open_level(bytes, name);
        self.after_level_change(result)
    }

    /// The level as JSON bytes, or `undefined` without a level.
    pub fn save_level(&self) -> Option<Vec<u8>> {
        match self.session.save_level() {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("save failed: {e}");
                None
            }
        }
    }

    /// File name to offer for download.
    pub fn level_name(&self) -> String {
        self.session.level_name().to_string()
    }

    /// `{"width":..,"height":..,"elevators":..,"name":".."}` or `null`.
    pub fn level_info(&self) -> String {
        match self.session.level() {
            Some(map) => json!({
                "width": map.width(),
                "height": map.height(),
                "elevators": map.elevators().len(),
                "name": self.session.level_name(),
            })
            .to_string(),
            None => "null".to_string(),
        }
    }

    /// Lint diagnostics for the current level as a JSON array.
    pub fn lint(&self) -> String {
        let diags: Vec<serde_json::Value> = self.session.lint().iter().map(diagnostic_json).collect();
        serde_json::Value::Array(diags).to_string()
    }

    // ─── View commands ───────────────────────────────────────────────────

    /// Zoom in one step. Returns the new zoom factor.
    pub fn zoom_in(&mut self) -> f64 {
        self.session.zoom_in();
        self.redraw(EventOutcome::Full);
        self.zoom()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.session.zoom_out();
        self.redraw(EventOutcome::Full);
        self.zoom()
    }

    pub fn zoom(&self) -> f64 {
        self.session.transform().zoom
    }

    // ─── Block selection ─────────────────────────────────────────────────

    /// Put a catalog block in a slot (`0` = primary/left, `1` = secondary/right).
    pub fn set_active_block(&mut self, index: u32, slot: u32) -> bool {
        self.session.set_active_block(index, BlockSlot::from_index(slot))
    }

    /// `{"primary":n,"secondary":n}`.
    pub fn active_blocks(&self) -> String {
        let (primary, secondary) = self.session.active_blocks();
        json!({ "primary": primary, "secondary": secondary }).to_string()
    }

    // ─── Elevator commands ───────────────────────────────────────────────

    pub fn remove_active_elevator(&mut self) -> bool {
        let changed = self.session.remove_active_elevator();
        if changed {
            self.redraw(EventOutcome::Overlay);
        }
        changed
    }

    pub fn remove_active_elevator_point(&mut self) -> bool {
        let changed = self.session.remove_active_elevator_point();
        if changed {
            self.redraw(EventOutcome::Overlay);
        }
        changed
    }

    // ─── Input events ────────────────────────────────────────────────────

    /// `button` is `MouseEvent.button`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: i16,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let Some(button) = PointerButton::from_dom(button) else {
            return outcome_json(EventOutcome::Nothing);
        };
        self.dispatch(InputEvent::PointerDown {
            x,
            y,
            button,
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        })
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64, shift: bool, ctrl: bool, alt: bool, meta: bool) -> String {
        self.dispatch(InputEvent::PointerMove {
            x,
            y,
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        })
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64, button: i16) -> String {
        let Some(button) = PointerButton::from_dom(button) else {
            return outcome_json(EventOutcome::Nothing);
        };
        self.dispatch(InputEvent::PointerUp { x, y, button })
    }

    pub fn handle_pointer_leave(&mut self) -> String {
        self.dispatch(InputEvent::PointerLeave)
    }

    /// `delta_y` is `WheelEvent.deltaY`; only its sign matters.
    pub fn handle_wheel(&mut self, x: f64, y: f64, delta_y: f64) -> String {
        self.dispatch(InputEvent::Wheel { x, y, delta_y })
    }

    /// Handle a keyboard event. File actions come back as
    /// `"action":"newLevel|openLevel|saveLevel"` for the page to carry out.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        self.dispatch(InputEvent::Key {
            key: key.to_string(),
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        })
    }

    // ─── Animation ───────────────────────────────────────────────────────

    /// Advance sprite animation and redraw animated cells.
    /// Call every [`Self::animation_interval_ms`] milliseconds.
    pub fn tick(&mut self) -> bool {
        if !self.session.tick() {
            return false;
        }
        if let (Some(layers), Some(plan)) = (&self.layers, self.session.plan_refresh()) {
            layers.render_blocks(&plan, &self.atlas);
        }
        true
    }

    pub fn animation_interval_ms(&self) -> u32 {
        self.session.config().animation_interval_ms
    }
}

impl LevelEditor {
    fn dispatch(&mut self, event: InputEvent) -> String {
        let outcome = self.session.handle_event(&event);
        self.redraw(outcome);
        outcome_json(outcome)
    }

    fn after_level_change(&mut self, result: lev_core::error::Result<()>) -> String {
        match result {
            Ok(()) => {
                self.redraw(EventOutcome::Full);
                json!({ "ok": true }).to_string()
            }
            Err(e) => {
                log::warn!("level change rejected: {e}");
                error_json(&e.to_string())
            }
        }
    }

    fn theme(&self) -> CanvasTheme {
        if self.dark_mode {
            CanvasTheme::dark()
        } else {
            CanvasTheme::light()
        }
    }

    fn redraw(&self, outcome: EventOutcome) {
        let Some(layers) = &self.layers else {
            return;
        };
        match outcome {
            EventOutcome::Cell { x, y } => {
                if let Some(plan) = self.session.plan_cell(x, y) {
                    layers.render_blocks(&plan, &self.atlas);
                }
            }
            EventOutcome::Overlay => {
                if let Some(plan) = self.session.plan_overlay() {
                    layers.render_elevators(&plan, &self.theme());
                }
            }
            EventOutcome::Full => {
                if let Some(plan) = self.session.plan() {
                    layers.render_full(&plan, &self.atlas, &self.theme());
                }
            }
            EventOutcome::Nothing | EventOutcome::ActiveBlocks | EventOutcome::Host(_) => {}
        }
    }
}

// ─── JSON helpers ────────────────────────────────────────────────────────

fn outcome_json(outcome: EventOutcome) -> String {
    let redraw = match outcome {
        EventOutcome::Cell { .. } => "cell",
        EventOutcome::Overlay => "overlay",
        EventOutcome::Full => "full",
        EventOutcome::Nothing | EventOutcome::ActiveBlocks | EventOutcome::Host(_) => "none",
    };
    let action = match outcome {
        EventOutcome::Host(action) => action.name(),
        _ => "none",
    };
    json!({
        "redraw": redraw,
        "activeBlocks": outcome == EventOutcome::ActiveBlocks,
        "action": action,
    })
    .to_string()
}

fn error_json(message: &str) -> String {
    json!({ "ok": false, "error": message }).to_string()
}

fn diagnostic_json(diag: &LintDiagnostic) -> serde_json::Value {
    let location = match diag.location {
        LintLocation::Cell { x, y } => json!({ "cell": [x, y] }),
        LintLocation::Elevator { index, point } => json!({ "elevator": index, "point": point }),
    };
    let severity = match diag.severity {
        LintSeverity::Warning => "warning",
        LintSeverity::Info => "info",
    };
    json!({
        "rule": diag.rule,
        "severity": severity,
        "message": diag.message,
        "location": location,
    })
}

// ─── Panic hook and logging ──────────────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("level editor WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

/// Route `log` output to the browser console at the given level
/// (`"error"` … `"trace"`, default `"info"`).
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    console_log::init(console_log::parse_level_filter(level));
}

// ─── Standalone validation (no editor needed) ────────────────────────────

/// Validate level JSON. Returns `{"ok":true,"width":..,"height":..}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_level(source: &str) -> String {
    match parse_level(source) {
        Ok(map) => json!({ "ok": true, "width": map.width(), "height": map.height() }).to_string(),
        Err(e) => error_json(&e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lev_editor::ShortcutAction;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> serde_json::Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn outcome_json_shapes() {
        assert_eq!(
            parse(&outcome_json(EventOutcome::Cell { x: 1, y: 2 })),
            json!({ "redraw": "cell", "activeBlocks": false, "action": "none" })
        );
        assert_eq!(
            parse(&outcome_json(EventOutcome::ActiveBlocks)),
            json!({ "redraw": "none", "activeBlocks": true, "action": "none" })
        );
        assert_eq!(
            parse(&outcome_json(EventOutcome::Host(ShortcutAction::SaveLevel))),
            json!({ "redraw": "none", "activeBlocks": false, "action": "saveLevel" })
        );
    }

    #[test]
    fn validate_reports_errors_as_json() {
        let ok = parse(&validate_level(r#"{"width":2,"height":1,"blocks":[0,1],"elevators":[]}"#));
        assert_eq!(ok, json!({ "ok": true, "width": 2, "height": 1 }));

        let err = parse(&validate_level(r#"{"width":2,"height":1,"blocks":[0],"elevators":[]}"#));
        assert_eq!(err["ok"], json!(false));
        assert!(err["error"].as_str().unwrap().contains("malformed level"));
    }

    #[test]
    fn error_json_escapes_quotes() {
        let text = error_json(r#"bad "name""#);
        assert_eq!(parse(&text)["error"], json!(r#"bad "name""#));
    }

    #[test]
    fn diagnostics_serialize_locations() {
        let diag = LintDiagnostic {
            location: LintLocation::Elevator {
                index: 2,
                point: Some(1),
            },
            message: "dup".to_string(),
            severity: LintSeverity::Info,
            rule: "duplicate-point",
        };
        assert_eq!(
            diagnostic_json(&diag),
            json!({
                "rule": "duplicate-point",
                "severity": "info",
                "message": "dup",
                "location": { "elevator": 2, "point": 1 },
            })
        );
    }
}
