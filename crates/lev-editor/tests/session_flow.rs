//! Integration tests: block painting, viewport, file commands, animation.

use lev_core::{BlockCatalog, EditorConfig, GridMap, parse_level};
use lev_editor::{
    BlockSlot, EditorSession, EventOutcome, InputEvent, Modifiers, NEW_LEVEL_NAME, PointerButton,
    ViewportController,
};
use lev_render::DrawOp;
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn session() -> EditorSession {
    init_logging();
    let catalog = BlockCatalog::from_json(include_str!("fixtures/catalog.json")).unwrap();
    EditorSession::new(EditorConfig::default(), catalog)
}

fn press(s: &mut EditorSession, x: f64, y: f64, button: PointerButton, modifiers: Modifiers) -> EventOutcome {
    s.handle_event(&InputEvent::PointerDown {
        x,
        y,
        button,
        modifiers,
    })
}

fn release(s: &mut EditorSession, button: PointerButton) {
    s.handle_event(&InputEvent::PointerUp { x: 0.0, y: 0.0, button });
}

// ─── Level lifecycle ─────────────────────────────────────────────────────

#[test]
fn new_level_is_empty_and_named() {
    let mut s = session();
    s.new_level(3, 2).unwrap();
    let map = s.level().unwrap();
    assert_eq!(map.cells(), &[0, 0, 0, 0, 0, 0]);
    assert_eq!(s.level_name(), NEW_LEVEL_NAME);
    assert!(s.new_level(0, 2).is_err());
    assert_eq!(s.level().map(GridMap::width), Some(3));
}

#[test]
fn open_then_save_roundtrips() {
    let mut s = session();
    let input = include_str!("fixtures/tower.json");
    s.open_level(input.as_bytes(), "tower.json").unwrap();
    assert_eq!(s.level_name(), "tower.json");

    let saved = s.save_level().unwrap();
    let reparsed = parse_level(std::str::from_utf8(&saved).unwrap()).unwrap();
    assert_eq!(Some(&reparsed), s.level());
}

#[test]
fn open_resets_view_and_editing() {
    let mut s = session();
    s.new_level(10, 10).unwrap();
    s.handle_event(&InputEvent::Wheel {
        x: 50.0,
        y: 50.0,
        delta_y: -1.0,
    });
    press(&mut s, 16.0, 16.0, PointerButton::Primary, Modifiers::SHIFT);
    assert!(s.active_elevator().is_some());

    s.open_level(include_bytes!("fixtures/tower.json"), "tower.json")
        .unwrap();
    assert_eq!(s.active_elevator(), None);
    assert_eq!(s.transform().zoom, 1.0);
}

// ─── Painting ────────────────────────────────────────────────────────────

#[test]
fn left_and_right_buttons_paint_their_slots() {
    let mut s = session();
    s.new_level(4, 4).unwrap();
    s.set_active_block(2, BlockSlot::Secondary);

    assert_eq!(
        press(&mut s, 40.0, 8.0, PointerButton::Primary, Modifiers::NONE),
        EventOutcome::Cell { x: 1, y: 0 }
    );
    release(&mut s, PointerButton::Primary);
    assert_eq!(
        press(&mut s, 8.0, 40.0, PointerButton::Secondary, Modifiers::NONE),
        EventOutcome::Cell { x: 0, y: 1 }
    );
    release(&mut s, PointerButton::Secondary);

    let map = s.level().unwrap();
    assert_eq!(map.get_block(1, 0), Some(1));
    assert_eq!(map.get_block(0, 1), Some(2));
    assert_eq!(map.get_block(0, 0), Some(0));
}

#[test]
fn repainting_same_block_reports_nothing() {
    let mut s = session();
    s.new_level(4, 4).unwrap();
    press(&mut s, 8.0, 8.0, PointerButton::Primary, Modifiers::NONE);
    release(&mut s, PointerButton::Primary);
    assert_eq!(
        press(&mut s, 9.0, 9.0, PointerButton::Primary, Modifiers::NONE),
        EventOutcome::Nothing
    );
}

#[test]
fn ctrl_erases_and_alt_picks() {
    let mut s = session();
    s.open_level(include_bytes!("fixtures/tower.json"), "tower.json")
        .unwrap();

    // Cell (2, 2) holds block 3.
    assert_eq!(
        press(&mut s, 80.0, 80.0, PointerButton::Secondary, Modifiers::ALT),
        EventOutcome::ActiveBlocks
    );
    assert_eq!(s.active_blocks(), (1, 3));
    release(&mut s, PointerButton::Secondary);

    assert_eq!(
        press(&mut s, 80.0, 80.0, PointerButton::Primary, Modifiers::CTRL),
        EventOutcome::Cell { x: 2, y: 2 }
    );
    assert_eq!(s.level().unwrap().get_block(2, 2), Some(0));
}

#[test]
fn drag_paints_until_release() {
    let mut s = session();
    s.new_level(5, 1).unwrap();
    press(&mut s, 8.0, 8.0, PointerButton::Primary, Modifiers::NONE);
    for x in [40.0, 72.0, 104.0] {
        s.handle_event(&InputEvent::PointerMove {
            x,
            y: 8.0,
            modifiers: Modifiers::NONE,
        });
    }
    release(&mut s, PointerButton::Primary);
    s.handle_event(&InputEvent::PointerMove {
        x: 136.0,
        y: 8.0,
        modifiers: Modifiers::NONE,
    });
    assert_eq!(s.level().unwrap().cells(), &[1, 1, 1, 1, 0]);
}

#[test]
fn painting_outside_grid_is_ignored() {
    let mut s = session();
    s.new_level(2, 2).unwrap();
    assert_eq!(
        press(&mut s, 200.0, 8.0, PointerButton::Primary, Modifiers::NONE),
        EventOutcome::Nothing
    );
    assert_eq!(
        press(&mut s, -4.0, 8.0, PointerButton::Primary, Modifiers::NONE),
        EventOutcome::Nothing
    );
    assert!(s.level().unwrap().cells().iter().all(|&b| b == 0));
}

#[test]
fn painted_cell_plan_draws_sprite() {
    let mut s = session();
    s.new_level(2, 2).unwrap();
    s.set_active_block(3, BlockSlot::Primary);
    let EventOutcome::Cell { x, y } = press(&mut s, 40.0, 40.0, PointerButton::Primary, Modifiers::NONE)
    else {
        panic!("expected a cell change");
    };
    let plan = s.plan_cell(x, y).unwrap();
    assert_eq!(
        plan.blocks,
        vec![
            DrawOp::ClearCell { x: 1, y: 1 },
            DrawOp::Sprite {
                x: 1,
                y: 1,
                block: 3,
                frame: 0
            },
        ]
    );
}

// ─── Viewport ────────────────────────────────────────────────────────────

#[test]
fn zoom_in_then_out_restores_view() {
    let mut vp = ViewportController::new(32.0, 1.2);
    vp.pan(-35.0, 12.5);
    let before = vp.transform();
    vp.zoom_at(1.2, 321.0, 77.0);
    vp.zoom_at(1.0 / 1.2, 321.0, 77.0);
    let after = vp.transform();
    assert!((after.zoom - before.zoom).abs() < 1e-12);
    assert!((after.origin_x - before.origin_x).abs() < 1e-9);
    assert!((after.origin_y - before.origin_y).abs() < 1e-9);
}

#[test]
fn zoomed_view_maps_clicks_to_right_cell() {
    let mut s = session();
    s.new_level(10, 10).unwrap();
    s.handle_event(&InputEvent::Wheel {
        x: 0.0,
        y: 0.0,
        delta_y: -120.0,
    });
    assert!((s.transform().zoom - 1.2).abs() < 1e-12);

    // At zoom 1.2 a cell is 38.4 px wide.
    assert_eq!(
        press(&mut s, 40.0, 1.0, PointerButton::Primary, Modifiers::NONE),
        EventOutcome::Cell { x: 1, y: 0 }
    );
}

#[test]
fn alt_pick_ignores_unknown_block() {
    let mut s = session();
    let level = br#"{"width":2,"height":1,"blocks":[42,2],"elevators":[]}"#;
    s.open_level(level, "unknown.json").unwrap();

    assert_eq!(
        press(&mut s, 10.0, 10.0, PointerButton::Primary, Modifiers::ALT),
        EventOutcome::Nothing
    );
    assert_eq!(s.active_blocks(), (1, 0));
    release(&mut s, PointerButton::Primary);

    assert_eq!(
        press(&mut s, 40.0, 10.0, PointerButton::Primary, Modifiers::ALT),
        EventOutcome::ActiveBlocks
    );
    assert_eq!(s.active_blocks(), (2, 0));
}

#[test]
fn plus_key_zooms_about_last_pointer() {
    let mut s = session();
    s.new_level(10, 10).unwrap();
    s.handle_event(&InputEvent::PointerMove {
        x: 100.0,
        y: 50.0,
        modifiers: Modifiers::NONE,
    });
    s.handle_event(&InputEvent::Key {
        key: "+".to_string(),
        modifiers: Modifiers::NONE,
    });
    let t = s.transform();
    assert!((t.zoom - 1.2).abs() < 1e-12);
    // The grid point under the pointer stays put.
    assert!((t.origin_x + 20.0).abs() < 1e-9);
    assert!((t.origin_y + 10.0).abs() < 1e-9);
}

#[test]
fn middle_drag_pans() {
    let mut s = session();
    s.new_level(4, 4).unwrap();
    press(&mut s, 10.0, 10.0, PointerButton::Middle, Modifiers::NONE);
    let outcome = s.handle_event(&InputEvent::PointerMove {
        x: 30.0,
        y: 5.0,
        modifiers: Modifiers::NONE,
    });
    assert_eq!(outcome, EventOutcome::Full);
    assert_eq!((s.transform().origin_x, s.transform().origin_y), (20.0, -5.0));
    assert!(s.level().unwrap().cells().iter().all(|&b| b == 0));
}

// ─── Animation ───────────────────────────────────────────────────────────

#[test]
fn tick_refreshes_only_animated_cells() {
    let mut s = session();
    s.open_level(include_bytes!("fixtures/tower.json"), "tower.json")
        .unwrap();
    assert!(s.tick());
    let plan = s.plan_refresh().unwrap();
    assert_eq!(
        plan.blocks,
        vec![
            DrawOp::ClearCell { x: 2, y: 2 },
            DrawOp::Sprite {
                x: 2,
                y: 2,
                block: 3,
                frame: 1
            },
        ]
    );
}

#[test]
fn lint_reports_nothing_for_clean_level() {
    let mut s = session();
    s.open_level(include_bytes!("fixtures/tower.json"), "tower.json")
        .unwrap();
    assert!(s.lint().is_empty(), "{:?}", s.lint());
}
