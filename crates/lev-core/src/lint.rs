//! Lint diagnostics for levels.
//!
//! Reports structural issues without modifying the level. `GridMap` accepts
//! any block index, so this is where indices the catalog cannot resolve are
//! caught before rendering.

use crate::catalog::BlockCatalog;
use crate::model::{EMPTY_BLOCK, GridMap};

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Should be fixed. The level will not render or play correctly.
    Warning,
    /// Informational.
    Info,
}

/// What a diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintLocation {
    Cell { x: u32, y: u32 },
    Elevator { index: usize, point: Option<usize> },
}

/// A single lint diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct LintDiagnostic {
    pub location: LintLocation,
    /// Human-readable message.
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "unknown-block").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over the level and return diagnostics.
#[must_use]
pub fn lint_level(map: &GridMap, catalog: &BlockCatalog) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_unknown_blocks(map, catalog, &mut diags);
    lint_stub_elevators(map, &mut diags);
    lint_duplicate_points(map, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

/// Warn on cells holding an index the catalog does not have.
fn lint_unknown_blocks(map: &GridMap, catalog: &BlockCatalog, diags: &mut Vec<LintDiagnostic>) {
    for (x, y, block) in map.iter_cells() {
        if block != EMPTY_BLOCK && !catalog.contains(block) {
            diags.push(LintDiagnostic {
                location: LintLocation::Cell { x, y },
                message: format!(
                    "Cell ({x}, {y}) uses block {block}, but the catalog has only {} entries.",
                    catalog.len()
                ),
                severity: LintSeverity::Warning,
                rule: "unknown-block",
            });
        }
    }
}

/// Info on elevators with a single control point: nothing to travel along.
fn lint_stub_elevators(map: &GridMap, diags: &mut Vec<LintDiagnostic>) {
    for (index, path) in map.elevators().iter().enumerate() {
        if path.len() == 1 {
            diags.push(LintDiagnostic {
                location: LintLocation::Elevator { index, point: None },
                message: format!("Elevator {index} has a single control point."),
                severity: LintSeverity::Info,
                rule: "stub-elevator",
            });
        }
    }
}

/// Info when two consecutive control points share a position.
fn lint_duplicate_points(map: &GridMap, diags: &mut Vec<LintDiagnostic>) {
    for (index, path) in map.elevators().iter().enumerate() {
        for (i, pair) in path.points().windows(2).enumerate() {
            if pair[0].same_position(&pair[1]) {
                diags.push(LintDiagnostic {
                    location: LintLocation::Elevator {
                        index,
                        point: Some(i + 1),
                    },
                    message: format!(
                        "Elevator {index} repeats point ({}, {}) at position {}.",
                        pair[1].x,
                        pair[1].y,
                        i + 1
                    ),
                    severity: LintSeverity::Info,
                    rule: "duplicate-point",
                });
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ControlPoint, ElevatorPath};

    fn catalog() -> BlockCatalog {
        BlockCatalog::from_json(r#"[{"animationFrames":["empty"]},{"animationFrames":["brick"]}]"#)
            .unwrap()
    }

    #[test]
    fn lint_unknown_block() {
        let mut map = GridMap::new(2, 2).unwrap();
        map.set_block(1, 1, 7).unwrap();
        let diags = lint_level(&map, &catalog());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, "unknown-block");
        assert_eq!(diags[0].location, LintLocation::Cell { x: 1, y: 1 });
        assert_eq!(diags[0].severity, LintSeverity::Warning);
    }

    #[test]
    fn lint_stub_and_duplicate() {
        let mut map = GridMap::new(2, 2).unwrap();
        map.elevators_mut()
            .push(ElevatorPath::starting_at(ControlPoint::new(0.0, 0.0)));
        let mut twice = ElevatorPath::starting_at(ControlPoint::new(1.0, 0.5));
        twice.push(ControlPoint::new(1.0, 0.5));
        map.elevators_mut().push(twice);

        let diags = lint_level(&map, &catalog());
        assert!(diags.iter().any(|d| d.rule == "stub-elevator"
            && d.location == LintLocation::Elevator { index: 0, point: None }));
        assert!(diags.iter().any(|d| d.rule == "duplicate-point"
            && d.location
                == LintLocation::Elevator {
                    index: 1,
                    point: Some(1)
                }));
    }

    #[test]
    fn lint_clean_level_no_diags() {
        let mut map = GridMap::new(2, 2).unwrap();
        map.set_block(0, 0, 1).unwrap();
        let mut path = ElevatorPath::starting_at(ControlPoint::new(0.0, 0.0));
        path.push(ControlPoint::new(1.0, 0.0));
        map.elevators_mut().push(path);
        assert!(
            lint_level(&map, &catalog()).is_empty(),
            "clean level should have no diagnostics"
        );
    }
}
