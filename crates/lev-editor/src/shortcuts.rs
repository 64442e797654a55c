//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.
//! The shortcut map lives in Rust so it's shared across WASM and native.
//!
//! - `+` / `=` zoom in, `-` zoom out (about the last pointer position)
//! - `[` / `]` step the primary block through the catalog
//! - Delete removes the active elevator, Backspace its last point
//! - Escape leaves elevator editing without closing the path
//! - ⌘N / ⌘O / ⌘S are file actions the host carries out

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── File (forwarded to the host) ──
    NewLevel,
    OpenLevel,
    SaveLevel,

    // ── View ──
    ZoomIn,
    ZoomOut,

    // ── Blocks ──
    PreviousBlock,
    NextBlock,

    // ── Elevators ──
    RemoveElevator,
    RemoveElevatorPoint,
    FinishElevator,
}

impl ShortcutAction {
    /// Whether the session cannot handle this itself (it needs file access).
    pub fn is_host_action(self) -> bool {
        matches!(self, Self::NewLevel | Self::OpenLevel | Self::SaveLevel)
    }

    /// Stable name used by the WASM bridge.
    pub fn name(self) -> &'static str {
        match self {
            Self::NewLevel => "newLevel",
            Self::OpenLevel => "openLevel",
            Self::SaveLevel => "saveLevel",
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
            Self::PreviousBlock => "previousBlock",
            Self::NextBlock => "nextBlock",
            Self::RemoveElevator => "removeElevator",
            Self::RemoveElevatorPoint => "removeElevatorPoint",
            Self::FinishElevator => "finishElevator",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"s"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd {
            if shift || alt {
                return None;
            }
            return match key {
                "n" | "N" => Some(ShortcutAction::NewLevel),
                "o" | "O" => Some(ShortcutAction::OpenLevel),
                "s" | "S" => Some(ShortcutAction::SaveLevel),
                _ => None,
            };
        }

        // `+` needs shift on most layouts, so shift is not checked here.
        match key {
            "+" | "=" => Some(ShortcutAction::ZoomIn),
            "-" => Some(ShortcutAction::ZoomOut),
            "[" => Some(ShortcutAction::PreviousBlock),
            "]" => Some(ShortcutAction::NextBlock),
            "Delete" => Some(ShortcutAction::RemoveElevator),
            "Backspace" => Some(ShortcutAction::RemoveElevatorPoint),
            "Escape" => Some(ShortcutAction::FinishElevator),
            _ => None,
        }
    }
}
