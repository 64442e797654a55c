//! Input abstraction layer.
//!
//! Normalizes mouse and wheel events into a unified [`InputEvent`], and
//! derives the [`InputIntent`] a pointer press stands for from its button
//! and modifier keys. The intent is computed once per event so the session
//! dispatches in exactly one place.
//!
//! | Modifier / button | Intent |
//! |-------------------|--------|
//! | middle button     | `Pan` |
//! | **Shift**         | `ElevatorEdit` |
//! | **Ctrl**          | `Erase` |
//! | **Alt**           | `Pick(slot)` |
//! | none              | `Paint(slot)` |

/// Keyboard modifiers held during an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };
}

/// Mouse button, numbered like `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value. Back/forward buttons are ignored.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }

    /// Block slot bound to this button, if any.
    pub fn slot(self) -> Option<BlockSlot> {
        match self {
            Self::Primary => Some(BlockSlot::Primary),
            Self::Secondary => Some(BlockSlot::Secondary),
            Self::Middle => None,
        }
    }
}

/// The two active-block slots, bound to the left and right buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSlot {
    Primary,
    Secondary,
}

impl BlockSlot {
    /// `0` → primary, anything else → secondary.
    pub fn from_index(index: u32) -> Self {
        if index == 0 {
            Self::Primary
        } else {
            Self::Secondary
        }
    }
}

/// Which editor the current event belongs to. Derived from shift per event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    Block,
    Elevator,
}

impl EditorMode {
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.shift {
            Self::Elevator
        } else {
            Self::Block
        }
    }
}

/// What a pointer press means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    Paint(BlockSlot),
    Erase,
    Pick(BlockSlot),
    ElevatorEdit,
    Pan,
}

impl InputIntent {
    pub fn resolve(button: PointerButton, modifiers: Modifiers) -> Self {
        let Some(slot) = button.slot() else {
            return Self::Pan;
        };
        if modifiers.shift {
            Self::ElevatorEdit
        } else if modifiers.ctrl {
            Self::Erase
        } else if modifiers.alt {
            Self::Pick(slot)
        } else {
            Self::Paint(slot)
        }
    }

    /// Whether holding the button and moving keeps applying the intent.
    pub fn drags(self) -> bool {
        matches!(self, Self::Paint(_) | Self::Erase | Self::Pan)
    }
}

/// A normalized input event. Positions are viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        button: PointerButton,
        modifiers: Modifiers,
    },

    PointerMove {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    PointerUp {
        x: f64,
        y: f64,
        button: PointerButton,
    },

    /// Pointer left the canvas.
    PointerLeave,

    /// Wheel over the canvas. Negative `delta_y` scrolls up (zoom in).
    Wheel { x: f64, y: f64, delta_y: f64 },

    /// Keyboard shortcut.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::Wheel { x, y, .. } => Some((*x, *y)),
            Self::PointerLeave | Self::Key { .. } => None,
        }
    }
}
