pub mod elevator;
pub mod input;
pub mod painter;
pub mod session;
pub mod shortcuts;
pub mod viewport;

pub use elevator::{ElevatorChange, ElevatorEditor};
pub use input::{BlockSlot, EditorMode, InputEvent, InputIntent, Modifiers, PointerButton};
pub use painter::BlockPainter;
pub use session::{EditorSession, EventOutcome, NEW_LEVEL_NAME};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use viewport::ViewportController;
