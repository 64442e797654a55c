pub mod catalog;
pub mod config;
pub mod emitter;
pub mod error;
pub mod lint;
pub mod model;
pub mod parser;
pub mod transform;

pub use catalog::{BlockCatalog, BlockMeta};
pub use config::EditorConfig;
pub use emitter::{emit_level, emit_level_pretty};
pub use error::LevelError;
pub use lint::{LintDiagnostic, LintLocation, LintSeverity, lint_level};
pub use model::*;
pub use parser::{parse_level, parse_level_bytes};
pub use transform::{CoordinateMapper, ViewTransform, snap_half};
