pub mod hit;
pub mod paint;
pub mod plan;

pub use hit::{PointHit, hit_control_point, hit_elevator};
pub use kurbo::Point;
pub use paint::{PaintTheme, SpriteSource, paint_plan};
pub use plan::{
    DrawOp, Emphasis, FINISH_CIRCULAR_LABEL, FINISH_LABEL, OverlayState, RenderPlan, RenderPlanner,
};
