//! Charts module - Radar chart geometry, animation and rendering

pub mod animation;
pub mod geometry;
mod radar;
mod renderer;
pub mod scene;

pub use animation::{accelerate_decelerate, animate, Animation};
pub use geometry::{resolve_layout, value_radius, Bounds, LayoutState, Point};
pub use radar::{load_badge, BadgeError, RadarChart};
pub use renderer::{RenderError, StaticChartRenderer};
pub use scene::{DrawCommand, Paint, PointSet, TextMeasurer, TextSize};
