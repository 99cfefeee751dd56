//! GUI module - egui rendering backend and demo host

mod app;
mod chart_viewer;
mod control_panel;

pub use app::{random_points, RadarnyApp};
pub use chart_viewer::ChartViewer;
pub use control_panel::{parse_count, ControlPanel, ControlPanelAction, CountInput};
