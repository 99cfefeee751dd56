//! Radarny - Radar Chart Demo
//!
//! Shows a default and a styled radar chart filled with random data.
//! An optional first argument names a JSON style file for the styled chart.

use eframe::egui;
use radarny::config::ChartConfig;
use radarny::gui::RadarnyApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let styled = match std::env::args_os().nth(1) {
        Some(path) => ChartConfig::load_or_default(std::path::Path::new(&path)),
        None => RadarnyApp::styled_config(),
    };

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 620.0])
            .with_min_inner_size([700.0, 420.0])
            .with_title("Radarny"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Radarny",
        options,
        Box::new(move |cc| Ok(Box::new(RadarnyApp::new(cc, styled)))),
    )
}
