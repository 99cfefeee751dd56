//! Radarny Main Application
//! Control panel on the left, a default and a styled radar chart side by side.

use crate::charts::{RadarChart, StaticChartRenderer};
use crate::config::{ChartConfig, Color, FrameShape, PaintStyle};
use crate::data::DataPoint;
use crate::gui::control_panel::{MAX_COUNT, MIN_COUNT};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use anyhow::Context as _;
use egui::SidePanel;
use rand::Rng;
use std::path::Path;

/// Size of exported PNG images.
const EXPORT_SIZE: u32 = 800;

/// Highest random demo value.
const MAX_DEMO_VALUE: u32 = 100;

/// `count` points labelled `label0..` with random values in `0..=100`.
pub fn random_points(count: usize) -> Vec<DataPoint> {
    let mut rng = rand::rng();
    (0..count)
        .map(|i| {
            let value = rng.random_range(0..=MAX_DEMO_VALUE);
            DataPoint::new(format!("label{i}"), value as f32)
        })
        .collect()
}

/// Main application window.
pub struct RadarnyApp {
    control_panel: ControlPanel,
    default_viewer: ChartViewer,
    styled_viewer: ChartViewer,
}

impl RadarnyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, styled: ChartConfig) -> Self {
        Self::with_config(styled)
    }

    /// Build the app without a window, using `styled` for the right-hand chart.
    pub fn with_config(styled: ChartConfig) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(),
            default_viewer: ChartViewer::new("Default style", RadarChart::default()),
            styled_viewer: ChartViewer::new("Custom style", RadarChart::new(styled)),
        };
        let count = app.control_panel.count;
        app.update_charts(count, false);
        app
    }

    /// Demo style: red polygon frame, fixed 0-100 scale, 400 ms growth.
    pub fn styled_config() -> ChartConfig {
        let red = Color::rgb(0xd0, 0x47, 0x41);
        let light = Color::rgb(0xf0, 0xf0, 0xf0);
        ChartConfig {
            max_value: 100.0,
            animation_duration_ms: 400,
            frame_color: red,
            frame_shape: FrameShape::Polygon,
            frame_width: 5.0,
            inner_frame_color: light,
            inner_frame_width: 3.0,
            inner_frame_percentage: 0.3,
            spoke_color: light,
            spoke_width: 3.0,
            show_spokes: true,
            label_color: red,
            label_percentage: 1.2,
            label_size: 14.0,
            polygon_color: Color::argb(0x7f, 0xd0, 0x47, 0x41),
            polygon_width: 5.0,
            polygon_style: PaintStyle::Fill,
            show_badge: true,
            badge_width: 25,
            badge_height: 25,
            badge_background: Color::WHITE,
            badge_percentage: 0.7,
            ..ChartConfig::default()
        }
    }

    pub fn default_chart(&self) -> &RadarChart {
        &self.default_viewer.chart
    }

    pub fn styled_chart(&self) -> &RadarChart {
        &self.styled_viewer.chart
    }

    /// Give both charts fresh random data and rebuild them.
    fn update_charts(&mut self, count: usize, corrected: bool) {
        let mut rejected = 0;
        for viewer in [&mut self.default_viewer, &mut self.styled_viewer] {
            if !(viewer.chart.set_data(random_points(count)) && viewer.chart.build()) {
                rejected += 1;
            }
        }
        let status = if rejected > 0 {
            "Animation still running, update ignored".to_string()
        } else if corrected {
            format!("Count must be between {MIN_COUNT} and {MAX_COUNT}, showing {count} points")
        } else {
            format!("Showing {count} points")
        };
        self.control_panel.set_status(status);
    }

    fn handle_load_config(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Chart style", &["json"])
            .pick_file()
        else {
            return;
        };
        match Self::apply_config_file(&mut self.styled_viewer.chart, &path) {
            Ok(()) => self
                .control_panel
                .set_status(format!("Loaded style {}", path.display())),
            Err(e) => self.control_panel.set_status(format!("Error: {e:#}")),
        }
    }

    /// Replace the chart style from a JSON file and rebuild. Refused while the
    /// chart is animating so a running animation never mixes two styles.
    fn apply_config_file(chart: &mut RadarChart, path: &Path) -> anyhow::Result<()> {
        if chart.is_animating() {
            anyhow::bail!("animation still running, load the style again once it finishes");
        }
        let config = ChartConfig::load(path)?;
        chart.set_config(config);
        chart.build();
        Ok(())
    }

    fn handle_export_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("radarny.png")
            .save_file()
        else {
            return;
        };
        match Self::export_png(&self.styled_viewer.chart, &path) {
            Ok(()) => self
                .control_panel
                .set_status(format!("Exported {}", path.display())),
            Err(e) => self.control_panel.set_status(format!("Error: {e:#}")),
        }
    }

    /// Render a copy of `chart` so the on-screen layout cache is left alone.
    fn export_png(chart: &RadarChart, path: &Path) -> anyhow::Result<()> {
        let mut chart = chart.clone();
        StaticChartRenderer::new()
            .with_system_font()
            .save_png(&mut chart, path, EXPORT_SIZE, EXPORT_SIZE)
            .with_context(|| format!("exporting {}", path.display()))
    }
}

impl eframe::App for RadarnyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("control_panel")
            .min_width(220.0)
            .max_width(280.0)
            .show(ctx, |ui| {
                let action = self.control_panel.show(ui);
                match action {
                    ControlPanelAction::Update { count, corrected } => {
                        self.update_charts(count, corrected)
                    }
                    ControlPanelAction::LoadConfig => self.handle_load_config(),
                    ControlPanelAction::ExportPng => self.handle_export_png(),
                    ControlPanelAction::None => {}
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.default_viewer.show(&mut columns[0]);
                self.styled_viewer.show(&mut columns[1]);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn random_points_are_in_range() {
        let points = random_points(50);
        assert_eq!(points.len(), 50);
        assert_eq!(points[7].label, "label7");
        assert!(points.iter().all(|p| (0.0..=100.0).contains(&p.value)));
    }

    #[test]
    fn app_starts_with_requested_count() {
        let app = RadarnyApp::with_config(RadarnyApp::styled_config());
        assert_eq!(app.default_chart().dataset().len(), 6);
        assert_eq!(app.styled_chart().dataset().len(), 6);
        assert!(app.styled_chart().is_animating());
        assert!(!app.default_chart().is_animating());
    }

    #[test]
    fn update_during_animation_is_reported() {
        let mut app = RadarnyApp::with_config(RadarnyApp::styled_config());
        app.update_charts(8, false);
        assert_eq!(app.default_chart().dataset().len(), 8);
        assert_eq!(app.styled_chart().dataset().len(), 6);
        assert!(app.control_panel.status.contains("ignored"));
    }

    #[test]
    fn corrected_count_is_reported() {
        let mut app = RadarnyApp::with_config(ChartConfig::default());
        app.update_charts(3, true);
        assert_eq!(app.styled_chart().dataset().len(), 3);
        assert!(app.control_panel.status.contains("between 3 and 100"));
    }

    #[test]
    fn export_writes_png() {
        let path = std::env::temp_dir().join(format!("radarny-export-{}.png", std::process::id()));
        let chart = RadarChart::new(RadarnyApp::styled_config());
        RadarnyApp::export_png(&chart, &path).unwrap();
        let img = image::open(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!((img.width(), img.height()), (EXPORT_SIZE, EXPORT_SIZE));
    }

    #[test]
    fn style_load_waits_for_animation() {
        let path = std::env::temp_dir().join(format!("radarny-style-{}.json", std::process::id()));
        let wide_inner = ChartConfig {
            inner_frame_percentage: 0.8,
            ..ChartConfig::default()
        };
        wide_inner.save(&path).unwrap();

        let mut chart = RadarChart::new(RadarnyApp::styled_config());
        assert!(chart.build());
        let err = RadarnyApp::apply_config_file(&mut chart, &path).unwrap_err();
        assert!(format!("{err}").contains("animation still running"));
        assert_eq!(chart.config(), &RadarnyApp::styled_config());

        chart.advance(Duration::from_millis(400));
        RadarnyApp::apply_config_file(&mut chart, &path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(chart.config().inner_frame_percentage, 0.8);
    }

    #[test]
    fn bad_config_file_reports_error() {
        let mut chart = RadarChart::default();
        let err = RadarnyApp::apply_config_file(&mut chart, Path::new("/nonexistent/style.json"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("style.json"));
    }
}
