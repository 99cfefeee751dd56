//! Chart Viewer Widget
//! Paints a radar chart with the egui painter and drives its growth animation
//! from the frame clock.

use crate::charts::{DrawCommand, Paint, Point, RadarChart, TextMeasurer, TextSize};
use crate::config::Color;
use egui::{
    pos2, Align2, Color32, ColorImage, FontId, Mesh, Pos2, Rect, RichText, Sense, Shape, Stroke,
    TextureHandle, TextureOptions, Vec2,
};
use std::time::Duration;

/// Smallest square the chart is given, even in a cramped panel.
const MIN_CHART_SIZE: f32 = 120.0;

/// Measures text with the fonts of the painter's context.
struct PainterMeasurer<'a>(&'a egui::Painter);

impl TextMeasurer for PainterMeasurer<'_> {
    fn measure(&self, text: &str, size: f32) -> TextSize {
        let galley =
            self.0
                .layout_no_wrap(text.to_owned(), FontId::proportional(size), Color32::PLACEHOLDER);
        let size = galley.size();
        TextSize {
            width: size.x,
            height: size.y,
        }
    }
}

fn color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Titled panel showing one radar chart.
pub struct ChartViewer {
    pub title: String,
    pub chart: RadarChart,
    /// Frame clock of the previous animated frame.
    last_time: Option<f64>,
    /// Uploaded badge texture with the bitmap generation it was made from.
    badge_texture: Option<(u64, TextureHandle)>,
}

impl ChartViewer {
    pub fn new(title: impl Into<String>, chart: RadarChart) -> Self {
        Self {
            title: title.into(),
            chart,
            last_time: None,
            badge_texture: None,
        }
    }

    /// Draw the title and the chart, filling the available space.
    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        ui.label(RichText::new(&self.title).size(14.0).strong());
        ui.add_space(5.0);

        self.tick(ui);

        let size = ui.available_size().max(Vec2::splat(MIN_CHART_SIZE));
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        self.chart.resize(rect.width() as u32, rect.height() as u32);

        let painter = ui.painter_at(rect);
        let commands = self.chart.render(&PainterMeasurer(&painter));
        self.sync_badge_texture(ui.ctx());
        for command in &commands {
            self.paint(&painter, rect.min, command);
        }
        response
    }

    /// Feed frame time into the animation and keep repainting while it runs.
    fn tick(&mut self, ui: &egui::Ui) {
        if !self.chart.is_animating() {
            self.last_time = None;
            return;
        }
        let now = ui.input(|i| i.time);
        let dt = self.last_time.map_or(0.0, |last| (now - last).max(0.0));
        self.last_time = Some(now);
        if self.chart.advance(Duration::from_secs_f64(dt)) {
            ui.ctx().request_repaint();
        }
    }

    fn sync_badge_texture(&mut self, ctx: &egui::Context) {
        let Some(bitmap) = self.chart.badge() else {
            self.badge_texture = None;
            return;
        };
        let generation = self.chart.badge_generation();
        if matches!(&self.badge_texture, Some((current, _)) if *current == generation) {
            return;
        }
        let (width, height) = bitmap.dimensions();
        let image = ColorImage::from_rgba_unmultiplied([width as usize, height as usize], bitmap.as_raw());
        let texture = ctx.load_texture("radarny-badge", image, TextureOptions::LINEAR);
        self.badge_texture = Some((generation, texture));
    }

    fn paint(&self, painter: &egui::Painter, origin: Pos2, command: &DrawCommand) {
        let at = |p: Point| pos2(origin.x + p.x, origin.y + p.y);
        match command {
            DrawCommand::Circle {
                center,
                radius,
                paint,
            } => {
                if paint.style.fills() {
                    painter.circle_filled(at(*center), *radius, color32(paint.color));
                }
                if paint.style.strokes() {
                    painter.circle_stroke(at(*center), *radius, stroke(paint));
                }
            }
            DrawCommand::Polygon {
                points,
                pivot,
                paint,
            } => {
                let points: Vec<Pos2> = points.iter().map(|&p| at(p)).collect();
                if paint.style.fills() {
                    painter.add(Shape::mesh(fan_mesh(at(*pivot), &points, color32(paint.color))));
                }
                if paint.style.strokes() {
                    painter.add(Shape::closed_line(points, stroke(paint)));
                }
            }
            DrawCommand::Line { from, to, paint } => {
                painter.line_segment([at(*from), at(*to)], stroke(paint));
            }
            DrawCommand::Text {
                text,
                origin: text_origin,
                size,
                color,
            } => {
                // Galley bottom approximates the baseline.
                painter.text(
                    at(*text_origin),
                    Align2::LEFT_BOTTOM,
                    text,
                    FontId::proportional(*size),
                    color32(*color),
                );
            }
            DrawCommand::Image { bounds } => {
                if let Some((_, texture)) = &self.badge_texture {
                    let rect = Rect::from_min_max(
                        at(Point::new(bounds.left, bounds.top)),
                        at(Point::new(bounds.right, bounds.bottom)),
                    );
                    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                    painter.image(texture.id(), rect, uv, Color32::WHITE);
                }
            }
        }
    }
}

fn stroke(paint: &Paint) -> Stroke {
    Stroke::new(paint.width, color32(paint.color))
}

/// Triangle fan around `pivot`. Exact for polygons whose vertices are all visible
/// from the pivot, which holds for radar polygons around the chart center.
fn fan_mesh(pivot: Pos2, points: &[Pos2], color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(pivot, color);
    for &p in points {
        mesh.colored_vertex(p, color);
    }
    let n = points.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::data::DataPoint;
    use image::RgbaImage;

    /// Run a single headless frame at frame clock `time`.
    fn run_frame(viewer: &mut ChartViewer, time: f64) -> egui::FullOutput {
        let mut raw = egui::RawInput::default();
        raw.screen_rect = Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0)));
        raw.time = Some(time);
        let ctx = egui::Context::default();
        ctx.run(raw, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                viewer.show(ui);
            });
        })
    }

    #[test]
    fn chart_is_sized_to_panel() {
        let mut viewer = ChartViewer::new("Default", RadarChart::default());
        run_frame(&mut viewer, 0.0);
        let (width, height) = viewer.chart.surface();
        assert!(width >= MIN_CHART_SIZE as u32 && height >= MIN_CHART_SIZE as u32);
        assert!(width <= 800 && height <= 600);
    }

    #[test]
    fn animation_follows_frame_clock() {
        let mut chart = RadarChart::new(ChartConfig {
            animation_duration_ms: 400,
            ..ChartConfig::default()
        });
        chart.build();
        let mut viewer = ChartViewer::new("Animated", chart);
        run_frame(&mut viewer, 10.0);
        assert!(viewer.chart.is_animating());
        assert_eq!(viewer.chart.progress(), 0.0);

        run_frame(&mut viewer, 10.2);
        assert!((viewer.chart.progress() - 0.5).abs() < 1e-3);

        run_frame(&mut viewer, 10.5);
        assert!(!viewer.chart.is_animating());
        assert_eq!(viewer.chart.progress(), 1.0);
    }

    #[test]
    fn idle_time_does_not_skip_animation() {
        let mut viewer = ChartViewer::new("Late start", RadarChart::default());
        run_frame(&mut viewer, 0.0);

        viewer.chart.config_mut().animation_duration_ms = 400;
        viewer
            .chart
            .set_data(vec![DataPoint::new("a", 1.0), DataPoint::new("b", 2.0), DataPoint::new("c", 3.0)]);
        assert!(viewer.chart.build());

        // First animated frame arrives long after the previous frame.
        run_frame(&mut viewer, 60.0);
        assert!(viewer.chart.is_animating());
        assert_eq!(viewer.chart.progress(), 0.0);
    }

    #[test]
    fn badge_texture_tracks_bitmap_generation() {
        let mut chart = RadarChart::default();
        chart.set_badge_bitmap(RgbaImage::new(4, 4));
        let mut viewer = ChartViewer::new("Badge", chart);
        run_frame(&mut viewer, 0.0);
        assert_eq!(viewer.badge_texture.as_ref().map(|(g, _)| *g), Some(1));

        viewer.chart.set_badge_bitmap(RgbaImage::new(8, 8));
        run_frame(&mut viewer, 0.1);
        assert_eq!(viewer.badge_texture.as_ref().map(|(g, _)| *g), Some(2));
    }

    #[test]
    fn fan_mesh_covers_every_edge() {
        let points = [pos2(0.0, -1.0), pos2(1.0, 0.5), pos2(-1.0, 0.5)];
        let mesh = fan_mesh(Pos2::ZERO, &points, Color32::RED);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 1]);
    }
}
