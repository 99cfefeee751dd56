//! Static Chart Renderer
//! Paints radar chart draw commands into an RGBA image for PNG export.
//!
//! Shapes go through imageproc onto a blending canvas so translucent polygon
//! fills composite over the frame; text is rasterized with rusttype.

use super::geometry::{Bounds, Point};
use super::radar::RadarChart;
use super::scene::{DrawCommand, Paint, TextMeasurer, TextSize};
use crate::config::Color;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut, Blend, Canvas,
};
use imageproc::point::Point as PixelPoint;
use rusttype::{Font, Scale};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Segments used to approximate a circle outline.
const CIRCLE_SEGMENTS: usize = 128;

/// Font files tried by [`StaticChartRenderer::with_system_font`], in order.
const SYSTEM_FONTS: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

type BlendCanvas = Blend<RgbaImage>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot render onto a {0}x{1} surface")]
    EmptySurface(u32, u32),
    #[error("Not a usable TrueType font")]
    FontParse,
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Renders a [`RadarChart`] into an in-memory image.
pub struct StaticChartRenderer {
    font: Option<Font<'static>>,
    background: Color,
}

impl Default for StaticChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba(color.to_array())
}

impl StaticChartRenderer {
    /// Renderer without a font; labels are skipped.
    pub fn new() -> Self {
        Self {
            font: None,
            background: Color::WHITE,
        }
    }

    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> Result<Self, RenderError> {
        self.font = Some(Font::try_from_vec(bytes).ok_or(RenderError::FontParse)?);
        Ok(self)
    }

    /// Use the first common system font that loads; labels are skipped if none does.
    pub fn with_system_font(self) -> Self {
        let mut renderer = self;
        for path in SYSTEM_FONTS {
            let path = Path::new(path);
            if !path.exists() {
                continue;
            }
            match std::fs::read(path)
                .ok()
                .and_then(Font::try_from_vec)
            {
                Some(font) => {
                    log::debug!("using font {}", path.display());
                    renderer.font = Some(font);
                    return renderer;
                }
                None => log::warn!("could not load font {}", path.display()),
            }
        }
        log::warn!("no system font found, labels will not be rendered");
        renderer
    }

    /// Render the chart's current frame at `width` x `height`.
    pub fn render(
        &self,
        chart: &mut RadarChart,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptySurface(width, height));
        }
        chart.resize(width, height);
        let commands = chart.render(self);
        let badge = chart.badge().cloned();

        let mut canvas = Blend(ImageBuffer::from_pixel(width, height, rgba(self.background)));
        for command in &commands {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    paint,
                } => Self::paint_closed(&mut canvas, &circle_points(*center, *radius), paint),
                DrawCommand::Polygon { points, paint, .. } => {
                    Self::paint_closed(&mut canvas, points, paint)
                }
                DrawCommand::Line { from, to, paint } => {
                    Self::stroke_segment(&mut canvas, *from, *to, paint.width, rgba(paint.color))
                }
                DrawCommand::Text {
                    text,
                    origin,
                    size,
                    color,
                } => self.draw_text(&mut canvas, text, *origin, *size, *color),
                DrawCommand::Image { bounds } => {
                    if let Some(bitmap) = &badge {
                        Self::draw_image(&mut canvas, bitmap, bounds);
                    }
                }
            }
        }
        Ok(canvas.0)
    }

    /// Render and encode as PNG bytes.
    pub fn render_png_bytes(
        &self,
        chart: &mut RadarChart,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let img = self.render(chart, width, height)?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render and write a PNG file.
    pub fn save_png(
        &self,
        chart: &mut RadarChart,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let img = self.render(chart, width, height)?;
        img.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    fn paint_closed(canvas: &mut BlendCanvas, points: &[Point], paint: &Paint) {
        let color = rgba(paint.color);
        if paint.style.fills() {
            fill_polygon(canvas, points, color);
        }
        if paint.style.strokes() {
            for (i, &from) in points.iter().enumerate() {
                let to = points[(i + 1) % points.len()];
                Self::stroke_segment(canvas, from, to, paint.width, color);
            }
        }
    }

    /// Thick line with round caps.
    fn stroke_segment(canvas: &mut BlendCanvas, from: Point, to: Point, width: f32, color: Rgba<u8>) {
        if width <= 1.0 {
            draw_line_segment_mut(canvas, (from.x, from.y), (to.x, to.y), color);
            return;
        }
        let length = from.distance(to);
        let half = width / 2.0;
        if length >= 0.5 {
            let nx = -(to.y - from.y) / length * half;
            let ny = (to.x - from.x) / length * half;
            let quad = [
                from.offset(nx, ny),
                to.offset(nx, ny),
                to.offset(-nx, -ny),
                from.offset(-nx, -ny),
            ];
            fill_polygon(canvas, &quad, color);
        }
        let cap = half.round() as i32;
        if color[3] == u8::MAX && cap > 0 {
            for end in [from, to] {
                draw_filled_circle_mut(canvas, (end.x.round() as i32, end.y.round() as i32), cap, color);
            }
        }
    }

    fn draw_text(&self, canvas: &mut BlendCanvas, text: &str, origin: Point, size: f32, color: Color) {
        let Some(font) = &self.font else {
            return;
        };
        let (width, height) = canvas.dimensions();
        let scale = Scale::uniform(size);
        for glyph in font.layout(text, scale, rusttype::point(origin.x, origin.y)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let alpha = (coverage * color.a as f32) as u8;
                if alpha > 0 {
                    canvas.draw_pixel(px as u32, py as u32, Rgba([color.r, color.g, color.b, alpha]));
                }
            });
        }
    }

    fn draw_image(canvas: &mut BlendCanvas, bitmap: &RgbaImage, bounds: &Bounds) {
        let width = bounds.width().round() as u32;
        let height = bounds.height().round() as u32;
        if width == 0 || height == 0 {
            return;
        }
        let scaled = if bitmap.dimensions() == (width, height) {
            bitmap.clone()
        } else {
            imageops::resize(bitmap, width, height, FilterType::Triangle)
        };
        imageops::overlay(
            &mut canvas.0,
            &scaled,
            bounds.left.round() as i64,
            bounds.top.round() as i64,
        );
    }
}

impl TextMeasurer for StaticChartRenderer {
    fn measure(&self, text: &str, size: f32) -> TextSize {
        let Some(font) = &self.font else {
            return TextSize::default();
        };
        let scale = Scale::uniform(size);
        let v_metrics = font.v_metrics(scale);
        let mut min = (i32::MAX, i32::MAX);
        let mut max = (i32::MIN, i32::MIN);
        for glyph in font.layout(text, scale, rusttype::point(0.0, v_metrics.ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                min = (min.0.min(bb.min.x), min.1.min(bb.min.y));
                max = (max.0.max(bb.max.x), max.1.max(bb.max.y));
            }
        }
        if min.0 > max.0 {
            return TextSize::default();
        }
        TextSize {
            width: (max.0 - min.0) as f32,
            height: (max.1 - min.1) as f32,
        }
    }
}

fn circle_points(center: Point, radius: f32) -> Vec<Point> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            center.offset(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

/// Fill a polygon given in surface coordinates, skipping shapes that collapse to
/// fewer than three distinct pixels.
fn fill_polygon(canvas: &mut BlendCanvas, points: &[Point], color: Rgba<u8>) {
    let mut pixels: Vec<PixelPoint<i32>> = Vec::with_capacity(points.len());
    for p in points {
        let pixel = PixelPoint::new(p.x.round() as i32, p.y.round() as i32);
        if pixels.last() != Some(&pixel) {
            pixels.push(pixel);
        }
    }
    while pixels.len() > 1 && pixels.first() == pixels.last() {
        pixels.pop();
    }
    if pixels.len() < 3 {
        return;
    }
    draw_polygon_mut(canvas, &pixels, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartConfig, PaintStyle};
    use crate::data::DataPoint;

    fn full_triangle() -> RadarChart {
        triangle_with(ChartConfig {
            max_value: 100.0,
            ..ChartConfig::default()
        })
    }

    fn triangle_with(config: ChartConfig) -> RadarChart {
        let mut chart = RadarChart::new(config);
        chart.set_data(vec![
            DataPoint::new("A", 100.0),
            DataPoint::new("B", 100.0),
            DataPoint::new("C", 100.0),
        ]);
        chart.build();
        chart
    }

    #[test]
    fn empty_surface_is_an_error() {
        let mut chart = RadarChart::default();
        let err = StaticChartRenderer::new().render(&mut chart, 0, 100).unwrap_err();
        assert!(matches!(err, RenderError::EmptySurface(0, 100)));
    }

    #[test]
    fn invalid_font_is_an_error() {
        let err = StaticChartRenderer::new()
            .with_font_bytes(vec![1, 2, 3])
            .err()
            .unwrap();
        assert!(matches!(err, RenderError::FontParse));
    }

    #[test]
    fn paints_frame_and_translucent_polygon() {
        let mut chart = full_triangle();
        let img = StaticChartRenderer::new().render(&mut chart, 300, 300).unwrap();
        assert_eq!(img.dimensions(), (300, 300));

        // Left edge of the outer circle, outside the triangle.
        let frame = img.get_pixel(50, 150);
        assert!(frame[0] < 50 && frame[1] < 50 && frame[2] < 50, "{frame:?}");

        // Inside the triangle, away from spokes and the inner ring.
        let fill = img.get_pixel(165, 110);
        assert_ne!(*fill, Rgba([255, 255, 255, 255]));
        assert!(fill[2] > fill[0], "{fill:?}");

        // Corner stays background.
        assert_eq!(*img.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn stroked_polygon_leaves_interior_unfilled() {
        let mut chart = triangle_with(ChartConfig {
            max_value: 100.0,
            show_spokes: false,
            polygon_color: Color::rgb(255, 0, 0),
            polygon_style: PaintStyle::Stroke,
            ..ChartConfig::default()
        });
        let img = StaticChartRenderer::new().render(&mut chart, 300, 300).unwrap();

        // Same interior pixel the filled polygon covers.
        assert_eq!(*img.get_pixel(165, 110), Rgba([255, 255, 255, 255]));

        // Middle of the edge from the top vertex to the lower right one.
        let edge = img.get_pixel(193, 125);
        assert!(edge[0] > 200 && edge[1] < 50 && edge[2] < 50, "{edge:?}");
    }

    #[test]
    fn filled_inner_frame_covers_center() {
        let mut chart = triangle_with(ChartConfig {
            show_spokes: false,
            inner_frame_color: Color::rgb(0, 0, 255),
            inner_frame_style: PaintStyle::Fill,
            polygon_style: PaintStyle::Stroke,
            ..ChartConfig::default()
        });
        let img = StaticChartRenderer::new().render(&mut chart, 300, 300).unwrap();
        let center = img.get_pixel(150, 150);
        assert!(center[0] < 20 && center[1] < 20 && center[2] > 235, "{center:?}");
    }

    #[test]
    fn badge_image_is_composited_at_center() {
        let mut chart = full_triangle();
        chart.set_badge_bitmap(ImageBuffer::from_pixel(10, 10, Rgba([255, 0, 0, 255])));
        let img = StaticChartRenderer::new().render(&mut chart, 300, 300).unwrap();
        assert_eq!(*img.get_pixel(150, 150), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn png_bytes_have_png_signature() {
        let mut chart = RadarChart::default();
        let bytes = StaticChartRenderer::new()
            .render_png_bytes(&mut chart, 120, 80)
            .unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn measure_without_font_is_zero() {
        let size = StaticChartRenderer::new().measure("label0", 35.0);
        assert_eq!(size, TextSize::default());
    }
}
