//! Scene Builder Module
//! Turns layout, data and style into an ordered list of backend-independent draw commands.
//!
//! Draw order (later commands paint over earlier ones):
//! 1. Outer and inner frame (circles or polygons)
//! 2. Spokes from the center to each outer anchor
//! 3. Label and value text around the frame
//! 4. Data polygon
//! 5. Center badge (background disc + image)

use super::geometry::{round_one_decimal, value_radius, Bounds, LayoutState, Point};
use crate::config::{ChartConfig, Color, FrameShape, PaintStyle};
use crate::data::Dataset;

/// Stroke/fill settings of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub width: f32,
    pub style: PaintStyle,
}

impl Paint {
    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: PaintStyle::Stroke,
        }
    }

    pub fn fill(color: Color) -> Self {
        Self {
            color,
            width: 0.0,
            style: PaintStyle::Fill,
        }
    }
}

/// Tight bounding box of a rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

/// Text measurement supplied by the drawing backend.
pub trait TextMeasurer {
    fn measure(&self, text: &str, size: f32) -> TextSize;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    /// Closed polygon. Every vertex is visible from `pivot`, so a triangle fan
    /// around it fills the shape exactly.
    Polygon {
        points: Vec<Point>,
        pivot: Point,
        paint: Paint,
    },
    Line {
        from: Point,
        to: Point,
        paint: Paint,
    },
    /// `origin` is the left end of the text baseline.
    Text {
        text: String,
        origin: Point,
        size: f32,
        color: Color,
    },
    /// The chart's badge bitmap scaled into `bounds`.
    Image { bounds: Bounds },
}

/// Per-point geometry of one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSet {
    /// Anchors on the outer frame.
    pub outer: Vec<Point>,
    /// Anchors on the inner frame.
    pub inner: Vec<Point>,
    /// Label anchors outside the frame.
    pub labels: Vec<Point>,
    /// Data polygon vertices.
    pub vertices: Vec<Point>,
    /// Values as displayed this frame (progress-scaled, optionally rounded).
    pub displayed: Vec<f32>,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub layout: &'a LayoutState,
    pub dataset: &'a Dataset,
    pub config: &'a ChartConfig,
    /// Resolved scale maximum.
    pub max_value: f32,
    /// Animation progress in [0, 1].
    pub progress: f32,
    /// Intrinsic size of the badge bitmap, if one is loaded.
    pub badge_size: Option<(u32, u32)>,
}

impl Scene<'_> {
    /// Value shown for `value` at the current progress.
    pub fn displayed_value(&self, value: f32) -> f32 {
        let scaled = value * self.progress;
        if self.config.round_to_one_decimal {
            round_one_decimal(scaled)
        } else {
            scaled
        }
    }

    /// Text shown under a label.
    pub fn format_value(&self, displayed: f32) -> String {
        if self.config.round_to_one_decimal {
            format!("{displayed:.1}")
        } else {
            displayed.to_string()
        }
    }

    pub fn points(&self) -> PointSet {
        let layout = self.layout;
        let config = self.config;
        let displayed: Vec<f32> = self
            .dataset
            .iter()
            .map(|p| self.displayed_value(p.value))
            .collect();
        let vertices = displayed
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let r = value_radius(
                    value,
                    self.max_value,
                    layout.radius,
                    config.inner_frame_percentage,
                );
                layout.project(i, r, 1.0)
            })
            .collect();

        PointSet {
            outer: layout.ring(1.0),
            inner: layout.ring(config.inner_frame_percentage),
            labels: layout.ring(config.label_percentage),
            vertices,
            displayed,
        }
    }

    /// Build the draw commands of this frame.
    pub fn build(&self, measurer: &dyn TextMeasurer) -> Vec<DrawCommand> {
        if self.layout.side_length == 0 || self.layout.point_count != self.dataset.len() {
            return Vec::new();
        }

        let points = self.points();
        let mut commands = Vec::new();
        self.push_frame(&points, &mut commands);
        if self.config.show_spokes {
            self.push_spokes(&points, &mut commands);
        }
        self.push_labels(&points, measurer, &mut commands);
        self.push_polygon(&points, &mut commands);
        if self.config.show_badge {
            self.push_badge(&mut commands);
        }
        commands
    }

    fn push_frame(&self, points: &PointSet, commands: &mut Vec<DrawCommand>) {
        let config = self.config;
        let center = self.layout.center;
        let frame_paint = Paint::stroke(config.frame_color, config.frame_width);
        let inner_paint = Paint {
            color: config.inner_frame_color,
            width: config.inner_frame_width,
            style: config.inner_frame_style,
        };

        match config.frame_shape {
            FrameShape::Round => {
                commands.push(DrawCommand::Circle {
                    center,
                    radius: self.layout.radius,
                    paint: frame_paint,
                });
                commands.push(DrawCommand::Circle {
                    center,
                    radius: self.layout.inner_radius(config.inner_frame_percentage),
                    paint: inner_paint,
                });
            }
            FrameShape::Polygon => {
                commands.push(DrawCommand::Polygon {
                    points: points.outer.clone(),
                    pivot: center,
                    paint: frame_paint,
                });
                commands.push(DrawCommand::Polygon {
                    points: points.inner.clone(),
                    pivot: center,
                    paint: inner_paint,
                });
            }
        }
    }

    fn push_spokes(&self, points: &PointSet, commands: &mut Vec<DrawCommand>) {
        let paint = Paint::stroke(self.config.spoke_color, self.config.spoke_width);
        commands.extend(points.outer.iter().map(|&to| DrawCommand::Line {
            from: self.layout.center,
            to,
            paint,
        }));
    }

    fn push_labels(
        &self,
        points: &PointSet,
        measurer: &dyn TextMeasurer,
        commands: &mut Vec<DrawCommand>,
    ) {
        let size = self.config.label_size;
        let color = self.config.label_color;

        for ((point, anchor), &displayed) in self
            .dataset
            .iter()
            .zip(&points.labels)
            .zip(&points.displayed)
        {
            let value = self.format_value(displayed);
            let label_size = measurer.measure(&point.label, size);
            let value_size = measurer.measure(&value, size);

            // Label sits above the anchor, value below it.
            commands.push(DrawCommand::Text {
                text: point.label.clone(),
                origin: anchor.offset(-label_size.width / 2.0, -label_size.height / 2.0),
                size,
                color,
            });
            commands.push(DrawCommand::Text {
                text: value,
                origin: anchor.offset(-value_size.width / 2.0, value_size.height),
                size,
                color,
            });
        }
    }

    fn push_polygon(&self, points: &PointSet, commands: &mut Vec<DrawCommand>) {
        commands.push(DrawCommand::Polygon {
            points: points.vertices.clone(),
            pivot: self.layout.center,
            paint: Paint {
                color: self.config.polygon_color,
                width: self.config.polygon_width,
                style: self.config.polygon_style,
            },
        });
    }

    fn push_badge(&self, commands: &mut Vec<DrawCommand>) {
        let Some((bitmap_width, bitmap_height)) = self.badge_size else {
            return;
        };
        let config = self.config;
        let center = self.layout.center;
        let offset = self.layout.inner_radius(config.inner_frame_percentage);

        commands.push(DrawCommand::Circle {
            center,
            radius: offset * config.badge_percentage,
            paint: Paint::fill(config.badge_background),
        });

        let width = if config.badge_width == 0 {
            bitmap_width
        } else {
            config.badge_width
        };
        let height = if config.badge_height == 0 {
            bitmap_height
        } else {
            config.badge_height
        };
        commands.push(DrawCommand::Image {
            bounds: Bounds::centered(center, width as f32, height as f32),
        });
    }
}
