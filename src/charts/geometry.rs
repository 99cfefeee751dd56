//! Radar Geometry Module
//! Layout resolution, polar projection and value-to-radius mapping.

/// Angle of point 0, pointing straight up. Points proceed clockwise.
pub const START_ANGLE: f64 = -90.0;

/// A position on the drawing surface (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Point, width: f32, height: f32) -> Self {
        Self {
            left: center.x - width / 2.0,
            top: center.y - height / 2.0,
            right: center.x + width / 2.0,
            bottom: center.y + height / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Surface-dependent layout, recomputed only when the surface or point count changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    pub width: u32,
    pub height: u32,
    /// Shorter surface side.
    pub side_length: u32,
    /// Gap between the frame and the surface edge.
    pub padding: u32,
    pub center: Point,
    /// Outer frame radius.
    pub radius: f32,
    pub point_count: usize,
    /// Degrees between consecutive points, always `360 / point_count`.
    pub angle_step: f64,
}

/// Resolve the chart layout for a surface of `width` x `height` holding `point_count` points.
///
/// The chart occupies the centered square of the shorter side, inset by a sixth of that side.
pub fn resolve_layout(width: u32, height: u32, point_count: usize) -> LayoutState {
    let side_length = width.min(height);
    let padding = side_length / 6;
    let half = side_length as f32 / 2.0;

    let center = if width > height {
        Point::new(half + (width - height) as f32 / 2.0, half)
    } else if height > width {
        Point::new(half, half + (height - width) as f32 / 2.0)
    } else {
        Point::new(half, half)
    };

    LayoutState {
        width,
        height,
        side_length,
        padding,
        center,
        radius: half - padding as f32,
        point_count,
        angle_step: angle_step(point_count),
    }
}

/// Degrees between consecutive points.
pub fn angle_step(point_count: usize) -> f64 {
    if point_count == 0 {
        return 0.0;
    }
    360.0 / point_count as f64
}

impl LayoutState {
    /// Absolute angle of point `index` in degrees.
    pub fn angle(&self, index: usize) -> f64 {
        self.angle_step * index as f64 + START_ANGLE
    }

    /// Project point `index` at `radius * percentage` from the center.
    pub fn project(&self, index: usize, radius: f32, percentage: f32) -> Point {
        let angle = self.angle(index).to_radians();
        let distance = radius as f64 * percentage as f64;
        Point::new(
            (angle.cos() * distance + self.center.x as f64) as f32,
            (angle.sin() * distance + self.center.y as f64) as f32,
        )
    }

    /// Radius of the zero-value ring.
    pub fn inner_radius(&self, inner_frame_percentage: f32) -> f32 {
        self.radius * inner_frame_percentage
    }

    /// Anchors of every point on a ring at `percentage` of the outer radius.
    pub fn ring(&self, percentage: f32) -> Vec<Point> {
        (0..self.point_count)
            .map(|i| self.project(i, self.radius, percentage))
            .collect()
    }
}

/// Map a value to its distance from the center.
///
/// Value 0 lands on the inner ring and `max_value` on the outer frame. Values above
/// the maximum are not clamped and extend past the frame.
pub fn value_radius(value: f32, max_value: f32, outer_radius: f32, inner_frame_percentage: f32) -> f32 {
    let offset = outer_radius * inner_frame_percentage;
    if max_value == 0.0 {
        return offset;
    }
    (outer_radius - offset) * (value / max_value) + offset
}

/// Round to one decimal place, ties to even (`0.25` shows as `0.2`).
pub fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round_ties_even() / 10.0
}
