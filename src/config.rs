//! Chart Configuration Module
//! Style options for the radar chart, each with an explicit default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default stroke width for frame, inner frame, spokes and polygon outline.
pub const DEF_STROKE_WIDTH: f32 = 5.0;
/// Default inner ring radius as a fraction of the outer radius.
pub const DEF_INNER_FRAME_PERCENTAGE: f32 = 0.3;
/// Default label distance as a fraction of the outer radius.
pub const DEF_LABEL_PERCENTAGE: f32 = 1.3;
/// Default badge background radius as a fraction of the inner ring radius.
pub const DEF_BADGE_PERCENTAGE: f32 = 0.6;
/// Default label text size.
pub const DEF_LABEL_SIZE: f32 = 35.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// RGBA color, serialized as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Alpha-first constructor, matching the usual `argb(a, r, g, b)` notation.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

/// Outer/inner frame shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameShape {
    #[default]
    Round,
    Polygon,
}

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintStyle {
    Stroke,
    #[default]
    Fill,
    #[serde(rename = "both")]
    FillAndStroke,
}

impl PaintStyle {
    pub fn fills(self) -> bool {
        matches!(self, PaintStyle::Fill | PaintStyle::FillAndStroke)
    }

    pub fn strokes(self) -> bool {
        matches!(self, PaintStyle::Stroke | PaintStyle::FillAndStroke)
    }
}

/// Complete style configuration of a radar chart.
///
/// Every field falls back to its default when absent from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    // Outer frame
    pub frame_color: Color,
    pub frame_width: f32,
    pub frame_shape: FrameShape,

    // Inner frame (zero-value ring)
    pub inner_frame_color: Color,
    pub inner_frame_width: f32,
    pub inner_frame_style: PaintStyle,
    pub inner_frame_percentage: f32,

    // Spokes from center to each outer anchor
    pub show_spokes: bool,
    pub spoke_color: Color,
    pub spoke_width: f32,

    // Labels
    pub label_color: Color,
    pub label_size: f32,
    pub label_percentage: f32,

    // Data polygon
    pub polygon_color: Color,
    pub polygon_width: f32,
    pub polygon_style: PaintStyle,
    /// Lower bound of the scale maximum; 0 means "use the dataset maximum".
    pub max_value: f32,

    // Center badge
    pub show_badge: bool,
    pub badge_image: Option<PathBuf>,
    /// Drawn image width, 0 = intrinsic bitmap width.
    pub badge_width: u32,
    /// Drawn image height, 0 = intrinsic bitmap height.
    pub badge_height: u32,
    pub badge_background: Color,
    pub badge_percentage: f32,

    /// Growth animation length in milliseconds, 0 disables it.
    pub animation_duration_ms: u64,
    /// Round displayed values to one decimal before labelling and plotting.
    pub round_to_one_decimal: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            frame_color: Color::BLACK,
            frame_width: DEF_STROKE_WIDTH,
            frame_shape: FrameShape::Round,
            inner_frame_color: Color::BLACK,
            inner_frame_width: DEF_STROKE_WIDTH,
            inner_frame_style: PaintStyle::Stroke,
            inner_frame_percentage: DEF_INNER_FRAME_PERCENTAGE,
            show_spokes: true,
            spoke_color: Color::BLACK,
            spoke_width: DEF_STROKE_WIDTH,
            label_color: Color::BLACK,
            label_size: DEF_LABEL_SIZE,
            label_percentage: DEF_LABEL_PERCENTAGE,
            polygon_color: Color::argb(125, 30, 110, 210),
            polygon_width: DEF_STROKE_WIDTH,
            polygon_style: PaintStyle::Fill,
            max_value: 0.0,
            show_badge: true,
            badge_image: None,
            badge_width: 0,
            badge_height: 0,
            badge_background: Color::WHITE,
            badge_percentage: DEF_BADGE_PERCENTAGE,
            animation_duration_ms: 0,
            round_to_one_decimal: true,
        }
    }
}

impl ChartConfig {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load a config file, returning defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default chart config");
                Self::default()
            }
        }
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
