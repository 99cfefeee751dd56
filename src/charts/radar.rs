//! Radar Chart Component
//! Owns style, active dataset, cached layout and animation state of one chart.

use super::animation::Animation;
use super::geometry::{resolve_layout, LayoutState};
use super::scene::{DrawCommand, PointSet, Scene, TextMeasurer};
use crate::config::ChartConfig;
use crate::data::{DataPoint, Dataset};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("Failed to decode badge image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Decode a badge image file into RGBA.
pub fn load_badge(path: &Path) -> Result<RgbaImage, BadgeError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| BadgeError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// A radar chart widget, independent of the drawing backend.
///
/// Lifecycle: construct → adjust style → [`set_data`](Self::set_data) +
/// [`build`](Self::build) → repeated [`resize`](Self::resize) / [`advance`](Self::advance) /
/// [`render`](Self::render).
#[derive(Debug, Clone)]
pub struct RadarChart {
    config: ChartConfig,
    dataset: Dataset,
    /// Last surface size given to `resize`.
    surface: (u32, u32),
    /// Cached layout, `None` until the next render resolves it.
    layout: Option<LayoutState>,
    /// Scale maximum resolved together with the layout.
    max_value: f32,
    badge: Option<Arc<RgbaImage>>,
    /// Bumped whenever the badge bitmap changes, so backends can refresh cached textures.
    badge_generation: u64,
    animation: Animation,
}

impl Default for RadarChart {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

impl RadarChart {
    /// Create a chart showing the placeholder dataset at full progress.
    ///
    /// The badge image and growth animation only take effect after [`build`](Self::build).
    pub fn new(config: ChartConfig) -> Self {
        let max_value = config.max_value;
        Self {
            config,
            dataset: Dataset::default(),
            surface: (0, 0),
            layout: None,
            max_value,
            badge: None,
            badge_generation: 0,
            animation: Animation::default(),
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Mutable style access. Geometry changes take effect on the next [`build`](Self::build).
    pub fn config_mut(&mut self) -> &mut ChartConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: ChartConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Replace the active dataset.
    ///
    /// Returns false, keeping the previous dataset, when fewer than three points or an
    /// invalid value are given, or while a growth animation is still running.
    pub fn set_data(&mut self, points: Vec<DataPoint>) -> bool {
        if self.animation.is_running() {
            log::debug!("animation in flight, ignoring new data");
            return false;
        }
        match Dataset::new(points) {
            Ok(dataset) => {
                if dataset.len() != self.dataset.len() {
                    self.layout = None;
                }
                self.dataset = dataset;
                true
            }
            Err(e) => {
                log::debug!("rejected dataset: {e}");
                false
            }
        }
    }

    /// Apply the current style and data: drop the cached layout, reload the badge
    /// image and start the growth animation when one is configured.
    ///
    /// Returns false and changes nothing while an animation is still running.
    pub fn build(&mut self) -> bool {
        if self.animation.is_running() {
            log::debug!("animation in flight, ignoring rebuild");
            return false;
        }
        self.layout = None;

        if let Some(path) = self.config.badge_image.clone() {
            match load_badge(&path) {
                Ok(bitmap) => {
                    self.set_badge_bitmap(bitmap);
                }
                Err(e) => log::warn!("{e}"),
            }
        }

        let duration = Duration::from_millis(self.config.animation_duration_ms);
        self.animation = Animation::start(duration);
        if self.animation.is_running() {
            log::debug!("starting {} ms growth animation", duration.as_millis());
        }
        true
    }

    /// Tell the chart the drawing surface size. Same size is a no-op.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.surface == (width, height) {
            return;
        }
        self.surface = (width, height);
        self.layout = None;
    }

    pub fn surface(&self) -> (u32, u32) {
        self.surface
    }

    /// Advance the animation by `dt`. Returns true while another frame is needed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let was_running = self.animation.is_running();
        let running = self.animation.advance(dt);
        if was_running && !running {
            log::debug!("growth animation finished");
        }
        running
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// Current animation progress in [0, 1].
    pub fn progress(&self) -> f32 {
        self.animation.progress()
    }

    /// Cached layout, resolving it first if it was invalidated.
    pub fn layout(&mut self) -> LayoutState {
        if let Some(layout) = self.layout {
            return layout;
        }
        let (width, height) = self.surface;
        let layout = resolve_layout(width, height, self.dataset.len());
        // The configured maximum is a floor; the dataset can raise it.
        self.max_value = self.config.max_value.max(self.dataset.max_value());
        log::debug!(
            "resolved layout {}x{}: center ({}, {}), radius {}, max {}",
            width,
            height,
            layout.center.x,
            layout.center.y,
            layout.radius,
            self.max_value
        );
        self.layout = Some(layout);
        layout
    }

    /// Scale maximum in effect, resolving the layout first if needed.
    pub fn max_value(&mut self) -> f32 {
        self.layout();
        self.max_value
    }

    pub fn badge(&self) -> Option<&Arc<RgbaImage>> {
        self.badge.as_ref()
    }

    pub fn badge_generation(&self) -> u64 {
        self.badge_generation
    }

    /// Use an already decoded bitmap as the badge image.
    pub fn set_badge_bitmap(&mut self, bitmap: RgbaImage) -> &mut Self {
        self.badge = Some(Arc::new(bitmap));
        self.badge_generation += 1;
        self
    }

    fn scene_parts(&mut self) -> (LayoutState, f32) {
        let layout = self.layout();
        (layout, self.max_value)
    }

    /// Per-point geometry of the current frame.
    pub fn points(&mut self) -> PointSet {
        let (layout, max_value) = self.scene_parts();
        self.scene(&layout, max_value).points()
    }

    /// Draw commands of the current frame.
    pub fn render(&mut self, measurer: &dyn TextMeasurer) -> Vec<DrawCommand> {
        let (layout, max_value) = self.scene_parts();
        self.scene(&layout, max_value).build(measurer)
    }

    fn scene<'a>(&'a self, layout: &'a LayoutState, max_value: f32) -> Scene<'a> {
        Scene {
            layout,
            dataset: &self.dataset,
            config: &self.config,
            max_value,
            progress: self.animation.progress(),
            badge_size: self.badge.as_ref().map(|b| b.dimensions()),
        }
    }
}
