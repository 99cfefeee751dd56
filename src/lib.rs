//! Radarny - Animated Radar Chart Widget
//!
//! Backend-independent radar chart layout and animation, with an egui painter
//! and a raster PNG renderer on top.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
