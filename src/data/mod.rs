//! Data module - chart data points and dataset validation

mod dataset;

pub use dataset::{DataPoint, Dataset, DatasetError, MIN_POINTS};
