//! Dataset Module
//! Ordered (label, value) points plotted around the chart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest number of points that forms a polygon.
pub const MIN_POINTS: usize = 3;

/// Number of points in the built-in placeholder dataset.
const DEFAULT_POINT_COUNT: usize = 5;

#[derive(Error, Debug, PartialEq)]
pub enum DatasetError {
    #[error("A radar chart needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("Value of point {index} ({label}) must be finite and non-negative, got {value}")]
    InvalidValue {
        index: usize,
        label: String,
        value: f32,
    },
}

/// A single labelled metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f32,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A validated, immutable list of at least [`MIN_POINTS`] data points.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Default for Dataset {
    /// Five zero-valued points labelled `label0..label4`.
    fn default() -> Self {
        Self {
            points: (0..DEFAULT_POINT_COUNT)
                .map(|i| DataPoint::new(format!("label{i}"), 0.0))
                .collect(),
        }
    }
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>) -> Result<Self, DatasetError> {
        if points.len() < MIN_POINTS {
            return Err(DatasetError::TooFewPoints(points.len()));
        }
        if let Some((index, point)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.value.is_finite() || p.value < 0.0)
        {
            return Err(DatasetError::InvalidValue {
                index,
                label: point.label.clone(),
                value: point.value,
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a dataset holds at least [`MIN_POINTS`] entries.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest value in the dataset.
    pub fn max_value(&self) -> f32 {
        self.points.iter().map(|p| p.value).fold(0.0, f32::max)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_five_zero_points() {
        let dataset = Dataset::default();
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.points()[0].label, "label0");
        assert_eq!(dataset.points()[4].label, "label4");
        assert!(dataset.iter().all(|p| p.value == 0.0));
        assert_eq!(dataset.max_value(), 0.0);
    }

    #[test]
    fn rejects_fewer_than_three_points() {
        let err = Dataset::new(vec![DataPoint::new("a", 1.0), DataPoint::new("b", 2.0)]).unwrap_err();
        assert_eq!(err, DatasetError::TooFewPoints(2));
        assert!(Dataset::new(Vec::new()).is_err());
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        let err = Dataset::new(vec![
            DataPoint::new("a", 1.0),
            DataPoint::new("b", -2.0),
            DataPoint::new("c", 3.0),
        ])
        .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { index: 1, .. }));

        let err = Dataset::new(vec![
            DataPoint::new("a", 1.0),
            DataPoint::new("b", 2.0),
            DataPoint::new("c", f32::NAN),
        ])
        .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { index: 2, .. }));
    }

    #[test]
    fn max_value_is_largest_point() {
        let dataset = Dataset::new(vec![
            DataPoint::new("A", 50.0),
            DataPoint::new("B", 80.0),
            DataPoint::new("C", 30.0),
        ])
        .unwrap();
        assert_eq!(dataset.max_value(), 80.0);
    }
}
