//! Dense volatility grid
//!
//! Output of the surface builder: a regular grid of vol values over
//! (time-to-expiry, strike-or-log-moneyness), rebuilt from scratch on
//! every call. Axis semantics and units travel with the grid as plain
//! metadata so a renderer can label it without guessing.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Semantics of the grid's y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeAxis {
    /// Absolute strike
    Strike,
    /// Forward log-moneyness: ln(K/F)
    LogMoneyness,
}

/// Units of the grid's vol values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolUnits {
    /// Raw fraction (0.20 = 20%)
    Fraction,
    /// Percentage points (20.0 = 20%)
    Percent,
}

/// Regular implied-volatility grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolGrid {
    /// Time-to-expiry samples (years), ascending
    pub x_axis: Vec<f64>,
    /// Strike or log-moneyness samples, ascending
    pub y_axis: Vec<f64>,
    /// Vol values, shape (x_axis.len(), y_axis.len())
    pub values: Array2<f64>,
    /// What the y axis means
    pub y_kind: StrikeAxis,
    /// What the values mean
    pub units: VolUnits,
}

impl VolGrid {
    /// Grid dimensions as (nx, ny)
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Vol at grid node (xi, yi)
    pub fn at(&self, xi: usize, yi: usize) -> f64 {
        self.values[[xi, yi]]
    }

    /// Smallest vol on the grid
    pub fn min_vol(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest vol on the grid
    pub fn max_vol(&self) -> f64 {
        self.values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_accessors() {
        let grid = VolGrid {
            x_axis: vec![0.1, 0.2],
            y_axis: vec![90.0, 100.0, 110.0],
            values: Array2::from_shape_vec((2, 3), vec![0.2, 0.21, 0.22, 0.19, 0.2, 0.25])
                .unwrap(),
            y_kind: StrikeAxis::Strike,
            units: VolUnits::Fraction,
        };

        assert_eq!(grid.dim(), (2, 3));
        assert!((grid.at(1, 2) - 0.25).abs() < 1e-12);
        assert!((grid.min_vol() - 0.19).abs() < 1e-12);
        assert!((grid.max_vol() - 0.25).abs() < 1e-12);
    }
}
