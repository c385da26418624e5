//! Surface construction
//!
//! Assembles the solved IV point cloud into a dense regular grid:
//! linear interpolation inside the convex hull of the quotes, nearest
//! neighbor outside it so every node carries a value. Edge regions are
//! lower fidelity by construction; no confidence metadata is attached.

use tracing::debug;

use super::interp::{ScatterPoint, ScatteredInterp};
use crate::core::{
    IvPoint, MarketParams, StrikeAxis, SurfaceError, SurfaceResult, VolGrid, VolUnits,
};
use ndarray::Array2;

/// Map solved IV points onto the chosen surface axes
///
/// x is time-to-expiry. y is the strike, or forward log-moneyness
/// ln(K/F) with F = S*e^((r-q)T) when `axis` is
/// [`StrikeAxis::LogMoneyness`]. z is the implied vol, scaled to
/// percentage points for [`VolUnits::Percent`].
pub fn surface_points(
    points: &[IvPoint],
    market: &MarketParams,
    axis: StrikeAxis,
    units: VolUnits,
) -> Vec<ScatterPoint> {
    let z_scale = match units {
        VolUnits::Fraction => 1.0,
        VolUnits::Percent => 100.0,
    };

    points
        .iter()
        .map(|p| {
            let y = match axis {
                StrikeAxis::Strike => p.strike,
                StrikeAxis::LogMoneyness => {
                    let forward = market.forward(p.time_to_expiry).max(1e-12);
                    (p.strike / forward).ln()
                }
            };

            ScatterPoint {
                x: p.time_to_expiry,
                y,
                z: p.implied_vol * z_scale,
            }
        })
        .collect()
}

/// Build a dense `resolution x resolution` grid from scattered points
///
/// Fails with [`SurfaceError::EmptyInput`] when no points survive, and
/// with [`SurfaceError::InsufficientVariation`] when either axis has
/// fewer than two distinct values; a degenerate point set cannot define
/// a 2D surface and interpolating it would return garbage silently.
pub fn build_surface(
    points: &[ScatterPoint],
    resolution: usize,
    y_kind: StrikeAxis,
    units: VolUnits,
) -> SurfaceResult<VolGrid> {
    if points.is_empty() {
        return Err(SurfaceError::EmptyInput);
    }
    if resolution < 2 {
        return Err(SurfaceError::invalid_input(format!(
            "Grid resolution must be at least 2, got {resolution}"
        )));
    }

    if distinct_count(points.iter().map(|p| p.x)) < 2 {
        return Err(SurfaceError::InsufficientVariation { axis: "expiry" });
    }
    if distinct_count(points.iter().map(|p| p.y)) < 2 {
        return Err(SurfaceError::InsufficientVariation { axis: "strike" });
    }

    let x_min = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let y_min = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let x_axis = linspace(x_min, x_max, resolution);
    let y_axis = linspace(y_min, y_max, resolution);

    let interp = ScatteredInterp::new(points).ok_or(SurfaceError::EmptyInput)?;

    let mut values = Array2::zeros((resolution, resolution));
    let mut fallback_nodes = 0usize;
    for (xi, &x) in x_axis.iter().enumerate() {
        for (yi, &y) in y_axis.iter().enumerate() {
            values[[xi, yi]] = match interp.linear(x, y) {
                Some(v) => v,
                None => {
                    fallback_nodes += 1;
                    interp.nearest(x, y)
                }
            };
        }
    }

    debug!(
        points = points.len(),
        resolution,
        fallback_nodes,
        "surface grid assembled"
    );

    Ok(VolGrid {
        x_axis,
        y_axis,
        values,
        y_kind,
        units,
    })
}

/// Number of distinct values, by exact comparison as the axes come from
/// a shared set of chain expirations and strikes
fn distinct_count(values: impl Iterator<Item = f64>) -> usize {
    let mut seen: Vec<f64> = values.collect();
    seen.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    seen.dedup();
    seen.len()
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}
