//! σ_μ tabulated on an evenly spaced redshift grid.
//!
//! Produces the curve a plotting front end draws (σ_μ against cosmological
//! redshift) as plain rows.

use pecvel_common::config::GridConfig;
use serde::Serialize;

use crate::error::UncertaintyError;
use crate::uncertainty::{VarianceContributions, propagate_to_magnitude_uncertainty};

/// One row of the tabulated curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPoint {
    pub redshift: f64,
    pub sigma_mu: f64,
}

/// `points` evenly spaced values from `start` to `stop`, both included.
///
/// A single point yields `[start]`. The last value is set to `stop` exactly.
pub fn redshift_grid(start: f64, stop: f64, points: usize) -> Result<Vec<f64>, UncertaintyError> {
    match points {
        0 => Err(UncertaintyError::InvalidInputShape),
        1 => Ok(vec![start]),
        n => {
            let step = (stop - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            grid[n - 1] = stop;
            Ok(grid)
        }
    }
}

/// Evaluate σ_μ over the configured grid.
///
/// Positivity errors from the propagator pass through unchanged, so a grid
/// starting at z ≤ 0 fails with [`UncertaintyError::NonPositiveRedshift`].
pub fn evaluate_grid(
    grid: &GridConfig,
    contributions: &VarianceContributions,
) -> Result<Vec<GridPoint>, UncertaintyError> {
    let redshifts = redshift_grid(grid.start, grid.stop, grid.points)?;
    let sigma_mu = propagate_to_magnitude_uncertainty(&redshifts, contributions)?;

    Ok(redshifts
        .into_iter()
        .zip(sigma_mu)
        .map(|(redshift, sigma_mu)| GridPoint { redshift, sigma_mu })
        .collect())
}
