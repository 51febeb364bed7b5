//! Distance-modulus uncertainty from the redshift uncertainty.
//!
//! Low-redshift distance modulus:
//! ```text
//! μ(z) ≈ 5·log10[(c/H0)·z·(1 + z/2)·(1 + z)] + const
//! ```
//! A redshift error σ_z maps to σ_μ through the local slope of μ(z). The
//! slope falls with z: the same velocity perturbation is a smaller
//! fractional distance error further out.

use core::f64::consts::LN_10;

use super::redshift::estimate_redshift_uncertainty;
use super::variance::VarianceContributions;
use crate::error::UncertaintyError;

/// Jacobian factor relating σ_z to σ_μ at redshift `z`.
///
/// ```text
/// (5 / ln 10) · (1 + z)² / (z · (1 + z/2))
/// ```
///
/// Evaluated as two bounded ratios, `(1+z)/z` and `(1+z)/(1+z/2)`, so it
/// stays finite for large z (limit 10/ln 10).
///
/// `z` must be finite and > 0; no check is done here.
#[inline]
pub fn distance_modulus_slope(z: f64) -> f64 {
    let one_plus_z = 1.0 + z;
    (5.0 / LN_10) * (one_plus_z / z) * (one_plus_z / (1.0 + 0.5 * z))
}

/// Reject empty input and any redshift that is not finite and > 0.
///
/// Scans the whole slice before any output exists.
fn validate_redshifts(redshifts: &[f64]) -> Result<(), UncertaintyError> {
    if redshifts.is_empty() {
        return Err(UncertaintyError::InvalidInputShape);
    }
    for (index, &value) in redshifts.iter().enumerate() {
        if value.is_infinite() {
            return Err(UncertaintyError::NonFiniteRedshift { index, value });
        }
        // `!(x > 0)` also catches NaN.
        if !(value > 0.0) {
            return Err(UncertaintyError::NonPositiveRedshift { index, value });
        }
    }
    Ok(())
}

/// Per-redshift distance-modulus uncertainty from peculiar velocities.
///
/// ```text
/// σ_μ(z) = σ_z · (5 / ln 10) · (1 + z)² / (z · (1 + z/2))
/// ```
///
/// Output has the same length and order as `redshifts`.
///
/// # Errors
/// - [`UncertaintyError::InvalidInputShape`] for an empty slice.
/// - [`UncertaintyError::NonPositiveRedshift`] for any z ≤ 0 or NaN.
/// - [`UncertaintyError::NonFiniteRedshift`] for any infinite z.
/// - [`UncertaintyError::InvalidParameterType`] for a bad variance term.
///
/// # Example
/// ```
/// use pecvel::uncertainty::{propagate_to_magnitude_uncertainty, VarianceContributions};
///
/// let sigma_mu =
///     propagate_to_magnitude_uncertainty(&[0.01, 0.1], &VarianceContributions::default()).unwrap();
/// assert_eq!(sigma_mu.len(), 2);
/// assert!(sigma_mu[0] > sigma_mu[1]);
/// ```
pub fn propagate_to_magnitude_uncertainty(
    redshifts: &[f64],
    contributions: &VarianceContributions,
) -> Result<Vec<f64>, UncertaintyError> {
    validate_redshifts(redshifts)?;
    let sigma_z = estimate_redshift_uncertainty(contributions)?;

    // Slope overflows for subnormal z; a zero budget is zero everywhere.
    if sigma_z == 0.0 {
        return Ok(vec![0.0; redshifts.len()]);
    }

    Ok(redshifts
        .iter()
        .map(|&z| sigma_z * distance_modulus_slope(z))
        .collect())
}
