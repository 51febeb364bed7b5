//! Redshift uncertainty from the peculiar-velocity variance budget.

use pecvel_common::consts::SPEED_OF_LIGHT_KM_S;

use super::variance::VarianceContributions;
use crate::error::UncertaintyError;

/// Peculiar-velocity-induced redshift uncertainty σ_z (dimensionless).
///
/// ```text
/// σ_z = sqrt(σ_lt² + σ_sn² + σ_md²) / c
/// ```
///
/// The three terms are independent Gaussian errors, so they add in
/// quadrature. Dividing by c uses δz ≈ v/c for small velocities.
///
/// # Errors
/// [`UncertaintyError::InvalidParameterType`] if any term is negative or
/// not finite. Nothing is computed in that case.
///
/// # Example
/// ```
/// use pecvel::uncertainty::{estimate_redshift_uncertainty, VarianceContributions};
///
/// let sigma_z = estimate_redshift_uncertainty(&VarianceContributions::default()).unwrap();
/// assert!((sigma_z - 7.317544e-4).abs() < 1e-9);
/// ```
pub fn estimate_redshift_uncertainty(
    contributions: &VarianceContributions,
) -> Result<f64, UncertaintyError> {
    contributions.validate()?;
    Ok(contributions.total_velocity() / SPEED_OF_LIGHT_KM_S)
}
