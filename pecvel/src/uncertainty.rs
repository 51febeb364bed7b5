//! Peculiar-velocity uncertainty core.
//!
//! Two pure functions, no state, no logging:
//!
//! 1. [`estimate_redshift_uncertainty`] — combines the velocity variance
//!    budget in quadrature and converts it to a redshift uncertainty σ_z.
//! 2. [`propagate_to_magnitude_uncertainty`] — maps σ_z to a per-supernova
//!    distance-modulus uncertainty σ_μ(z) through dμ/dz.
//!
//! σ_μ is meant to be added to the diagonal of a supernova covariance
//! matrix. Callers that propagate errors in redshift space use σ_z directly.

pub mod magnitude;
pub mod redshift;
pub mod variance;

pub use magnitude::{distance_modulus_slope, propagate_to_magnitude_uncertainty};
pub use redshift::estimate_redshift_uncertainty;
pub use variance::VarianceContributions;
