//! # pecvel
//!
//! Peculiar-velocity uncertainty for supernova cosmology.
//!
//! Correcting supernova redshifts for peculiar motion relative to the CMB
//! frame leaves a residual redshift uncertainty. This crate turns a
//! velocity variance budget into σ_z and then into a per-supernova
//! distance-modulus uncertainty σ_μ(z), ready for the diagonal of a
//! covariance matrix.
//!
//! ## Layout
//!
//! - [`uncertainty`] — the pure numerical core (σ_z, σ_μ).
//! - [`grid`] — σ_μ tabulated over a redshift range.
//! - [`catalog`] — FITRES and reference-catalog readers.
//! - [`audit`] — cross-match of two catalogs' redshifts and velocities.
//! - [`error`] — typed errors.
//!
//! ## Example
//!
//! ```
//! use pecvel::uncertainty::{propagate_to_magnitude_uncertainty, VarianceContributions};
//!
//! let sigma_mu = propagate_to_magnitude_uncertainty(
//!     &[0.01, 0.05, 0.1],
//!     &VarianceContributions::default(),
//! )
//! .unwrap();
//! assert!((sigma_mu[0] - 0.1613).abs() < 1e-4);
//! ```

pub mod audit;
pub mod catalog;
pub mod error;
pub mod grid;
pub mod uncertainty;

pub use error::{CatalogError, UncertaintyError};
pub use uncertainty::{
    VarianceContributions, estimate_redshift_uncertainty, propagate_to_magnitude_uncertainty,
};
