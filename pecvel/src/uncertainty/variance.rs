//! Velocity-space variance budget.

use pecvel_common::config::{VarianceConfig, invalid_variance_term};
use pecvel_common::consts::{
    DEFAULT_SIGMA_LINEAR_THEORY, DEFAULT_SIGMA_MISSING_DATA, DEFAULT_SIGMA_SHOT_NOISE,
};

use crate::error::UncertaintyError;

/// Three independent peculiar-velocity error sources [km/s].
///
/// Each term is a standard deviation. Zero drops a term, which is how a
/// caller avoids double counting an uncertainty it already propagates
/// elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceContributions {
    /// Breakdown of linear-theory flow modelling.
    pub linear_theory: f64,
    /// Shot noise of the reconstructed velocity field.
    pub shot_noise: f64,
    /// Incomplete survey coverage.
    pub missing_data: f64,
}

impl Default for VarianceContributions {
    fn default() -> Self {
        Self {
            linear_theory: DEFAULT_SIGMA_LINEAR_THEORY,
            shot_noise: DEFAULT_SIGMA_SHOT_NOISE,
            missing_data: DEFAULT_SIGMA_MISSING_DATA,
        }
    }
}

impl From<VarianceConfig> for VarianceContributions {
    fn from(cfg: VarianceConfig) -> Self {
        Self {
            linear_theory: cfg.linear_theory,
            shot_noise: cfg.shot_noise,
            missing_data: cfg.missing_data,
        }
    }
}

impl VarianceContributions {
    /// Build a validated budget.
    pub fn new(
        linear_theory: f64,
        shot_noise: f64,
        missing_data: f64,
    ) -> Result<Self, UncertaintyError> {
        let contributions = Self {
            linear_theory,
            shot_noise,
            missing_data,
        };
        contributions.validate()?;
        Ok(contributions)
    }

    /// Check that every term is a finite velocity >= 0.
    ///
    /// Reports the first offending term in declaration order.
    pub fn validate(&self) -> Result<(), UncertaintyError> {
        match invalid_variance_term([self.linear_theory, self.shot_noise, self.missing_data]) {
            Some((name, value)) => Err(UncertaintyError::InvalidParameterType { name, value }),
            None => Ok(()),
        }
    }

    /// Total velocity dispersion [km/s], terms added in quadrature.
    #[inline]
    pub fn total_velocity(&self) -> f64 {
        (self.linear_theory * self.linear_theory
            + self.shot_noise * self.shot_noise
            + self.missing_data * self.missing_data)
            .sqrt()
    }
}
