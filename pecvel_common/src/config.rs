//! Configuration loading trait and TOML sections.
//!
//! One TOML file drives every pecvel run: the variance budget, the
//! evaluation grid and the audit thresholds. Every section is optional
//! except `[shared]`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use pecvel_common::config::{ConfigError, ConfigLoader, PecvelConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = PecvelConfig::load(Path::new("config/pecvel.toml"))?;
//!     config.validate()?;
//!     println!("Run: {}", config.shared.run_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::consts::{
    DEFAULT_GRID_POINTS, DEFAULT_GRID_START, DEFAULT_GRID_STOP, DEFAULT_SIGMA_LINEAR_THEORY,
    DEFAULT_SIGMA_MISSING_DATA, DEFAULT_SIGMA_SHOT_NOISE, VARIANCE_TERM_NAMES,
    VPEC_PROBLEM_THRESHOLD, ZCMB_RELATIVE_TOLERANCE, ZHD_RELATIVE_TOLERANCE,
};

/// First variance term that is not a finite velocity >= 0.
///
/// `values` follow [`VARIANCE_TERM_NAMES`] order. Returns the term name and
/// the offending value.
pub fn invalid_variance_term(values: [f64; 3]) -> Option<(&'static str, f64)> {
    VARIANCE_TERM_NAMES
        .into_iter()
        .zip(values)
        .find(|&(_, value)| !value.is_finite() || value < 0.0)
}

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Fields shared by every pecvel run.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// run_name = "des-lowz"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Label attached to log output and reports.
    pub run_name: String,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            run_name: "pecvel".to_string(),
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `run_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "run_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Peculiar-velocity variance budget [km/s].
///
/// Setting a term to zero drops it, e.g. when a fitting pipeline already
/// carries the linear-theory uncertainty through its own parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VarianceConfig {
    pub linear_theory: f64,
    pub shot_noise: f64,
    pub missing_data: f64,
}

impl Default for VarianceConfig {
    fn default() -> Self {
        Self {
            linear_theory: DEFAULT_SIGMA_LINEAR_THEORY,
            shot_noise: DEFAULT_SIGMA_SHOT_NOISE,
            missing_data: DEFAULT_SIGMA_MISSING_DATA,
        }
    }
}

impl VarianceConfig {
    /// Each term must be a finite, non-negative velocity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match invalid_variance_term(self.values()) {
            Some((name, value)) => Err(ConfigError::ValidationError(format!(
                "variance.{name} must be finite and >= 0, got {value}"
            ))),
            None => Ok(()),
        }
    }

    /// Terms in [`VARIANCE_TERM_NAMES`] order.
    pub fn values(&self) -> [f64; 3] {
        [self.linear_theory, self.shot_noise, self.missing_data]
    }
}

/// Evenly spaced redshift grid for tabulating σ_μ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// First redshift (must be > 0).
    pub start: f64,
    /// Last redshift, inclusive.
    pub stop: f64,
    /// Number of grid points.
    pub points: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_GRID_START,
            stop: DEFAULT_GRID_STOP,
            points: DEFAULT_GRID_POINTS,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.start.is_finite() || self.start <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "grid.start must be > 0, got {}",
                self.start
            )));
        }
        if !self.stop.is_finite() || self.stop < self.start {
            return Err(ConfigError::ValidationError(format!(
                "grid.stop ({}) must be >= grid.start ({})",
                self.stop, self.start
            )));
        }
        if self.points == 0 {
            return Err(ConfigError::ValidationError(
                "grid.points must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Thresholds for the catalog cross-match audit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Relative zCMB disagreement that flags a pair.
    pub zcmb_tolerance: f64,
    /// Relative zHD disagreement that marks a pair as bad.
    pub zhd_tolerance: f64,
    /// Absolute peculiar-velocity disagreement [km/s] that marks a problem.
    pub vpec_threshold: f64,
    /// Only the first `max_rows` FITRES rows take part (None = all).
    pub max_rows: Option<usize>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            zcmb_tolerance: ZCMB_RELATIVE_TOLERANCE,
            zhd_tolerance: ZHD_RELATIVE_TOLERANCE,
            vpec_threshold: VPEC_PROBLEM_THRESHOLD,
            max_rows: None,
        }
    }
}

impl AuditConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("zcmb_tolerance", self.zcmb_tolerance),
            ("zhd_tolerance", self.zhd_tolerance),
            ("vpec_threshold", self.vpec_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "audit.{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Top-level pecvel configuration file.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// run_name = "des-lowz"
///
/// [variance]
/// linear_theory = 0.0
///
/// [audit]
/// max_rows = 500
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PecvelConfig {
    pub shared: SharedConfig,
    #[serde(default)]
    pub variance: VarianceConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

impl PecvelConfig {
    /// Validate every section, reporting the first failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.variance.validate()?;
        self.grid.validate()?;
        self.audit.validate()
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
///
/// Semantic validation is left to the caller (see [`PecvelConfig::validate`]).
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
