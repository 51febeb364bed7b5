//! Constants for the pecvel workspace.
//!
//! Single source of truth for the physical constant, the reference variance
//! contributions and the audit thresholds. Imported by all crates.

// ─── Physics ────────────────────────────────────────────────────────

/// Speed of light [km/s].
///
/// Kept at the precision the reference variance budget was calibrated
/// against (2.99792e5), not the full SI value.
pub const SPEED_OF_LIGHT_KM_S: f64 = 2.99792e5;

// ─── Peculiar-velocity variance budget [km/s] ───────────────────────

/// Breakdown of linear-theory flow modelling beyond the reconstruction scale.
pub const DEFAULT_SIGMA_LINEAR_THEORY: f64 = 150.0;

/// Shot noise in the 2M++ reconstructed velocity field.
pub const DEFAULT_SIGMA_SHOT_NOISE: f64 = 125.0;

/// Incomplete sky/volume coverage of the 2M++ survey.
pub const DEFAULT_SIGMA_MISSING_DATA: f64 = 100.0;

// ─── Redshift grid ──────────────────────────────────────────────────

/// First redshift of the default evaluation grid.
pub const DEFAULT_GRID_START: f64 = 0.001;

/// Last redshift of the default evaluation grid (inclusive).
pub const DEFAULT_GRID_STOP: f64 = 0.1;

/// Number of points in the default evaluation grid.
pub const DEFAULT_GRID_POINTS: usize = 100;

// ─── Catalog audit ──────────────────────────────────────────────────

/// Maximum relative zCMB difference before a matched pair is flagged.
pub const ZCMB_RELATIVE_TOLERANCE: f64 = 0.001;

/// Maximum relative zHD difference before a matched pair counts as bad.
pub const ZHD_RELATIVE_TOLERANCE: f64 = 0.01;

/// Peculiar-velocity disagreement [km/s] above which a pair is a problem.
pub const VPEC_PROBLEM_THRESHOLD: f64 = 15.0;

// ─── Variance terms ─────────────────────────────────────────────────

/// Names of the three variance terms, in budget order.
pub const VARIANCE_TERM_NAMES: [&str; 3] = ["linear_theory", "shot_noise", "missing_data"];
