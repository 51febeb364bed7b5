//! Prelude module for common re-exports.
//!
//! ```rust
//! use pecvel_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    AuditConfig, ConfigError, ConfigLoader, GridConfig, PecvelConfig, SharedConfig,
    VarianceConfig,
};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::SPEED_OF_LIGHT_KM_S;
