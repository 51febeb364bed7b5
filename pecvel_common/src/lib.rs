//! pecvel Common Library
//!
//! Shared physical constants, reference defaults and configuration loading
//! for the pecvel workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Physical constants, variance defaults and audit thresholds
//! - [`config`] - Configuration loading trait and TOML sections
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use pecvel_common::consts::SPEED_OF_LIGHT_KM_S;
//! use pecvel_common::config::{ConfigLoader, PecvelConfig};
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
