//! Typed errors for uncertainty propagation and catalog ingestion.
//!
//! Core operations validate their whole input before computing anything,
//! so a returned error always means no output was produced.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the peculiar-velocity uncertainty core.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum UncertaintyError {
    /// A variance contribution is not a real, non-negative velocity.
    #[error("variance contribution `{name}` must be a finite velocity >= 0 km/s, got {value}")]
    InvalidParameterType { name: &'static str, value: f64 },

    /// The redshift input is not a usable sequence (e.g. it is empty).
    #[error("redshifts must be a non-empty sequence")]
    InvalidInputShape,

    /// A redshift is zero, negative or NaN.
    #[error("redshift at index {index} must be strictly positive, got {value}")]
    NonPositiveRedshift { index: usize, value: f64 },

    /// A redshift is infinite.
    #[error("redshift at index {index} must be finite, got {value}")]
    NonFiniteRedshift { index: usize, value: f64 },
}

/// Errors from reading FITRES tables and reference catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required header line is absent.
    #[error("missing `{0}` header")]
    MissingHeader(&'static str),

    /// NVAR disagrees with the number of VARNAMES.
    #[error("NVAR declares {declared} columns but VARNAMES lists {listed}")]
    HeaderMismatch { declared: usize, listed: usize },

    /// A header line could not be parsed.
    #[error("line {line}: malformed header: {detail}")]
    MalformedHeader { line: usize, detail: String },

    /// A data row has the wrong number of values.
    #[error("line {line}: expected {expected} values, found {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A required column is not in the table.
    #[error("column `{0}` not found")]
    MissingColumn(String),

    /// A cell in a numeric column is not a number.
    #[error("row {row}, column `{column}`: `{value}` is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    /// Reference catalog JSON is malformed.
    #[error("invalid reference catalog: {0}")]
    Json(#[from] serde_json::Error),
}
