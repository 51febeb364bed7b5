//! Catalog ingestion for the reconciliation audit.
//!
//! - [`fitres`] — SNANA FITRES fitted-results tables (`CID`, `zCMB`, `zHD`, `VPEC`).
//! - [`reference`] — reference supernova catalog exported as JSON
//!   (`name`, `zcmb`, `zcor`, `ra`, `dec`).
//!
//! Both only read. Nothing here feeds back into the uncertainty core.

pub mod fitres;
pub mod reference;

pub use fitres::{FitresRecord, FitresTable};
pub use reference::{ReferenceRecord, load_reference_catalog, peculiar_velocity};
