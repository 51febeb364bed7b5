//! Reference supernova catalog (JSON export of the spectroscopic table).
//!
//! ```json
//! [{"name": "SN1997Y", "zcmb": 0.0166, "zcor": 0.0170, "ra": 192.2, "dec": 54.9}]
//! ```

use std::path::Path;

use pecvel_common::consts::SPEED_OF_LIGHT_KM_S;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;

/// One reference-catalog supernova.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub name: String,
    /// CMB-frame redshift.
    pub zcmb: f64,
    /// CMB-frame redshift corrected for peculiar velocity.
    pub zcor: f64,
    #[serde(default)]
    pub ra: Option<f64>,
    #[serde(default)]
    pub dec: Option<f64>,
}

impl ReferenceRecord {
    /// Peculiar velocity implied by this record's correction [km/s].
    #[inline]
    pub fn peculiar_velocity(&self) -> f64 {
        peculiar_velocity(self.zcor, self.zcmb)
    }
}

/// Peculiar velocity that turns `z_cmb` into `z_corrected` [km/s].
///
/// ```text
/// v = c · ((1 + z_corrected) / (1 + z_cmb) − 1)
/// ```
#[inline]
pub fn peculiar_velocity(z_corrected: f64, z_cmb: f64) -> f64 {
    SPEED_OF_LIGHT_KM_S * ((1.0 + z_corrected) / (1.0 + z_cmb) - 1.0)
}

/// Parse a reference catalog from JSON text.
pub fn parse_reference_catalog(text: &str) -> Result<Vec<ReferenceRecord>, CatalogError> {
    Ok(serde_json::from_str(text)?)
}

/// Read a reference catalog JSON file.
pub fn load_reference_catalog(path: &Path) -> Result<Vec<ReferenceRecord>, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_reference_catalog(&text)?;
    debug!("reference catalog {}: {} records", path.display(), records.len());
    Ok(records)
}
