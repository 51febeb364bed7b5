//! Cross-match audit between a FITRES table and a reference catalog.
//!
//! Pairs every FITRES candidate whose `CID` appears inside a reference
//! `name`, then compares redshifts and peculiar velocities:
//!
//! - zCMB should agree closely; disagreement means the two catalogs
//!   disagree on the input redshift, not on the velocity correction.
//! - zHD (FITRES) against zcor (reference) measures the correction itself.
//! - The velocity difference isolates the peculiar-velocity model.
//!
//! Pairing is a plain substring test, so one candidate can match several
//! reference names and vice versa. Every combination is kept.

use bitflags::bitflags;
use pecvel_common::config::AuditConfig;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{FitresRecord, ReferenceRecord};

bitflags! {
    /// Disagreements found on a matched pair.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AuditFlags: u8 {
        /// Relative zCMB difference above tolerance.
        const ZCMB_MISMATCH = 0x01;
        /// Relative zHD / zcor difference above tolerance. Counts as bad.
        const ZHD_MISMATCH  = 0x02;
        /// Peculiar velocities differ by more than the threshold while the
        /// FITRES velocity is non-zero.
        const VPEC_MISMATCH = 0x04;
    }
}

impl Default for AuditFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for AuditFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

/// FITRES side of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitresSide {
    pub zcmb: f64,
    pub zhd: f64,
    pub vpec: f64,
}

/// Reference side of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceSide {
    pub zcmb: f64,
    pub zcor: f64,
    /// Velocity implied by `zcor` and `zcmb` [km/s].
    pub vpec: f64,
    pub ra: Option<f64>,
    pub dec: Option<f64>,
}

/// One FITRES candidate matched to one reference supernova.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    pub cid: String,
    pub name: String,
    pub fitres: FitresSide,
    pub reference: ReferenceSide,
    pub flags: AuditFlags,
}

/// `1 − a / b`, the relative difference used throughout the audit.
///
/// NaN when both are zero; such a pair is never flagged.
#[inline]
pub fn relative_difference(a: f64, b: f64) -> f64 {
    1.0 - a / b
}

impl MatchedPair {
    fn new(fitres: &FitresRecord, reference: &ReferenceRecord, cfg: &AuditConfig) -> Self {
        let fitres_side = FitresSide {
            zcmb: fitres.zcmb,
            zhd: fitres.zhd,
            vpec: fitres.vpec,
        };
        let reference_side = ReferenceSide {
            zcmb: reference.zcmb,
            zcor: reference.zcor,
            vpec: reference.peculiar_velocity(),
            ra: reference.ra,
            dec: reference.dec,
        };

        let mut flags = AuditFlags::empty();
        if relative_difference(reference.zcmb, fitres.zcmb).abs() > cfg.zcmb_tolerance {
            flags |= AuditFlags::ZCMB_MISMATCH;
        }
        if relative_difference(reference.zcor, fitres.zhd).abs() > cfg.zhd_tolerance {
            flags |= AuditFlags::ZHD_MISMATCH;
        }
        if fitres.vpec != 0.0 && (reference_side.vpec - fitres.vpec).abs() > cfg.vpec_threshold {
            flags |= AuditFlags::VPEC_MISMATCH;
        }

        Self {
            cid: fitres.cid.clone(),
            name: reference.name.clone(),
            fitres: fitres_side,
            reference: reference_side,
            flags,
        }
    }

    /// Reference minus FITRES peculiar velocity [km/s].
    #[inline]
    pub fn delta_vpec(&self) -> f64 {
        self.reference.vpec - self.fitres.vpec
    }

    /// Reference zcor minus FITRES zHD.
    #[inline]
    pub fn delta_zhd(&self) -> f64 {
        self.reference.zcor - self.fitres.zhd
    }

    /// `1 − zcor / zHD`.
    #[inline]
    pub fn zhd_relative_difference(&self) -> f64 {
        relative_difference(self.reference.zcor, self.fitres.zhd)
    }
}

/// Result of one audit run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditReport {
    pub pairs: Vec<MatchedPair>,
    /// FITRES records with no reference match.
    pub unmatched: usize,
}

impl AuditReport {
    /// Pairs whose zHD disagrees beyond tolerance.
    pub fn bad_count(&self) -> usize {
        self.count(AuditFlags::ZHD_MISMATCH)
    }

    /// Pairs whose zCMB disagrees beyond tolerance.
    pub fn zcmb_mismatch_count(&self) -> usize {
        self.count(AuditFlags::ZCMB_MISMATCH)
    }

    /// Pairs with a peculiar-velocity disagreement.
    pub fn problems(&self) -> impl Iterator<Item = &MatchedPair> {
        self.pairs
            .iter()
            .filter(|p| p.flags.contains(AuditFlags::VPEC_MISMATCH))
    }

    fn count(&self, flag: AuditFlags) -> usize {
        self.pairs.iter().filter(|p| p.flags.contains(flag)).count()
    }
}

/// Match FITRES candidates against the reference catalog and flag
/// disagreements.
///
/// `cfg.max_rows` limits how many FITRES records take part.
pub fn crossmatch(
    fitres: &[FitresRecord],
    reference: &[ReferenceRecord],
    cfg: &AuditConfig,
) -> AuditReport {
    let limit = cfg.max_rows.unwrap_or(fitres.len()).min(fitres.len());
    let mut report = AuditReport::default();

    for candidate in &fitres[..limit] {
        let before = report.pairs.len();

        for sn in reference.iter().filter(|sn| sn.name.contains(&candidate.cid)) {
            let pair = MatchedPair::new(candidate, sn, cfg);
            if pair.flags.contains(AuditFlags::ZCMB_MISMATCH) {
                warn!(
                    cid = %pair.cid,
                    name = %pair.name,
                    "zCMB disagrees: reference {} vs FITRES {}",
                    pair.reference.zcmb,
                    pair.fitres.zcmb
                );
            }
            if pair.flags.contains(AuditFlags::ZHD_MISMATCH) {
                debug!(
                    cid = %pair.cid,
                    "zHD relative difference {:.3}%",
                    pair.zhd_relative_difference().abs() * 100.0
                );
            }
            report.pairs.push(pair);
        }

        if report.pairs.len() == before {
            report.unmatched += 1;
        }
    }

    info!(
        "audit matched {} pairs from {} candidates ({} unmatched), {} bad zHD, {} velocity problems",
        report.pairs.len(),
        limit,
        report.unmatched,
        report.bad_count(),
        report.problems().count()
    );
    report
}
