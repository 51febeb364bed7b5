//! Catalog audit over files on disk: FITRES table + JSON reference catalog.

use pecvel::audit::{AuditFlags, crossmatch};
use pecvel::catalog::{FitresTable, load_reference_catalog, peculiar_velocity};
use pecvel::CatalogError;
use pecvel_common::config::AuditConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    fitres: PathBuf,
    catalog: PathBuf,
}

/// Four candidates:
/// - `1999ac` agrees everywhere;
/// - `2001ba` has a 60 km/s velocity disagreement;
/// - `2002de` has a zCMB disagreement and a zHD outlier, no FITRES velocity;
/// - `DES99` has no reference counterpart.
fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();

    let v_1999ac = peculiar_velocity(0.00965, 0.00950);
    let v_2001ba = peculiar_velocity(0.02960, 0.02950);

    let fitres = dir.path().join("FITOPT000.FITRES");
    fs::write(
        &fitres,
        format!(
            "\
# test fixture
NVAR: 5
VARNAMES: CID IDSURVEY zCMB zHD VPEC
SN: 1999ac 5 0.00950 0.00965 {v_1999ac}
SN: 2001ba 5 0.02950 0.02960 {}
SN: 2002de 5 0.02800 0.02800 0.0
SN: DES99 10 0.3000 0.3000 0.0
",
            v_2001ba - 60.0
        ),
    )
    .unwrap();

    let catalog = dir.path().join("reference.json");
    fs::write(
        &catalog,
        r#"[
  {"name": "SN1999ac", "zcmb": 0.00950, "zcor": 0.00965, "ra": 241.8, "dec": 7.97},
  {"name": "SN2001ba", "zcmb": 0.02950, "zcor": 0.02960},
  {"name": "SN2002de", "zcmb": 0.02850, "zcor": 0.02900},
  {"name": "SN2005xx", "zcmb": 0.05000, "zcor": 0.05000}
]"#,
    )
    .unwrap();

    Fixture {
        _dir: dir,
        fitres,
        catalog,
    }
}

#[test]
fn audit_flags_each_kind_of_disagreement() {
    let fx = fixture();
    let candidates = FitresTable::load(&fx.fitres).unwrap().records().unwrap();
    let reference = load_reference_catalog(&fx.catalog).unwrap();

    let report = crossmatch(&candidates, &reference, &AuditConfig::default());

    assert_eq!(report.pairs.len(), 3);
    assert_eq!(report.unmatched, 1);

    let by_cid = |cid: &str| report.pairs.iter().find(|p| p.cid == cid).unwrap();

    let clean = by_cid("1999ac");
    assert!(clean.flags.is_empty());
    assert_eq!(clean.reference.ra, Some(241.8));

    let velocity = by_cid("2001ba");
    assert_eq!(velocity.flags, AuditFlags::VPEC_MISMATCH);
    assert!((velocity.delta_vpec() - 60.0).abs() < 1e-6);

    let redshift = by_cid("2002de");
    assert!(redshift.flags.contains(AuditFlags::ZCMB_MISMATCH));
    assert!(redshift.flags.contains(AuditFlags::ZHD_MISMATCH));
    assert!(!redshift.flags.contains(AuditFlags::VPEC_MISMATCH));

    assert_eq!(report.bad_count(), 1);
    assert_eq!(report.zcmb_mismatch_count(), 1);
    let problems: Vec<_> = report.problems().map(|p| p.name.as_str()).collect();
    assert_eq!(problems, vec!["SN2001ba"]);
}

#[test]
fn looser_threshold_clears_velocity_problem() {
    let fx = fixture();
    let candidates = FitresTable::load(&fx.fitres).unwrap().records().unwrap();
    let reference = load_reference_catalog(&fx.catalog).unwrap();

    let cfg = AuditConfig {
        vpec_threshold: 100.0,
        ..Default::default()
    };
    let report = crossmatch(&candidates, &reference, &cfg);
    assert_eq!(report.problems().count(), 0);
}

#[test]
fn report_serializes_with_flag_bits() {
    let fx = fixture();
    let candidates = FitresTable::load(&fx.fitres).unwrap().records().unwrap();
    let reference = load_reference_catalog(&fx.catalog).unwrap();
    let report = crossmatch(&candidates, &reference, &AuditConfig::default());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["unmatched"], serde_json::json!(1));
    let flags: Vec<u64> = json["pairs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["flags"].as_u64().unwrap())
        .collect();
    assert!(flags.contains(&(AuditFlags::VPEC_MISMATCH.bits() as u64)));
}

#[test]
fn missing_files_report_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.FITRES");
    match FitresTable::load(&missing) {
        Err(CatalogError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(matches!(
        load_reference_catalog(&dir.path().join("absent.json")),
        Err(CatalogError::Io { .. })
    ));
}
