//! Evaluation driven by a TOML config file on disk.

use pecvel::grid::evaluate_grid;
use pecvel::uncertainty::{VarianceContributions, estimate_redshift_uncertainty};
use pecvel_common::config::{ConfigLoader, PecvelConfig};
use std::fs;
use tempfile::TempDir;

fn load(content: &str) -> PecvelConfig {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pecvel.toml");
    fs::write(&path, content).unwrap();
    let config = PecvelConfig::load(&path).unwrap();
    config.validate().unwrap();
    config
}

#[test]
fn zero_budget_from_config_gives_zero_sigma_z() {
    let config = load(
        r#"
[shared]
run_name = "no-pv"

[variance]
linear_theory = 0.0
shot_noise = 0.0
missing_data = 0.0
"#,
    );
    let contributions = VarianceContributions::from(config.variance);
    assert_eq!(estimate_redshift_uncertainty(&contributions).unwrap(), 0.0);
}

#[test]
fn grid_section_drives_evaluation() {
    let config = load(
        r#"
[shared]
run_name = "grid"

[grid]
start = 0.01
stop = 0.1
points = 10
"#,
    );
    let rows = evaluate_grid(&config.grid, &VarianceContributions::from(config.variance)).unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].redshift, 0.01);
    assert_eq!(rows[9].redshift, 0.1);
    assert!((rows[0].sigma_mu - 0.161_285_874_4).abs() < 1e-9);
    assert!((rows[9].sigma_mu - 0.018_311_154_15).abs() < 1e-9);
}

#[test]
fn grid_rows_serialize_to_json() {
    let config = load("[shared]\nrun_name = \"json\"\n[grid]\npoints = 2\n");
    let rows = evaluate_grid(&config.grid, &VarianceContributions::default()).unwrap();
    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[1]["redshift"], serde_json::json!(0.1));
    assert!(json[0]["sigma_mu"].as_f64().unwrap() > 1.5);
}
