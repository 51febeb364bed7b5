//! Reference values for the default 150/125/100 km/s budget.

use pecvel::uncertainty::{
    VarianceContributions, distance_modulus_slope, estimate_redshift_uncertainty,
    propagate_to_magnitude_uncertainty,
};
use pecvel::UncertaintyError;

const TOLERANCE: f64 = 1e-9;

#[test]
fn default_sigma_z() {
    let sigma_z = estimate_redshift_uncertainty(&VarianceContributions::default()).unwrap();
    assert!((sigma_z - 48125.0_f64.sqrt() / 299_792.0).abs() < 1e-15);
    assert!((sigma_z - 7.317_544e-4).abs() < 1e-9);
}

#[test]
fn default_sigma_mu_regression() {
    let sigma_mu =
        propagate_to_magnitude_uncertainty(&[0.01, 0.05, 0.1], &VarianceContributions::default())
            .unwrap();
    let expected = [0.161_285_874_4, 0.034_182_543_55, 0.018_311_154_15];
    assert_eq!(sigma_mu.len(), expected.len());
    for (got, want) in sigma_mu.iter().zip(expected) {
        assert!((got - want).abs() < TOLERANCE, "got {got}, want {want}");
    }
}

#[test]
fn sigma_mu_is_sigma_z_times_slope() {
    let contributions = VarianceContributions::new(0.0, 125.0, 100.0).unwrap();
    let sigma_z = estimate_redshift_uncertainty(&contributions).unwrap();
    let z = [0.003, 0.02, 0.08, 0.4];
    let sigma_mu = propagate_to_magnitude_uncertainty(&z, &contributions).unwrap();
    for (zi, s) in z.iter().zip(&sigma_mu) {
        assert_eq!(*s, sigma_z * distance_modulus_slope(*zi));
    }
}

#[test]
fn dropping_linear_theory_reduces_uncertainty() {
    let full = VarianceContributions::default();
    let no_lt = VarianceContributions {
        linear_theory: 0.0,
        ..full
    };
    let a = estimate_redshift_uncertainty(&full).unwrap();
    let b = estimate_redshift_uncertainty(&no_lt).unwrap();
    assert!(b < a);
    assert!((b - (125.0_f64.powi(2) + 100.0_f64.powi(2)).sqrt() / 299_792.0).abs() < 1e-15);
}

#[test]
fn invalid_inputs_from_reference_cases() {
    let defaults = VarianceContributions::default();

    assert!(matches!(
        propagate_to_magnitude_uncertainty(&[0.1, -0.1, 2.0], &defaults),
        Err(UncertaintyError::NonPositiveRedshift { index: 1, .. })
    ));
    assert!(matches!(
        propagate_to_magnitude_uncertainty(&[0.1, 0.1, 2.0, 0.0], &defaults),
        Err(UncertaintyError::NonPositiveRedshift { index: 3, .. })
    ));
    assert_eq!(
        propagate_to_magnitude_uncertainty(&[], &defaults),
        Err(UncertaintyError::InvalidInputShape)
    );
    assert!(matches!(
        VarianceContributions::new(150.0, -125.0, 100.0),
        Err(UncertaintyError::InvalidParameterType {
            name: "shot_noise",
            ..
        })
    ));
}
