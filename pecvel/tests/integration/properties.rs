//! Property-based checks of the uncertainty core.

use pecvel::uncertainty::{
    VarianceContributions, estimate_redshift_uncertainty, propagate_to_magnitude_uncertainty,
};
use proptest::prelude::*;

fn sigma() -> impl Strategy<Value = f64> {
    0.0f64..2_000.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn quadrature_identity(a in sigma(), b in sigma(), c in sigma()) {
        let v = VarianceContributions::new(a, b, c).unwrap();
        let sigma_z = estimate_redshift_uncertainty(&v).unwrap();
        let expected = (a * a + b * b + c * c).sqrt() / 299_792.0;
        prop_assert!((sigma_z - expected).abs() <= 1e-12 * expected.max(1.0));
        prop_assert!(sigma_z >= 0.0);
    }

    #[test]
    fn strictly_decreasing_in_redshift(z in 1e-4f64..5.0, dz in 1e-3f64..1.0) {
        let out = propagate_to_magnitude_uncertainty(
            &[z, z + dz],
            &VarianceContributions::default(),
        )
        .unwrap();
        prop_assert!(out[1] < out[0], "sigma_mu({}) = {} !< sigma_mu({}) = {}", z + dz, out[1], z, out[0]);
    }

    #[test]
    fn finite_and_bounded_for_any_positive_redshift(exp in -300.0f64..300.0) {
        let z = 10f64.powf(exp);
        let v = VarianceContributions::default();
        let sigma_z = estimate_redshift_uncertainty(&v).unwrap();
        let out = propagate_to_magnitude_uncertainty(&[z], &v).unwrap();
        // σ_μ decreases towards σ_z · 10/ln 10 as z → ∞.
        let floor = sigma_z * 10.0 / std::f64::consts::LN_10;
        prop_assert!(out[0].is_finite(), "z = {}: {}", z, out[0]);
        prop_assert!(out[0] >= floor * (1.0 - 1e-12), "z = {}: {} below {}", z, out[0], floor);
    }

    #[test]
    fn output_matches_input_length_and_order(zs in prop::collection::vec(1e-4f64..3.0, 1..64)) {
        let v = VarianceContributions::default();
        let out = propagate_to_magnitude_uncertainty(&zs, &v).unwrap();
        prop_assert_eq!(out.len(), zs.len());
        for (i, z) in zs.iter().enumerate() {
            let single = propagate_to_magnitude_uncertainty(&[*z], &v).unwrap();
            prop_assert_eq!(out[i].to_bits(), single[0].to_bits());
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical(zs in prop::collection::vec(1e-4f64..3.0, 1..16), a in sigma()) {
        let v = VarianceContributions::new(a, 125.0, 100.0).unwrap();
        let first = propagate_to_magnitude_uncertainty(&zs, &v).unwrap();
        let second = propagate_to_magnitude_uncertainty(&zs, &v).unwrap();
        let first: Vec<u64> = first.iter().map(|x| x.to_bits()).collect();
        let second: Vec<u64> = second.iter().map(|x| x.to_bits()).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn any_non_positive_element_fails_whole_call(
        mut zs in prop::collection::vec(1e-4f64..3.0, 1..32),
        bad in -5.0f64..=0.0,
        pos in any::<prop::sample::Index>(),
    ) {
        let idx = pos.index(zs.len());
        zs[idx] = bad;
        let result = propagate_to_magnitude_uncertainty(&zs, &VarianceContributions::default());
        prop_assert!(result.is_err());
    }
}
