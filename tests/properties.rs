use aliastables::{AliasTable, Precision, discretize};
use proptest::prelude::*;

fn coefficients() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..100.0, 1..40)
        .prop_filter("needs positive mass", |c| c.iter().sum::<f64>() > 0.0)
}

proptest! {
    #[test]
    fn prop_reconstruction_within_epsilon(
        coeffs in coefficients(),
        eps_exp in 1i32..16,
    ) {
        let eps = 2f64.powi(-eps_exp);
        let table = AliasTable::new(&coeffs, eps).unwrap();

        let err = table.max_error(&coeffs).unwrap();
        prop_assert!(err <= eps + 1e-12, "err={} eps={}", err, eps);
    }

    #[test]
    fn prop_table_shape(
        coeffs in coefficients(),
        mu in 0u32..20,
    ) {
        let table = AliasTable::with_precision(&coeffs, Precision::Bits(mu)).unwrap();
        let n = coeffs.len();

        prop_assert_eq!(table.len(), n);
        prop_assert_eq!(table.mu(), mu);
        prop_assert!(table.keep().iter().all(|&k| k <= 1u64 << mu));
        prop_assert!(table.alt().iter().all(|&a| a < n));
        for (i, (&k, &a)) in table.keep().iter().zip(table.alt()).enumerate() {
            if k == 1u64 << mu {
                prop_assert_eq!(a, i);
            }
        }
    }

    #[test]
    fn prop_alias_preserves_discretized_mass(
        coeffs in coefficients(),
        mu in 0u32..20,
    ) {
        let d = discretize(&coeffs, Precision::Bits(mu)).unwrap();
        prop_assert_eq!(d.numerators().iter().sum::<u64>(), d.denominator());

        let table = AliasTable::from_discretized(&d);
        let denom = d.denominator() as f64;
        let expected: Vec<f64> = d.numerators().iter().map(|&x| x as f64 / denom).collect();
        prop_assert_eq!(table.probabilities(), expected);
    }

    #[test]
    fn prop_rebuild_is_identical(
        coeffs in coefficients(),
        eps in 1e-6f64..1.0,
    ) {
        let a = AliasTable::new(&coeffs, eps).unwrap();
        let b = AliasTable::new(&coeffs, eps).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_scaling_coefficients_is_invisible(
        coeffs in coefficients(),
        mu in 0u32..12,
    ) {
        let halved: Vec<f64> = coeffs.iter().map(|c| c / 2.0).collect();
        let a = AliasTable::with_precision(&coeffs, Precision::Bits(mu)).unwrap();
        let b = AliasTable::with_precision(&halved, Precision::Bits(mu)).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn singleton_keeps_itself() {
    for mu in [0, 1, 7, 30] {
        let table = AliasTable::with_precision(&[0.25], Precision::Bits(mu)).unwrap();
        assert_eq!(table.keep(), &[1u64 << mu]);
        assert_eq!(table.alt(), &[0]);
        assert_eq!(table.probabilities(), vec![1.0]);
    }
}
