use sumfact_quadrature::integrate;
use sumfact_quadrature::univariate::{gauss, gauss_lobatto, trapezoidal, try_gauss_lobatto};
use sumfact_quadrature::Error;

use matrixcompare::assert_scalar_eq;
use proptest::prelude::*;

fn monomial_integral(alpha: i32) -> f64 {
    (1.0 - (-1.0f64).powi(alpha + 1)) / (alpha as f64 + 1.0)
}

#[test]
fn gauss_rules_satisfy_expected_accuracy() {
    for n in 1..=60 {
        let expected_polynomial_degree = 2 * n - 1;
        let rule = gauss(n);

        // Also test that weights are positive
        assert!(rule.0.iter().all(|&w| w > 0.0));

        // Monomials of high degree lose accuracy to cancellation, so cap the degree we test
        for alpha in 0..=expected_polynomial_degree.min(40) as i32 {
            let estimated_integral = integrate(&rule, |x| x[0].powi(alpha));
            assert_scalar_eq!(estimated_integral, monomial_integral(alpha), comp = abs, tol = 1e-13);
        }
    }
}

#[test]
fn gauss_lobatto_rules_satisfy_expected_accuracy() {
    assert!(try_gauss_lobatto(0).is_none());
    assert!(try_gauss_lobatto(1).is_none());
    assert_eq!(gauss_lobatto(1), Err(Error::NoRuleAvailable));

    let available_n = (2..=40).chain([64, 128]);

    for n in available_n {
        let expected_polynomial_degree = 2 * n - 3;
        let rule = try_gauss_lobatto(n).unwrap();

        // Check that rule contains endpoints, like Gauss-Lobatto should
        assert_eq!(rule.1.first().unwrap(), &[-1.0]);
        assert_eq!(rule.1.last().unwrap(), &[1.0]);

        // Also test that weights are positive
        assert!(rule.0.iter().all(|&w| w > 0.0));

        for alpha in 0..=expected_polynomial_degree.min(40) as i32 {
            let estimated_integral = integrate(&rule, |x| x[0].powi(alpha));
            assert_scalar_eq!(estimated_integral, monomial_integral(alpha), comp = abs, tol = 1e-13);
        }
    }
}

#[test]
fn odd_rules_have_exact_midpoint() {
    for n in [1, 3, 5, 7, 9, 19] {
        assert_eq!(gauss(n).1[n / 2], [0.0]);
        if n > 1 {
            assert_eq!(gauss_lobatto(n).unwrap().1[n / 2], [0.0]);
        }
    }
}

#[test]
fn trapezoidal_rule_integrates_linear_functions() {
    let rule = trapezoidal();
    assert_scalar_eq!(integrate(&rule, |_| 1.0), 2.0);
    assert_scalar_eq!(integrate(&rule, |x| 3.0 * x[0] + 1.0), 2.0);
}

proptest! {
    #[test]
    fn rules_are_sorted_and_mirror_symmetric(n in 2usize..80) {
        for (weights, points) in [gauss(n), gauss_lobatto(n).unwrap()] {
            prop_assert!(points.windows(2).all(|pair| pair[0][0] < pair[1][0]));
            for i in 0..n {
                prop_assert_eq!(points[i][0], -points[n - 1 - i][0]);
                prop_assert_eq!(weights[i], weights[n - 1 - i]);
            }
            let weight_sum: f64 = weights.iter().sum();
            prop_assert!((weight_sum - 2.0).abs() <= 1e-13);
        }
    }
}
