use matrixcompare::assert_scalar_eq;
use proptest::prelude::*;
use sumfact::quadrature::univariate::{from_points, gauss, gauss_lobatto, is_symmetric, iterated, trapezoidal};
use sumfact::quadrature::{coordinates_1d, Quadrature, QuadratureError, RuleError};

/// Exact integral of `x^k` over `[0, 1]`.
fn monomial_integral(k: i32) -> f64 {
    1.0 / (k as f64 + 1.0)
}

#[test]
fn gauss_integrates_polynomials_exactly() {
    for n in 1..=12 {
        let rule = gauss::<f64>(n);
        assert_eq!(rule.len(), n);
        for k in 0..(2 * n as i32) {
            let integral = rule.integrate(|x| x[0].powi(k));
            assert_scalar_eq!(integral, monomial_integral(k), comp = abs, tol = 1e-14);
        }
    }
}

#[test]
fn rules_are_converted_to_single_precision() {
    let (weights, points) = gauss::<f32>(3);
    assert_scalar_eq!(weights.iter().sum::<f32>(), 1.0, comp = abs, tol = 1e-6);
    assert_scalar_eq!(weights[1], 4.0 / 9.0, comp = abs, tol = 1e-6);
    assert_scalar_eq!(points[1][0], 0.5, comp = abs, tol = 1e-6);
}

#[test]
fn gauss_lobatto_contains_end_points() {
    for n in 2..=18 {
        let rule = gauss_lobatto::<f64>(n).unwrap();
        let points = coordinates_1d(&rule);
        assert_eq!(points.first(), Some(&0.0));
        assert_eq!(points.last(), Some(&1.0));
        for k in 0..(2 * n as i32 - 2) {
            let integral = rule.integrate(|x| x[0].powi(k));
            assert_scalar_eq!(integral, monomial_integral(k), comp = abs, tol = 1e-14);
        }
    }
}

#[test]
fn gauss_lobatto_requires_two_points() {
    assert_eq!(
        gauss_lobatto::<f64>(1),
        Err(QuadratureError::Rule(RuleError::NoRuleAvailable))
    );
}

#[test]
fn odd_rules_contain_exact_midpoint() {
    for n in [1, 3, 5, 9, 17] {
        let points = coordinates_1d(&gauss::<f64>(n));
        assert_eq!(points[n / 2], 0.5);
    }
    let points = coordinates_1d(&gauss_lobatto::<f64>(7).unwrap());
    assert_eq!(points[3], 0.5);
}

#[test]
fn iterated_trapezoidal_gives_equidistant_points() {
    let rule = iterated(&trapezoidal::<f64>(), 6).unwrap();
    let points = coordinates_1d(&rule);
    let expected = util::equidistant_points(6);
    assert_eq!(points.len(), expected.len());
    for (x, x_expected) in points.iter().zip(&expected) {
        assert_scalar_eq!(*x, *x_expected, comp = abs, tol = 1e-15);
    }
    assert_scalar_eq!(rule.0.iter().sum::<f64>(), 1.0, comp = abs, tol = 1e-15);
}

#[test]
fn from_points_is_interpolatory() {
    let rule = from_points::<f64>(&[0.2, 0.4, 0.5, 0.7]).unwrap();
    for k in 0..4 {
        let integral = rule.integrate(|x| x[0].powi(k));
        assert_scalar_eq!(integral, monomial_integral(k), comp = abs, tol = 1e-13);
    }
}

#[test]
fn symmetry_of_rules() {
    assert!(is_symmetric(&gauss::<f64>(8), 1e-14));
    assert!(is_symmetric(&gauss_lobatto::<f64>(5).unwrap(), 1e-14));
    assert!(is_symmetric(&iterated(&trapezoidal::<f64>(), 3).unwrap(), 1e-14));
    assert!(!is_symmetric(&from_points(&[0.2, 0.4, 0.5, 0.7]).unwrap(), 1e-14));
}

proptest! {
    #[test]
    fn unit_interval_rules_are_sorted_and_mirrored(n in 2usize..40) {
        for rule in [gauss::<f64>(n), gauss_lobatto::<f64>(n).unwrap()] {
            let points = coordinates_1d(&rule);
            prop_assert!(points.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(points.iter().all(|&x| (0.0..=1.0).contains(&x)));
            for i in 0..n {
                let mirrored_sum = points[i] + points[n - 1 - i];
                prop_assert!((mirrored_sum - 1.0).abs() <= 1e-15);
            }
            prop_assert!((rule.0.iter().sum::<f64>() - 1.0).abs() <= 1e-13);
        }
    }
}
