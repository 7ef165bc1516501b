use matrixcompare::assert_scalar_eq;
use proptest::prelude::*;
use sumfact::polynomials::{Basis1d, BasisError, HermiteLikeBasis, HierarchicalBasis, LagrangeBasis, LegendreBasis};
use sumfact::quadrature::univariate::gauss;
use sumfact::quadrature::Quadrature;

/// Central finite difference approximations of the first and second derivative.
fn finite_differences(basis: &dyn Basis1d<f64>, i: usize, x: f64) -> [f64; 2] {
    let h = 1e-5;
    let (left, center, right) = (basis.value(i, x - h), basis.value(i, x), basis.value(i, x + h));
    [(right - left) / (2.0 * h), (right - 2.0 * center + left) / (h * h)]
}

fn assert_derivatives_consistent(basis: &dyn Basis1d<f64>, x: f64) {
    for i in 0..basis.num_functions() {
        let [_, derivative, second_derivative] = basis.evaluate(i, x);
        let [fd_derivative, fd_second_derivative] = finite_differences(basis, i, x);
        assert_scalar_eq!(derivative, fd_derivative, comp = abs, tol = 1e-6);
        assert_scalar_eq!(second_derivative, fd_second_derivative, comp = abs, tol = 1e-3);
    }
}

#[test]
fn lagrange_basis_is_nodal() {
    let basis = LagrangeBasis::<f64>::gauss_lobatto(6).unwrap();
    let nodes = basis.nodes().to_vec();
    for i in 0..basis.num_functions() {
        for (j, &x_j) in nodes.iter().enumerate() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_eq!(basis.value(i, x_j), expected);
        }
    }
}

#[test]
fn lagrange_basis_rejects_invalid_nodes() {
    assert_eq!(LagrangeBasis::<f64>::from_nodes(vec![]), Err(BasisError::NoNodes));
    assert_eq!(
        LagrangeBasis::from_nodes(vec![0.0, 0.5, 0.5]),
        Err(BasisError::RepeatedNode { index: 2 })
    );
}

#[test]
fn lagrange_basis_of_degree_zero_is_constant() {
    let basis = LagrangeBasis::<f64>::gauss_lobatto(0).unwrap();
    assert_eq!(basis.num_functions(), 1);
    assert_eq!(basis.evaluate(0, 0.3), [1.0, 0.0, 0.0]);
}

#[test]
fn legendre_basis_is_orthonormal() {
    let basis = LegendreBasis::new(6);
    let rule = gauss::<f64>(8);
    for i in 0..=6 {
        for j in 0..=6 {
            let inner_product = rule.integrate(|x| {
                Basis1d::<f64>::value(&basis, i, x[0]) * Basis1d::<f64>::value(&basis, j, x[0])
            });
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_scalar_eq!(inner_product, expected, comp = abs, tol = 1e-13);
        }
    }
}

#[test]
fn hierarchical_basis_has_vertex_functions_at_the_ends() {
    let basis = HierarchicalBasis::new(5).unwrap();
    let value = |i, x| Basis1d::<f64>::value(&basis, i, x);
    assert_eq!(value(0, 0.0), 1.0);
    assert_eq!(value(5, 1.0), 1.0);
    for i in 1..5 {
        assert_scalar_eq!(value(i, 0.0), 0.0, comp = abs, tol = 1e-14);
        assert_scalar_eq!(value(i, 1.0), 0.0, comp = abs, tol = 1e-14);
    }
    assert_eq!(HierarchicalBasis::new(0), Err(BasisError::UnsupportedDegree { degree: 0, minimum: 1 }));
}

#[test]
fn hermite_like_basis_has_few_functions_active_on_faces() {
    let basis = HermiteLikeBasis::<f64>::new(5).unwrap();
    let [value, derivative, _] = basis.evaluate(0, 0.0);
    assert_scalar_eq!(value, 1.0, comp = abs, tol = 1e-15);
    assert_scalar_eq!(derivative, 0.0, comp = abs, tol = 1e-15);
    assert_scalar_eq!(basis.derivative(1, 0.0), 1.0, comp = abs, tol = 1e-15);
    for i in 1..=5 {
        assert_scalar_eq!(basis.value(i, 0.0), 0.0, comp = abs, tol = 1e-15);
        assert_scalar_eq!(basis.value(5 - i, 1.0), 0.0, comp = abs, tol = 1e-15);
    }
    for i in 2..=5 {
        assert_scalar_eq!(basis.derivative(i, 0.0), 0.0, comp = abs, tol = 1e-15);
    }
    assert_eq!(HermiteLikeBasis::<f64>::new(2), Err(BasisError::UnsupportedDegree { degree: 2, minimum: 3 }));
}

proptest! {
    #[test]
    fn derivatives_match_finite_differences(x in 0.05..0.95f64) {
        let lagrange = LagrangeBasis::<f64>::gauss_lobatto(4).unwrap();
        let legendre = LegendreBasis::new(4);
        let hierarchical = HierarchicalBasis::new(4).unwrap();
        let hermite = HermiteLikeBasis::<f64>::new(4).unwrap();
        let bases: [&dyn Basis1d<f64>; 4] = [&lagrange, &legendre, &hierarchical, &hermite];
        for basis in bases {
            assert_derivatives_consistent(basis, x);
        }
    }

    #[test]
    fn lagrange_basis_is_partition_of_unity(x in 0.0..=1.0f64, degree in 1usize..12) {
        let basis = LagrangeBasis::<f64>::gauss_lobatto(degree).unwrap();
        let sum: f64 = (0..basis.num_functions()).map(|i| basis.value(i, x)).sum();
        prop_assert!((sum - 1.0).abs() <= 1e-12);
    }
}
