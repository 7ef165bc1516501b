use crate::element::{PolynomialSpace, ScalarElement};
use crate::polynomials::LegendreBasis;
use crate::Real;

/// Discontinuous element spanning all polynomials of total degree at most `p`.
///
/// Shape functions are products of Legendre polynomials, orthonormal on the unit cell. The
/// space is a truncated tensor product: of the `(p + 1)^D` products, only those with total
/// degree at most `p` are kept, ordered as in the full tensor product.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FeDgp {
    basis: LegendreBasis,
    degree: usize,
}

impl FeDgp {
    pub fn new(degree: usize) -> Self {
        Self {
            basis: LegendreBasis::new(degree),
            degree,
        }
    }
}

impl<T: Real, const D: usize> ScalarElement<T, D> for FeDgp {
    fn name(&self) -> String {
        format!("FE_DGP<{D}>({})", self.degree)
    }

    fn degree(&self) -> usize {
        self.degree
    }

    fn polynomial_space(&self) -> PolynomialSpace<'_, T> {
        PolynomialSpace::Truncated(&self.basis)
    }
}

impl_finite_element_for_scalar!(FeDgp);
