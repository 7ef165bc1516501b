use crate::element::{ElementError, PolynomialSpace, ScalarElement};
use crate::polynomials::{Basis1d, HermiteLikeBasis};
use crate::Real;

/// Discontinuous tensor-product element with a Hermite-like basis of degree at least three.
///
/// Only two one-dimensional functions are nonzero or have a nonzero derivative on each end of
/// the interval, so face values and face derivatives involve few functions.
#[derive(Debug, Clone, PartialEq)]
pub struct FeDgqHermite<T> {
    basis: HermiteLikeBasis<T>,
}

impl<T: Real> FeDgqHermite<T> {
    pub fn new(degree: usize) -> Result<Self, ElementError> {
        Ok(Self {
            basis: HermiteLikeBasis::new(degree)?,
        })
    }
}

impl<T: Real, const D: usize> ScalarElement<T, D> for FeDgqHermite<T> {
    fn name(&self) -> String {
        format!("FE_DGQHermite<{D}>({})", self.basis.degree())
    }

    fn degree(&self) -> usize {
        self.basis.degree()
    }

    fn polynomial_space(&self) -> PolynomialSpace<'_, T> {
        PolynomialSpace::TensorProduct(&self.basis)
    }
}

impl_finite_element_for_scalar!(FeDgqHermite<T>);
