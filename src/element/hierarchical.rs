use crate::element::{ElementError, PolynomialSpace, ScalarElement};
use crate::polynomials::{Basis1d, HierarchicalBasis};
use crate::Real;

/// Continuous element with hierarchical tensor-product shape functions.
///
/// The one-dimensional basis consists of the two linear vertex functions and Lobatto bubbles
/// of increasing degree. Raising the degree adds functions without changing existing ones,
/// but the basis is not symmetric under reflection of the interval.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FeQHierarchical {
    basis: HierarchicalBasis,
}

impl FeQHierarchical {
    pub fn new(degree: usize) -> Result<Self, ElementError> {
        Ok(Self {
            basis: HierarchicalBasis::new(degree)?,
        })
    }
}

impl<T: Real, const D: usize> ScalarElement<T, D> for FeQHierarchical {
    fn name(&self) -> String {
        format!("FE_Q_Hierarchical<{D}>({})", ScalarElement::<T, D>::degree(self))
    }

    fn degree(&self) -> usize {
        Basis1d::<T>::degree(&self.basis)
    }

    fn polynomial_space(&self) -> PolynomialSpace<'_, T> {
        PolynomialSpace::TensorProduct(&self.basis)
    }
}

impl_finite_element_for_scalar!(FeQHierarchical);
