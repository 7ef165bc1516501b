//! Finite elements on the unit hypercube `[0, 1]^D`.
//!
//! Scalar elements are described by a [`PolynomialSpace`]: a one-dimensional basis together
//! with the way it is extended to `D` dimensions. Degrees of freedom of scalar elements are
//! numbered lexicographically, with the first coordinate running fastest, so the first
//! `degree + 1` shape functions of a tensor-product element are the one-dimensional basis
//! functions along the first axis.
use crate::nalgebra::{Point, SMatrix, SVector};
use crate::polynomials::{Basis1d, BasisError};
use crate::quadrature::QuadratureError;
use crate::Real;
use std::fmt;
use std::fmt::{Debug, Display};

/// Implements `FiniteElement` for an element that implements `ScalarElement`.
///
/// A blanket impl over `ScalarElement` would overlap with the impl for `FeSystem`, so the
/// macro is invoked for each scalar element instead.
macro_rules! impl_finite_element_for_scalar {
    ($element:ty) => {
        impl<T: $crate::Real, const D: usize> $crate::element::FiniteElement<T, D> for $element {
            fn name(&self) -> String {
                <Self as $crate::element::ScalarElement<T, D>>::name(self)
            }

            fn degree(&self) -> usize {
                <Self as $crate::element::ScalarElement<T, D>>::degree(self)
            }

            fn dofs_per_cell(&self) -> usize {
                <Self as $crate::element::ScalarElement<T, D>>::polynomial_space(self)
                    .dimension(D)
                    .expect("Scalar elements are never composite")
            }

            fn base_element(&self, index: usize) -> Option<&dyn $crate::element::FiniteElement<T, D>> {
                let element: &dyn $crate::element::FiniteElement<T, D> = self;
                (index == 0).then_some(element)
            }

            fn polynomial_space(&self) -> $crate::element::PolynomialSpace<'_, T> {
                <Self as $crate::element::ScalarElement<T, D>>::polynomial_space(self)
            }

            fn shape_value(&self, i: usize, point: &$crate::nalgebra::Point<T, D>) -> T {
                <Self as $crate::element::ScalarElement<T, D>>::polynomial_space(self)
                    .evaluate(i, point)
                    .0
            }

            fn shape_gradient(
                &self,
                i: usize,
                point: &$crate::nalgebra::Point<T, D>,
            ) -> $crate::nalgebra::SVector<T, D> {
                <Self as $crate::element::ScalarElement<T, D>>::polynomial_space(self)
                    .evaluate(i, point)
                    .1
            }

            fn shape_hessian(
                &self,
                i: usize,
                point: &$crate::nalgebra::Point<T, D>,
            ) -> $crate::nalgebra::SMatrix<T, D, D> {
                <Self as $crate::element::ScalarElement<T, D>>::polynomial_space(self)
                    .evaluate(i, point)
                    .2
            }
        }
    };
}

mod dgp;
mod hermite;
mod hierarchical;
mod lagrange;
mod system;

pub use dgp::*;
pub use hermite::*;
pub use hierarchical::*;
pub use lagrange::*;
pub use system::*;

/// Errors produced when constructing finite elements.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ElementError {
    /// The underlying one-dimensional basis could not be constructed.
    Basis(BasisError),
    /// The support points of a continuous element must contain both end points.
    MissingEndPoints,
    /// A system must contain at least one base element.
    EmptySystem,
    /// Every base element of a system must appear at least once.
    ZeroMultiplicity { base_element: usize },
}

impl Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basis(err) => write!(f, "Failed to construct element basis: {err}"),
            Self::MissingEndPoints => {
                write!(f, "Support points of a continuous element must include 0 and 1")
            }
            Self::EmptySystem => write!(f, "A system must contain at least one base element"),
            Self::ZeroMultiplicity { base_element } => {
                write!(f, "Base element {base_element} of the system has multiplicity zero")
            }
        }
    }
}

impl std::error::Error for ElementError {}

impl From<BasisError> for ElementError {
    fn from(err: BasisError) -> Self {
        Self::Basis(err)
    }
}

impl From<QuadratureError> for ElementError {
    fn from(err: QuadratureError) -> Self {
        Self::Basis(BasisError::Quadrature(err))
    }
}

/// Structure of the shape functions of a scalar element.
#[derive(Debug, Clone, Copy)]
pub enum PolynomialSpace<'a, T: Real> {
    /// Full tensor product of a one-dimensional basis.
    TensorProduct(&'a dyn Basis1d<T>),
    /// Full tensor product of a one-dimensional basis, followed by a single discontinuous
    /// constant function as the last degree of freedom.
    TensorProductPlusConstant(&'a dyn Basis1d<T>),
    /// All products of one-dimensional basis functions with total degree at most the degree
    /// of the basis.
    Truncated(&'a dyn Basis1d<T>),
    /// The element has no degrees of freedom.
    Empty,
    /// The element is composed of other elements. See [`FiniteElement::base_element`].
    Composite,
}

impl<'a, T: Real> PolynomialSpace<'a, T> {
    /// The one-dimensional basis the space is built from, if any.
    pub fn basis_1d(&self) -> Option<&'a dyn Basis1d<T>> {
        match *self {
            Self::TensorProduct(basis) | Self::TensorProductPlusConstant(basis) | Self::Truncated(basis) => Some(basis),
            Self::Empty | Self::Composite => None,
        }
    }

    /// The number of functions in the space in `dim` dimensions.
    ///
    /// Returns `None` for composite spaces.
    pub fn dimension(&self, dim: usize) -> Option<usize> {
        match *self {
            Self::TensorProduct(basis) => Some(basis.num_functions().pow(dim as u32)),
            Self::TensorProductPlusConstant(basis) => Some(basis.num_functions().pow(dim as u32) + 1),
            Self::Truncated(basis) => Some(binomial(basis.degree() + dim, dim)),
            Self::Empty => Some(0),
            Self::Composite => None,
        }
    }

    /// Evaluates shape function `i` of the space at `point`.
    ///
    /// Returns the value, gradient and Hessian.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds or the space is composite.
    pub fn evaluate<const D: usize>(&self, i: usize, point: &Point<T, D>) -> (T, SVector<T, D>, SMatrix<T, D, D>) {
        let multi_index = match *self {
            Self::TensorProduct(basis) => tensor_multi_index::<D>(basis.num_functions(), i),
            Self::TensorProductPlusConstant(basis) => {
                let n = basis.num_functions();
                if i == n.pow(D as u32) {
                    return (T::one(), SVector::zeros(), SMatrix::zeros());
                }
                tensor_multi_index::<D>(n, i)
            }
            Self::Truncated(basis) => truncated_multi_index::<D>(basis.degree(), i),
            Self::Empty | Self::Composite => None,
        };
        let multi_index = multi_index.expect("Shape function index out of bounds");
        let basis = self
            .basis_1d()
            .expect("Spaces with shape functions have a 1D basis");

        let factors: [[T; 3]; D] = std::array::from_fn(|d| basis.evaluate(multi_index[d], point[d]));
        let product_except = |skip: &[usize]| {
            (0..D)
                .filter(|d| !skip.contains(d))
                .fold(T::one(), |product, d| product * factors[d][0])
        };

        let value = product_except(&[]);
        let gradient = SVector::from_fn(|k, _| factors[k][1] * product_except(&[k]));
        let hessian = SMatrix::from_fn(|k, l| {
            if k == l {
                factors[k][2] * product_except(&[k])
            } else {
                factors[k][1] * factors[l][1] * product_except(&[k, l])
            }
        });
        (value, gradient, hessian)
    }
}

/// The multi-index of tensor-product function `i` with `n` functions per direction.
fn tensor_multi_index<const D: usize>(n: usize, i: usize) -> Option<[usize; D]> {
    if i >= n.pow(D as u32) {
        return None;
    }
    let mut remainder = i;
    Some(std::array::from_fn(|_| {
        let index = remainder % n;
        remainder /= n;
        index
    }))
}

/// The multi-index of function `i` in the complete space of total degree `degree`.
///
/// Functions are ordered like the tensor product, with multi-indices of total degree larger
/// than `degree` skipped.
fn truncated_multi_index<const D: usize>(degree: usize, i: usize) -> Option<[usize; D]> {
    let n = degree + 1;
    (0..n.pow(D as u32))
        .filter_map(|linear_index| tensor_multi_index::<D>(n, linear_index))
        .filter(|multi_index| multi_index.iter().sum::<usize>() <= degree)
        .nth(i)
}

fn binomial(n: usize, k: usize) -> usize {
    (0..k).fold(1, |result, i| result * (n - i) / (i + 1))
}

/// A finite element on the reference cell `[0, 1]^D`.
pub trait FiniteElement<T: Real, const D: usize>: Debug {
    /// A descriptive name, such as `FE_Q<2>(3)`.
    fn name(&self) -> String;

    /// The polynomial degree of the element.
    fn degree(&self) -> usize;

    fn num_components(&self) -> usize {
        1
    }

    fn dofs_per_cell(&self) -> usize;

    /// The number of distinct base elements the element is composed of.
    fn num_base_elements(&self) -> usize {
        1
    }

    /// Returns base element `index`, or `None` if there is no such base element.
    ///
    /// An element that is not composed of other elements is its own single base element.
    fn base_element(&self, index: usize) -> Option<&dyn FiniteElement<T, D>>;

    /// How many copies of base element `index` the element contains.
    fn element_multiplicity(&self, index: usize) -> usize {
        usize::from(index < self.num_base_elements())
    }

    fn polynomial_space(&self) -> PolynomialSpace<'_, T>;

    /// Maps a shape function index to its (single) nonzero vector component and its index
    /// within that component.
    fn system_to_component_index(&self, i: usize) -> (usize, usize) {
        assert!(i < self.dofs_per_cell(), "Shape function index out of bounds");
        (0, i)
    }

    /// The value of the nonzero component of shape function `i` at `point`.
    fn shape_value(&self, i: usize, point: &Point<T, D>) -> T;

    fn shape_gradient(&self, i: usize, point: &Point<T, D>) -> SVector<T, D>;

    fn shape_hessian(&self, i: usize, point: &Point<T, D>) -> SMatrix<T, D, D>;
}

/// A scalar element fully described by its polynomial space.
///
/// Scalar elements obtain their [`FiniteElement`] implementation through
/// `impl_finite_element_for_scalar!`.
pub trait ScalarElement<T: Real, const D: usize>: Debug {
    fn name(&self) -> String;

    fn degree(&self) -> usize;

    fn polynomial_space(&self) -> PolynomialSpace<'_, T>;
}

/// An element without degrees of freedom.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FeNothing;

impl<T: Real, const D: usize> ScalarElement<T, D> for FeNothing {
    fn name(&self) -> String {
        format!("FE_Nothing<{D}>()")
    }

    fn degree(&self) -> usize {
        0
    }

    fn polynomial_space(&self) -> PolynomialSpace<'_, T> {
        PolynomialSpace::Empty
    }
}

impl_finite_element_for_scalar!(FeNothing);
