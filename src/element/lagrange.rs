use crate::element::{ElementError, PolynomialSpace, ScalarElement};
use crate::polynomials::{Basis1d, BasisError, LagrangeBasis};
use crate::quadrature::univariate::{gauss, gauss_lobatto};
use crate::quadrature::{coordinates_1d, Quadrature1d};
use crate::Real;
use std::fmt;
use std::fmt::Display;

/// The family a set of one-dimensional support points belongs to.
///
/// Used to give elements with user-provided support points a name that describes the
/// points, mirroring the quadrature rules they can be generated from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeFamily {
    /// `p + 1` equidistant points including both end points.
    Equidistant { degree: usize },
    /// The points of the Gauss-Lobatto rule with the given number of points.
    GaussLobatto { num_points: usize },
    /// The points of the Gauss rule with the given number of points.
    Gauss { num_points: usize },
    /// Points not recognized as any of the above.
    Unknown { degree: usize },
}

impl NodeFamily {
    /// Classifies the given ascending support points.
    pub fn detect<T: Real>(nodes: &[T]) -> Self {
        let n = nodes.len();
        let degree = n.saturating_sub(1);
        let tolerance = T::default_epsilon() * T::from_f64(64.0).expect("Literal must fit in T");
        let matches = |reference: &[T]| {
            reference.len() == n
                && reference
                    .iter()
                    .zip(nodes)
                    .all(|(&a, &b)| (a - b).abs() <= tolerance)
        };

        if degree > 0 {
            let denominator = T::from_usize(degree).expect("Degree must fit in T");
            let equidistant: Vec<T> = (0..n)
                .map(|j| T::from_usize(j).expect("Index must fit in T") / denominator)
                .collect();
            if matches(&equidistant) {
                return Self::Equidistant { degree };
            }
        }
        if let Ok(rule) = gauss_lobatto::<T>(n) {
            if matches(&coordinates_1d(&rule)) {
                return Self::GaussLobatto { num_points: n };
            }
        }
        if n > 0 && matches(&coordinates_1d(&gauss::<T>(n))) {
            return Self::Gauss { num_points: n };
        }
        Self::Unknown { degree }
    }
}

impl Display for NodeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equidistant { degree } => write!(f, "QIterated(QTrapez(),{degree})"),
            Self::GaussLobatto { num_points } => write!(f, "QGaussLobatto({num_points})"),
            Self::Gauss { num_points } => write!(f, "QGauss({num_points})"),
            Self::Unknown { degree } => write!(f, "QUnknownNodes({degree})"),
        }
    }
}

/// Continuous Lagrange element with tensor-product shape functions.
///
/// By default the support points are the Gauss-Lobatto points, which keeps the basis well
/// conditioned for high degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct FeQ<T> {
    basis: LagrangeBasis<T>,
    nodes: NodeFamily,
}

impl<T: Real> FeQ<T> {
    pub fn new(degree: usize) -> Result<Self, ElementError> {
        if degree == 0 {
            return Err(BasisError::UnsupportedDegree { degree, minimum: 1 }.into());
        }
        Ok(Self {
            basis: LagrangeBasis::gauss_lobatto(degree)?,
            nodes: NodeFamily::GaussLobatto { num_points: degree + 1 },
        })
    }

    /// Builds the element from the points of a 1D rule, which must contain both end points.
    pub fn from_support_points(points: &impl Quadrature1d<T>) -> Result<Self, ElementError> {
        let nodes = coordinates_1d(points);
        if nodes.len() < 2 || nodes.first() != Some(&T::zero()) || nodes.last() != Some(&T::one()) {
            return Err(ElementError::MissingEndPoints);
        }
        let family = NodeFamily::detect(&nodes);
        Ok(Self {
            basis: LagrangeBasis::from_nodes(nodes)?,
            nodes: family,
        })
    }

    pub fn basis(&self) -> &LagrangeBasis<T> {
        &self.basis
    }
}

impl<T: Real, const D: usize> ScalarElement<T, D> for FeQ<T> {
    fn name(&self) -> String {
        match self.nodes {
            NodeFamily::GaussLobatto { .. } => format!("FE_Q<{D}>({})", self.basis.degree()),
            family => format!("FE_Q<{D}>({family})"),
        }
    }

    fn degree(&self) -> usize {
        self.basis.degree()
    }

    fn polynomial_space(&self) -> PolynomialSpace<'_, T> {
        PolynomialSpace::TensorProduct(&self.basis)
    }
}

impl_finite_element_for_scalar!(FeQ<T>);

/// Discontinuous Lagrange element with tensor-product shape functions.
#[derive(Debug, Clone, PartialEq)]
pub struct FeDgq<T> {
    basis: LagrangeBasis<T>,
    // `None` for the default Gauss-Lobatto points
    arbitrary_nodes: Option<NodeFamily>,
}

impl<T: Real> FeDgq<T> {
    /// Discontinuous Lagrange element on the Gauss-Lobatto points.
    ///
    /// The element of degree zero is the constant function, associated with the midpoint.
    pub fn new(degree: usize) -> Result<Self, ElementError> {
        Ok(Self {
            basis: LagrangeBasis::gauss_lobatto(degree)?,
            arbitrary_nodes: None,
        })
    }

    /// Discontinuous Lagrange element whose support points are the points of a 1D rule.
    pub fn arbitrary_nodes(points: &impl Quadrature1d<T>) -> Result<Self, ElementError> {
        let nodes = coordinates_1d(points);
        let family = NodeFamily::detect(&nodes);
        Ok(Self {
            basis: LagrangeBasis::from_nodes(nodes)?,
            arbitrary_nodes: Some(family),
        })
    }

    pub fn basis(&self) -> &LagrangeBasis<T> {
        &self.basis
    }
}

impl<T: Real, const D: usize> ScalarElement<T, D> for FeDgq<T> {
    fn name(&self) -> String {
        match self.arbitrary_nodes {
            None => format!("FE_DGQ<{D}>({})", self.basis.degree()),
            Some(family) => format!("FE_DGQArbitraryNodes<{D}>({family})"),
        }
    }

    fn degree(&self) -> usize {
        self.basis.degree()
    }

    fn polynomial_space(&self) -> PolynomialSpace<'_, T> {
        PolynomialSpace::TensorProduct(&self.basis)
    }
}

impl_finite_element_for_scalar!(FeDgq<T>);

/// [`FeQ`] enriched by a single discontinuous constant function.
///
/// The constant function is the last degree of freedom.
#[derive(Debug, Clone, PartialEq)]
pub struct FeQDg0<T> {
    basis: LagrangeBasis<T>,
}

impl<T: Real> FeQDg0<T> {
    pub fn new(degree: usize) -> Result<Self, ElementError> {
        if degree == 0 {
            return Err(BasisError::UnsupportedDegree { degree, minimum: 1 }.into());
        }
        Ok(Self {
            basis: LagrangeBasis::gauss_lobatto(degree)?,
        })
    }
}

impl<T: Real, const D: usize> ScalarElement<T, D> for FeQDg0<T> {
    fn name(&self) -> String {
        format!("FE_Q_DG0<{D}>({})", self.basis.degree())
    }

    fn degree(&self) -> usize {
        self.basis.degree()
    }

    fn polynomial_space(&self) -> PolynomialSpace<'_, T> {
        PolynomialSpace::TensorProductPlusConstant(&self.basis)
    }
}

impl_finite_element_for_scalar!(FeQDg0<T>);
