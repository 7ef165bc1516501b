//! One-dimensional polynomial bases on the unit interval `[0, 1]`.
//!
//! Every basis evaluates its functions together with their first and second derivatives,
//! which is the data needed to tabulate tensor-product shape functions.
use crate::quadrature::univariate::gauss_lobatto;
use crate::quadrature::{coordinates_1d, QuadratureError};
use crate::Real;
use numeric_literals::replace_float_literals;
use std::fmt;
use std::fmt::{Debug, Display};

/// Errors produced when constructing a polynomial basis.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BasisError {
    /// An interpolation basis needs at least one node.
    NoNodes,
    /// Interpolation nodes must be distinct.
    RepeatedNode { index: usize },
    /// The basis family does not exist for the requested degree.
    UnsupportedDegree { degree: usize, minimum: usize },
    /// Generating nodes from a quadrature rule failed.
    Quadrature(QuadratureError),
}

impl Display for BasisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoNodes => write!(f, "Interpolation basis requires at least one node"),
            Self::RepeatedNode { index } => write!(f, "Interpolation node {index} coincides with an earlier node"),
            Self::UnsupportedDegree { degree, minimum } => {
                write!(f, "Basis requires degree at least {minimum}, but degree {degree} was requested")
            }
            Self::Quadrature(err) => write!(f, "Failed to generate nodes: {err}"),
        }
    }
}

impl std::error::Error for BasisError {}

impl From<QuadratureError> for BasisError {
    fn from(err: QuadratureError) -> Self {
        Self::Quadrature(err)
    }
}

/// A basis of polynomials on the unit interval.
pub trait Basis1d<T: Real>: Debug {
    /// The number of basis functions.
    fn num_functions(&self) -> usize;

    /// The highest polynomial degree in the basis.
    fn degree(&self) -> usize;

    /// Evaluates basis function `i` at `x`.
    ///
    /// Returns the value, first derivative and second derivative, in that order.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not smaller than the number of functions.
    fn evaluate(&self, i: usize, x: T) -> [T; 3];

    fn value(&self, i: usize, x: T) -> T {
        self.evaluate(i, x)[0]
    }

    fn derivative(&self, i: usize, x: T) -> T {
        self.evaluate(i, x)[1]
    }

    fn second_derivative(&self, i: usize, x: T) -> T {
        self.evaluate(i, x)[2]
    }
}

/// Lagrange interpolation polynomials associated with a set of distinct nodes.
///
/// Basis function `i` is one at node `i` and zero at every other node. The value at a node is
/// reproduced exactly, not just up to round-off.
#[derive(Debug, Clone, PartialEq)]
pub struct LagrangeBasis<T> {
    nodes: Vec<T>,
}

impl<T: Real> LagrangeBasis<T> {
    pub fn from_nodes(nodes: Vec<T>) -> Result<Self, BasisError> {
        if nodes.is_empty() {
            return Err(BasisError::NoNodes);
        }
        for (index, x) in nodes.iter().enumerate() {
            if nodes[..index].contains(x) {
                return Err(BasisError::RepeatedNode { index });
            }
        }
        Ok(Self { nodes })
    }

    /// Lagrange polynomials of the given degree on the Gauss-Lobatto points.
    pub fn gauss_lobatto(degree: usize) -> Result<Self, BasisError> {
        if degree == 0 {
            // A single node in the middle of the interval gives the constant function
            return Self::from_nodes(vec![T::from_f64(0.5).expect("Literal must fit in T")]);
        }
        let rule = gauss_lobatto::<T>(degree + 1)?;
        Ok(Self::from_distinct_nodes(coordinates_1d(&rule)))
    }

    /// Builds the basis without checking that the nodes are distinct.
    pub(crate) fn from_distinct_nodes(nodes: Vec<T>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes }
    }

    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }
}

impl<T: Real> Basis1d<T> for LagrangeBasis<T> {
    fn num_functions(&self) -> usize {
        self.nodes.len()
    }

    fn degree(&self) -> usize {
        self.nodes.len() - 1
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate(&self, i: usize, x: T) -> [T; 3] {
        let x_i = self.nodes[i];
        let (mut value, mut derivative, mut second_derivative) = (1.0, 0.0, 0.0);
        // Multiply in one normalized linear factor at a time, tracking derivatives with the
        // product rule. Dividing per factor makes the value at x_i exactly one
        for (j, &x_j) in self.nodes.iter().enumerate() {
            if j == i {
                continue;
            }
            let distance = x_i - x_j;
            let inverse_distance = 1.0 / distance;
            let factor = (x - x_j) / distance;
            second_derivative = second_derivative * factor + 2.0 * derivative * inverse_distance;
            derivative = derivative * factor + value * inverse_distance;
            value *= factor;
        }
        [value, derivative, second_derivative]
    }
}

/// Evaluates the Legendre polynomial of degree `n` on `[-1, 1]` along with its first two
/// derivatives.
///
/// The derivatives are obtained by differentiating the three-term recurrence, so unlike the
/// closed-form derivative formula they remain valid at the end points.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
fn legendre_with_derivatives<T: Real>(n: usize, xi: T) -> [T; 3] {
    let mut current = [1.0, 0.0, 0.0];
    let mut previous = [0.0, 0.0, 0.0];
    for m in 1..=n {
        let m = T::from_usize(m).expect("Degree must fit in T");
        let a = 2.0 * m - 1.0;
        let b = m - 1.0;
        let next = [
            (a * xi * current[0] - b * previous[0]) / m,
            (a * (current[0] + xi * current[1]) - b * previous[1]) / m,
            (a * (2.0 * current[1] + xi * current[2]) - b * previous[2]) / m,
        ];
        previous = current;
        current = next;
    }
    current
}

/// Legendre polynomials `sqrt(2k + 1) P_k(2x - 1)`, orthonormal on `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LegendreBasis {
    degree: usize,
}

impl LegendreBasis {
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }
}

impl<T: Real> Basis1d<T> for LegendreBasis {
    fn num_functions(&self) -> usize {
        self.degree + 1
    }

    fn degree(&self) -> usize {
        self.degree
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate(&self, i: usize, x: T) -> [T; 3] {
        assert!(i <= self.degree, "Basis function index out of bounds");
        let [p, dp, ddp] = legendre_with_derivatives(i, 2.0 * x - 1.0);
        let scale = (2.0 * T::from_usize(i).expect("Degree must fit in T") + 1.0).sqrt();
        [scale * p, 2.0 * scale * dp, 4.0 * scale * ddp]
    }
}

/// Hierarchical basis made of the two linear vertex functions and Lobatto bubbles.
///
/// Functions are ordered lexicographically: `1 - x` first, then the bubbles by increasing
/// degree, and `x` last. The bubble of degree `k >= 2` is
/// `(P_k(2x - 1) - P_{k - 2}(2x - 1)) / sqrt(2 (2k - 1))`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HierarchicalBasis {
    degree: usize,
}

impl HierarchicalBasis {
    pub fn new(degree: usize) -> Result<Self, BasisError> {
        if degree == 0 {
            return Err(BasisError::UnsupportedDegree { degree, minimum: 1 });
        }
        Ok(Self { degree })
    }
}

impl<T: Real> Basis1d<T> for HierarchicalBasis {
    fn num_functions(&self) -> usize {
        self.degree + 1
    }

    fn degree(&self) -> usize {
        self.degree
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate(&self, i: usize, x: T) -> [T; 3] {
        assert!(i <= self.degree, "Basis function index out of bounds");
        if i == 0 {
            [1.0 - x, -1.0, 0.0]
        } else if i == self.degree {
            [x, 1.0, 0.0]
        } else {
            let k = i + 1;
            let xi = 2.0 * x - 1.0;
            let p_k = legendre_with_derivatives(k, xi);
            let p_k2 = legendre_with_derivatives(k - 2, xi);
            let k = T::from_usize(k).expect("Degree must fit in T");
            let scale = 1.0 / (2.0 * (2.0 * k - 1.0)).sqrt();
            [
                scale * (p_k[0] - p_k2[0]),
                2.0 * scale * (p_k[1] - p_k2[1]),
                4.0 * scale * (p_k[2] - p_k2[2]),
            ]
        }
    }
}

/// Hermite-like basis of degree `p >= 3` for discontinuous elements.
///
/// The two first functions are the cubic Hermite functions attached to the value and slope
/// at `x = 0`, the two last functions are their mirror images at `x = 1`, and the remaining
/// functions are bubbles `x^2 (1 - x)^2 l_k(x)` built from Lagrange polynomials on the
/// interior Gauss-Lobatto points of degree `p - 2`. At `x = 0` only the first function is
/// nonzero, and only the first two have a nonzero derivative.
#[derive(Debug, Clone, PartialEq)]
pub struct HermiteLikeBasis<T> {
    degree: usize,
    interior: Option<LagrangeBasis<T>>,
}

impl<T: Real> HermiteLikeBasis<T> {
    pub fn new(degree: usize) -> Result<Self, BasisError> {
        if degree < 3 {
            return Err(BasisError::UnsupportedDegree { degree, minimum: 3 });
        }
        let interior = if degree > 3 {
            let rule = gauss_lobatto::<T>(degree - 1)?;
            let points = coordinates_1d(&rule);
            Some(LagrangeBasis::from_distinct_nodes(points[1..points.len() - 1].to_vec()))
        } else {
            None
        };
        Ok(Self { degree, interior })
    }
}

/// Cubic Hermite function with unit value at zero and its derivatives.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
fn hermite_value_function<T: Real>(x: T) -> [T; 3] {
    [1.0 - 3.0 * x * x + 2.0 * x * x * x, 6.0 * x * (x - 1.0), 12.0 * x - 6.0]
}

/// Cubic Hermite function with unit slope at zero and its derivatives.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
fn hermite_slope_function<T: Real>(x: T) -> [T; 3] {
    let y = 1.0 - x;
    [x * y * y, y * (1.0 - 3.0 * x), 6.0 * x - 4.0]
}

/// Evaluates `x -> f(1 - x)` given a function evaluating `f` and its derivatives.
fn mirrored<T: Real>(f: impl Fn(T) -> [T; 3], x: T) -> [T; 3] {
    let [value, derivative, second_derivative] = f(T::one() - x);
    [value, -derivative, second_derivative]
}

impl<T: Real> Basis1d<T> for HermiteLikeBasis<T> {
    fn num_functions(&self) -> usize {
        self.degree + 1
    }

    fn degree(&self) -> usize {
        self.degree
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate(&self, i: usize, x: T) -> [T; 3] {
        let p = self.degree;
        assert!(i <= p, "Basis function index out of bounds");
        match i {
            0 => hermite_value_function(x),
            1 => hermite_slope_function(x),
            _ if i == p => mirrored(hermite_value_function, x),
            _ if i == p - 1 => mirrored(hermite_slope_function, x),
            _ => {
                let interior = self
                    .interior
                    .as_ref()
                    .expect("Interior functions exist only when degree > 3");
                let [l, dl, ddl] = interior.evaluate(i - 2, x);
                // w = u^2 with u = x (1 - x)
                let u = x * (1.0 - x);
                let du = 1.0 - 2.0 * x;
                let w = u * u;
                let dw = 2.0 * u * du;
                let ddw = 2.0 * du * du - 4.0 * u;
                [w * l, dw * l + w * dl, ddw * l + 2.0 * dw * dl + w * ddl]
            }
        }
    }
}
