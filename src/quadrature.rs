//! Quadrature rules on the unit interval `[0, 1]`.
//!
//! The raw rules from `sumfact-quadrature` live on `[-1, 1]` and are plain `f64` data. The
//! functions in [`univariate`] map them to the unit interval, which is the reference cell
//! used by all elements in this crate, and convert them to the requested scalar type.
use nalgebra::allocator::Allocator;
use nalgebra::{convert, DefaultAllocator, DimName, OPoint, Scalar};
use num::Zero;
use std::fmt;
use std::fmt::Display;
use std::ops::{Add, AddAssign, Mul};

use crate::nalgebra::{Point1, U1};

pub mod univariate;

/// Errors produced by the raw rule generators.
pub use sumfact_quadrature::Error as RuleError;

pub type QuadraturePair<T, D> = (Vec<T>, Vec<OPoint<T, D>>);
pub type QuadraturePair1d<T> = QuadraturePair<T, U1>;

/// A quadrature rule consisting of weights and points.
pub trait Quadrature<T, D>
where
    T: Scalar,
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    fn weights(&self) -> &[T];
    fn points(&self) -> &[OPoint<T, D>];

    /// The number of quadrature points.
    fn len(&self) -> usize {
        self.weights().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Approximates the integral of the given function using this quadrature rule.
    fn integrate<U, Function>(&self, f: Function) -> U
    where
        Function: Fn(&OPoint<T, D>) -> U,
        U: Zero + Mul<T, Output = U> + Add<T, Output = U> + AddAssign<U>,
    {
        let mut integral = U::zero();
        for (w, p) in self.weights().iter().zip(self.points()) {
            integral += f(p) * w.clone();
        }
        integral
    }
}

/// Trait alias for 1D quadrature rules.
pub trait Quadrature1d<T>: Quadrature<T, U1>
where
    T: Scalar,
{
}

impl<T, X> Quadrature1d<T> for X
where
    T: Scalar,
    X: Quadrature<T, U1>,
{
}

impl<T, D, A, B> Quadrature<T, D> for (A, B)
where
    T: Scalar,
    D: DimName,
    A: AsRef<[T]>,
    B: AsRef<[OPoint<T, D>]>,
    DefaultAllocator: Allocator<T, D>,
{
    fn weights(&self) -> &[T] {
        self.0.as_ref()
    }

    fn points(&self) -> &[OPoint<T, D>] {
        self.1.as_ref()
    }
}

impl<T, D, X> Quadrature<T, D> for &X
where
    T: Scalar,
    D: DimName,
    X: Quadrature<T, D>,
    DefaultAllocator: Allocator<T, D>,
{
    fn weights(&self) -> &[T] {
        X::weights(self)
    }

    fn points(&self) -> &[OPoint<T, D>] {
        X::points(self)
    }
}

/// Errors returned when constructing unit-interval quadrature rules.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuadratureError {
    /// The requested rule family has no rule with the requested number of points.
    Rule(RuleError),
    /// A rule was requested without any points.
    NoPoints,
    /// A quadrature point lies outside the unit interval.
    PointOutsideUnitInterval { index: usize },
    /// Quadrature points must be given in strictly increasing order.
    PointsNotIncreasing { index: usize },
    /// An iterated rule needs at least one copy of the base rule.
    NoCopies,
}

impl Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(err) => write!(f, "{err}"),
            Self::NoPoints => write!(f, "A quadrature rule needs at least one point"),
            Self::PointOutsideUnitInterval { index } => {
                write!(f, "Quadrature point {index} is outside the unit interval [0, 1]")
            }
            Self::PointsNotIncreasing { index } => {
                write!(f, "Quadrature point {index} is not strictly greater than its predecessor")
            }
            Self::NoCopies => write!(f, "An iterated quadrature rule needs at least one copy of the base rule"),
        }
    }
}

impl std::error::Error for QuadratureError {}

impl From<RuleError> for QuadratureError {
    fn from(err: RuleError) -> Self {
        Self::Rule(err)
    }
}

/// The coordinates of the points of a 1D rule.
pub fn coordinates_1d<T: Scalar>(quadrature: &impl Quadrature1d<T>) -> Vec<T> {
    quadrature.points().iter().map(|p| p[0].clone()).collect()
}

fn map_rule_to_unit_interval<T>(rule: sumfact_quadrature::Rule<1>) -> QuadraturePair1d<T>
where
    T: crate::Real,
{
    let (weights, points) = rule;
    let weights = weights
        .into_iter()
        .map(|w| convert(0.5 * w))
        .collect();
    let points = points
        .into_iter()
        .map(|[x]| Point1::new(convert(0.5 * (1.0 + x))))
        .collect();
    (weights, points)
}
