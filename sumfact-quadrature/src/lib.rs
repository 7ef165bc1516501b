//! Quadrature rules on the reference interval `[-1, 1]`.
//!
//! The main purpose of this crate is to support the `sumfact` crate, which maps these rules
//! to the unit interval `[0, 1]` and converts them to generic scalars. The rules here are
//! plain `f64` data and may be used independently.
//!
//! All one-dimensional rules produced by this crate list their points in ascending order and
//! are exactly mirror-symmetric about the origin.

use std::fmt;
use std::fmt::{Display, Formatter};

pub mod univariate;

/// Library-wide error type.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Indicates that a rule satisfying the given requirements is not available.
    NoRuleAvailable,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRuleAvailable => {
                write!(f, "There is no quadrature rule satisfying the requirements available")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A D-dimensional point.
pub type Point<const D: usize> = [f64; D];

/// A D-dimensional rule.
pub type Rule<const D: usize> = (Vec<f64>, Vec<Point<D>>);

/// Approximates the integral of `f` with the given rule.
pub fn integrate<const D: usize>(rule: &Rule<D>, f: impl Fn(&Point<D>) -> f64) -> f64 {
    let (weights, points) = rule;
    weights
        .iter()
        .zip(points)
        .map(|(w, x)| w * f(x))
        .sum()
}
