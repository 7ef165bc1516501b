//! Quadrature rules for the unit interval `[0, 1]`.
//!
//! Every rule returned here lists its points in ascending order.
use crate::nalgebra::Point1;
use crate::polynomials::{Basis1d, LagrangeBasis};
use crate::quadrature::{coordinates_1d, map_rule_to_unit_interval, Quadrature1d, QuadratureError, QuadraturePair1d};
use crate::Real;
use numeric_literals::replace_float_literals;
use sumfact_quadrature::univariate;

/// The Gauss rule with `num_points` points on `[0, 1]`.
///
/// # Panics
///
/// Panics if zero points are requested.
pub fn gauss<T: Real>(num_points: usize) -> QuadraturePair1d<T> {
    map_rule_to_unit_interval(univariate::gauss(num_points))
}

/// The Gauss-Lobatto rule with `num_points` points on `[0, 1]`.
///
/// The rule contains both end points, so at least two points are required.
pub fn gauss_lobatto<T: Real>(num_points: usize) -> Result<QuadraturePair1d<T>, QuadratureError> {
    Ok(map_rule_to_unit_interval(univariate::gauss_lobatto(num_points)?))
}

/// The trapezoidal rule on `[0, 1]`.
pub fn trapezoidal<T: Real>() -> QuadraturePair1d<T> {
    map_rule_to_unit_interval(univariate::trapezoidal())
}

/// Composite rule obtained by applying `base` on each of `num_copies` equal subintervals.
///
/// If the base rule contains both end points of the interval, the coinciding points of
/// neighboring subintervals are merged into a single point whose weight is the sum of the two.
/// Iterating the trapezoidal rule `p` times therefore gives `p + 1` equidistant points.
pub fn iterated<T: Real>(
    base: &impl Quadrature1d<T>,
    num_copies: usize,
) -> Result<QuadraturePair1d<T>, QuadratureError> {
    if num_copies == 0 {
        return Err(QuadratureError::NoCopies);
    }
    if base.is_empty() {
        return Err(QuadratureError::NoPoints);
    }

    let base_points = coordinates_1d(base);
    let base_weights = base.weights();
    let merge_end_points = base_points.len() > 1
        && base_points.first() == Some(&T::zero())
        && base_points.last() == Some(&T::one());

    let n = T::from_usize(num_copies).expect("Number of copies must fit in T");
    let mut weights: Vec<T> = Vec::with_capacity(num_copies * base_points.len());
    let mut points = Vec::with_capacity(num_copies * base_points.len());

    for copy in 0..num_copies {
        let offset = T::from_usize(copy).expect("Copy index must fit in T");
        for (i, (&x, &w)) in base_points.iter().zip(base_weights).enumerate() {
            if merge_end_points && copy > 0 && i == 0 {
                // The last point of the previous subinterval coincides with this one
                if let Some(last_weight) = weights.last_mut() {
                    *last_weight += w / n;
                }
                continue;
            }
            points.push(Point1::new((offset + x) / n));
            weights.push(w / n);
        }
    }

    Ok((weights, points))
}

/// An interpolatory rule with the given points on `[0, 1]`.
///
/// The weight of each point is the integral of the Lagrange polynomial associated with it,
/// so the rule integrates polynomials of degree less than the number of points exactly.
pub fn from_points<T: Real>(points: &[T]) -> Result<QuadraturePair1d<T>, QuadratureError> {
    if points.is_empty() {
        return Err(QuadratureError::NoPoints);
    }
    for (index, &x) in points.iter().enumerate() {
        if x < T::zero() || x > T::one() {
            return Err(QuadratureError::PointOutsideUnitInterval { index });
        }
        if index > 0 && x <= points[index - 1] {
            return Err(QuadratureError::PointsNotIncreasing { index });
        }
    }

    // Points are strictly increasing at this point, so the basis is well-defined
    let basis = LagrangeBasis::from_distinct_nodes(points.to_vec());
    let integration_rule = gauss::<T>(points.len() / 2 + 1);
    let weights = (0..basis.num_functions())
        .map(|i| {
            integration_rule
                .0
                .iter()
                .zip(&integration_rule.1)
                .fold(T::zero(), |sum, (&w, x)| sum + w * basis.value(i, x[0]))
        })
        .collect();
    let points = points.iter().copied().map(Point1::new).collect();

    Ok((weights, points))
}

/// Determines whether the rule is symmetric about the midpoint of the unit interval.
///
/// The rule is symmetric if `x_i + x_{n - 1 - i} = 1` and `w_i = w_{n - 1 - i}` for all `i`,
/// up to the given absolute tolerance. Rules with non-finite weights only have their points
/// compared.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn is_symmetric<T: Real>(quadrature: &impl Quadrature1d<T>, tolerance: T) -> bool {
    let x = coordinates_1d(quadrature);
    let w = quadrature.weights();
    let n = x.len();
    (0..n).all(|i| {
        let j = n - 1 - i;
        let points_match = (x[i] + x[j] - 1.0).abs() <= tolerance;
        let weights_match = !w[i].is_finite() || !w[j].is_finite() || (w[i] - w[j]).abs() <= tolerance;
        points_match && weights_match
    })
}
