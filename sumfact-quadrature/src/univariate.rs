//! Quadrature rules for the one-dimensional domain `[-1, 1]`.

use crate::{Error, Rule};
use log::warn;
use std::f64::consts::PI;

/// Upper bound on Newton iterations when locating a single root.
///
/// Convergence from the initial guesses used here takes a handful of iterations, so hitting
/// the bound means round-off keeps the step from dropping below the tolerance.
const MAX_NEWTON_ITERATIONS: usize = 100;

/// Recurrence relation for Legendre polynomials.
///
/// Note: we use a formula for which derivatives are *not* defined at |x| == 1, so it is only
/// suitable for evaluation in the open interval (-1, 1).
#[derive(Debug, Default)]
struct LegendreRecurrence {
    n: usize,
    x: f64,
    // The current value, i.e. p_n(x)
    p1: f64,
    // The previous value in the recurrence, i.e. p_{n - 1}(x)
    p2: f64,
}

impl LegendreRecurrence {
    pub fn evaluate(n: usize, x: f64) -> Self {
        // Use recurrence relation
        //  m P_m(x) = (2m - 1) * x P_{m - 1}(x) - (m - 1) P_{m - 2}(x)
        let mut p1 = 1.0;
        let mut p2 = 0.0;
        let mut p3;
        for m in 1..=n {
            let m = m as f64;
            p3 = p2;
            p2 = p1;
            p1 = ((2.0 * m - 1.0) * x * p2 - (m - 1.0) * p3) / m;
        }

        Self { n, x, p1, p2 }
    }

    fn value(&self) -> f64 {
        self.p1
    }

    fn previous_value(&self) -> f64 {
        self.p2
    }

    fn derivative(&self) -> f64 {
        let Self { n, x, p1, p2 } = &self;
        let n = *n as f64;
        // Use the standard recurrence relation
        // dp_n/dx (x) = n * (x * p_n(x) - p_{n - 1}(x)) / (x^2 - 1)
        n * (x * p1 - p2) / (x * x - 1.0)
    }

    fn value_and_derivative(&self) -> (f64, f64) {
        (self.value(), self.derivative())
    }
}

/// Gauss quadrature for the reference interval [-1, 1].
///
/// Returns the [Gauss quadrature rule] with the given number of points. Given `n` points,
/// the rule integrates polynomials of order up to `2 n - 1` exactly. Points are sorted in
/// ascending order, are exactly mirror-symmetric and, for odd `n`, the middle point is
/// exactly zero.
///
/// # Panics
///
/// Panics if zero points are requested.
///
/// [Gauss quadrature rule]: https://en.wikipedia.org/wiki/Gaussian_quadrature
pub fn gauss(num_points: usize) -> Rule<1> {
    let n = num_points;
    assert!(n > 0, "number of points must be positive");

    // Loosely based on the procedure used in
    // Numerical Recipes, The art of Scientific Computing, Third Edition (2007)
    let m = (n + 1) / 2;

    let mut points = vec![[0.0]; n];
    let mut weights = vec![0.0; n];

    // Only find the first m (non-negative) roots. The remaining roots follow by symmetry
    for i in 0..m {
        let x = if n % 2 == 1 && i + 1 == m {
            0.0
        } else {
            // Compute a fairly accurate initial guess
            let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
            let mut converged = false;
            for _ in 0..MAX_NEWTON_ITERATIONS {
                let (p, dp) = LegendreRecurrence::evaluate(n, x).value_and_derivative();
                let dx = -p / dp;
                x += dx;
                if dx.abs() <= 1e-15 {
                    converged = true;
                    break;
                }
            }
            if !converged {
                warn!("Newton iteration for Gauss root {i} of {n} did not reach the step tolerance");
            }
            x
        };

        // Once a root is known, its corresponding weight is given explicitly by a standard
        // formula
        let dp = LegendreRecurrence::evaluate(n, x).derivative();
        let w = 2.0 / ((1.0 - x * x) * dp * dp);

        points[i] = [-x];
        points[n - 1 - i] = [x];
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    (weights, points)
}

/// Gauss-Lobatto quadrature for the reference interval [-1, 1].
///
/// The `n`-point rule contains both end points and the `n - 2` roots of the derivative of
/// the Legendre polynomial of degree `n - 1`. It integrates polynomials of order up to
/// `2 n - 3` exactly. Points are sorted in ascending order and are exactly mirror-symmetric.
///
/// Returns `None` if fewer than two points are requested.
pub fn try_gauss_lobatto(num_points: usize) -> Option<Rule<1>> {
    let n = num_points;
    if n < 2 {
        return None;
    }
    // Degree of the Legendre polynomial whose derivative has the interior points as roots
    let degree = n - 1;

    let mut points = vec![[0.0]; n];
    points[0] = [-1.0];
    points[degree] = [1.0];

    for i in 1..n / 2 {
        // Chebyshev-Gauss-Lobatto points are good initial guesses
        let mut x = -(PI * i as f64 / degree as f64).cos();
        let mut converged = false;
        for _ in 0..MAX_NEWTON_ITERATIONS {
            // Newton's method applied to (1 - x^2) P'_N(x), which is N (P_{N-1} - x P_N) and
            // has derivative -N (N + 1) P_N. Unlike P'_N itself this is well-behaved everywhere
            let recurrence = LegendreRecurrence::evaluate(degree, x);
            let p = recurrence.value();
            let p_prev = recurrence.previous_value();
            let dx = -(x * p - p_prev) / ((degree as f64 + 1.0) * p);
            x += dx;
            if dx.abs() <= 1e-15 {
                converged = true;
                break;
            }
        }
        if !converged {
            warn!("Newton iteration for Gauss-Lobatto point {i} of {n} did not reach the step tolerance");
        }
        points[i] = [x];
        points[degree - i] = [-x];
    }

    let n_f64 = n as f64;
    let weights = points
        .iter()
        .map(|&[x]| {
            let p = LegendreRecurrence::evaluate(degree, x).value();
            2.0 / (n_f64 * (n_f64 - 1.0) * p * p)
        })
        .collect();

    Some((weights, points))
}

/// Same as [`try_gauss_lobatto`], but returns an error instead of `None`.
pub fn gauss_lobatto(num_points: usize) -> Result<Rule<1>, Error> {
    try_gauss_lobatto(num_points).ok_or(Error::NoRuleAvailable)
}

/// The trapezoidal rule on [-1, 1], with the two end points as quadrature points.
pub fn trapezoidal() -> Rule<1> {
    (vec![1.0, 1.0], vec![[-1.0], [1.0]])
}
