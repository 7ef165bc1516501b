use nalgebra::{DMatrix, Scalar};

/// Poor man's approx assertion for matrices
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $x - $y;

        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}

/// Reverses both the row and the column order of a table.
///
/// A table of one-dimensional shape values that is symmetric under reflection of the unit
/// interval equals its mirror image.
pub fn mirrored<T: Scalar>(table: &DMatrix<T>) -> DMatrix<T> {
    let (rows, cols) = table.shape();
    DMatrix::from_fn(rows, cols, |i, j| table[(rows - 1 - i, cols - 1 - j)].clone())
}

/// Points `j / n` for `j = 0, ..., n`.
pub fn equidistant_points(n: usize) -> Vec<f64> {
    (0..=n).map(|j| j as f64 / n as f64).collect()
}
