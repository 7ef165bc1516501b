use nalgebra::RealField;

pub use nalgebra;

/// Scalar type used for tabulated shape data.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}
