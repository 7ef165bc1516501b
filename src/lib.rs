//! Shape-function metadata for sum-factorized finite element evaluation.
//!
//! The central type is [`shape_info::ShapeInfo`], which tabulates the one-dimensional shape
//! functions of a tensor-product element at the points of a one-dimensional quadrature rule
//! and detects the structure that evaluation kernels can exploit. The remaining modules
//! provide the quadrature rules, polynomial bases and finite elements it operates on.
pub mod element;
pub mod polynomials;
pub mod quadrature;
pub mod report;
pub mod shape_info;

pub extern crate nalgebra;

pub use sumfact_traits::Real;
