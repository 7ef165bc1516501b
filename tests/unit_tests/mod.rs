mod polynomials;
mod quadrature;
mod report;
