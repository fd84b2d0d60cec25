//! Quadrature rules.
pub mod midpoint;
