#![warn(clippy::all, clippy::cargo, clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

//! The crate `midquad` approximates definite one-dimensional [integrals] with the [midpoint rule]
//! and checks empirically that the approximation converges with the expected order.
//!
//! # Features
//!
//! - **Generic numeric type**. The numeric type used in this library is not fixed, but instead a
//! generic parameter, so that the integration routines can be used with either `f32`, `f64`, or a
//! custom numeric type that implements the `Float` trait from the `num-traits` crate. Use `f64`
//! unless you know better; the rounding error of `f32` dominates the discretization error already
//! for moderate numbers of sub-intervals.
//! - **Reproducibility**. The terms of the sum are added in a fixed order, so that the result for a
//! given number of sub-intervals is the same bit by bit on every run. The multi-threaded
//! integrator only depends on the number of sub-intervals and the number of cores.
//! - **Non-finite numbers are results**. If the integrand returns `inf` or `nan` somewhere, the
//! integral is non-finite and returned as it is. Only invalid arguments are errors.
//! - **Convergence checks**. [`convergence::check_convergence`] sweeps over the number of
//! sub-intervals, compares with a known exact value and fits the exponent of the power law the
//! error follows. Callbacks report or store each sample as it is computed.
//!
//! # How do I get started?
//!
//! ```
//! use midquad::integrate_midpoint;
//! use std::f64::consts::PI;
//!
//! let integral = integrate_midpoint(&f64::sin, 0.0, PI, 1000).unwrap();
//! assert!((integral - 2.0).abs() < 1e-6);
//! ```
//!
//! # What is ...?
//!
//! This section is a dictionary of terms that are used in this documentation. Given
//!
//! $$ I = \int_a^b \mathrm{d} x f(x) $$
//!
//! we approximate $I$ with the midpoint rule,
//!
//! $$ I \approx I_n = \sum_{j=0}^{n-1} f \left( a + \left( j + \frac{1}{2} \right) \Delta x
//! \right) \Delta x, \quad \Delta x = \frac{b-a}{n} $$
//!
//! We use the following terms:
//!
//! - the *integrand* is the function, $f(x)$, that is being integrated,
//! - the *discretization* is the partition of $[a,b]$ into $n$ *sub-intervals* of equal width
//! $\Delta x$,
//! - the *quadrature* rule approximates the area under $f$ on each sub-interval; the midpoint rule
//! replaces $f$ by its value at the midpoint of the sub-interval,
//! - the *convergence order* is the exponent $p$ with $|I - I_n| = \mathcal{O}(n^{-p})$, which is
//! $p = 2$ for the midpoint rule and twice differentiable integrands.
//!
//! [integrals]: https://en.wikipedia.org/wiki/Integral
//! [midpoint rule]: https://en.wikipedia.org/wiki/Riemann_sum#Midpoint_rule

pub mod callbacks;
pub mod convergence;
pub mod core;
pub mod integrators;

pub use crate::core::*;
pub use crate::integrators::midpoint::integrate as integrate_midpoint;
