//! Empirical convergence order of the midpoint rule.
//!
//! For a smooth integrand the error of the midpoint rule with $n$ sub-intervals behaves like
//!
//! $$ \varepsilon_n = \left| \int_a^b \mathrm{d} x f(x) - I_n \right| \approx C n^{-p} $$
//!
//! with $p = 2$. Taking the logarithm gives the straight line $\ln \varepsilon_n = \ln C - p \ln
//! n$, whose slope is estimated by [`check_convergence`] from a sweep over $n$.
use crate::callbacks::Callback;
use crate::core::*;
use crate::integrators::midpoint;

use num_traits::{Float, FromPrimitive};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// The result of integrating with a single sub-interval count.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ConvergenceSample<T> {
    n: usize,
    approximation: T,
    error: T,
}

impl<T: Copy> ConvergenceSample<T> {
    /// Constructor.
    pub fn new(n: usize, approximation: T, error: T) -> Self {
        Self {
            n,
            approximation,
            error,
        }
    }

    /// Returns the number of sub-intervals.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the value of the integral for `n` sub-intervals.
    pub fn approximation(&self) -> T {
        self.approximation
    }

    /// Returns the absolute difference between the approximation and the exact value.
    pub fn error(&self) -> T {
        self.error
    }
}

/// Samples of a sweep together with the fitted power law.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ConvergenceReport<T> {
    samples: Vec<ConvergenceSample<T>>,
    fit: LinearFit<T>,
    skipped: usize,
}

impl<T: Float> ConvergenceReport<T> {
    /// Returns the slope of $\ln \varepsilon_n$ versus $\ln n$, which is $-p$.
    pub fn slope(&self) -> T {
        self.fit.slope()
    }

    /// Returns the empirical convergence order $p$, the negated slope.
    pub fn order(&self) -> T {
        -self.slope()
    }

    /// Returns all samples in the order of the sweep, including the ones left out of the fit.
    pub fn samples(&self) -> &[ConvergenceSample<T>] {
        &self.samples
    }

    /// Returns the least-squares fit in log-log space.
    pub fn fit(&self) -> &LinearFit<T> {
        &self.fit
    }

    /// Returns how many samples were left out of the fit because their error was exactly zero.
    pub fn skipped_zero_errors(&self) -> usize {
        self.skipped
    }
}

/// Integrates `integrand` from `a` to `b` once for every sub-interval count in `sweep`, compares
/// with the `exact` value of the integral and fits a straight line through $(\ln n, \ln
/// \varepsilon_n)$. After each sample `callback` is called with all samples so far.
///
/// Samples whose error is exactly zero have no logarithm and are left out of the fit; they are
/// still part of [`ConvergenceReport::samples`] and counted in
/// [`ConvergenceReport::skipped_zero_errors`]. Non-finite errors are kept, so that a `nan` or
/// infinite slope signals them.
///
/// # Errors
///
/// Returns [`IntegrationError::InvalidArgument`] if `sweep` is empty or contains zero, or a bound
/// is not finite, and [`IntegrationError::InsufficientSamples`] if fewer than two samples have a
/// non-zero error.
pub fn check_convergence<T, I, C>(
    integrand: &I,
    a: T,
    b: T,
    exact: T,
    sweep: &[usize],
    callback: &C,
) -> Result<ConvergenceReport<T>>
where
    I: Integrand<T> + ?Sized,
    C: Callback<T> + ?Sized,
    T: AddAssign + Float + FromPrimitive,
{
    if sweep.is_empty() {
        return Err(IntegrationError::invalid_argument(
            "the sweep of sub-interval counts is empty",
        ));
    }

    let mut samples = Vec::with_capacity(sweep.len());

    for &n in sweep {
        let approximation = midpoint::integrate(integrand, a, b, n)?;
        samples.push(ConvergenceSample::new(
            n,
            approximation,
            (approximation - exact).abs(),
        ));
        callback.report(&samples);
    }

    let mut fit = LinearFit::default();
    let mut skipped = 0;

    for sample in &samples {
        if sample.error == T::zero() {
            skipped += 1;
        } else {
            fit.update((to_float::<T>(sample.n)?.ln(), sample.error.ln()));
        }
    }

    if fit.points() < 2 {
        return Err(IntegrationError::InsufficientSamples {
            usable: fit.points(),
            required: 2,
        });
    }

    Ok(ConvergenceReport {
        samples,
        fit,
        skipped,
    })
}

/// Returns the sub-interval counts `start`, `start + step`, ... up to and including `stop`.
///
/// # Errors
///
/// Returns [`IntegrationError::InvalidArgument`] if `start` or `step` is zero, or `start` is
/// larger than `stop`.
pub fn linear_sweep(start: usize, stop: usize, step: usize) -> Result<Vec<usize>> {
    if start == 0 || step == 0 {
        return Err(IntegrationError::invalid_argument(
            "a sweep needs a positive start and step",
        ));
    }

    if start > stop {
        return Err(IntegrationError::invalid_argument(format!(
            "the sweep start {} is larger than its stop {}",
            start, stop
        )));
    }

    Ok((start..=stop).step_by(step).collect())
}

/// Estimates the convergence order from a single doubling,
///
/// $$ p \approx \log_2 \frac{\varepsilon_n}{\varepsilon_{2n}} $$
///
/// which should be close to two for smooth integrands.
///
/// # Errors
///
/// Returns [`IntegrationError::InvalidArgument`] if `2 n` overflows or for the same reasons as
/// [`midpoint::integrate`].
pub fn observed_order<T, I>(integrand: &I, a: T, b: T, exact: T, n: usize) -> Result<T>
where
    I: Integrand<T> + ?Sized,
    T: Float + FromPrimitive,
{
    let doubled = n.checked_mul(2).ok_or_else(|| {
        IntegrationError::invalid_argument(format!("cannot double {} sub-intervals", n))
    })?;

    let coarse = (midpoint::integrate(integrand, a, b, n)? - exact).abs();
    let fine = (midpoint::integrate(integrand, a, b, doubled)? - exact).abs();

    Ok((coarse / fine).log2())
}
