//! Midpoint integrator
use crate::core::*;

use num_traits::{Float, FromPrimitive};
use std::ops::Range;
use std::panic;

use crossbeam as cb;

/// Sums $f(x_{j+1/2}) \Delta x$ over the sub-intervals `j` in `range`, left to right.
fn sum_intervals<T, I>(integrand: &I, a: T, dx: T, mut range: Range<usize>) -> Result<T>
where
    I: Integrand<T> + ?Sized,
    T: Float + FromPrimitive,
{
    let half = dx / (T::one() + T::one());

    range.try_fold(T::zero(), |sum, j| {
        let left = a + to_float::<T>(j)? * dx;
        Ok(sum + integrand.call(left + half) * dx)
    })
}

/// Approximates
///
/// $$ \int_a^b \mathrm{d} x f(x) \approx \sum_{j=0}^{n-1} f \left( x_j + \frac{\Delta x}{2}
/// \right) \Delta x, \quad x_j = a + j \Delta x, \quad \Delta x = \frac{b-a}{n} $$
///
/// using `n` sub-intervals of equal width. Terms are added with ascending `j`, so that the result
/// is reproducible bit by bit for a fixed `n`. Reversing the bounds negates $\Delta x$ and with it
/// the result; if `a == b` the result is zero and the integrand is not evaluated.
///
/// An integrand returning `inf` or `nan` gives a non-finite integral, which is not an error.
///
/// # Errors
///
/// Returns [`IntegrationError::InvalidArgument`] if `n` is zero or one of the bounds is not finite.
pub fn integrate<T, I>(integrand: &I, a: T, b: T, n: usize) -> Result<T>
where
    I: Integrand<T> + ?Sized,
    T: Float + FromPrimitive,
{
    let dx = step_width(a, b, n)?;

    if a == b {
        return Ok(T::zero());
    }

    sum_intervals(integrand, a, dx, 0..n)
}

/// Same as [`integrate`], but for an integrand that can fail. The first error returned by
/// `integrand` stops the summation and is returned unchanged; no partial sum is reported.
///
/// # Errors
///
/// Returns the integrand's error, or an [`IntegrationError::InvalidArgument`] converted into `E`
/// for the same reasons as [`integrate`].
pub fn try_integrate<T, F, E>(integrand: F, a: T, b: T, n: usize) -> std::result::Result<T, E>
where
    F: Fn(T) -> std::result::Result<T, E>,
    E: From<IntegrationError>,
    T: Float + FromPrimitive,
{
    let dx = step_width(a, b, n)?;

    if a == b {
        return Ok(T::zero());
    }

    let half = dx / (T::one() + T::one());
    let mut sum = T::zero();

    for j in 0..n {
        let left = a + to_float::<T>(j)? * dx;
        sum = sum + integrand(left + half)? * dx;
    }

    Ok(sum)
}

/// Same as [`integrate`], but the `n` sub-intervals are split into `n_cores` contiguous chunks
/// which are summed on separate threads. The partial sums are added in the order of the chunks,
/// so the result only depends on `n` and `n_cores`; with a single core it agrees bit by bit with
/// [`integrate`]. More cores than sub-intervals are reduced to `n`.
///
/// A panic inside the integrand is resumed on the calling thread.
///
/// # Errors
///
/// Returns [`IntegrationError::InvalidArgument`] if `n_cores` is zero or for the same reasons as
/// [`integrate`].
pub fn integrate_parallel<T, I>(integrand: &I, a: T, b: T, n: usize, n_cores: usize) -> Result<T>
where
    I: Integrand<T> + ?Sized,
    T: Float + FromPrimitive + Send + Sync,
{
    if n_cores == 0 {
        return Err(IntegrationError::invalid_argument(
            "the number of cores must be positive",
        ));
    }

    let dx = step_width(a, b, n)?;

    if a == b {
        return Ok(T::zero());
    }

    let n_cores = n_cores.min(n);

    // distribute the sub-intervals evenly across the cores
    let partial_sums = cb::thread::scope(|s| {
        let handles = (0..n_cores)
            .map(|core| {
                let range = intervals_for_core(core, n_cores, n);
                s.spawn(move |_| sum_intervals(integrand, a, dx, range))
            })
            .collect::<Vec<_>>();

        // wait for the threads to finish
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect::<Vec<_>>()
    })
    .unwrap_or_else(|e| panic::resume_unwind(e));

    partial_sums
        .into_iter()
        .try_fold(T::zero(), |sum, partial| Ok(sum + partial?))
}

/// Returns the a-priori bound
///
/// $$ \left| \int_a^b \mathrm{d} x f(x) - I_n \right| \le \frac{|b-a|^3}{24 n^2} \max_{x \in
/// [a,b]} |f''(x)| $$
///
/// on the error of [`integrate`], where `max_second_derivative` is the maximum of $|f''|$ supplied
/// by the caller.
///
/// # Errors
///
/// Returns [`IntegrationError::InvalidArgument`] if `max_second_derivative` is negative or not
/// finite, or for the same reasons as [`integrate`].
pub fn error_bound<T>(a: T, b: T, n: usize, max_second_derivative: T) -> Result<T>
where
    T: Float + FromPrimitive,
{
    let dx = step_width(a, b, n)?;

    if !max_second_derivative.is_finite() || max_second_derivative < T::zero() {
        return Err(IntegrationError::invalid_argument(
            "the maximum of the second derivative must be finite and non-negative",
        ));
    }

    // |b-a|^3 / (24 n^2) = |b-a| dx^2 / 24
    Ok((b - a).abs() * dx * dx / to_float(24)? * max_second_derivative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::cell::Cell;
    use std::f64::consts::PI;

    #[derive(Debug)]
    enum EvalError {
        Domain(f64),
        Integration(IntegrationError),
    }

    impl From<IntegrationError> for EvalError {
        fn from(err: IntegrationError) -> Self {
            Self::Integration(err)
        }
    }

    #[test]
    fn single_interval_is_the_midpoint_value() {
        let square = |x: f64| x * x;
        assert_eq!(integrate(&square, 1.0, 3.0, 1).unwrap(), 8.0);
        assert_eq!(integrate(&square, 0.5, 2.5, 1).unwrap(), 2.25 * 2.0);
    }

    #[test]
    fn sub_ranges_add_up_to_the_full_sum() {
        let f = |x: f64| x.exp();
        let dx = 0.25;
        let full = sum_intervals(&f, -1.0, dx, 0..8).unwrap();
        let left = sum_intervals(&f, -1.0, dx, 0..3).unwrap();
        let right = sum_intervals(&f, -1.0, dx, 3..8).unwrap();

        assert_approx_eq!(left + right, full, 1e-14);
        assert_eq!(sum_intervals(&f, -1.0, dx, 4..4).unwrap(), 0.0);
        assert_eq!(full, integrate(&f, -1.0, 1.0, 8).unwrap());
    }

    #[test]
    fn sine_reference_value() {
        let result = integrate(&f64::sin, 0.0, PI, 1000).unwrap();
        assert_approx_eq!(result, 2.0000008224672694, 1e-14);
    }

    #[test]
    fn zero_width_interval() {
        let reciprocal = |x: f64| 1.0 / x;
        assert_eq!(integrate(&reciprocal, 0.0, 0.0, 10).unwrap(), 0.0);
        assert_eq!(integrate_parallel(&reciprocal, 0.0, 0.0, 10, 2).unwrap(), 0.0);
    }

    #[test]
    fn non_finite_results_are_not_errors() {
        let reciprocal = |x: f64| 1.0 / x;
        assert!(integrate(&reciprocal, -1.0, 1.0, 1).unwrap().is_infinite());

        let log = |x: f64| x.ln();
        assert!(integrate(&log, -1.0, 1.0, 2).unwrap().is_nan());
    }

    #[test]
    fn invalid_arguments() {
        assert!(matches!(
            integrate(&f64::sin, 0.0, 1.0, 0),
            Err(IntegrationError::InvalidArgument(_))
        ));
        assert!(matches!(
            integrate(&f64::sin, f64::NEG_INFINITY, 1.0, 4),
            Err(IntegrationError::InvalidArgument(_))
        ));
        assert!(matches!(
            integrate_parallel(&f64::sin, 0.0, 1.0, 4, 0),
            Err(IntegrationError::InvalidArgument(_))
        ));
        assert!(matches!(
            error_bound(0.0, 1.0, 4, -1.0),
            Err(IntegrationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn try_integrate_matches_integrate() {
        let ok = |x: f64| -> std::result::Result<f64, EvalError> { Ok(x.exp()) };
        let exp = |x: f64| x.exp();

        assert_eq!(
            try_integrate(ok, -1.0, 2.0, 37).unwrap(),
            integrate(&exp, -1.0, 2.0, 37).unwrap()
        );
    }

    #[test]
    fn try_integrate_stops_at_first_error() {
        let evaluations = Cell::new(0);
        let sqrt = |x: f64| {
            evaluations.set(evaluations.get() + 1);
            if x > 0.5 {
                Err(EvalError::Domain(x))
            } else {
                Ok(x.sqrt())
            }
        };

        // the midpoints are 0.05, 0.15, ..., the sixth one is the first above 0.5
        match try_integrate(sqrt, 0.0, 1.0, 10) {
            Err(EvalError::Domain(x)) => assert_approx_eq!(x, 0.55, 1e-15),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(evaluations.get(), 6);
    }

    #[test]
    fn try_integrate_converts_invalid_arguments() {
        let ok = |x: f64| -> std::result::Result<f64, EvalError> { Ok(x) };
        assert!(matches!(
            try_integrate(ok, 0.0, 1.0, 0),
            Err(EvalError::Integration(IntegrationError::InvalidArgument(_)))
        ));
    }

    #[test]
    fn parallel_single_core_is_bitwise_serial() {
        let f = |x: f64| x.cos() * x;
        assert_eq!(
            integrate_parallel(&f, -0.3, 4.1, 9_999, 1).unwrap(),
            integrate(&f, -0.3, 4.1, 9_999).unwrap()
        );
    }

    #[test]
    fn parallel_agrees_with_serial() {
        let f = |x: f64| x.cos() * x;
        let serial = integrate(&f, -0.3, 4.1, 10_000).unwrap();

        for n_cores in &[2, 3, 4, 7] {
            assert_approx_eq!(
                integrate_parallel(&f, -0.3, 4.1, 10_000, *n_cores).unwrap(),
                serial,
                1e-10
            );
        }

        // more cores than sub-intervals
        assert_approx_eq!(
            integrate_parallel(&f, -0.3, 4.1, 3, 8).unwrap(),
            integrate(&f, -0.3, 4.1, 3).unwrap(),
            1e-15
        );
    }

    #[test]
    #[should_panic(expected = "integrand failed")]
    fn parallel_resumes_integrand_panics() {
        let f = |x: f64| {
            if x > 0.9 {
                panic!("integrand failed");
            }
            x
        };
        let _ = integrate_parallel(&f, 0.0, 1.0, 100, 4);
    }

    #[test]
    fn error_bound_holds_for_sine() {
        // |sin''| <= 1
        for &n in &[1, 10, 100, 1000] {
            let error = (integrate(&f64::sin, 0.0, PI, n).unwrap() - 2.0).abs();
            let bound = error_bound(0.0, PI, n, 1.0).unwrap();
            assert!(error <= bound, "n={}: {} > {}", n, error, bound);
        }

        assert_approx_eq!(error_bound(0.0, 2.0, 4, 3.0).unwrap(), 8.0 / 384.0 * 3.0, 1e-15);
        assert_eq!(
            error_bound(2.0, 0.0, 4, 3.0).unwrap(),
            error_bound(0.0, 2.0, 4, 3.0).unwrap()
        );
    }
}
