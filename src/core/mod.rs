//! Core functionality. You don't need to import this module since all its public members are part
//! of the crate namespace.
pub mod error;
pub mod estimators;

pub use crate::core::error::{IntegrationError, Result};
pub use crate::core::estimators::{LinearFit, Updateable};

use num_traits::{Float, FromPrimitive};
use std::ops::Range;

/// Trait which every integrand must implement.
///
/// It is implemented for every closure and function of the form `Fn(T) -> T`, so that
/// `f64::sin` or `|x: f64| x * x` can be passed directly. Implement it by hand for integrands that
/// carry parameters.
pub trait Integrand<T>: Send + Sync {
    /// Evaluates the integrand at `x`.
    fn call(&self, x: T) -> T;
}

impl<T, F> Integrand<T> for F
where
    F: Fn(T) -> T + Send + Sync,
{
    fn call(&self, x: T) -> T {
        self(x)
    }
}

/// Converts an index or count into the numeric type `T`.
pub(crate) fn to_float<T: FromPrimitive>(value: usize) -> Result<T> {
    T::from_usize(value).ok_or_else(|| {
        IntegrationError::invalid_argument(format!("{} is not representable", value))
    })
}

/// Checks the discretization parameters and returns the step width $\Delta x = (b-a)/n$.
pub(crate) fn step_width<T>(a: T, b: T, n: usize) -> Result<T>
where
    T: Float + FromPrimitive,
{
    if n == 0 {
        return Err(IntegrationError::invalid_argument(
            "the number of sub-intervals must be positive",
        ));
    }

    if !a.is_finite() || !b.is_finite() {
        return Err(IntegrationError::invalid_argument(
            "the integration bounds must be finite",
        ));
    }

    Ok((b - a) / to_float(n)?)
}

/// Computes the range of sub-intervals summed on a given core, given the total number of cores
/// `n_cores`, the index `core` (zero-based) of the current thread as well as the total number of
/// sub-intervals `total` to sum combined on all cores.
pub(crate) fn intervals_for_core(core: usize, n_cores: usize, total: usize) -> Range<usize> {
    debug_assert!(core < n_cores);

    let per_core = (total + n_cores - 1) / n_cores;
    let start = (core * per_core).min(total);

    // the last core picks up whatever is left
    if n_cores == core + 1 {
        start..total
    } else {
        start..(start + per_core).min(total)
    }
}
