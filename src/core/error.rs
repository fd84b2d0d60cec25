//! Errors returned by the integrators and the convergence checker.
use thiserror::Error;

/// Everything that can go wrong when integrating or fitting a convergence law.
///
/// Non-finite results are *not* errors: if the integrand returns `inf` or `nan` somewhere, the
/// integral is non-finite and returned as an ordinary value.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// An argument was outside of its domain, for example zero sub-intervals or a non-finite
    /// bound.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Not enough samples with a non-zero error were left to fit a straight line.
    #[error("insufficient samples for a least-squares fit: {usable} usable, {required} required")]
    InsufficientSamples {
        /// Number of samples that entered the fit.
        usable: usize,
        /// Minimum number of samples needed.
        required: usize,
    },

    /// Writing samples to disk failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serializing samples failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IntegrationError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Shorthand for results carrying an [`IntegrationError`].
pub type Result<T> = std::result::Result<T, IntegrationError>;
