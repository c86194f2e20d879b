//! Error types for the checked dispatch layer.
//!
//! The kernels and scalers themselves are precondition-based; only
//! [`Workspace::distance`](crate::Workspace::distance) and the correlation
//! helpers report errors.

use thiserror::Error;

use crate::kernel::Kernel;
use crate::profile::Density;

/// Errors reported by the dispatch and convenience layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The kernel cannot consume this density combination.
    #[error("kernel `{kernel}` does not accept a {query} query with a {reference} reference")]
    UnsupportedDensity {
        /// Requested kernel.
        kernel: Kernel,
        /// Density of the query profile.
        query: Density,
        /// Density of the reference profile.
        reference: Density,
    },

    /// A dense profile does not cover exactly `n` positions.
    #[error("profile length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Number of positions in the comparison.
        expected: usize,
        /// Length of the offending profile.
        got: usize,
    },

    /// Invalid arguments (too few observations, mismatched series).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A kernel name that does not match any variant.
    #[error("unknown kernel: {0}")]
    UnknownKernel(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
