//! Kernel selection and dispatch.
//!
//! The free functions in [`dense`](crate::dense_dense), [`mixed`](crate::interleaved)
//! and [`sparse`](crate::merge_join) are the hot-path API. [`Workspace`] wraps
//! them for callers that pick a [`Kernel`] at runtime: it owns the scratch
//! buffers, checks that the kernel accepts the two profiles' densities, and
//! makes exactly one kernel call per comparison.
//!
//! # Kernel Selection Guide
//!
//! | Kernel | Query | Reference | Cost |
//! |--------|-------|-----------|------|
//! | `dense-dense` | dense | dense | O(n) |
//! | `interleaved` | dense / sparse | sparse / dense | O(n) |
//! | `densified` | dense / sparse | sparse / dense | O(n) fill + O(n) |
//! | `densified-delta` | dense / sparse | sparse / dense | O(n) + O(k) reset |
//! | `unstable` | dense / sparse | sparse / dense | O(k) |
//! | `merge-join` | sparse | sparse | O(k_q + k_r) |
//! | `remap-probe` | sparse | sparse | O(k_q + k_r) |

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::dense::dense_dense;
use crate::error::{Error, Result};
use crate::mixed::{densified, densified_delta, interleaved, unstable};
use crate::profile::{Density, Profile};
use crate::scratch::{DeltaBuffer, ProbeTable};
use crate::sparse::{merge_join, remap_probe};

/// One of the interchangeable L2 distance algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Kernel {
    /// Synchronized pass over two dense profiles.
    DenseDense,
    /// Dense walk with sparse entries interleaved by index.
    Interleaved,
    /// Refill a scratch vector with the sparse profile, then dense/dense.
    Densified,
    /// Zero-invariant delta buffer; only touched slots are reset.
    DensifiedDelta,
    /// O(k) algebraic form; least numerically stable.
    Unstable,
    /// Two-pointer merge over index-sorted sparse entries.
    MergeJoin,
    /// Lookup-table probe between two sparse profiles.
    RemapProbe,
}

impl Kernel {
    /// Every kernel, in declaration order.
    pub const ALL: [Kernel; 7] = [
        Kernel::DenseDense,
        Kernel::Interleaved,
        Kernel::Densified,
        Kernel::DensifiedDelta,
        Kernel::Unstable,
        Kernel::MergeJoin,
        Kernel::RemapProbe,
    ];

    /// Stable kebab-case name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Kernel::DenseDense => "dense-dense",
            Kernel::Interleaved => "interleaved",
            Kernel::Densified => "densified",
            Kernel::DensifiedDelta => "densified-delta",
            Kernel::Unstable => "unstable",
            Kernel::MergeJoin => "merge-join",
            Kernel::RemapProbe => "remap-probe",
        }
    }

    /// Whether this kernel accepts a `query` / `reference` density pair.
    #[must_use]
    pub fn supports(&self, query: Density, reference: Density) -> bool {
        match self {
            Kernel::DenseDense => query == Density::Dense && reference == Density::Dense,
            Kernel::Interleaved | Kernel::Densified | Kernel::DensifiedDelta | Kernel::Unstable => {
                query != reference
            }
            Kernel::MergeJoin | Kernel::RemapProbe => {
                query == Density::Sparse && reference == Density::Sparse
            }
        }
    }

    /// Default kernel for a density pair.
    #[must_use]
    pub fn preferred(query: Density, reference: Density) -> Kernel {
        match (query, reference) {
            (Density::Dense, Density::Dense) => Kernel::DenseDense,
            (Density::Sparse, Density::Sparse) => Kernel::MergeJoin,
            _ => Kernel::DensifiedDelta,
        }
    }

    /// Kernels that accept a density pair.
    pub fn applicable(query: Density, reference: Density) -> impl Iterator<Item = Kernel> {
        Kernel::ALL
            .into_iter()
            .filter(move |kernel| kernel.supports(query, reference))
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Kernel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Kernel::ALL
            .into_iter()
            .find(|kernel| kernel.name() == s)
            .ok_or_else(|| Error::UnknownKernel(s.to_string()))
    }
}

/// Scratch state for repeated comparisons.
///
/// One workspace per hot loop; `&mut` access keeps two comparisons from
/// sharing scratch at the same time. Buffers grow to the largest `n` seen
/// and are left clean after every call.
///
/// # Example
///
/// ```rust
/// use rankl2::{DenseRanks, Kernel, SparseRanks, Workspace};
///
/// let query = DenseRanks::from_values(&[0.5, -1.0, 3.0, 0.0]);
/// let reference = SparseRanks::from_values(&[0.0, -2.0, 1.0, 0.0]);
///
/// let mut workspace = Workspace::new();
/// let a = workspace
///     .distance(Kernel::DensifiedDelta, 4, query.as_profile(), reference.as_profile())
///     .unwrap();
/// let b = workspace
///     .distance(Kernel::Interleaved, 4, reference.as_profile(), query.as_profile())
///     .unwrap();
/// assert!((a - b).abs() < 1e-12);
///
/// // Sparse/sparse kernels reject a dense profile.
/// assert!(workspace
///     .distance(Kernel::MergeJoin, 4, query.as_profile(), reference.as_profile())
///     .is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    densified: Vec<f64>,
    deltas: DeltaBuffer,
    probe: ProbeTable,
}

impl Workspace {
    /// Empty workspace; buffers grow on first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspace pre-sized for profiles of `n` positions.
    #[must_use]
    pub fn with_len(n: usize) -> Self {
        debug!("allocating workspace for {} positions", n);
        Self {
            densified: Vec::with_capacity(n),
            deltas: DeltaBuffer::with_len(n),
            probe: ProbeTable::with_len(n),
        }
    }

    /// Squared L2 distance between two scaled-rank profiles of `n` positions
    /// using `kernel`.
    ///
    /// Mixed kernels accept the sparse profile on either side. Sparse entries
    /// must be sorted by index and lie in `[0, n)`; that is not checked.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedDensity`] if `kernel` does not accept the pair,
    /// [`Error::LengthMismatch`] if a dense profile is not `n` long.
    pub fn distance(
        &mut self,
        kernel: Kernel,
        n: usize,
        query: Profile<'_>,
        reference: Profile<'_>,
    ) -> Result<f64> {
        for profile in [query, reference] {
            if let Profile::Dense { ranks, .. } = profile {
                if ranks.len() != n {
                    return Err(Error::LengthMismatch {
                        expected: n,
                        got: ranks.len(),
                    });
                }
            }
        }

        use Profile::{Dense, Sparse};
        let l2 = match (kernel, query, reference) {
            (Kernel::DenseDense, Dense { ranks: q, .. }, Dense { ranks: r, .. }) => {
                dense_dense(q, r)
            }

            (Kernel::Interleaved, Dense { ranks, .. }, Sparse { fill, entries })
            | (Kernel::Interleaved, Sparse { fill, entries }, Dense { ranks, .. }) => {
                interleaved(ranks, entries, fill)
            }

            (Kernel::Densified, Dense { ranks, .. }, Sparse { fill, entries })
            | (Kernel::Densified, Sparse { fill, entries }, Dense { ranks, .. }) => {
                densified(ranks, entries, fill, &mut self.densified)
            }

            (Kernel::DensifiedDelta, Dense { ranks, .. }, Sparse { fill, entries })
            | (Kernel::DensifiedDelta, Sparse { fill, entries }, Dense { ranks, .. }) => {
                densified_delta(ranks, entries, fill, &mut self.deltas)
            }

            (Kernel::Unstable, Dense { ranks, has_variance }, Sparse { fill, entries })
            | (Kernel::Unstable, Sparse { fill, entries }, Dense { ranks, has_variance }) => {
                unstable(ranks, has_variance, entries, fill)
            }

            (Kernel::MergeJoin, Sparse { fill: qf, entries: q }, Sparse { fill: rf, entries: r }) => {
                merge_join(n, q, qf, r, rf)
            }

            (Kernel::RemapProbe, Sparse { fill: qf, entries: q }, Sparse { fill: rf, entries: r }) => {
                remap_probe(n, q, qf, r, rf, &mut self.probe)
            }

            _ => {
                return Err(Error::UnsupportedDensity {
                    kernel,
                    query: query.density(),
                    reference: reference.density(),
                })
            }
        };

        Ok(l2)
    }

    /// [`distance`](Self::distance) with [`Kernel::preferred`] for the pair.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if a dense profile is not `n` long.
    pub fn preferred_distance(
        &mut self,
        n: usize,
        query: Profile<'_>,
        reference: Profile<'_>,
    ) -> Result<f64> {
        let kernel = Kernel::preferred(query.density(), reference.density());
        self.distance(kernel, n, query, reference)
    }

    /// Whether every scratch buffer is in its clean state. O(n).
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.deltas.is_clear() && self.probe.is_clear()
    }
}
