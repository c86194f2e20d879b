//! Scaled-rank transforms and sparse-aware L2 kernels.
//!
//! `rankl2` computes Spearman-style distances between numeric profiles that
//! may be stored densely or sparsely (a shared fill rank plus explicit
//! entries):
//!
//! - **Scaling**: [`scaled_ranks`], [`scaled_ranks_sparse`]
//! - **Dense**: [`dense_dense`]
//! - **Mixed**: [`interleaved`], [`densified`], [`densified_delta`], [`unstable`]
//! - **Sparse**: [`merge_join`], [`remap_probe`]
//! - **Dispatch**: [`Kernel`], [`Workspace`]
//! - **Correlation**: [`spearman_from_l2`], [`spearman`]
//!
//! # Scaled Ranks
//!
//! Each profile's values are replaced by tie-averaged ranks, centred on the
//! midpoint rank and scaled so the squared ranks sum to
//! [`SCALED_SUM_SQUARES`]. The squared L2 distance between two such vectors
//! then maps onto Spearman's rho as `1 - 2 * l2`.
//!
//! Sparse profiles treat exact zeros as one implicit tie run: they all share
//! the fill rank, and only the non-zero positions are stored.
//!
//! # Kernels
//!
//! All kernels compute the same quantity, `Σ(q[i] - r[i])²` over the
//! materialized profiles, and agree to within rounding. They differ in which
//! densities they accept and what they touch:
//!
//! | Kernel | Densities | Touches |
//! |--------|-----------|---------|
//! | [`dense_dense`] | dense/dense | n |
//! | [`interleaved`] | dense/sparse | n |
//! | [`densified`] | dense/sparse | 2n |
//! | [`densified_delta`] | dense/sparse | n + 2k |
//! | [`unstable`] | dense/sparse | k |
//! | [`merge_join`] | sparse/sparse | k_q + k_r |
//! | [`remap_probe`] | sparse/sparse | k_q + 2·k_r |
//!
//! Kernels with scratch state ([`densified_delta`], [`remap_probe`]) restore
//! it before returning, touching only the positions they wrote.
//!
//! # Example
//!
//! ```rust
//! use rankl2::{
//!     merge_join, scaled_ranks_sparse_in_place, sort_by_index, spearman_from_l2, split_by_sign,
//! };
//!
//! let x = [0.0, 1.5, 0.0, -2.0, 0.0, 3.0];
//! let y = [0.0, 2.0, 0.0, -1.0, 0.0, 4.0];
//!
//! let (mut neg, mut pos) = (Vec::new(), Vec::new());
//! let (mut qx, mut qy) = (Vec::new(), Vec::new());
//!
//! split_by_sign(&x, &mut neg, &mut pos);
//! let fill_x = scaled_ranks_sparse_in_place(x.len(), &neg, &pos, &mut qx);
//! sort_by_index(&mut qx);
//!
//! split_by_sign(&y, &mut neg, &mut pos);
//! let fill_y = scaled_ranks_sparse_in_place(y.len(), &neg, &pos, &mut qy);
//! sort_by_index(&mut qy);
//!
//! let l2 = merge_join(x.len(), &qx, fill_x, &qy, fill_y);
//! assert!((spearman_from_l2(l2) - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod correlation;
mod dense;
mod error;
mod kernel;
mod mixed;
mod profile;
mod scale;
mod scratch;
mod sparse;

pub use correlation::{spearman, spearman_from_l2};
pub use dense::dense_dense;
pub use error::{Error, Result};
pub use kernel::{Kernel, Workspace};
pub use mixed::{densified, densified_delta, interleaved, unstable};
pub use profile::{
    collect_ranked, densify, sort_by_index, sort_ranked, split_by_sign, DenseRanks, Density,
    Profile, RankedVector, SparseRanks,
};
pub use scale::{scaled_ranks, scaled_ranks_in_place, scaled_ranks_sparse, scaled_ranks_sparse_in_place};
pub use scratch::{DeltaBuffer, ProbeTable};
pub use sparse::{merge_join, remap_probe};

/// Sum of squared scaled ranks for any profile with variance.
///
/// Half the value of the classic Spearman-to-L2 identity, so that two
/// profiles are at most distance 1.0 apart.
pub const SCALED_SUM_SQUARES: f64 = 0.25;

/// Relative tolerance within which all kernels agree on non-degenerate input.
pub const AGREEMENT_TOLERANCE: f64 = 1e-8;
