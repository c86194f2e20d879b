//! Sparse/dense L2 distance kernels.
//!
//! Every kernel here takes one dense profile and one sparse profile (fill rank
//! plus explicit entries). L2 distance is symmetric, so the same function
//! serves a sparse query against a dense reference and vice versa.
//!
//! | Kernel | Entry order | Scratch | Cost |
//! |--------|-------------|---------|------|
//! | [`interleaved`] | by index | none | O(n) |
//! | [`densified`] | any | `Vec<f64>`, refilled | O(n) fill + O(n) compare |
//! | [`densified_delta`] | any | [`DeltaBuffer`] | O(n) compare + O(k) reset |
//! | [`unstable`] | any | none | O(k) |

use crate::dense::dense_dense;
use crate::scratch::DeltaBuffer;
use crate::SCALED_SUM_SQUARES;

/// Walk the dense profile once, comparing each gap between sparse entries
/// against the fill rank and each entry against its exact rank.
///
/// `entries` must be sorted by index.
///
/// # Example
///
/// ```rust
/// use rankl2::interleaved;
///
/// let dense = [0.1, 0.2, 0.3];
/// let entries = [(1, 0.5)];
/// // (0.1 - 0)² + (0.2 - 0.5)² + (0.3 - 0)²
/// assert!((interleaved(&dense, &entries, 0.0) - 0.19).abs() < 1e-12);
/// ```
#[must_use]
pub fn interleaved(dense: &[f64], entries: &[(usize, f64)], fill: f64) -> f64 {
    debug_assert!(
        entries.windows(2).all(|w| w[0].0 < w[1].0),
        "interleaved: entries must be sorted by index"
    );

    let mut l2 = 0.0;
    let mut i = 0;
    for &(index, value) in entries {
        for &d in &dense[i..index] {
            let delta = d - fill;
            l2 += delta * delta;
        }
        let delta = dense[index] - value;
        l2 += delta * delta;
        i = index + 1;
    }

    for &d in &dense[i..] {
        let delta = d - fill;
        l2 += delta * delta;
    }

    l2
}

/// Materialize the sparse profile into `scratch`, then compare densely.
///
/// `scratch` is cleared and refilled on every call, so it carries no
/// invariant between calls; reusing it only saves the allocation.
#[must_use]
pub fn densified(dense: &[f64], entries: &[(usize, f64)], fill: f64, scratch: &mut Vec<f64>) -> f64 {
    scratch.clear();
    scratch.resize(dense.len(), fill);
    for &(index, value) in entries {
        scratch[index] = value;
    }
    dense_dense(dense, scratch)
}

/// Densify through a zero-invariant delta buffer.
///
/// Only the `k` explicit positions are written (as `value - fill`) and reset
/// afterwards, so no O(n) fill is needed; the compare pass reconstructs each
/// sparse rank as `delta + fill`.
///
/// On return `scratch` is clean again.
#[must_use]
pub fn densified_delta(
    dense: &[f64],
    entries: &[(usize, f64)],
    fill: f64,
    scratch: &mut DeltaBuffer,
) -> f64 {
    let deltas = scratch.stage(dense.len(), entries, fill);
    let l2: f64 = dense
        .iter()
        .zip(deltas.iter())
        .map(|(d, delta)| {
            let diff = d - (delta + fill);
            diff * diff
        })
        .sum();

    scratch.reset(entries);
    l2
}

/// Algebraic O(k) form that never touches the implicit positions.
///
/// Expanding `Σ(d - s)²` with `s = fill + Δ` and using that both profiles are
/// centred (`Σ d = Σ s = 0`) leaves
///
/// ```text
/// Σ d² + Σ_k Δ(Δ - 2·d) - n·fill²
/// ```
///
/// where `Σ d²` is [`SCALED_SUM_SQUARES`] for a dense profile with variance
/// and zero otherwise.
///
/// # Numerical Stability
///
/// The result is a difference of terms of comparable magnitude, so it loses
/// precision relative to the other kernels. Both inputs must be genuine
/// scaled-rank profiles; for arbitrary vectors the identity does not hold.
#[must_use]
pub fn unstable(dense: &[f64], dense_has_variance: bool, entries: &[(usize, f64)], fill: f64) -> f64 {
    let mut l2 = 0.0;
    for &(index, value) in entries {
        let target = dense[index];
        let delta = value - fill;
        l2 += delta * (delta - 2.0 * target);
    }

    let x2 = if dense_has_variance {
        SCALED_SUM_SQUARES
    } else {
        0.0
    };
    x2 + l2 - dense.len() as f64 * fill * fill
}
