//! Spearman correlation from scaled-rank distances.
//!
//! Scaled ranks with variance have `Σ q² = Σ r² = 0.25`, so
//!
//! ```text
//! Σ(q - r)² = 0.5 - 2·Σ q·r        rho = Σ q·r / 0.25
//! ```
//!
//! and `rho = 1 - 2·l2`.

use crate::dense::dense_dense;
use crate::error::{Error, Result};
use crate::profile::DenseRanks;

/// Spearman's rho from the squared L2 distance between two scaled-rank
/// profiles that both have variance.
///
/// Clamped to `[-1, 1]` to absorb rounding.
///
/// # Example
///
/// ```rust
/// use rankl2::spearman_from_l2;
///
/// assert_eq!(spearman_from_l2(0.0), 1.0);
/// assert_eq!(spearman_from_l2(0.5), 0.0);
/// assert_eq!(spearman_from_l2(1.0), -1.0);
/// ```
#[inline]
#[must_use]
pub fn spearman_from_l2(l2: f64) -> f64 {
    (1.0 - 2.0 * l2).clamp(-1.0, 1.0)
}

/// Spearman rank correlation between `x` and `y` (allocating).
///
/// Ties receive average ranks. Returns 0.0 if either series is constant.
///
/// # Errors
///
/// [`Error::InvalidInput`] if the lengths differ or there are fewer than two
/// observations.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::InvalidInput(format!(
            "spearman: x and y must have the same length ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(Error::InvalidInput(
            "spearman: need at least 2 observations".into(),
        ));
    }

    let rx = DenseRanks::from_values(x);
    let ry = DenseRanks::from_values(y);
    if !rx.has_variance || !ry.has_variance {
        return Ok(0.0);
    }
    Ok(spearman_from_l2(dense_dense(&rx.ranks, &ry.ranks)))
}
