//! Dense/dense L2 distance.
//!
//! The baseline every other kernel must agree with: one synchronized pass
//! over both profiles.

/// Squared L2 distance between two dense profiles: `Σ(q[i] - r[i])²`.
///
/// Returns 0.0 for empty profiles.
///
/// # Debug Assertions
///
/// In debug builds, panics if lengths differ. In release builds the shorter
/// length is used.
///
/// # Example
///
/// ```rust
/// use rankl2::dense_dense;
///
/// let q = [-0.25, 0.0, 0.25];
/// let r = [0.25, 0.0, -0.25];
/// assert!((dense_dense(&q, &r) - 0.5).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn dense_dense(query: &[f64], reference: &[f64]) -> f64 {
    debug_assert_eq!(
        query.len(),
        reference.len(),
        "dense_dense: length mismatch ({} vs {})",
        query.len(),
        reference.len()
    );

    query
        .iter()
        .zip(reference.iter())
        .map(|(q, r)| {
            let delta = q - r;
            delta * delta
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_dense_basic() {
        let q = [0.0, 3.0];
        let r = [4.0, 0.0];
        assert!((dense_dense(&q, &r) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_dense_dense_empty() {
        assert_eq!(dense_dense(&[], &[]), 0.0);
    }

    #[test]
    fn test_dense_dense_symmetric() {
        let q = [0.1, -0.4, 0.3];
        let r = [-0.2, 0.2, 0.0];
        assert_eq!(dense_dense(&q, &r), dense_dense(&r, &q));
    }

    #[test]
    fn test_dense_dense_opposite_ranks() {
        // Perfectly reversed scaled ranks sit at the maximum distance of 1.0.
        let forward = [-1.0, 0.0, 1.0].map(|v: f64| v * 0.5 / 2.0_f64.sqrt());
        let backward = [1.0, 0.0, -1.0].map(|v: f64| v * 0.5 / 2.0_f64.sqrt());
        assert!((dense_dense(&forward, &backward) - 1.0).abs() < 1e-12);
    }
}
