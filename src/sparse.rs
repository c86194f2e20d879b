//! Sparse/sparse L2 distance kernels.
//!
//! Both profiles are a fill rank plus explicit `(index, rank)` entries. Each
//! position falls into one of four cases:
//!
//! | Query | Reference | Contribution |
//! |-------|-----------|--------------|
//! | entry | entry | `(q - r)²` |
//! | entry | implicit | `(q - fill_r)²` |
//! | implicit | entry | `(r - fill_q)²` |
//! | implicit | implicit | `(fill_q - fill_r)²` |
//!
//! The last case is never visited; it is added in closed form from the count
//! of untouched positions, `n - k_q - (k_r - matches)`.

use std::cmp::Ordering;

use crate::scratch::ProbeTable;

/// Contribution of the positions neither profile lists explicitly.
#[inline]
fn untouched(
    n: usize,
    query_len: usize,
    reference_len: usize,
    matches: usize,
    query_fill: f64,
    reference_fill: f64,
) -> f64 {
    debug_assert!(
        query_len + reference_len - matches <= n,
        "sparse kernels: {} + {} - {} explicit positions exceed n = {}",
        query_len,
        reference_len,
        matches,
        n
    );
    let count = n - query_len - (reference_len - matches);
    let delta = query_fill - reference_fill;
    count as f64 * (delta * delta)
}

/// Sparse/sparse distance by merge-join over index-sorted entries.
///
/// # Algorithm
///
/// Two pointers advance through the sorted indices. The smaller index is
/// compared against the other side's fill rank; equal indices are compared
/// exactly and counted as a match. Whatever remains of either list once the
/// other is exhausted is compared against the other side's fill rank.
/// Time complexity O(|q| + |r|).
///
/// # Example
///
/// ```rust
/// use rankl2::{dense_dense, merge_join};
///
/// let query = [(0, 0.4), (2, -0.1)];
/// let reference = [(2, 0.3), (3, -0.2)];
/// let l2 = merge_join(5, &query, 0.05, &reference, -0.1);
///
/// let q = [0.4, 0.05, -0.1, 0.05, 0.05];
/// let r = [-0.1, -0.1, 0.3, -0.2, -0.1];
/// assert!((l2 - dense_dense(&q, &r)).abs() < 1e-12);
/// ```
#[must_use]
pub fn merge_join(
    n: usize,
    query: &[(usize, f64)],
    query_fill: f64,
    reference: &[(usize, f64)],
    reference_fill: f64,
) -> f64 {
    let mut i = 0;
    let mut j = 0;
    let mut matches = 0;
    let mut l2 = 0.0;

    while i < query.len() && j < reference.len() {
        let (qi, qv) = query[i];
        let (ri, rv) = reference[j];
        match qi.cmp(&ri) {
            Ordering::Less => {
                let delta = qv - reference_fill;
                l2 += delta * delta;
                i += 1;
            }
            Ordering::Greater => {
                let delta = rv - query_fill;
                l2 += delta * delta;
                j += 1;
            }
            Ordering::Equal => {
                let delta = qv - rv;
                l2 += delta * delta;
                i += 1;
                j += 1;
                matches += 1;
            }
        }
    }

    for &(_, qv) in &query[i..] {
        let delta = qv - reference_fill;
        l2 += delta * delta;
    }
    for &(_, rv) in &reference[j..] {
        let delta = rv - query_fill;
        l2 += delta * delta;
    }

    l2 + untouched(n, query.len(), reference.len(), matches, query_fill, reference_fill)
}

/// Sparse/sparse distance through an index lookup table.
///
/// The reference entries are written into `table`, then each query entry
/// probes it: a hit is compared exactly and consumed, a miss is compared
/// against the reference fill rank. Reference entries left unconsumed are
/// compared against the query fill rank and cleared. Neither list needs to
/// be sorted.
///
/// Cost is O(|q| + |r|) after the table has grown to `n` once; `table` is
/// clean again on return.
#[must_use]
pub fn remap_probe(
    n: usize,
    query: &[(usize, f64)],
    query_fill: f64,
    reference: &[(usize, f64)],
    reference_fill: f64,
    table: &mut ProbeTable,
) -> f64 {
    table.ensure_len(n);
    for &(index, value) in reference {
        table.insert(index, value);
    }

    let mut matches = 0;
    let mut l2 = 0.0;
    for &(index, qv) in query {
        let delta = match table.take(index) {
            Some(rv) => {
                matches += 1;
                qv - rv
            }
            None => qv - reference_fill,
        };
        l2 += delta * delta;
    }

    for &(index, _) in reference {
        if let Some(rv) = table.take(index) {
            let delta = rv - query_fill;
            l2 += delta * delta;
        }
    }

    l2 + untouched(n, query.len(), reference.len(), matches, query_fill, reference_fill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::dense_dense;
    use crate::profile::{densify, SparseRanks};

    fn materialize(n: usize, fill: f64, entries: &[(usize, f64)]) -> Vec<f64> {
        let mut out = vec![0.0; n];
        densify(fill, entries, &mut out);
        out
    }

    #[test]
    fn test_no_overlap() {
        let q = [(0, 0.2), (2, 0.4)];
        let r = [(1, -0.3), (3, 0.1)];
        let expected = dense_dense(&materialize(6, 0.05, &q), &materialize(6, -0.02, &r));
        let mut table = ProbeTable::new();
        assert!((merge_join(6, &q, 0.05, &r, -0.02) - expected).abs() < 1e-12);
        assert!((remap_probe(6, &q, 0.05, &r, -0.02, &mut table) - expected).abs() < 1e-12);
        assert!(table.is_clear());
    }

    #[test]
    fn test_full_overlap() {
        let q = [(0, 0.2), (1, -0.1), (2, 0.4)];
        let r = [(0, -0.3), (1, 0.1), (2, 0.0)];
        let expected = dense_dense(&materialize(3, 0.0, &q), &materialize(3, 0.0, &r));
        let mut table = ProbeTable::with_len(3);
        assert!((merge_join(3, &q, 0.0, &r, 0.0) - expected).abs() < 1e-12);
        assert!((remap_probe(3, &q, 0.0, &r, 0.0, &mut table) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_one_side_empty() {
        let q = [(1, 0.2), (4, -0.4)];
        let expected = dense_dense(&materialize(5, 0.1, &q), &[0.0; 5]);
        let mut table = ProbeTable::new();
        assert!((merge_join(5, &q, 0.1, &[], 0.0) - expected).abs() < 1e-12);
        assert!((merge_join(5, &[], 0.0, &q, 0.1) - expected).abs() < 1e-12);
        assert!((remap_probe(5, &q, 0.1, &[], 0.0, &mut table) - expected).abs() < 1e-12);
        assert!((remap_probe(5, &[], 0.0, &q, 0.1, &mut table) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_both_empty_uses_fills() {
        let mut table = ProbeTable::new();
        let expected = 4.0 * 0.3 * 0.3;
        assert!((merge_join(4, &[], 0.1, &[], -0.2) - expected).abs() < 1e-12);
        assert!((remap_probe(4, &[], 0.1, &[], -0.2, &mut table) - expected).abs() < 1e-12);
        assert_eq!(merge_join(0, &[], 0.0, &[], 0.0), 0.0);
        assert_eq!(remap_probe(0, &[], 0.0, &[], 0.0, &mut table), 0.0);
    }

    #[test]
    fn test_remap_probe_ignores_order() {
        let q = SparseRanks::from_values(&[0.0, 2.0, -1.0, 0.0, 3.0, 0.0, -5.0]);
        let r = SparseRanks::from_values(&[1.0, 0.0, -1.0, 0.0, 0.0, 0.5, 0.0]);
        let expected = merge_join(7, &q.entries, q.fill, &r.entries, r.fill);

        let mut reversed = r.entries.clone();
        reversed.reverse();
        let mut table = ProbeTable::new();
        let got = remap_probe(7, &q.entries, q.fill, &reversed, r.fill, &mut table);
        assert!((got - expected).abs() < 1e-12);
        assert!(table.is_clear());
    }
}
