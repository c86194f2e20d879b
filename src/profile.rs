//! Profile representations and the adapters between them.
//!
//! Raw values enter as [`RankedVector`]s (sorted by value); scaled ranks leave
//! either dense (one value per position) or sparse (a fill rank plus
//! `(index, rank)` pairs). Sparse pairs come out of the scaler in value order
//! and must be re-sorted by index for the order-dependent kernels.

use std::fmt;

use crate::scale::{scaled_ranks_in_place, scaled_ranks_sparse_in_place};

/// `(value, index)` observations sorted ascending by value.
pub type RankedVector = Vec<(f64, usize)>;

/// Storage form of a scaled-rank profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Density {
    /// One rank per position.
    Dense,
    /// Fill rank plus explicit `(index, rank)` pairs.
    Sparse,
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Density::Dense => f.write_str("dense"),
            Density::Sparse => f.write_str("sparse"),
        }
    }
}

/// Borrowed view of one scaled-rank profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Profile<'a> {
    /// Dense ranks, one per position.
    Dense {
        /// Scaled ranks.
        ranks: &'a [f64],
        /// Whether the ranks sum to [`SCALED_SUM_SQUARES`](crate::SCALED_SUM_SQUARES)
        /// (false for an all-tied profile).
        has_variance: bool,
    },
    /// Sparse ranks sorted by index.
    Sparse {
        /// Rank of every position not listed in `entries`.
        fill: f64,
        /// `(index, rank)` pairs, indices unique and ascending.
        entries: &'a [(usize, f64)],
    },
}

impl Profile<'_> {
    /// Storage form of this profile.
    #[must_use]
    pub fn density(&self) -> Density {
        match self {
            Profile::Dense { .. } => Density::Dense,
            Profile::Sparse { .. } => Density::Sparse,
        }
    }

    /// Whether the profile is not all-tied.
    ///
    /// Scaled sparse profiles without variance have no explicit entries.
    #[must_use]
    pub fn has_variance(&self) -> bool {
        match *self {
            Profile::Dense { has_variance, .. } => has_variance,
            Profile::Sparse { entries, .. } => !entries.is_empty(),
        }
    }
}

/// Owned dense scaled ranks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseRanks {
    /// Scaled ranks, one per position.
    pub ranks: Vec<f64>,
    /// See [`Profile::has_variance`].
    pub has_variance: bool,
}

impl DenseRanks {
    /// Scale raw values (allocating).
    pub fn from_values(values: &[f64]) -> Self {
        let mut collected = RankedVector::with_capacity(values.len());
        collect_ranked(values, &mut collected);
        let mut ranks = vec![0.0; values.len()];
        let has_variance = scaled_ranks_in_place(values.len(), &collected, &mut ranks);
        Self {
            ranks,
            has_variance,
        }
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether there are no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Borrow as a [`Profile`].
    #[must_use]
    pub fn as_profile(&self) -> Profile<'_> {
        Profile::Dense {
            ranks: &self.ranks,
            has_variance: self.has_variance,
        }
    }
}

/// Owned sparse scaled ranks, entries sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseRanks {
    /// Rank shared by all zero-valued positions.
    pub fill: f64,
    /// `(index, rank)` pairs for the non-zero positions.
    pub entries: Vec<(usize, f64)>,
}

impl SparseRanks {
    /// Scale raw values (allocating), treating exact zeros as implicit.
    pub fn from_values(values: &[f64]) -> Self {
        let mut negative = RankedVector::new();
        let mut positive = RankedVector::new();
        split_by_sign(values, &mut negative, &mut positive);

        let mut entries = Vec::with_capacity(negative.len() + positive.len());
        let fill = scaled_ranks_sparse_in_place(values.len(), &negative, &positive, &mut entries);
        sort_by_index(&mut entries);
        Self { fill, entries }
    }

    /// Borrow as a [`Profile`].
    #[must_use]
    pub fn as_profile(&self) -> Profile<'_> {
        Profile::Sparse {
            fill: self.fill,
            entries: &self.entries,
        }
    }

    /// Materialize into a dense vector of `n` ranks.
    #[must_use]
    pub fn to_dense(&self, n: usize) -> Vec<f64> {
        let mut out = vec![0.0; n];
        densify(self.fill, &self.entries, &mut out);
        out
    }
}

/// Fill `out` with every `(value, index)` of `values`, sorted by value.
///
/// Ties are left in arbitrary order; the scaler does not depend on it.
pub fn collect_ranked(values: &[f64], out: &mut RankedVector) {
    out.clear();
    out.extend(values.iter().copied().enumerate().map(|(i, v)| (v, i)));
    sort_ranked(out);
}

/// Split `values` into sorted negative and positive [`RankedVector`]s.
///
/// Exact zeros (and NaN, which compares neither way) are left implicit.
pub fn split_by_sign(values: &[f64], negative: &mut RankedVector, positive: &mut RankedVector) {
    negative.clear();
    positive.clear();
    for (i, &v) in values.iter().enumerate() {
        if v < 0.0 {
            negative.push((v, i));
        } else if v > 0.0 {
            positive.push((v, i));
        }
    }
    sort_ranked(negative);
    sort_ranked(positive);
}

/// Sort observations ascending by value.
#[inline]
pub fn sort_ranked(collected: &mut [(f64, usize)]) {
    collected.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
}

/// Re-sort scaler output (value order) into index order.
#[inline]
pub fn sort_by_index(entries: &mut [(usize, f64)]) {
    entries.sort_unstable_by_key(|&(index, _)| index);
}

/// Write `fill` everywhere in `out`, then the explicit entries.
pub fn densify(fill: f64, entries: &[(usize, f64)], out: &mut [f64]) {
    out.fill(fill);
    for &(index, rank) in entries {
        out[index] = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_ranked_sorted() {
        let mut out = vec![(99.0, 99)];
        collect_ranked(&[3.0, -1.0, 2.0], &mut out);
        assert_eq!(out, vec![(-1.0, 1), (2.0, 2), (3.0, 0)]);
    }

    #[test]
    fn test_split_by_sign() {
        let mut negative = RankedVector::new();
        let mut positive = RankedVector::new();
        split_by_sign(&[0.0, -2.0, 5.0, -7.0, 0.0, 1.0], &mut negative, &mut positive);
        assert_eq!(negative, vec![(-7.0, 3), (-2.0, 1)]);
        assert_eq!(positive, vec![(1.0, 5), (5.0, 2)]);
    }

    #[test]
    fn test_sort_by_index() {
        let mut entries = vec![(4, 0.1), (0, -0.2), (2, 0.3)];
        sort_by_index(&mut entries);
        assert_eq!(entries, vec![(0, -0.2), (2, 0.3), (4, 0.1)]);
    }

    #[test]
    fn test_densify() {
        let mut out = vec![9.0; 4];
        densify(0.5, &[(1, -1.0), (3, 2.0)], &mut out);
        assert_eq!(out, vec![0.5, -1.0, 0.5, 2.0]);
    }

    #[test]
    fn test_sparse_and_dense_ranks_agree() {
        let values = [0.0, -2.0, 0.0, 3.5, 1.0, 0.0, -2.0];
        let dense = DenseRanks::from_values(&values);
        let sparse = SparseRanks::from_values(&values);
        assert!(dense.has_variance);
        assert!(sparse.as_profile().has_variance());

        let materialized = sparse.to_dense(values.len());
        for (a, b) in dense.ranks.iter().zip(&materialized) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!(sparse.entries.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_all_zero_sparse_profile() {
        let sparse = SparseRanks::from_values(&[0.0; 6]);
        assert_eq!(sparse.fill, 0.0);
        assert!(sparse.entries.is_empty());
        assert!(!sparse.as_profile().has_variance());
    }

    #[test]
    fn test_density_display() {
        assert_eq!(Density::Dense.to_string(), "dense");
        assert_eq!(Density::Sparse.to_string(), "sparse");
    }
}
