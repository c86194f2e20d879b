//! Shared profile generators for the integration tests.

#![allow(dead_code)]

use rand::prelude::*;
use rand_distr::StandardNormal;
use rankl2::{DenseRanks, Profile, SparseRanks, AGREEMENT_TOLERANCE};

/// Profile lengths exercised by the agreement grid.
pub const LENGTHS: [usize; 3] = [10, 1000, 10000];

/// Fractions of non-zero values exercised by the agreement grid.
pub const DENSITIES: [f64; 5] = [0.0, 0.05, 0.2, 0.5, 1.0];

/// Raw values where each position is non-zero with probability `density`,
/// drawn from a standard normal.
pub fn simulate(rng: &mut StdRng, len: usize, density: f64) -> Vec<f64> {
    (0..len)
        .map(|_| {
            if rng.random::<f64>() <= density {
                rng.sample::<f64, _>(StandardNormal)
            } else {
                0.0
            }
        })
        .collect()
}

/// Both scaled forms of one raw profile.
pub struct Scaled {
    pub values: Vec<f64>,
    pub dense: DenseRanks,
    pub sparse: SparseRanks,
}

impl Scaled {
    pub fn new(values: Vec<f64>) -> Self {
        let dense = DenseRanks::from_values(&values);
        let sparse = SparseRanks::from_values(&values);
        Self {
            values,
            dense,
            sparse,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Dense view, then sparse view.
    pub fn profiles(&self) -> [Profile<'_>; 2] {
        [self.dense.as_profile(), self.sparse.as_profile()]
    }
}

/// Relative agreement with a small absolute floor for all-zero distances.
pub fn agree(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= AGREEMENT_TOLERANCE * scale + 1e-12
}
