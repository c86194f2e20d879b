//! Scaled-rank transforms.
//!
//! A profile's raw values are replaced by tie-aware ranks, centred on the
//! midpoint rank and scaled so that the squared ranks sum to
//! [`SCALED_SUM_SQUARES`](crate::SCALED_SUM_SQUARES). Profiles without
//! variance (every value tied) become all-zero vectors.
//!
//! With that normalization the squared L2 distance between two scaled-rank
//! vectors is a monotone transform of Spearman's rho:
//!
//! ```text
//! rho = 1 - 2 * Σ(q[i] - r[i])²
//! ```
//!
//! # Forms
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`scaled_ranks`] | all `n` values, sorted | dense, visited by index |
//! | [`scaled_ranks_sparse`] | negatives + positives, sorted | fill rank + `(index, rank)` pairs |
//!
//! Both forms push values into caller-supplied sinks instead of returning an
//! owned sequence, so the hot loop can fuse scaling with a distance kernel.

use log::trace;

/// Running position along one rank axis.
///
/// Tie runs are fed in ascending value order; each run takes the next
/// `len` rank positions and contributes `len * mean_rank²` to the sum of
/// squares.
struct RankAxis {
    center: f64,
    cur_rank: usize,
    sum_squares: f64,
}

impl RankAxis {
    fn new(n: usize) -> Self {
        Self {
            center: (n as f64 - 1.0) / 2.0,
            cur_rank: 0,
            sum_squares: 0.0,
        }
    }

    /// Consume a tie run of `len` values, returning its centred mean rank.
    #[inline]
    fn run(&mut self, len: usize) -> f64 {
        let mean_rank = self.cur_rank as f64 + (len - 1) as f64 / 2.0 - self.center;
        self.sum_squares += mean_rank * mean_rank * len as f64;
        self.cur_rank += len;
        mean_rank
    }

    /// Consume every tie run of a sorted collection.
    #[inline]
    fn ties<F>(&mut self, collected: &[(f64, usize)], mut visit: F)
    where
        F: FnMut(usize, f64),
    {
        for group in collected.chunk_by(|a, b| a.0 == b.0) {
            let mean_rank = self.run(group.len());
            for &(_, index) in group {
                visit(index, mean_rank);
            }
        }
    }

    /// `0.5 / sqrt(sum_squares)`, or `None` without variance.
    fn denominator(&self) -> Option<f64> {
        if self.sum_squares == 0.0 {
            None
        } else {
            Some(0.5 / self.sum_squares.sqrt())
        }
    }
}

/// Dense scaled ranks, delivered to `process(index, rank)` in increasing
/// index order.
///
/// `collected` must hold one `(value, index)` entry per position, sorted by
/// value; `buffer` is scratch space of length at least `n` (its contents on
/// return are the unscaled mean ranks). Tied values share the mean of the
/// 0-based positions they occupy.
///
/// Without variance every position receives `0.0`. `n == 0` never calls
/// `process`.
///
/// # Example
///
/// ```rust
/// use rankl2::scaled_ranks;
///
/// let collected = [(1.0, 2), (5.0, 0), (9.0, 1)];
/// let mut buffer = [0.0; 3];
/// let mut out = [0.0; 3];
/// scaled_ranks(3, &collected, &mut buffer, |i, rank| out[i] = rank);
///
/// let sum_squares: f64 = out.iter().map(|r| r * r).sum();
/// assert!((sum_squares - 0.25).abs() < 1e-12);
/// assert!(out[2] < out[0] && out[0] < out[1]);
/// ```
pub fn scaled_ranks<F>(n: usize, collected: &[(f64, usize)], buffer: &mut [f64], mut process: F)
where
    F: FnMut(usize, f64),
{
    if n == 0 {
        return;
    }
    debug_assert_eq!(
        collected.len(),
        n,
        "scaled_ranks: expected one entry per position ({} vs {})",
        collected.len(),
        n
    );
    debug_assert!(buffer.len() >= n, "scaled_ranks: buffer shorter than n");

    let mut axis = RankAxis::new(n);
    axis.ties(collected, |index, mean_rank| buffer[index] = mean_rank);

    match axis.denominator() {
        None => {
            trace!("zero-variance profile over {} positions", n);
            for i in 0..n {
                process(i, 0.0);
            }
        }
        Some(denom) => {
            for (i, &rank) in buffer[..n].iter().enumerate() {
                process(i, rank * denom);
            }
        }
    }
}

/// Dense scaled ranks written straight into `buffer[..n]`.
///
/// Returns `true` if the profile has variance, i.e. the ranks sum to
/// [`SCALED_SUM_SQUARES`](crate::SCALED_SUM_SQUARES) rather than being all
/// zero.
pub fn scaled_ranks_in_place(n: usize, collected: &[(f64, usize)], buffer: &mut [f64]) -> bool {
    if n == 0 {
        return false;
    }
    debug_assert_eq!(collected.len(), n, "scaled_ranks_in_place: expected one entry per position");

    let mut axis = RankAxis::new(n);
    axis.ties(collected, |index, mean_rank| buffer[index] = mean_rank);

    let ranks = &mut buffer[..n];
    match axis.denominator() {
        None => {
            trace!("zero-variance profile over {} positions", n);
            ranks.fill(0.0);
            false
        }
        Some(denom) => {
            for rank in ranks.iter_mut() {
                *rank *= denom;
            }
            true
        }
    }
}

/// Sparse scaled ranks with an implicit zero group.
///
/// `negative` holds the values below zero and `positive` the values above
/// zero, each sorted ascending; every other position holds an implicit zero.
/// The two sets must be index-disjoint and together cover at most `n`
/// positions.
///
/// Ranks run along one axis: negatives first, then the zero group, then
/// positives. `zero` receives the scaled rank shared by the implicit zeros
/// (the fill rank; `0.0` when there are none). `buffer` is cleared and
/// refilled with one `(index, mean_rank)` pair per explicit value, in tie-run
/// order; `process` is then called once per pair with its scaled rank and
/// may overwrite the pair or copy it elsewhere.
///
/// Without variance `zero(0.0)` is called, the buffer is left empty and
/// `process` is never called.
///
/// # Example
///
/// ```rust
/// use rankl2::scaled_ranks_sparse;
///
/// // [-2, -2, 0, 0, 3]
/// let negative = [(-2.0, 0), (-2.0, 1)];
/// let positive = [(3.0, 4)];
/// let mut buffer = Vec::new();
/// let mut fill = f64::NAN;
/// scaled_ranks_sparse(5, &negative, &positive, &mut buffer, |z| fill = z, |pair, rank| pair.1 = rank);
///
/// assert!((fill - 0.5 / 6.0).abs() < 1e-12);
/// assert_eq!(buffer.len(), 3);
/// assert!((buffer[2].1 - 2.0 / 6.0).abs() < 1e-12);
/// ```
pub fn scaled_ranks_sparse<Z, P>(
    n: usize,
    negative: &[(f64, usize)],
    positive: &[(f64, usize)],
    buffer: &mut Vec<(usize, f64)>,
    zero: Z,
    mut process: P,
) where
    Z: FnOnce(f64),
    P: FnMut(&mut (usize, f64), f64),
{
    buffer.clear();
    if n == 0 {
        zero(0.0);
        return;
    }
    debug_assert!(
        negative.len() + positive.len() <= n,
        "scaled_ranks_sparse: {} explicit values exceed {} positions",
        negative.len() + positive.len(),
        n
    );

    let mut axis = RankAxis::new(n);
    axis.ties(negative, |index, mean_rank| buffer.push((index, mean_rank)));

    let num_zero = n - negative.len() - positive.len();
    let zero_rank = if num_zero > 0 { axis.run(num_zero) } else { 0.0 };

    axis.ties(positive, |index, mean_rank| buffer.push((index, mean_rank)));

    let Some(denom) = axis.denominator() else {
        trace!("zero-variance sparse profile over {} positions", n);
        buffer.clear();
        zero(0.0);
        return;
    };

    zero(zero_rank * denom);
    for pair in buffer.iter_mut() {
        let rank = pair.1 * denom;
        process(pair, rank);
    }
}

/// [`scaled_ranks_sparse`] that overwrites each buffered pair with its scaled
/// rank and returns the fill rank.
///
/// The pairs are left in tie-run (value) order; use
/// [`sort_by_index`](crate::sort_by_index) before index-order kernels.
pub fn scaled_ranks_sparse_in_place(
    n: usize,
    negative: &[(f64, usize)],
    positive: &[(f64, usize)],
    buffer: &mut Vec<(usize, f64)>,
) -> f64 {
    let mut fill = 0.0;
    scaled_ranks_sparse(
        n,
        negative,
        positive,
        buffer,
        |zval| fill = zval,
        |pair, rank| pair.1 = rank,
    );
    fill
}
