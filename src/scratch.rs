//! Reusable scratch buffers with a "clean" invariant.
//!
//! Kernels that need per-position scratch space borrow one of these types
//! mutably and restore it before returning, touching only the positions they
//! wrote. That keeps repeated comparisons free of O(n) resets: a buffer is
//! sized once (growth is amortized) and then reused across calls.
//!
//! | Type | Clean state | Used by |
//! |------|-------------|---------|
//! | [`DeltaBuffer`] | every slot `0.0` | [`densified_delta`](crate::densified_delta) |
//! | [`ProbeTable`] | every slot absent | [`remap_probe`](crate::remap_probe) |

use log::debug;

/// Per-position offsets from a fill rank, zero everywhere between calls.
#[derive(Debug, Clone, Default)]
pub struct DeltaBuffer {
    deltas: Vec<f64>,
}

impl DeltaBuffer {
    /// Empty buffer; grows on first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-sized for `n` positions.
    #[must_use]
    pub fn with_len(n: usize) -> Self {
        Self {
            deltas: vec![0.0; n],
        }
    }

    /// Number of allocated positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Whether no positions are allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Whether every slot is zero. O(n); meant for tests and debug checks.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.deltas.iter().all(|&d| d == 0.0)
    }

    pub(crate) fn ensure_len(&mut self, n: usize) {
        if self.deltas.len() < n {
            debug!("growing delta buffer from {} to {} positions", self.deltas.len(), n);
            self.deltas.resize(n, 0.0);
        }
    }

    /// Write `value - fill` at each entry and return the first `n` slots.
    pub(crate) fn stage(&mut self, n: usize, entries: &[(usize, f64)], fill: f64) -> &[f64] {
        self.ensure_len(n);
        for &(index, value) in entries {
            self.deltas[index] = value - fill;
        }
        &self.deltas[..n]
    }

    /// Zero the slots written by [`stage`](Self::stage).
    pub(crate) fn reset(&mut self, entries: &[(usize, f64)]) {
        for &(index, _) in entries {
            self.deltas[index] = 0.0;
        }
    }
}

/// Index → rank lookup, every slot absent between calls.
///
/// Slots are `Option<f64>` rather than a sentinel float, so no rank value can
/// be mistaken for "absent".
#[derive(Debug, Clone, Default)]
pub struct ProbeTable {
    slots: Vec<Option<f64>>,
}

impl ProbeTable {
    /// Empty table; grows on first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-sized for `n` positions.
    #[must_use]
    pub fn with_len(n: usize) -> Self {
        Self {
            slots: vec![None; n],
        }
    }

    /// Number of allocated positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no positions are allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether every slot is absent. O(n); meant for tests and debug checks.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub(crate) fn ensure_len(&mut self, n: usize) {
        if self.slots.len() < n {
            debug!("growing probe table from {} to {} positions", self.slots.len(), n);
            self.slots.resize(n, None);
        }
    }

    #[inline]
    pub(crate) fn insert(&mut self, index: usize, value: f64) {
        self.slots[index] = Some(value);
    }

    /// Read a slot and mark it absent.
    #[inline]
    pub(crate) fn take(&mut self, index: usize) -> Option<f64> {
        self.slots[index].take()
    }
}
