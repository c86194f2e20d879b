//! Scratch buffers give identical results whether fresh or reused.

mod common;

use common::{simulate, Scaled};
use rand::prelude::*;
use rankl2::{densified_delta, remap_probe, DeltaBuffer, Kernel, ProbeTable, Workspace};

#[test]
fn delta_buffer_reuse_is_bitwise_identical() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut reused = DeltaBuffer::new();

    // Lengths go up and down so the reused buffer is sometimes longer than n.
    for len in [50, 2000, 10, 700, 2000, 1] {
        let dense = Scaled::new(simulate(&mut rng, len, 0.6));
        let sparse = Scaled::new(simulate(&mut rng, len, 0.1));

        let (ranks, entries, fill) = (&dense.dense.ranks, &sparse.sparse.entries, sparse.sparse.fill);

        let mut fresh = DeltaBuffer::with_len(len);
        let a = densified_delta(ranks, entries, fill, &mut fresh);
        let b = densified_delta(ranks, entries, fill, &mut reused);
        assert_eq!(a, b, "len = {}", len);
        assert!(fresh.is_clear());
        assert!(reused.is_clear());
    }
}

#[test]
fn probe_table_reuse_is_bitwise_identical() {
    let mut rng = StdRng::seed_from_u64(22);
    let mut reused = ProbeTable::new();

    for len in [50, 2000, 10, 700, 2000, 1] {
        let q = Scaled::new(simulate(&mut rng, len, 0.3));
        let r = Scaled::new(simulate(&mut rng, len, 0.05));

        let (q, r) = (&q.sparse, &r.sparse);

        let mut fresh = ProbeTable::with_len(len);
        let a = remap_probe(len, &q.entries, q.fill, &r.entries, r.fill, &mut fresh);
        let b = remap_probe(len, &q.entries, q.fill, &r.entries, r.fill, &mut reused);
        assert_eq!(a, b, "len = {}", len);
        assert!(fresh.is_clear());
        assert!(reused.is_clear());
    }
}

#[test]
fn workspace_reuse_matches_fresh_workspace() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut reused = Workspace::with_len(100);

    for round in 0..20 {
        let len = 10 + (round * 97) % 1500;
        let query = Scaled::new(simulate(&mut rng, len, 0.25));
        let reference = Scaled::new(simulate(&mut rng, len, 0.15));

        for q in query.profiles() {
            for r in reference.profiles() {
                for kernel in Kernel::applicable(q.density(), r.density()) {
                    let a = Workspace::new().distance(kernel, len, q, r).unwrap();
                    let b = reused.distance(kernel, len, q, r).unwrap();
                    assert_eq!(a, b, "{} at round {}", kernel, round);
                }
            }
        }
        assert!(reused.is_clear());
    }
}
