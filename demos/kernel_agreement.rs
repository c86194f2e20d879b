//! Kernel Agreement and Timing
//!
//! Simulates profiles at several lengths and densities, runs every kernel
//! that accepts each density pair, and reports the worst relative
//! disagreement with the dense reference alongside per-kernel timings.
//!
//! ```bash
//! cargo run --example kernel_agreement --release
//! ```

use rand::prelude::*;
use rand_distr::StandardNormal;
use rankl2::{spearman_from_l2, DenseRanks, Kernel, SparseRanks, Workspace, AGREEMENT_TOLERANCE};
use std::time::Instant;

const PAIRS: usize = 20;

fn main() {
    println!("Scaled-Rank L2 Kernel Agreement");
    println!("===============================\n");

    let mut rng = StdRng::seed_from_u64(69);
    let mut workspace = Workspace::new();

    for len in [10, 1000, 10000] {
        for density in [0.0, 0.05, 0.2, 0.5, 1.0] {
            report(&mut rng, &mut workspace, len, density);
        }
    }

    println!("Done!");
}

fn simulate(rng: &mut StdRng, len: usize, density: f64) -> Vec<f64> {
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

fn report(rng: &mut StdRng, workspace: &mut Workspace, len: usize, density: f64) {
    println!("n = {}, density = {}", len, density);

    let pairs: Vec<_> = (0..PAIRS)
        .map(|_| {
            let x = simulate(rng, len, density);
            let y = simulate(rng, len, density);
            (
                DenseRanks::from_values(&x),
                SparseRanks::from_values(&x),
                DenseRanks::from_values(&y),
                SparseRanks::from_values(&y),
            )
        })
        .collect();

    let expected: Vec<f64> = pairs
        .iter()
        .map(|(dx, _, dy, _)| {
            workspace
                .distance(Kernel::DenseDense, len, dx.as_profile(), dy.as_profile())
                .unwrap_or(f64::NAN)
        })
        .collect();

    let mean_rho = expected.iter().map(|&l2| spearman_from_l2(l2)).sum::<f64>() / PAIRS as f64;
    println!("  mean rho: {:+.4}", mean_rho);

    for kernel in Kernel::ALL {
        let start = Instant::now();
        let mut worst: f64 = 0.0;
        for ((dx, sx, dy, sy), &want) in pairs.iter().zip(&expected) {
            let (query, reference) = match kernel {
                Kernel::DenseDense => (dx.as_profile(), dy.as_profile()),
                Kernel::MergeJoin | Kernel::RemapProbe => (sx.as_profile(), sy.as_profile()),
                _ => (dx.as_profile(), sy.as_profile()),
            };
            let got = match workspace.distance(kernel, len, query, reference) {
                Ok(got) => got,
                Err(err) => {
                    println!("  {:<16} error: {}", kernel, err);
                    break;
                }
            };
            // Mixed kernels compare x against y's sparse form: same distance.
            worst = worst.max(relative_error(got, want));
        }
        let elapsed = start.elapsed();

        let status = if worst <= AGREEMENT_TOLERANCE { "ok" } else { "MISMATCH" };
        println!(
            "  {:<16} {:>10.2?} / pair   worst rel err {:.2e}  {}",
            kernel,
            elapsed / PAIRS as u32,
            worst,
            status
        );
    }
    println!();
}

fn relative_error(got: f64, want: f64) -> f64 {
    let scale = got.abs().max(want.abs());
    if scale < 1e-12 {
        (got - want).abs()
    } else {
        (got - want).abs() / scale
    }
}
