//! Kernel choice carried through a serialized configuration.
#![cfg(feature = "serde")]

use rankl2::{Density, Kernel};

#[test]
fn kernel_serializes_as_its_name() {
    for kernel in Kernel::ALL {
        let json = serde_json::to_string(&kernel).unwrap();
        assert_eq!(json, format!("\"{}\"", kernel.name()));
        let back: Kernel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kernel);
    }
}

#[test]
fn density_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Density::Sparse).unwrap(), "\"sparse\"");
    let d: Density = serde_json::from_str("\"dense\"").unwrap();
    assert_eq!(d, Density::Dense);
}

#[test]
fn unknown_kernel_is_rejected() {
    assert!(serde_json::from_str::<Kernel>("\"simd\"").is_err());
}
