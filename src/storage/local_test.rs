#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn detect_is_none_in_non_hydrate_tests() {
    assert!(LocalStorageBackend::detect().is_none());
}
