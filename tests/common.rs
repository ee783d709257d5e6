//! tests/common.rs
//! Common constants and utilities shared across test files

use pipecrypt::{
    Backend, PrimitiveBackend, RustCryptoBackend, SymmetricAlgorithm, SymmetricCipher,
    SymmetricConfig,
};

/// Fast iteration count for tests - performance testing is in benches/
/// Most tests use this value to keep test execution fast.
#[allow(dead_code)] // Used across multiple test files
pub const TEST_ITERATIONS: u32 = 5;

/// Standard test password used across test files
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSWORD: &str = "s3ce3t-keyPass";

/// Explicit salt so tests never fall back to the built-in default
#[allow(dead_code)] // Used across multiple test files
pub const TEST_SALT: &[u8] = b"pipecrypt-test-salt";

/// Common test data strings used across multiple tests
#[allow(dead_code)] // Used across multiple test files
pub const TEST_DATA: &[u8] = b"test data";

/// Common iteration count vectors for testing various iteration values
#[allow(dead_code)] // Used across multiple test files
pub const TEST_ITERATION_VALUES: &[u32] = &[1, TEST_ITERATIONS, 10];

/// Both backends, for table-driven tests
#[allow(dead_code)] // Used across multiple test files
pub fn backends() -> [&'static dyn Backend; 2] {
    [&RustCryptoBackend as &'static dyn Backend, &PrimitiveBackend]
}

/// Password-based algorithm with the shared test password, salt and fast iterations
#[allow(dead_code)] // Used across multiple test files
pub fn password_algorithm(backend: &dyn Backend, cipher: SymmetricCipher) -> SymmetricAlgorithm {
    SymmetricConfig::new(cipher)
        .with_password(TEST_PASSWORD)
        .with_salt(TEST_SALT)
        .with_iterations(TEST_ITERATIONS)
        .build(backend)
        .unwrap()
}
