//! tests/kdf_tests.rs
//! Key derivation: determinism, parameter validation, builder behavior

mod common;

use common::{backends, TEST_ITERATIONS, TEST_ITERATION_VALUES, TEST_PASSWORD};
use pipecrypt::consts::{DEFAULT_SALT, PBKDF2_MAX_ITER};
use pipecrypt::{DerivationParameters, PasswordBytes, Pbkdf2Builder, PipecryptError, Prf};

fn params(password: &str, salt: &[u8], iterations: u32, bits: u32) -> DerivationParameters {
    DerivationParameters::new(
        PasswordBytes::new(password.as_bytes().to_vec()),
        salt.to_vec(),
        iterations,
        bits,
    )
}

#[test]
fn derivation_is_deterministic() {
    for backend in backends() {
        for &iterations in TEST_ITERATION_VALUES {
            let p = params(TEST_PASSWORD, &[0x11; 16], iterations, 256);
            let a = backend.derive_key(&p).unwrap();
            let b = backend.derive_key(&p).unwrap();
            assert_eq!(a.expose_secret(), b.expose_secret(), "{}", backend.name());
            assert_eq!(a.expose_secret().len(), 32);
        }
    }
}

#[test]
fn inputs_change_the_key() {
    for backend in backends() {
        let base = backend
            .derive_key(&params(TEST_PASSWORD, b"salt-a", TEST_ITERATIONS, 128))
            .unwrap();
        let other_salt = backend
            .derive_key(&params(TEST_PASSWORD, b"salt-b", TEST_ITERATIONS, 128))
            .unwrap();
        let other_iterations = backend
            .derive_key(&params(TEST_PASSWORD, b"salt-a", TEST_ITERATIONS + 1, 128))
            .unwrap();
        let other_prf = backend
            .derive_key(&params(TEST_PASSWORD, b"salt-a", TEST_ITERATIONS, 128).with_prf(Prf::HmacSha256))
            .unwrap();

        assert_ne!(base.expose_secret(), other_salt.expose_secret());
        assert_ne!(base.expose_secret(), other_iterations.expose_secret());
        assert_ne!(base.expose_secret(), other_prf.expose_secret());
    }
}

#[test]
fn edge_case_passwords_and_salts() {
    let large_password = "a".repeat(1000);
    let cases: [(&str, &[u8], &str); 4] = [
        ("", b"salt", "empty password"),
        ("パスワード123!@#", b"salt", "unicode password"),
        (&large_password, b"salt", "large password"),
        (TEST_PASSWORD, b"", "empty salt"),
    ];

    for (password, salt, desc) in cases {
        for backend in backends() {
            let key = backend
                .derive_key(&params(password, salt, 1, 192))
                .unwrap_or_else(|e| panic!("{desc} ({}): {e}", backend.name()));
            assert_eq!(key.expose_secret().len(), 24, "{desc}");
        }
    }
}

#[test]
fn out_of_range_parameters_are_key_derivation_errors() {
    let cases = [
        (0, 128, "zero iterations"),
        (PBKDF2_MAX_ITER + 1, 128, "too many iterations"),
        (1, 0, "zero key size"),
        (1, 100, "key size not whole bytes"),
        (1, 8192, "key size too large"),
    ];

    for (iterations, bits, desc) in cases {
        for backend in backends() {
            let result = backend.derive_key(&params(TEST_PASSWORD, b"salt", iterations, bits));
            assert!(
                matches!(result, Err(PipecryptError::KeyDerivation(_))),
                "{desc} ({})",
                backend.name()
            );
        }
    }
}

#[test]
fn unknown_prf_name_is_rejected() {
    assert!(matches!(
        "PBKDF2WithHmacMD5".parse::<Prf>(),
        Err(PipecryptError::KeyDerivation(_))
    ));
    assert_eq!(
        "PBKDF2WithHmacSHA256".parse::<Prf>().unwrap(),
        Prf::HmacSha256
    );
}

#[test]
fn builder_defaults_to_builtin_salt() {
    let builder = Pbkdf2Builder::new().with_iterations(TEST_ITERATIONS);
    let params = builder.parameters(PasswordBytes::new(TEST_PASSWORD.as_bytes().to_vec()), 128);
    assert_eq!(params.salt(), DEFAULT_SALT);
}

#[test]
fn builder_matches_direct_derivation() {
    for backend in backends() {
        let from_builder = Pbkdf2Builder::new()
            .with_iterations(TEST_ITERATIONS)
            .with_salt([0x55u8; 16].as_slice())
            .with_prf(Prf::HmacSha256)
            .derive(backend, PasswordBytes::new(b"hunter2".to_vec()), 256)
            .unwrap();
        let direct = backend
            .derive_key(&params("hunter2", &[0x55; 16], TEST_ITERATIONS, 256).with_prf(Prf::HmacSha256))
            .unwrap();
        assert_eq!(from_builder.expose_secret(), direct.expose_secret());
    }
}

#[test]
fn builder_zero_iterations_fail_at_derivation() {
    let result = Pbkdf2Builder::new()
        .with_salt("salt")
        .with_iterations(0)
        .derive(&pipecrypt::RustCryptoBackend, PasswordBytes::new(b"pw".to_vec()), 128);
    assert!(matches!(result, Err(PipecryptError::KeyDerivation(_))));
}
