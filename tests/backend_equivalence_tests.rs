//! tests/backend_equivalence_tests.rs
//! RustCrypto and primitive backends must agree byte for byte

mod common;

use common::{TEST_ITERATION_VALUES, TEST_PASSWORD};
use pipecrypt::crypto::rng::random_bytes;
use pipecrypt::{
    Backend, DerivationParameters, EncryptionAlgorithm, IvGenerator, KeyMaterial, PasswordBytes,
    PipecryptError, PrimitiveBackend, Prf, RustCryptoBackend, SymmetricCipher, SymmetricConfig,
};

const RUSTCRYPTO: &dyn Backend = &RustCryptoBackend;
const PRIMITIVE: &dyn Backend = &PrimitiveBackend;

#[test]
fn derived_keys_are_identical() {
    let salts: [&[u8]; 3] = [b"", b"salt", &[0x11; 17]];
    for prf in [Prf::HmacSha256, Prf::HmacSha512] {
        for &iterations in TEST_ITERATION_VALUES {
            for salt in salts {
                // 200 bytes spans several PRF blocks for both hash sizes.
                for bits in [64, 128, 192, 256, 512, 1600] {
                    let params = || {
                        DerivationParameters::new(
                            PasswordBytes::new(TEST_PASSWORD.as_bytes().to_vec()),
                            salt.to_vec(),
                            iterations,
                            bits,
                        )
                        .with_prf(prf)
                    };
                    let a = RUSTCRYPTO.derive_key(&params()).unwrap();
                    let b = PRIMITIVE.derive_key(&params()).unwrap();
                    assert_eq!(
                        a.expose_secret(),
                        b.expose_secret(),
                        "{prf} iterations={iterations} bits={bits} salt_len={}",
                        salt.len()
                    );
                }
            }
        }
    }
}

#[test]
fn symmetric_ciphertext_is_identical() {
    for cipher in SymmetricCipher::ALL {
        let key = random_bytes(cipher.key_len()).unwrap();
        let iv = random_bytes(cipher.block_size()).unwrap();
        let a = RUSTCRYPTO
            .symmetric_engine(cipher, KeyMaterial::new(key.clone()))
            .unwrap();
        let b = PRIMITIVE
            .symmetric_engine(cipher, KeyMaterial::new(key))
            .unwrap();

        for len in [0, 1, 7, 8, 15, 16, 17, 100] {
            let plaintext = random_bytes(len).unwrap();
            let ct_a = a.encrypt(&plaintext, &iv).unwrap();
            let ct_b = b.encrypt(&plaintext, &iv).unwrap();
            assert_eq!(ct_a, ct_b, "{cipher} len {len}");
            assert_eq!(a.decrypt(&ct_b, &iv).unwrap(), plaintext);
            assert_eq!(b.decrypt(&ct_a, &iv).unwrap(), plaintext);
        }
    }
}

#[test]
fn invalid_ciphertext_fails_identically() {
    for cipher in SymmetricCipher::ALL {
        let key = vec![0x24u8; cipher.key_len()];
        let iv = vec![0u8; cipher.block_size()];
        let a = RUSTCRYPTO
            .symmetric_engine(cipher, KeyMaterial::new(key.clone()))
            .unwrap();
        let b = PRIMITIVE
            .symmetric_engine(cipher, KeyMaterial::new(key))
            .unwrap();

        let mut ct = a.encrypt(b"sixteen byte msg", &iv).unwrap();
        let last = ct.len() - 1;
        ct[last] ^= 0x01;
        let bad_inputs = [vec![], vec![0u8; cipher.block_size() - 1], ct];
        for bad in &bad_inputs {
            assert_eq!(a.decrypt(bad, &iv).ok(), b.decrypt(bad, &iv).ok());
        }
        assert_eq!(
            b.decrypt(&[], &iv).unwrap_err(),
            PipecryptError::Cipher("decryption failed".into())
        );
    }
}

#[derive(Debug)]
struct CountingIvs;

impl IvGenerator for CountingIvs {
    fn generate_iv(&self, len: usize) -> Result<Vec<u8>, PipecryptError> {
        Ok((0..len as u8).collect())
    }
}

#[test]
fn framed_output_is_identical_with_a_fixed_iv_source() {
    for cipher in SymmetricCipher::ALL {
        let build = |backend: &dyn Backend| {
            SymmetricConfig::new(cipher)
                .with_password(TEST_PASSWORD)
                .with_salt(b"equivalence".to_vec())
                .with_iterations(3)
                .with_iv_generator(CountingIvs)
                .build(backend)
                .unwrap()
        };
        let a = build(RUSTCRYPTO);
        let b = build(PRIMITIVE);
        let framed = a.encrypt_bytes(b"identical frames").unwrap();
        assert_eq!(framed, b.encrypt_bytes(b"identical frames").unwrap(), "{cipher}");
        assert_eq!(b.decrypt_bytes(&framed).unwrap(), b"identical frames");
    }
}

#[test]
fn password_instances_interoperate_across_backends() {
    for cipher in SymmetricCipher::ALL {
        let a = common::password_algorithm(RUSTCRYPTO, cipher);
        let b = common::password_algorithm(PRIMITIVE, cipher);
        let framed = a.encrypt_bytes(common::TEST_DATA).unwrap();
        assert_eq!(b.decrypt_bytes(&framed).unwrap(), common::TEST_DATA);
        let framed = b.encrypt_bytes(common::TEST_DATA).unwrap();
        assert_eq!(a.decrypt_bytes(&framed).unwrap(), common::TEST_DATA);
    }
}

#[test]
fn wrong_iv_length_is_an_argument_error_on_both_backends() {
    for cipher in SymmetricCipher::ALL {
        for backend in [RUSTCRYPTO, PRIMITIVE] {
            let engine = backend
                .symmetric_engine(cipher, KeyMaterial::new(vec![0x42; cipher.key_len()]))
                .unwrap();
            let short_iv = vec![0u8; cipher.block_size() - 1];
            let long_iv = vec![0u8; cipher.block_size() + 1];
            for iv in [&short_iv, &long_iv] {
                assert!(
                    matches!(engine.encrypt(b"data", iv), Err(PipecryptError::Argument(_))),
                    "{cipher} on {}",
                    backend.name()
                );
                assert!(matches!(
                    engine.decrypt(&[0u8; 16], iv),
                    Err(PipecryptError::Argument(_))
                ));
            }
        }
    }
}
