//! tests/concurrency_tests.rs
//! One algorithm instance shared by many threads

mod common;

use common::{backends, password_algorithm};
use pipecrypt::{EncryptionAlgorithm, SymmetricCipher};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 50;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn algorithms_are_send_and_sync() {
    assert_send_sync::<pipecrypt::SymmetricAlgorithm>();
    assert_send_sync::<pipecrypt::AsymmetricAlgorithm>();
    assert_send_sync::<pipecrypt::SaltedHasher>();
    assert_send_sync::<Box<dyn EncryptionAlgorithm>>();
}

#[test]
fn shared_instance_roundtrips_from_many_threads() {
    for backend in backends() {
        for cipher in SymmetricCipher::ALL {
            let algorithm = Arc::new(password_algorithm(backend, cipher));

            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let algorithm = Arc::clone(&algorithm);
                    thread::spawn(move || {
                        let mut ivs = Vec::with_capacity(MESSAGES_PER_THREAD);
                        for i in 0..MESSAGES_PER_THREAD {
                            let message = format!("thread {t} message {i}").into_bytes();
                            let framed = algorithm.encrypt_bytes(&message).unwrap();
                            assert_eq!(algorithm.decrypt_bytes(&framed).unwrap(), message);
                            ivs.push(framed[..cipher.block_size()].to_vec());
                        }
                        ivs
                    })
                })
                .collect();

            let mut seen = HashSet::new();
            for handle in handles {
                for iv in handle.join().unwrap() {
                    assert!(seen.insert(iv), "IV reused under {cipher}");
                }
            }
            assert_eq!(seen.len(), THREADS * MESSAGES_PER_THREAD);
        }
    }
}

#[test]
fn ciphertext_crosses_threads() {
    let algorithm = Arc::new(password_algorithm(
        &pipecrypt::RustCryptoBackend,
        SymmetricCipher::Aes256Cbc,
    ));

    let producer = {
        let algorithm = Arc::clone(&algorithm);
        thread::spawn(move || {
            (0..20)
                .map(|i| algorithm.encrypt_text(&format!("payload {i}")).unwrap())
                .collect::<Vec<_>>()
        })
    };
    let ciphertexts = producer.join().unwrap();

    let consumer = {
        let algorithm = Arc::clone(&algorithm);
        thread::spawn(move || {
            ciphertexts
                .iter()
                .map(|ct| algorithm.decrypt_text(ct).unwrap())
                .collect::<Vec<_>>()
        })
    };
    let plaintexts = consumer.join().unwrap();
    for (i, text) in plaintexts.iter().enumerate() {
        assert_eq!(text, &format!("payload {i}"));
    }
}
