//! Cryptographic adapter for the Cakechain protocol core (C3).
//!
//! Two capabilities only: SHA-256 hashing and strict Ed25519 verification.
//! Signing itself is not part of the core — transactions arrive pre-signed —
//! so signing helpers below are gated behind the `std` feature and exist
//! only for tests and external signer tooling.

use crate::types::Hash32;

/// Compute the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> Hash32 {
    use sha2::Digest;
    let result = sha2::Sha256::digest(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Verify an Ed25519 signature under strict RFC 8032 rules.
///
/// Rejects non-canonical scalar encodings and small-order points by
/// delegating entirely to `ed25519-dalek`'s `VerifyingKey::verify_strict`,
/// not the permissive cofactored `verify`. Any malformed public key or
/// signature is treated as an invalid signature rather than an error.
pub fn ed25519_verify(pubkey: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> bool {
    use ed25519_dalek::{Signature, VerifyingKey};

    let Ok(verifying_key) = VerifyingKey::from_bytes(pubkey) else {
        return false;
    };
    let sig = Signature::from_bytes(signature);
    verifying_key.verify_strict(message, &sig).is_ok()
}

/// Sign a message with an Ed25519 private key.
///
/// Used by tests and external signer tooling to produce fixtures; never
/// called from inside the protocol core itself.
#[cfg(feature = "std")]
pub fn sign_ed25519(message: &[u8], signing_key: &ed25519_dalek::SigningKey) -> [u8; 64] {
    use ed25519_dalek::Signer;
    signing_key.sign(message).to_bytes()
}

/// Generate an Ed25519 keypair for testing.
///
/// Uses OS randomness — only available with the `std` feature, and never
/// used inside the protocol core (determinism requirement).
#[cfg(feature = "std")]
pub fn generate_keypair() -> (ed25519_dalek::VerifyingKey, ed25519_dalek::SigningKey) {
    use ed25519_dalek::SigningKey;
    let mut rng = rand::rngs::OsRng;
    let signing_key = SigningKey::generate(&mut rng);
    let verifying_key = signing_key.verifying_key();
    (verifying_key, signing_key)
}
