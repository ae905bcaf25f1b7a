//! Account address derivation from public keys.
//!
//! Single-key Ed25519 accounts are addressed by their authentication key:
//! `SHA3-256(public_key || 0x00)`, where the trailing byte is the Ed25519
//! scheme identifier.

use journal_types::{AccountAddress, PublicKey};
use sha3::{Digest, Sha3_256};

/// Scheme identifier appended to the public key before hashing.
const ED25519_SCHEME: u8 = 0x00;

/// Derive the account address controlled by `public_key`.
pub fn derive_address(public_key: &PublicKey) -> AccountAddress {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key.as_bytes());
    hasher.update([ED25519_SCHEME]);
    let digest: [u8; 32] = hasher.finalize().into();
    AccountAddress::new(digest)
}
