//! Cryptographic primitives for Open Journal's ledger credential.
//!
//! - **Ed25519** for signing transaction signing messages
//! - **SHA3-256** for deriving an account address from a public key
//!   (single-key authentication scheme)

pub mod address;
pub mod error;
pub mod keys;
pub mod sign;

pub use address::derive_address;
pub use error::CryptoError;
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
