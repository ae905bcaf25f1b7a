//! Fundamental types for Open Journal.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! the idea record, account addresses, transaction hashes, timestamps and key material.

pub mod address;
pub mod error;
pub mod hash;
pub mod idea;
pub mod keys;
pub mod time;

pub use address::AccountAddress;
pub use error::ParseError;
pub use hash::TxHash;
pub use idea::{Idea, IdeaId, LOCAL_AUTHOR};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use time::Timestamp;
