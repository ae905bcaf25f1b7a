//! External ledger adapter for Open Journal.
//!
//! The ledger is an opaque collaborator with two operations:
//! - submit a signed entry-function call and wait for it to commit
//! - read a raw resource stored under an account
//!
//! [`AptosClient`] speaks the Aptos fullnode REST API; everything
//! cryptographic beyond signing the node-provided signing message, and all
//! consensus work, stays on the ledger's side.

pub mod aptos;
pub mod client;
pub mod credential;
pub mod error;
pub mod faucet;
pub mod wire;

pub use aptos::{AptosClient, AptosConfig};
pub use client::{EntryFunctionId, LedgerClient, RawResource, TxHandle};
pub use credential::AccountCredential;
pub use error::LedgerError;
pub use faucet::FaucetClient;
