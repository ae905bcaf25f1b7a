//! HTTP JSON API for Open Journal.
//!
//! Provides endpoints for:
//! - Health and mode reporting
//! - Idea listing, creation and lookup
//! - Voting
//! - Raw on-chain journal reads (external mode)

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{create_router, RpcServer};
