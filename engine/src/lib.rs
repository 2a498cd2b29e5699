//! `cakechain-engine` — deterministic transaction and block application.
//!
//! This crate implements the Cakechain state transition function:
//! `f(state, block) -> Result<state, BlockError>`.
//!
//! It validates and applies transactions one at a time, then blocks as a
//! whole, and tracks the chain tip through [`chain::Chain`].
//!
//! ## Architecture
//!
//! - [`transaction`] — per-transaction validity checks and application
//! - [`block`] — whole-block validity checks and application
//! - [`chain::Chain`] — genesis construction and tip-extending block submission
//!
//! Transactions and blocks are rejected, never partially applied: either
//! every check passes and the whole unit commits, or nothing in it does.

pub mod block;
pub mod chain;
pub mod transaction;

pub use chain::{Chain, ChainConfig};
