//! `cakechain-primitives` — foundational types for the Cakechain protocol core.
//!
//! This crate provides the canonical wire types, error taxonomy,
//! cryptographic adapter, account state store, and byte codec shared by
//! the chain engine and by external tooling that signs transactions.

pub mod block;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod state;
pub mod types;

pub use block::{Block, Transaction};
pub use error::{BlockError, CodecError, StateError, TransactionError};
pub use state::{Account, State};
pub use types::{
    Address, Amount, BlockHeight, ChainId, Hash32, Nonce, Signature, DEFAULT_CHAIN_ID, ZERO_ADDRESS,
    ZERO_HASH,
};
