//! Error taxonomy for the Cakechain protocol core (C8).
//!
//! All validation errors are first-class values, never panics. The
//! ordering of `TransactionError` variants and the checks in
//! `transaction::validate` that produce them is normative — two
//! conforming implementations must report the same error for the same
//! invalid transaction (spec §4.4, §9).

use crate::types::{Address, BlockHeight, Hash32};

/// Errors produced while validating a transaction against state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// `amount == 0`.
    #[error("transaction amount is zero")]
    AmountZero,

    /// `from == to`.
    #[error("transaction sender and recipient are the same address")]
    SelfTransfer,

    /// Ed25519 verification of the signing bytes failed.
    #[error("transaction signature is invalid")]
    InvalidSignature,

    /// `tx.nonce` did not match the sender's current nonce.
    #[error("wrong nonce: expected {expected}, got {got}")]
    WrongNonce { expected: u64, got: u64 },

    /// Sender's balance is less than the transfer amount.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u64, need: u64 },

    /// Recipient's balance would exceed `u64::MAX`.
    #[error("recipient balance would overflow")]
    BalanceOverflow,
}

/// Errors produced while validating a block against the chain tip and state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    /// `block.parent_hash != tip_hash`.
    #[error("bad parent: expected {expected:?}, got {got:?}")]
    BadParent { expected: Hash32, got: Hash32 },

    /// `block.height != tip_height + 1`.
    #[error("bad height: expected {expected}, got {got}")]
    BadHeight { expected: BlockHeight, got: BlockHeight },

    /// A transaction at `index` failed validation with `cause`.
    #[error("transaction {index} invalid: {cause}")]
    TxInvalid { index: u64, cause: TransactionError },

    /// The recomputed state root did not match the block's claimed root.
    #[error("bad state root: expected {expected:?}, computed {computed:?}")]
    BadStateRoot { expected: Hash32, computed: Hash32 },
}

/// Errors produced while decoding canonical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The input ended before all expected fields were read.
    #[error("unexpected end of data")]
    UnexpectedEof,

    /// A domain tag did not match the expected literal bytes.
    #[error("bad domain tag")]
    BadDomainTag,

    /// Trailing bytes remained after decoding a fixed-width structure.
    #[error("trailing bytes after decoding")]
    TrailingBytes,
}

/// Errors produced while constructing a `State`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Summing duplicate entries for `address` in an initial allocation
    /// overflowed `u64`. Checked arithmetic only — never saturated.
    #[error("allocation for address {address:?} overflows u64: balance {balance}, amount {amount}")]
    AllocationOverflow { address: Address, balance: u64, amount: u64 },
}
