//! Block validity checking and state application (spec §4.5).
//!
//! A block is checked against the chain tip and applied in four phases,
//! in order, so two conforming implementations reject the same bad block
//! with the same error:
//!
//! 1. Parent — `block.parent_hash` must equal the tip hash
//! 2. Height — `block.height` must equal `tip_height + 1`
//! 3. Transactions — applied in order against a working copy of state;
//!    the first invalid transaction aborts the whole block, leaving the
//!    caller's state untouched (no partial application)
//! 4. State root — the working copy's root must equal `block.state_root`
//!
//! Empty blocks (no transactions) are permitted and simply leave state
//! unchanged.

use cakechain_primitives::{BlockError, ChainId, Hash32, State};
use cakechain_primitives::block::Block;

use crate::transaction;

/// Validate `block` against the current tip and `state`, returning the
/// resulting state on success. `state` itself is never mutated — on any
/// error the caller's state is exactly as it was before the call.
pub fn validate_and_apply(
    block: &Block,
    chain_id: ChainId,
    tip_hash: Hash32,
    tip_height: u64,
    state: &State,
) -> Result<State, BlockError> {
    if block.parent_hash != tip_hash {
        return Err(BlockError::BadParent {
            expected: tip_hash,
            got: block.parent_hash,
        });
    }

    let expected_height = tip_height + 1;
    if block.height != expected_height {
        return Err(BlockError::BadHeight {
            expected: expected_height,
            got: block.height,
        });
    }

    let mut working = state.clone();
    for (index, tx) in block.txs.iter().enumerate() {
        transaction::validate_and_apply(tx, chain_id, &mut working).map_err(|cause| {
            BlockError::TxInvalid {
                index: index as u64,
                cause,
            }
        })?;
    }

    let computed = working.state_root();
    if computed != block.state_root {
        return Err(BlockError::BadStateRoot {
            expected: block.state_root,
            computed,
        });
    }

    Ok(working)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cakechain_primitives::crypto::{generate_keypair, sign_ed25519};
    use cakechain_primitives::types::ZERO_HASH;
    use cakechain_primitives::{Address, Transaction, TransactionError};

    const CHAIN_ID: ChainId = 7;

    fn signed_tx(
        from_sk: &ed25519_dalek::SigningKey,
        to: Address,
        amount: u64,
        nonce: u64,
    ) -> Transaction {
        let from = from_sk.verifying_key().to_bytes();
        let mut tx = Transaction {
            from,
            to,
            amount,
            nonce,
            signature: [0u8; 64],
        };
        let message = tx.signing_bytes(CHAIN_ID);
        tx.signature = sign_ed25519(&message, from_sk);
        tx
    }

    #[test]
    fn test_empty_block_leaves_state_unchanged() {
        let state = State::new();
        let block = Block {
            parent_hash: ZERO_HASH,
            height: 1,
            txs: vec![],
            state_root: state.state_root(),
        };
        let result = validate_and_apply(&block, CHAIN_ID, ZERO_HASH, 0, &state).unwrap();
        assert_eq!(result, state);
    }

    #[test]
    fn test_rejects_bad_parent() {
        let state = State::new();
        let block = Block {
            parent_hash: [1u8; 32],
            height: 1,
            txs: vec![],
            state_root: state.state_root(),
        };
        assert_eq!(
            validate_and_apply(&block, CHAIN_ID, ZERO_HASH, 0, &state),
            Err(BlockError::BadParent {
                expected: ZERO_HASH,
                got: [1u8; 32]
            })
        );
    }

    #[test]
    fn test_rejects_bad_height() {
        let state = State::new();
        let block = Block {
            parent_hash: ZERO_HASH,
            height: 5,
            txs: vec![],
            state_root: state.state_root(),
        };
        assert_eq!(
            validate_and_apply(&block, CHAIN_ID, ZERO_HASH, 0, &state),
            Err(BlockError::BadHeight {
                expected: 1,
                got: 5
            })
        );
    }

    #[test]
    fn test_applies_single_valid_transfer() {
        let (_, sk) = generate_keypair();
        let from = sk.verifying_key().to_bytes();
        let to = [9u8; 32];

        let mut state = State::new();
        state.set_balance(&from, 1_000);

        let tx = signed_tx(&sk, to, 200, 0);
        let mut expected = state.clone();
        transaction::apply(&tx, &mut expected);

        let block = Block {
            parent_hash: ZERO_HASH,
            height: 1,
            txs: vec![tx],
            state_root: expected.state_root(),
        };

        let result = validate_and_apply(&block, CHAIN_ID, ZERO_HASH, 0, &state).unwrap();
        assert_eq!(result.get_balance(&from), 800);
        assert_eq!(result.get_balance(&to), 200);
    }

    #[test]
    fn test_invalid_tx_aborts_whole_block_without_partial_application() {
        let (_, sk_a) = generate_keypair();
        let (_, sk_b) = generate_keypair();
        let a = sk_a.verifying_key().to_bytes();
        let b = sk_b.verifying_key().to_bytes();

        let mut state = State::new();
        state.set_balance(&a, 1_000);
        state.set_balance(&b, 10);

        // tx0 is valid; tx1 has the wrong nonce and must abort the block,
        // undoing the effect tx0 would otherwise have had.
        let tx0 = signed_tx(&sk_a, b, 100, 0);
        let tx1 = signed_tx(&sk_b, a, 5, 7);

        let block = Block {
            parent_hash: ZERO_HASH,
            height: 1,
            txs: vec![tx0, tx1],
            state_root: ZERO_HASH, // unreachable, tx1 fails first
        };

        let err = validate_and_apply(&block, CHAIN_ID, ZERO_HASH, 0, &state).unwrap_err();
        assert_eq!(
            err,
            BlockError::TxInvalid {
                index: 1,
                cause: TransactionError::WrongNonce { expected: 0, got: 7 }
            }
        );
        // Original state untouched: tx0's transfer never committed.
        assert_eq!(state.get_balance(&a), 1_000);
        assert_eq!(state.get_balance(&b), 10);
    }

    #[test]
    fn test_rejects_bad_state_root() {
        let (_, sk) = generate_keypair();
        let from = sk.verifying_key().to_bytes();
        let mut state = State::new();
        state.set_balance(&from, 1_000);

        let tx = signed_tx(&sk, [9u8; 32], 200, 0);
        let block = Block {
            parent_hash: ZERO_HASH,
            height: 1,
            txs: vec![tx],
            state_root: [0xFFu8; 32],
        };

        let err = validate_and_apply(&block, CHAIN_ID, ZERO_HASH, 0, &state).unwrap_err();
        assert!(matches!(err, BlockError::BadStateRoot { .. }));
    }
}
