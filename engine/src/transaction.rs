//! Transaction validity checking and state application (spec §4.4).
//!
//! Validation runs in a fixed order so that two conforming
//! implementations reject the same bad transaction with the same error:
//!
//! 1. Static validity — amount nonzero, sender != recipient
//! 2. Signature — Ed25519 over the signing bytes
//! 3. Nonce — must equal the sender's current nonce
//! 4. Balance — sender must hold at least `amount`
//! 5. Overflow — recipient's new balance must fit in a `u64`
//!
//! `apply` assumes the transaction has already passed `validate`; it never
//! re-derives the checks, only performs the state mutation.

use cakechain_primitives::{ChainId, State, Transaction, TransactionError};

/// Run every check in spec §4.4's normative order. Does not mutate `state`.
pub fn validate(
    tx: &Transaction,
    chain_id: ChainId,
    state: &State,
) -> Result<(), TransactionError> {
    tx.check_static_validity()?;

    if !tx.verify_signature(chain_id) {
        return Err(TransactionError::InvalidSignature);
    }

    let expected_nonce = state.get_nonce(&tx.from);
    if tx.nonce != expected_nonce {
        return Err(TransactionError::WrongNonce {
            expected: expected_nonce,
            got: tx.nonce,
        });
    }

    let sender_balance = state.get_balance(&tx.from);
    if sender_balance < tx.amount {
        return Err(TransactionError::InsufficientBalance {
            have: sender_balance,
            need: tx.amount,
        });
    }

    let recipient_balance = state.get_balance(&tx.to);
    if recipient_balance.checked_add(tx.amount).is_none() {
        return Err(TransactionError::BalanceOverflow);
    }

    Ok(())
}

/// Debit `tx.from`, credit `tx.to`, and increment the sender's nonce.
///
/// Callers must have already run [`validate`] against the same state —
/// this function performs no checks of its own and will panic on
/// arithmetic that `validate` would have rejected.
pub fn apply(tx: &Transaction, state: &mut State) {
    let sender_balance = state.get_balance(&tx.from);
    let recipient_balance = state.get_balance(&tx.to);

    state.set_balance(&tx.from, sender_balance - tx.amount);
    state.set_balance(&tx.to, recipient_balance + tx.amount);
    state.set_nonce(&tx.from, tx.nonce + 1);
}

/// Validate `tx` against `state` and apply it only if valid.
pub fn validate_and_apply(
    tx: &Transaction,
    chain_id: ChainId,
    state: &mut State,
) -> Result<(), TransactionError> {
    validate(tx, chain_id, state)?;
    apply(tx, state);
    Ok(())
}
