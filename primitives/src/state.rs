//! Account state store for the Cakechain protocol core (C4).
//!
//! State is a map from address to `(balance, nonce)`. Absent addresses read
//! as balance 0, nonce 0 (spec §4.3) — an account that returns to all-zero
//! is pruned from the map so that the state root is insensitive to whether
//! an address was ever touched, only to whether it currently holds a
//! nonzero balance or a nonzero nonce (spec §4.4, §8).
//!
//! `BTreeMap` gives deterministic iteration order, which `state_root`
//! depends on directly: addresses are hashed in ascending order, not
//! insertion order.

use std::collections::BTreeMap;

use crate::codec::write_bytes;
use crate::crypto::sha256;
use crate::error::StateError;
use crate::types::{Address, Hash32, Nonce, STATE_DOMAIN_TAG};

/// Balance and nonce for a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Account {
    pub balance: u64,
    pub nonce: Nonce,
}

impl Account {
    fn is_zero(&self) -> bool {
        self.balance == 0 && self.nonce == 0
    }
}

/// The full account state at some point in the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    accounts: BTreeMap<Address, Account>,
}

impl State {
    /// An empty state — every address reads as balance 0, nonce 0.
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    /// Construct state from an explicit initial allocation, as used for
    /// genesis. Addresses appearing more than once accumulate their
    /// balances; a zero balance with zero nonce leaves the address absent.
    /// Checked arithmetic only: a duplicate-address sum that would overflow
    /// `u64` is an error, never silently wrapped or saturated.
    pub fn from_allocation(allocation: &[(Address, u64)]) -> Result<Self, StateError> {
        let mut state = Self::new();
        for (address, balance) in allocation {
            let current = state.get_balance(address);
            let sum = current
                .checked_add(*balance)
                .ok_or(StateError::AllocationOverflow {
                    address: *address,
                    balance: current,
                    amount: *balance,
                })?;
            state.set_balance(address, sum);
        }
        Ok(state)
    }

    /// Balance of `address`, or 0 if the address has never held a balance.
    pub fn get_balance(&self, address: &Address) -> u64 {
        self.accounts.get(address).map(|a| a.balance).unwrap_or(0)
    }

    /// Nonce of `address`, or 0 if the address has never sent a transaction.
    pub fn get_nonce(&self, address: &Address) -> Nonce {
        self.accounts.get(address).map(|a| a.nonce).unwrap_or(0)
    }

    /// Set `address`'s balance, pruning the entry if it becomes all-zero.
    pub fn set_balance(&mut self, address: &Address, balance: u64) {
        self.upsert(address, |account| account.balance = balance);
    }

    /// Set `address`'s nonce, pruning the entry if it becomes all-zero.
    pub fn set_nonce(&mut self, address: &Address, nonce: Nonce) {
        self.upsert(address, |account| account.nonce = nonce);
    }

    fn upsert(&mut self, address: &Address, f: impl FnOnce(&mut Account)) {
        let mut account = self.accounts.get(address).copied().unwrap_or_default();
        f(&mut account);
        if account.is_zero() {
            self.accounts.remove(address);
        } else {
            self.accounts.insert(*address, account);
        }
    }

    /// Number of addresses currently holding a nonzero balance or nonce.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Compute the state root: `sha256("STATEv1" || count_le || entries)`,
    /// where entries are `address || balance_le || nonce_le` for every
    /// address with a nonzero balance or nonce, in ascending address order
    /// (spec §4.4).
    pub fn state_root(&self) -> Hash32 {
        let mut buf = Vec::with_capacity(7 + 8 + self.accounts.len() * (32 + 8 + 8));
        write_bytes(&mut buf, STATE_DOMAIN_TAG);
        crate::codec::write_u64(&mut buf, self.accounts.len() as u64);
        for (address, account) in &self.accounts {
            write_bytes(&mut buf, address);
            crate::codec::write_u64(&mut buf, account.balance);
            crate::codec::write_u64(&mut buf, account.nonce);
        }
        sha256(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        [byte; 32]
    }

    #[test]
    fn test_absent_address_reads_zero() {
        let state = State::new();
        assert_eq!(state.get_balance(&addr(1)), 0);
        assert_eq!(state.get_nonce(&addr(1)), 0);
    }

    #[test]
    fn test_empty_state_root_is_deterministic() {
        let a = State::new();
        let b = State::new();
        assert_eq!(a.state_root(), b.state_root());
    }

    #[test]
    fn test_returning_to_zero_prunes_entry() {
        let mut state = State::new();
        state.set_balance(&addr(1), 10);
        assert_eq!(state.len(), 1);
        state.set_balance(&addr(1), 0);
        assert_eq!(state.len(), 0);
        assert!(state.is_empty());
    }

    #[test]
    fn test_zero_balance_nonzero_nonce_keeps_entry() {
        let mut state = State::new();
        state.set_nonce(&addr(1), 3);
        assert_eq!(state.len(), 1);
        assert_eq!(state.get_balance(&addr(1)), 0);
    }

    #[test]
    fn test_state_root_independent_of_write_order() {
        let mut a = State::new();
        a.set_balance(&addr(1), 10);
        a.set_balance(&addr(2), 20);

        let mut b = State::new();
        b.set_balance(&addr(2), 20);
        b.set_balance(&addr(1), 10);

        assert_eq!(a.state_root(), b.state_root());
    }

    #[test]
    fn test_state_root_sensitive_to_balance() {
        let mut a = State::new();
        a.set_balance(&addr(1), 10);
        let mut b = State::new();
        b.set_balance(&addr(1), 11);
        assert_ne!(a.state_root(), b.state_root());
    }

    #[test]
    fn test_state_root_insensitive_to_ever_touched_history() {
        let mut a = State::new();
        a.set_balance(&addr(1), 5);
        a.set_balance(&addr(1), 0);

        let b = State::new();
        assert_eq!(a.state_root(), b.state_root());
    }

    #[test]
    fn test_from_allocation_accumulates_duplicates() {
        let state = State::from_allocation(&[(addr(1), 10), (addr(1), 5)]).unwrap();
        assert_eq!(state.get_balance(&addr(1)), 15);
    }

    #[test]
    fn test_from_allocation_rejects_duplicate_overflow() {
        let err = State::from_allocation(&[(addr(1), u64::MAX), (addr(1), 1)]).unwrap_err();
        assert_eq!(
            err,
            StateError::AllocationOverflow {
                address: addr(1),
                balance: u64::MAX,
                amount: 1,
            }
        );
    }
}
