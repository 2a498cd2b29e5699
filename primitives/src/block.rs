//! Transaction and block data types for the Cakechain protocol core (C5, C6).
//!
//! A `Transaction` moves `amount` from `from` to `to`, authenticated by an
//! Ed25519 signature over its signing bytes. A `Block` is an ordered list
//! of transactions applied against the parent state, plus the resulting
//! state root. Both types carry their own canonical byte encodings —
//! see spec §4.1, §4.2.

use crate::codec::{write_bytes, write_u64, Reader};
use crate::crypto::{ed25519_verify, sha256};
use crate::error::{CodecError, TransactionError};
use crate::types::{
    Address, BlockHeight, ChainId, Hash32, Nonce, Signature, BLOCK_DOMAIN_TAG, TX_DOMAIN_TAG,
};

/// A signed transfer of `amount` from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub from: Address,
    pub to: Address,
    pub amount: u64,
    pub nonce: Nonce,
    pub signature: Signature,
}

impl Transaction {
    /// Bytes signed by the sender: `"TXv1" || chain_id_le || from || to ||
    /// amount_le || nonce_le`. Excludes the signature itself (spec §4.2).
    pub fn signing_bytes(&self, chain_id: ChainId) -> Vec<u8> {
        let mut buf = Vec::with_capacity(crate::types::SIGNING_BYTES_LEN);
        write_bytes(&mut buf, TX_DOMAIN_TAG);
        write_u64(&mut buf, chain_id);
        write_bytes(&mut buf, &self.from);
        write_bytes(&mut buf, &self.to);
        write_u64(&mut buf, self.amount);
        write_u64(&mut buf, self.nonce);
        buf
    }

    /// Bytes stored and hashed as part of a block: `from || to || amount_le
    /// || nonce_le || signature`. Includes the signature, excludes the
    /// `TXv1` domain tag (the tag only scopes the signed message, not the
    /// at-rest encoding).
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(crate::types::CANONICAL_TX_LEN);
        write_bytes(&mut buf, &self.from);
        write_bytes(&mut buf, &self.to);
        write_u64(&mut buf, self.amount);
        write_u64(&mut buf, self.nonce);
        write_bytes(&mut buf, &self.signature);
        buf
    }

    /// Decode a transaction from its canonical bytes.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(data);
        let from = r.read_address()?;
        let to = r.read_address()?;
        let amount = r.read_u64()?;
        let nonce = r.read_u64()?;
        let signature = r.read_signature()?;
        if !r.is_exhausted() {
            return Err(CodecError::TrailingBytes);
        }
        Ok(Self {
            from,
            to,
            amount,
            nonce,
            signature,
        })
    }

    /// Checks that depend only on the transaction's own fields, in the
    /// normative order: amount-is-zero before self-transfer (spec §4.4).
    /// Signature, nonce, and balance checks require chain state and are
    /// performed by the engine, not here.
    pub fn check_static_validity(&self) -> Result<(), TransactionError> {
        if self.amount == 0 {
            return Err(TransactionError::AmountZero);
        }
        if self.from == self.to {
            return Err(TransactionError::SelfTransfer);
        }
        Ok(())
    }

    /// Verify the Ed25519 signature against `from` as the signing key.
    pub fn verify_signature(&self, chain_id: ChainId) -> bool {
        let message = self.signing_bytes(chain_id);
        ed25519_verify(&self.from, &message, &self.signature)
    }
}

/// An ordered batch of transactions extending the chain by one height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub parent_hash: Hash32,
    pub height: BlockHeight,
    pub txs: Vec<Transaction>,
    pub state_root: Hash32,
}

impl Block {
    /// Canonical bytes: `"BLOCKv1" || parent_hash || height_le ||
    /// tx_count_le || tx_0.canonical_bytes() || ... || state_root`
    /// (spec §4.2).
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            7 + 32 + 8 + 8 + self.txs.len() * crate::types::CANONICAL_TX_LEN + 32,
        );
        write_bytes(&mut buf, BLOCK_DOMAIN_TAG);
        write_bytes(&mut buf, &self.parent_hash);
        write_u64(&mut buf, self.height);
        write_u64(&mut buf, self.txs.len() as u64);
        for tx in &self.txs {
            write_bytes(&mut buf, &tx.canonical_bytes());
        }
        write_bytes(&mut buf, &self.state_root);
        buf
    }

    /// Block hash: `sha256(canonical_bytes())`.
    pub fn hash(&self) -> Hash32 {
        sha256(&self.canonical_bytes())
    }

    /// Decode a block from its canonical bytes.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(data);
        r.expect_tag(BLOCK_DOMAIN_TAG)?;
        let parent_hash = r.read_hash()?;
        let height = r.read_u64()?;
        let tx_count = r.read_u64()?;
        let mut txs = Vec::with_capacity(tx_count as usize);
        for _ in 0..tx_count {
            let tx_bytes = r.read_bytes(crate::types::CANONICAL_TX_LEN)?;
            txs.push(Transaction::decode(tx_bytes)?);
        }
        let state_root = r.read_hash()?;
        if !r.is_exhausted() {
            return Err(CodecError::TrailingBytes);
        }
        Ok(Self {
            parent_hash,
            height,
            txs,
            state_root,
        })
    }
}
