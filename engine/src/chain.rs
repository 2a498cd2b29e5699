//! The chain engine: owns the tip and current state, and accepts only
//! tip-extending blocks (spec §4.6, §4.7).
//!
//! `Chain` is a pure synchronous state machine with a single logical
//! owner — it gives no internal concurrency guarantees of its own. An
//! embedder that shares a `Chain` across threads must serialize access
//! (spec §6).

use cakechain_primitives::types::ZERO_HASH;
use cakechain_primitives::{Address, BlockError, BlockHeight, ChainId, Hash32, State, StateError};
use cakechain_primitives::block::Block;

use crate::block as block_rules;

/// Configuration needed to construct a chain's genesis block.
///
/// Answers the question spec §4.6 leaves open: what the genesis
/// allocation actually is. Defaults to an empty allocation on the
/// default chain id, which an embedder overrides with its own funding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub chain_id: ChainId,
    pub initial_allocation: Vec<(Address, u64)>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: cakechain_primitives::DEFAULT_CHAIN_ID,
            initial_allocation: Vec::new(),
        }
    }
}

/// A deterministic account-based chain: current tip, current state, and
/// the logic to extend both by one validated block at a time.
#[derive(Debug, Clone)]
pub struct Chain {
    config: ChainConfig,
    genesis_hash: Hash32,
    tip_hash: Hash32,
    tip_height: BlockHeight,
    state: State,
}

impl Chain {
    /// Construct the genesis block from `config.initial_allocation` and
    /// build a chain whose tip is that genesis block (height 0).
    ///
    /// Fails if the allocation sums a duplicate address past `u64::MAX` —
    /// checked arithmetic only, never wrapped or saturated (spec §9).
    pub fn genesis(config: ChainConfig) -> Result<Self, StateError> {
        let state = State::from_allocation(&config.initial_allocation)?;
        let genesis_block = Block {
            parent_hash: ZERO_HASH,
            height: 0,
            txs: Vec::new(),
            state_root: state.state_root(),
        };
        let genesis_hash = genesis_block.hash();

        tracing::info!(
            hash = %cakechain_primitives::types::hash_to_hex(&genesis_hash),
            accounts = state.len(),
            "chain genesis constructed"
        );

        Ok(Self {
            config,
            genesis_hash,
            tip_hash: genesis_hash,
            tip_height: 0,
            state,
        })
    }

    pub fn chain_id(&self) -> ChainId {
        self.config.chain_id
    }

    pub fn genesis_hash(&self) -> Hash32 {
        self.genesis_hash
    }

    pub fn tip_hash(&self) -> Hash32 {
        self.tip_hash
    }

    pub fn tip_height(&self) -> BlockHeight {
        self.tip_height
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Validate `block` against the current tip and, on success, commit it
    /// as the new tip. On failure the chain is left exactly as it was —
    /// no fork is ever materialized (spec §4.6).
    pub fn submit_block(&mut self, block: &Block) -> Result<Hash32, BlockError> {
        let result = block_rules::validate_and_apply(
            block,
            self.config.chain_id,
            self.tip_hash,
            self.tip_height,
            &self.state,
        );

        match result {
            Ok(new_state) => {
                let hash = block.hash();
                tracing::info!(
                    height = block.height,
                    hash = %cakechain_primitives::types::hash_to_hex(&hash),
                    txs = block.txs.len(),
                    "block accepted"
                );
                self.state = new_state;
                self.tip_hash = hash;
                self.tip_height = block.height;
                Ok(hash)
            }
            Err(err) => {
                tracing::warn!(
                    height = block.height,
                    error = %err,
                    "block rejected"
                );
                Err(err)
            }
        }
    }
}
