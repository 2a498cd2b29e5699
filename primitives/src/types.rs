//! Core type aliases and constants for the Cakechain protocol core.
//!
//! These are the primitive wire types shared by the codec, crypto adapter,
//! state store, transaction module, block module, and chain engine.

/// 32-byte Ed25519 public key identifying an account.
pub type Address = [u8; 32];

/// 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// 32-byte opaque SHA-256 digest.
pub type Hash32 = [u8; 32];

/// Chain identifier, included in transaction signing bytes for domain
/// separation across independently-operated chains.
pub type ChainId = u64;

/// Token amount. All arithmetic on `Amount` is checked — overflow is an
/// error, never a wrap or a saturation.
pub type Amount = u64;

/// Per-sender sequence number.
pub type Nonce = u64;

/// Block height, monotonically increasing from genesis (0).
pub type BlockHeight = u64;

/// A zero-valued hash (32 zero bytes). Used as the genesis parent hash.
pub const ZERO_HASH: Hash32 = [0u8; 32];

/// A zero-valued address (32 zero bytes).
pub const ZERO_ADDRESS: Address = [0u8; 32];

/// Default chain id, used unless a `ChainConfig` overrides it.
pub const DEFAULT_CHAIN_ID: ChainId = 1;

/// Domain tag prefixing transaction signing bytes. 4 bytes, no terminator.
pub const TX_DOMAIN_TAG: &[u8; 4] = b"TXv1";

/// Domain tag prefixing state-root hashing input. 7 bytes, no terminator.
pub const STATE_DOMAIN_TAG: &[u8; 7] = b"STATEv1";

/// Domain tag prefixing block hashing input. 7 bytes, no terminator.
pub const BLOCK_DOMAIN_TAG: &[u8; 7] = b"BLOCKv1";

/// Byte length of transaction signing bytes: 4 + 8 + 32 + 32 + 8 + 8.
pub const SIGNING_BYTES_LEN: usize = 92;

/// Byte length of canonical transaction bytes: 32 + 32 + 8 + 8 + 64.
pub const CANONICAL_TX_LEN: usize = 144;

/// Convert a `Hash32` to a hex string for display and logging.
pub fn hash_to_hex(hash: &Hash32) -> String {
    let mut s = String::with_capacity(66);
    s.push_str("0x");
    for byte in hash {
        use core::fmt::Write;
        let _ = write!(s, "{:02x}", byte);
    }
    s
}
