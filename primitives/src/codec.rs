//! Canonical byte encoding for the Cakechain protocol core.
//!
//! Every integer is exactly 8 bytes, little-endian. Fixed-width byte arrays
//! (`Address`, `Signature`, `Hash32`) are emitted verbatim. There are no
//! length prefixes, no variable-length integers, no delimiters, no text,
//! and no padding beyond the fixed widths stated here — see spec §4.1.
//!
//! Domain tags (`TXv1`, `STATEv1`, `BLOCKv1`) are raw ASCII bytes with no
//! terminator, prefixed to their respective byte strings to keep hashes of
//! one kind of structure from colliding with hashes of another.

use crate::error::CodecError;
use crate::types::{Address, Hash32, Signature};

/// A cursor for reading canonical bytes, failing on truncated input instead
/// of panicking.
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.pos + n > self.data.len() {
            return Err(CodecError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        let bytes = self.read_bytes(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    pub fn read_address(&mut self) -> Result<Address, CodecError> {
        let bytes = self.read_bytes(32)?;
        let mut addr = [0u8; 32];
        addr.copy_from_slice(bytes);
        Ok(addr)
    }

    pub fn read_hash(&mut self) -> Result<Hash32, CodecError> {
        let bytes = self.read_bytes(32)?;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(bytes);
        Ok(hash)
    }

    pub fn read_signature(&mut self) -> Result<Signature, CodecError> {
        let bytes = self.read_bytes(64)?;
        let mut sig = [0u8; 64];
        sig.copy_from_slice(bytes);
        Ok(sig)
    }

    /// Consume and verify a fixed-length domain tag.
    pub fn expect_tag(&mut self, tag: &[u8]) -> Result<(), CodecError> {
        let bytes = self.read_bytes(tag.len())?;
        if bytes != tag {
            return Err(CodecError::BadDomainTag);
        }
        Ok(())
    }

    /// True once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.data.len()
    }
}

pub fn write_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn write_bytes(buf: &mut Vec<u8>, v: &[u8]) {
    buf.extend_from_slice(v);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_roundtrip() {
        let mut buf = Vec::new();
        write_bytes(&mut buf, b"TXv1");
        write_u64(&mut buf, 42);
        write_bytes(&mut buf, &[0xAAu8; 32]);

        let mut r = Reader::new(&buf);
        r.expect_tag(b"TXv1").unwrap();
        assert_eq!(r.read_u64().unwrap(), 42);
        assert_eq!(r.read_address().unwrap(), [0xAAu8; 32]);
        assert!(r.is_exhausted());
    }

    #[test]
    fn test_reader_truncated() {
        let buf = vec![1, 2, 3];
        let mut r = Reader::new(&buf);
        assert!(matches!(r.read_u64(), Err(CodecError::UnexpectedEof)));
    }

    #[test]
    fn test_reader_bad_tag() {
        let buf = b"XXXX".to_vec();
        let mut r = Reader::new(&buf);
        assert!(matches!(r.expect_tag(b"TXv1"), Err(CodecError::BadDomainTag)));
    }

    #[test]
    fn test_remaining() {
        let buf = vec![0u8; 10];
        let mut r = Reader::new(&buf);
        assert_eq!(r.remaining(), 10);
        r.read_u64().unwrap();
        assert_eq!(r.remaining(), 2);
    }
}
