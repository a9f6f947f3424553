// Packed, fixed-size bit container.
//
// Bit `i` lives in byte `i / 8` at position `i % 8`, counting from the
// least-significant bit. The encoder writes payload bits in this order
// and the decoder reads them back the same way.

use thiserror::Error;

/// Out-of-range bit access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bit index {index} out of range for sequence of {len} bits")]
pub struct BitIndexError {
    pub index: usize,
    pub len: usize,
}

/// Number of bytes needed to hold `bit_count` bits.
#[inline]
pub const fn bytes_for_bits(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}

/// Dense, bounds-checked sequence of bits.
///
/// The size is fixed at construction; there is no push or resize. The
/// logical length may be shorter than the backing storage, in which case
/// the trailing padding bits are zero and never addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSequence {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitSequence {
    /// Allocate `bit_count` bits, all cleared.
    pub fn new(bit_count: usize) -> Self {
        Self {
            bytes: vec![0u8; bytes_for_bits(bit_count)],
            bit_len: bit_count,
        }
    }

    /// Read the bit at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<bool, BitIndexError> {
        self.check(index)?;
        Ok(self.bytes[index / 8] & (1 << (index % 8)) != 0)
    }

    /// Set or clear the bit at `index`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) -> Result<(), BitIndexError> {
        self.check(index)?;
        let mask = 1u8 << (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
        Ok(())
    }

    /// Logical length in bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Storage length in bytes (the on-disk payload size).
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[inline]
    fn check(&self, index: usize) -> Result<(), BitIndexError> {
        if index < self.bit_len {
            Ok(())
        } else {
            Err(BitIndexError {
                index,
                len: self.bit_len,
            })
        }
    }
}

/// Read-only view of packed bits borrowed from a buffer, in the same bit
/// order as `BitSequence`. Every bit of every byte is addressable.
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Read the bit at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<bool, BitIndexError> {
        match self.bytes.get(index / 8) {
            Some(byte) => Ok(byte & (1 << (index % 8)) != 0),
            None => Err(BitIndexError {
                index,
                len: self.bit_len(),
            }),
        }
    }

    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }
}
