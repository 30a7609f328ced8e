//! Conversions between code bits, packed bytes and textual bit strings.
//!
//! Bytes are filled least-significant bit first. The final byte is padded
//! with zero bits, so the exact bit length has to travel with the bytes.

use bitvec::prelude::*;

use crate::error::{Error, Result};

/// A sequence of code bits, stored least-significant bit first in bytes.
pub type Bits = BitVec<u8, Lsb0>;

/// Number of bytes needed to hold `bit_len` bits.
pub fn packed_len(bit_len: usize) -> usize {
    bit_len.div_ceil(8)
}

/// Packs `bits` into bytes, zeroing the unused high bits of the last byte.
pub fn pack(bits: &BitSlice<u8, Lsb0>) -> Vec<u8> {
    let mut packed = Bits::with_capacity(bits.len());
    packed.extend_from_bitslice(bits);
    packed.set_uninitialized(false);
    packed.into_vec()
}

/// Unpacks the first `bit_len` bits of `bytes`.
///
/// Padding bits beyond `bit_len` are dropped; `bit_len` larger than the bytes
/// can hold is an error.
pub fn unpack(bytes: &[u8], bit_len: usize) -> Result<Bits> {
    let available = bytes.len() * 8;
    if bit_len > available {
        return Err(Error::corrupt(format!(
            "bit length {} exceeds the {} bits in {} packed bytes",
            bit_len,
            available,
            bytes.len()
        )));
    }
    Ok(bytes.view_bits::<Lsb0>()[..bit_len].to_bitvec())
}

/// Parses a string of `0` and `1` characters.
pub fn parse_bit_str(s: &str) -> Result<Bits> {
    s.chars()
        .enumerate()
        .map(|(position, ch)| match ch {
            '0' => Ok(false),
            '1' => Ok(true),
            found => Err(Error::InvalidBitString { position, found }),
        })
        .collect()
}

/// Renders bits as a string of `0` and `1` characters.
pub fn to_bit_string(bits: &BitSlice<u8, Lsb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}
