//! Self-contained compressed form that can be decoded without the session that
//! produced it.
//!
//! Layout (all integers big-endian):
//!
//! | bytes | content                              |
//! |-------|--------------------------------------|
//! | 4     | byte length `n` of the code table    |
//! | 4     | exact bit length `b` of the payload  |
//! | n     | code table as JSON                   |
//! | ⌈b/8⌉ | packed payload, LSB first per byte   |

use super::bits::{packed_len, unpack};
use super::codec::huffman_encode;
use super::codes::CodeTable;
use super::tree::HuffmanTree;
use crate::cs::compression::Compression;
use crate::error::{Error, Result};

/// Size of the fixed header.
pub const HEADER_LEN: usize = 8;

/// A code table together with the packed bits it decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanArtifact {
    codes: CodeTable,
    payload: Vec<u8>,
    bit_len: u32,
}

fn read_u32_be(data: &[u8], offset: usize) -> Result<u32> {
    data.get(offset..offset + 4)
        .and_then(|bytes| bytes.try_into().ok())
        .map(u32::from_be_bytes)
        .ok_or_else(|| Error::corrupt("artifact is shorter than its header"))
}

impl HuffmanArtifact {
    /// Bundles `codes` with a payload of exactly `packed_len(bit_len)` bytes.
    pub fn new(codes: CodeTable, payload: Vec<u8>, bit_len: usize) -> Result<Self> {
        let bit_len = u32::try_from(bit_len).map_err(|_| Error::InputTooLarge {
            len: bit_len,
            max: u32::MAX as usize,
        })?;
        if payload.len() != packed_len(bit_len as usize) {
            return Err(Error::corrupt(format!(
                "payload of {} bytes cannot hold exactly {} bits",
                payload.len(),
                bit_len
            )));
        }
        Ok(Self {
            codes,
            payload,
            bit_len,
        })
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.codes
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len as usize
    }

    /// Serializes header, code table and payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let table = self.codes.to_json()?;
        let table_len = u32::try_from(table.len()).map_err(|_| Error::InputTooLarge {
            len: table.len(),
            max: u32::MAX as usize,
        })?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + table.len() + self.payload.len());
        bytes.extend_from_slice(&table_len.to_be_bytes());
        bytes.extend_from_slice(&self.bit_len.to_be_bytes());
        bytes.extend_from_slice(&table);
        bytes.extend_from_slice(&self.payload);
        Ok(bytes)
    }

    /// Parses bytes written by [`HuffmanArtifact::to_bytes`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let table_len = read_u32_be(data, 0)? as usize;
        let bit_len = read_u32_be(data, 4)? as usize;

        let body = &data[HEADER_LEN..];
        if body.len() < table_len {
            return Err(Error::corrupt(format!(
                "code table needs {} bytes but only {} remain",
                table_len,
                body.len()
            )));
        }
        let (table, payload) = body.split_at(table_len);
        let codes = CodeTable::from_json(table)?;
        log::debug!(
            "parsed artifact: {} codes, {} payload bits in {} bytes",
            codes.len(),
            bit_len,
            payload.len()
        );
        Self::new(codes, payload.to_vec(), bit_len)
    }

    /// Rebuilds the tree from the code table and decodes the payload.
    pub fn decode(&self) -> Result<String> {
        let tree = HuffmanTree::from_code_table(&self.codes)?;
        let bits = unpack(&self.payload, self.bit_len())?;
        tree.decode(&bits, true)
    }
}

/// Stateless compressor producing [`HuffmanArtifact`] bytes from UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCompressor;

impl Compression for HuffmanCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::corrupt(format!("input is not valid UTF-8: {}", e)))?;
        let encoded = huffman_encode(text)?;
        let packed = encoded.packed();
        HuffmanArtifact::new(encoded.codes, packed, encoded.bits.len())?.to_bytes()
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(HuffmanArtifact::from_bytes(data)?.decode()?.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::compression::huffman::HuffmanCodec;

    #[test]
    fn test_header_layout() {
        let mut codec = HuffmanCodec::new();
        codec.encode("abb").unwrap();
        let artifact = codec.to_artifact().unwrap();
        let bytes = artifact.to_bytes().unwrap();

        let table_len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let bit_len = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(bit_len, 6);
        assert_eq!(bytes.len(), HEADER_LEN + table_len + 1);
        assert_eq!(bytes[bytes.len() - 1], 0b0010_1100);
    }

    #[test]
    fn test_artifact_roundtrip() {
        let input = "It was the best of times, it was the worst of times.";
        let mut codec = HuffmanCodec::new();
        codec.encode(input).unwrap();
        let bytes = codec.to_artifact().unwrap().to_bytes().unwrap();

        let parsed = HuffmanArtifact::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.code_table(), codec.code_table().unwrap());
        assert_eq!(parsed.decode().unwrap(), input);
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            HuffmanArtifact::from_bytes(&[0, 0, 0]),
            Err(Error::CorruptInput(_))
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = HuffmanCompressor.compress(b"some text to squeeze").unwrap();
        let result = HuffmanArtifact::from_bytes(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(Error::CorruptInput(_))));
    }

    #[test]
    fn test_table_length_past_end() {
        let mut bytes = vec![0, 0, 1, 0, 0, 0, 0, 8];
        bytes.extend_from_slice(b"[]");
        assert!(matches!(
            HuffmanArtifact::from_bytes(&bytes),
            Err(Error::CorruptInput(_))
        ));
    }

    #[test]
    fn test_malformed_table_json() {
        let mut bytes = vec![0, 0, 0, 3, 0, 0, 0, 0];
        bytes.extend_from_slice(b"{x}");
        assert!(matches!(
            HuffmanArtifact::from_bytes(&bytes),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_new_checks_payload_size() {
        let encoded = huffman_encode("abc").unwrap();
        assert!(HuffmanArtifact::new(encoded.codes, vec![0, 0, 0], 3).is_err());
    }

    #[test]
    fn test_compression_trait_roundtrip() {
        let input = "Ünïcödé and plain ASCII, with 😀 emoji";
        let compressed = HuffmanCompressor.compress(input.as_bytes()).unwrap();
        let restored = HuffmanCompressor.decompress(&compressed).unwrap();
        assert_eq!(restored, input.as_bytes());
    }

    #[test]
    fn test_compress_rejects_invalid_utf8() {
        assert!(matches!(
            HuffmanCompressor.compress(&[0xFF, 0xFE]),
            Err(Error::CorruptInput(_))
        ));
    }
}
