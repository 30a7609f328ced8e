use bitvec::prelude::*;

use super::artifact::HuffmanArtifact;
use super::bits::{pack, parse_bit_str, unpack, Bits};
use super::codes::CodeTable;
use super::config::HuffmanConfig;
use super::frequency::{symbols, FrequencyTable, Symbol};
use super::stats::Statistics;
use super::tree::HuffmanTree;
use crate::error::{Error, Result};

/// Everything derived while encoding one text.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// Code bits of the text followed by the end marker's code.
    pub bits: Bits,
    pub frequencies: FrequencyTable,
    pub tree: HuffmanTree,
    pub codes: CodeTable,
    /// Number of symbols in the text, end marker excluded.
    pub symbol_count: usize,
}

impl Encoded {
    /// The bits packed into bytes, least-significant bit first.
    pub fn packed(&self) -> Vec<u8> {
        pack(&self.bits)
    }
}

/// Builds the frequency table, tree and code table for `text` and encodes it,
/// end marker included.
pub fn huffman_encode(text: &str) -> Result<Encoded> {
    let frequencies = FrequencyTable::from_text(text);
    let tree = HuffmanTree::build(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);
    let bits = codes.encode_symbols(symbols(text).chain(std::iter::once(Symbol::EndMarker)))?;
    Ok(Encoded {
        bits,
        symbol_count: frequencies.total() - 1,
        frequencies,
        tree,
        codes,
    })
}

/// Decodes an end-marker terminated bit sequence using the provided tree.
pub fn huffman_decode(bits: &BitSlice<u8, Lsb0>, tree: &HuffmanTree) -> Result<String> {
    tree.decode(bits, true)
}

#[derive(Debug, Clone)]
struct LastEncode {
    original: String,
    encoded: Encoded,
    packed: Vec<u8>,
}

/// An encode/decode session.
///
/// The codec keeps the tree and code table of its most recent encode (or of a
/// loaded code table) so later calls can decode against them. Every encode
/// discards the previous state first.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: HuffmanConfig,
    tree: Option<HuffmanTree>,
    codes: Option<CodeTable>,
    last: Option<LastEncode>,
}

impl HuffmanCodec {
    /// Creates an empty session with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session after validating `config`.
    pub fn with_config(config: HuffmanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }

    /// Drops all session state.
    pub fn reset(&mut self) {
        self.tree = None;
        self.codes = None;
        self.last = None;
    }

    /// Encodes `text`, replacing any previous session state, and returns the
    /// bit sequence (end marker included).
    ///
    /// Any text is accepted unless the config sets an explicit
    /// `max_input_len`, in which case longer text fails with `InputTooLarge`.
    pub fn encode(&mut self, text: &str) -> Result<Bits> {
        self.reset();

        let len = text.encode_utf16().count();
        if len > self.config.max_input_len {
            log::warn!(
                "rejecting input of {} symbols (limit {})",
                len,
                self.config.max_input_len
            );
            return Err(Error::InputTooLarge {
                len,
                max: self.config.max_input_len,
            });
        }

        let encoded = huffman_encode(text)?;
        let packed = encoded.packed();
        log::debug!(
            "encoded {} symbols ({} distinct) into {} bits, {} bytes",
            encoded.symbol_count,
            encoded.frequencies.len(),
            encoded.bits.len(),
            packed.len()
        );

        let bits = encoded.bits.clone();
        self.tree = Some(encoded.tree.clone());
        self.codes = Some(encoded.codes.clone());
        self.last = Some(LastEncode {
            original: text.to_string(),
            encoded,
            packed,
        });
        Ok(bits)
    }

    /// Replaces the session state with a tree rebuilt from `codes`, so that
    /// data encoded elsewhere can be decoded.
    pub fn load_code_table(&mut self, codes: CodeTable) -> Result<()> {
        self.reset();
        let tree = HuffmanTree::from_code_table(&codes)?;
        log::debug!("loaded code table with {} entries", codes.len());
        self.tree = Some(tree);
        self.codes = Some(codes);
        Ok(())
    }

    fn current_tree(&self) -> Result<&HuffmanTree> {
        self.tree.as_ref().ok_or(Error::NoTreeAvailable)
    }

    /// Decodes a bit sequence against the session tree.
    pub fn decode(&self, bits: &BitSlice<u8, Lsb0>, end_marker_present: bool) -> Result<String> {
        let text = self.current_tree()?.decode(bits, end_marker_present)?;
        log::debug!("decoded {} bits into {} bytes of text", bits.len(), text.len());
        Ok(text)
    }

    /// Decodes a textual bit string such as `"0010111"`.
    pub fn decode_bit_str(&self, bit_str: &str, end_marker_present: bool) -> Result<String> {
        let tree = self.current_tree()?;
        let bits = parse_bit_str(bit_str)?;
        tree.decode(&bits, end_marker_present)
    }

    /// Unpacks `bit_len` bits from `bytes` and decodes them, stopping at the
    /// end marker.
    pub fn decode_from_packed_bytes(&self, bytes: &[u8], bit_len: usize) -> Result<String> {
        let tree = self.current_tree()?;
        let bits = unpack(bytes, bit_len)?;
        tree.decode(&bits, true)
    }

    /// Metrics of the most recent encode; all zero when there is none.
    pub fn statistics(&self) -> Statistics {
        self.last.as_ref().map_or_else(Statistics::default, |last| {
            Statistics::from_counts(
                last.encoded.symbol_count,
                last.encoded.bits.len(),
                self.config.baseline_bits,
            )
        })
    }

    /// Bundles the code table and packed payload of the most recent encode.
    pub fn to_artifact(&self) -> Result<HuffmanArtifact> {
        let last = self.last.as_ref().ok_or(Error::NoTreeAvailable)?;
        HuffmanArtifact::new(
            last.encoded.codes.clone(),
            last.packed.clone(),
            last.encoded.bits.len(),
        )
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn code_table(&self) -> Option<&CodeTable> {
        self.codes.as_ref()
    }

    pub fn frequency_table(&self) -> Option<&FrequencyTable> {
        self.last.as_ref().map(|last| &last.encoded.frequencies)
    }

    pub fn original_text(&self) -> Option<&str> {
        self.last.as_ref().map(|last| last.original.as_str())
    }

    pub fn bits(&self) -> Option<&BitSlice<u8, Lsb0>> {
        self.last.as_ref().map(|last| last.encoded.bits.as_bitslice())
    }

    pub fn packed_bytes(&self) -> Option<&[u8]> {
        self.last.as_ref().map(|last| last.packed.as_slice())
    }
}
