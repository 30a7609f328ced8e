//! Static Huffman coding for text.
//!
//! Text is scanned one UTF-16 code unit at a time. Each encode counts symbol
//! frequencies, appends a single end marker, builds a Huffman tree with a
//! deterministic merge order, and emits the concatenated codes. The bits can be
//! packed into bytes (least-significant bit first) and decoded again from
//! either form.
//!
//! # Examples
//!
//! ```rust
//! use huffcode::cs::compression::huffman::HuffmanCodec;
//!
//! let mut codec = HuffmanCodec::new();
//! let bits = codec.encode("abracadabra").unwrap();
//! assert_eq!(codec.decode(&bits, true).unwrap(), "abracadabra");
//!
//! let stats = codec.statistics();
//! assert!(stats.space_saving_percent > 0.0);
//! ```

pub mod artifact;
pub mod bits;
pub mod codec;
pub mod codes;
pub mod config;
pub mod frequency;
pub mod stats;
pub mod tree;

#[cfg(test)]
mod tests;

pub use artifact::{HuffmanArtifact, HuffmanCompressor};
pub use bits::{pack, parse_bit_str, to_bit_string, unpack, Bits};
pub use codec::{huffman_decode, huffman_encode, Encoded, HuffmanCodec};
pub use codes::CodeTable;
pub use config::HuffmanConfig;
pub use frequency::{FrequencyTable, Symbol};
pub use stats::Statistics;
pub use tree::{HuffmanNode, HuffmanTree, NodeId};
