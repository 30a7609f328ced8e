//! # huffcode
//!
//! Reversible text compression with static Huffman coding.
//!
//! ```rust
//! use huffcode::HuffmanCodec;
//!
//! let mut codec = HuffmanCodec::new();
//! let bits = codec.encode("abb")?;
//! assert_eq!(codec.decode(&bits, true)?, "abb");
//!
//! let bytes = codec.to_artifact()?.to_bytes()?;
//! assert_eq!(huffcode::HuffmanArtifact::from_bytes(&bytes)?.decode()?, "abb");
//! # Ok::<(), huffcode::Error>(())
//! ```

pub mod cs;
pub mod error;

pub use cs::compression;
pub use cs::compression::huffman::{
    CodeTable, FrequencyTable, HuffmanArtifact, HuffmanCodec, HuffmanCompressor, HuffmanConfig,
    HuffmanTree, Statistics, Symbol,
};
pub use error::{Error, Result};
