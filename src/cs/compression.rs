//! Compression algorithms implementation.
//!
//! This module provides a static Huffman codec for text:
//! - Frequency analysis with an end-of-stream marker
//! - Deterministic Huffman tree construction
//! - Code table generation and prefix-free decoding
//! - LSB-first bit packing and a self-describing artifact format
//!
//! # Examples
//!
//! ```rust
//! use huffcode::cs::compression::{Compression, HuffmanCompressor};
//!
//! let packed = HuffmanCompressor.compress(b"hello, huffman").unwrap();
//! let restored = HuffmanCompressor.decompress(&packed).unwrap();
//! assert_eq!(restored, b"hello, huffman");
//! ```

pub use crate::error::Result;

/// Trait for compression algorithms
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

pub mod huffman;
pub use huffman::{
    huffman_decode, huffman_encode, CodeTable, FrequencyTable, HuffmanArtifact, HuffmanCodec,
    HuffmanCompressor, HuffmanConfig, HuffmanNode, HuffmanTree, Statistics, Symbol,
};
