use std::collections::BTreeMap;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use super::bits::{parse_bit_str, to_bit_string, Bits};
use super::frequency::{FrequencyTable, Symbol};
use super::tree::{HuffmanNode, HuffmanTree};
use crate::error::{Error, Result};

/// Mapping from symbol to its Huffman code (root-to-leaf path, left = 0,
/// right = 1).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Bits>,
}

/// One serialized code table entry.
#[derive(Debug, Serialize, Deserialize)]
struct CodeEntry {
    symbol: Symbol,
    code: String,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks the tree depth-first and records the path to every leaf.
    ///
    /// A root that is itself a leaf gets the code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(tree.root(), Bits::new())];
        while let Some((id, path)) = stack.pop() {
            match tree.node(id) {
                HuffmanNode::Leaf { symbol, .. } => {
                    let code = if path.is_empty() {
                        bitvec![u8, Lsb0; 0]
                    } else {
                        path
                    };
                    codes.insert(*symbol, code);
                }
                HuffmanNode::Internal { children, .. } => {
                    for (bit, child) in children.iter().enumerate() {
                        if let Some(child) = child {
                            let mut child_path = path.clone();
                            child_path.push(bit == 1);
                            stack.push((*child, child_path));
                        }
                    }
                }
            }
        }
        Self { codes }
    }

    /// Sets the code for `symbol`, replacing any previous one.
    pub fn insert(&mut self, symbol: Symbol, code: Bits) {
        self.codes.insert(symbol, code);
    }

    pub fn get(&self, symbol: Symbol) -> Option<&BitSlice<u8, Lsb0>> {
        self.codes.get(&symbol).map(|code| code.as_bitslice())
    }

    /// The code for `symbol` rendered as a string of `0` and `1`.
    pub fn code_string(&self, symbol: Symbol) -> Option<String> {
        self.get(symbol).map(to_bit_string)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Lsb0>)> + '_ {
        self.codes.iter().map(|(symbol, code)| (*symbol, code.as_bitslice()))
    }

    /// Entries sorted by ascending code length.
    pub fn by_code_length(&self) -> Vec<(Symbol, String)> {
        let mut entries: Vec<(Symbol, String)> = self
            .iter()
            .map(|(symbol, code)| (symbol, to_bit_string(code)))
            .collect();
        entries.sort_by_key(|(_, code)| code.len());
        entries
    }

    /// Checks that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Bits> = self.codes.values().collect();
        // after a lexicographic sort, a prefix sorts directly before the codes
        // that extend it
        codes.sort_by(|a, b| a.as_bitslice().cmp(b.as_bitslice()));
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0].as_bitslice()))
    }

    /// Total encoded length in bits of the symbols counted in `freq_table`.
    pub fn encoded_len(&self, freq_table: &FrequencyTable) -> usize {
        freq_table
            .iter()
            .map(|(symbol, count)| count * self.get(symbol).map_or(0, |code| code.len()))
            .sum()
    }

    /// Concatenates the codes of `symbols`, in order.
    pub fn encode_symbols<I>(&self, symbols: I) -> Result<Bits>
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut bits = Bits::new();
        for symbol in symbols {
            let code = self.get(symbol).ok_or_else(|| {
                Error::corrupt(format!("symbol {} has no code in this table", symbol))
            })?;
            bits.extend_from_bitslice(code);
        }
        Ok(bits)
    }

    /// Serializes the table as a JSON array of `{symbol, code}` objects.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let entries: Vec<CodeEntry> = self
            .iter()
            .map(|(symbol, code)| CodeEntry {
                symbol,
                code: to_bit_string(code),
            })
            .collect();
        Ok(serde_json::to_vec(&entries)?)
    }

    /// Parses a table written by [`CodeTable::to_json`].
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let entries: Vec<CodeEntry> = serde_json::from_slice(data)?;
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.symbol, parse_bit_str(&entry.code)?);
        }
        Ok(table)
    }
}
